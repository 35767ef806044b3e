//! Constructors for every node kind, merge, and the composite macros.
//!
//! ```
//! use nebula_shape::prelude::*;
//! use serde_json::json;
//!
//! let point = tuple![number(), number()];
//! let shape = object! {
//!     label: string().min(1),
//!     points: array(&point).min(3),
//!     closed: boolean().default(false),
//! };
//!
//! let out = shape.parse_json(&json!({"label": "tri", "points": [[0, 0], [1, 0], [0, 1]]})).unwrap();
//! assert_eq!(out.get("closed"), Some(&Value::Bool(false)));
//! ```

use crate::schema::{
    ArraySchema, BooleanSchema, NullSchema, NumberSchema, ObjectSchema, Schema, StringSchema,
    TupleSchema, UndefinedSchema, UnionSchema,
};

/// Schema matching only `undefined`.
pub fn undefined() -> UndefinedSchema {
    UndefinedSchema::new()
}

/// Schema matching only `null`.
pub fn null() -> NullSchema {
    NullSchema::new()
}

pub fn boolean() -> BooleanSchema {
    BooleanSchema::new()
}

pub fn number() -> NumberSchema {
    NumberSchema::new()
}

pub fn string() -> StringSchema {
    StringSchema::new()
}

/// Sequence whose every element matches `element`.
pub fn array(element: impl Into<Schema>) -> ArraySchema {
    ArraySchema::new(element)
}

/// Record with the given fields. See also [`object!`](crate::object!).
pub fn object<K, S, I>(fields: I) -> ObjectSchema
where
    I: IntoIterator<Item = (K, S)>,
    K: Into<String>,
    S: Into<Schema>,
{
    ObjectSchema::from_fields(fields)
}

/// Fixed-arity sequence. See also [`tuple!`](crate::tuple!).
pub fn tuple<S, I>(items: I) -> TupleSchema
where
    I: IntoIterator<Item = S>,
    S: Into<Schema>,
{
    TupleSchema::new(items)
}

/// First-match alternatives. See also [`union!`](crate::union!).
pub fn union<S, I>(candidates: I) -> UnionSchema
where
    I: IntoIterator<Item = S>,
    S: Into<Schema>,
{
    UnionSchema::new(candidates)
}

// ============================================================================
// MERGE
// ============================================================================

/// Node kinds that can be combined into one.
pub trait Merge {
    /// Combines `self` with `other`; `other` wins where they overlap.
    fn merge(&self, other: &Self) -> Self;
}

impl Merge for ObjectSchema {
    fn merge(&self, other: &Self) -> Self {
        Self::merge(self, other)
    }
}

impl Merge for UnionSchema {
    fn merge(&self, other: &Self) -> Self {
        Self::merge(self, other)
    }
}

/// Free-function form of [`Merge::merge`].
pub fn merge<M: Merge>(a: &M, b: &M) -> M {
    a.merge(b)
}

// ============================================================================
// MACROS
// ============================================================================

#[doc(hidden)]
#[macro_export]
macro_rules! __field_name {
    ($name:ident) => {
        stringify!($name)
    };
    ($name:literal) => {
        $name
    };
}

/// Builds an [`ObjectSchema`](crate::ObjectSchema) from `name: schema` pairs.
///
/// Names are identifiers or string literals.
///
/// ```
/// use nebula_shape::prelude::*;
///
/// let schema = object! { id: number(), "display-name": string().optional() };
/// assert_eq!(schema.keys().collect::<Vec<_>>(), ["id", "display-name"]);
/// ```
#[macro_export]
macro_rules! object {
    () => {
        $crate::ObjectSchema::new()
    };
    ($($name:tt : $schema:expr),+ $(,)?) => {
        $crate::ObjectSchema::from_fields([
            $(($crate::__field_name!($name), $crate::Schema::from($schema))),+
        ])
    };
}

/// Builds a [`UnionSchema`](crate::UnionSchema) from candidates of any kind.
#[macro_export]
macro_rules! union {
    () => {
        $crate::UnionSchema::new(::std::iter::empty::<$crate::Schema>())
    };
    ($($candidate:expr),+ $(,)?) => {
        $crate::UnionSchema::new([$($crate::Schema::from($candidate)),+])
    };
}

/// Builds a [`TupleSchema`](crate::TupleSchema) from positions of any kind.
#[macro_export]
macro_rules! tuple {
    () => {
        $crate::TupleSchema::new(::std::iter::empty::<$crate::Schema>())
    };
    ($($item:expr),+ $(,)?) => {
        $crate::TupleSchema::new([$($crate::Schema::from($item)),+])
    };
}

//! Statically typed parse results.
//!
//! A [`Typed<T>`] pairs a schema with a conversion from the parsed [`Value`]
//! into `T`, so the Rust type of a successful parse follows the schema's
//! structure:
//!
//! | schema                    | output                 |
//! |---------------------------|------------------------|
//! | `boolean()`               | `bool`                 |
//! | `number()`                | `f64`                  |
//! | `string()`                | `String`               |
//! | `null()` / `undefined()`  | `()`                   |
//! | `array(T)`                | `Vec<T>`               |
//! | `tuple((A, B))`           | `(A, B)`               |
//! | `union2(A, B)`            | [`Union2<A, B>`]       |
//! | `record::<R>(object)`     | `R: DeserializeOwned`  |
//! | `.optional()` / `.nullable()` / `.nullish()` | `Option<T>` |
//!
//! ```
//! use nebula_shape::prelude::*;
//! use nebula_shape::typed;
//!
//! let pair = typed::tuple((string().typed(), number().typed()));
//! let (name, score) = pair.parse(&Value::from(vec![Value::from("a"), Value::from(2)])).unwrap();
//! assert_eq!(name, "a");
//! assert_eq!(score, 2.0);
//! ```

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::engine::Parse;
use crate::error::{ConstraintKind, FailureKind, ParseError, PathSegment, Subject};
use crate::options::{ParseOptions, UnionFailures};
use crate::result::SafeParse;
use crate::schema::{
    ArraySchema, BooleanSchema, Bounds, ModifierExt, NullSchema, NumberSchema, ObjectSchema, Schema,
    StringSchema, TupleSchema, UndefinedSchema, UnionSchema,
};
use crate::value::Value;

/// What a conversion receives: the schema's output, the input it was parsed
/// from, and the options of the running parse.
struct Parsed<'a> {
    input: &'a Value,
    value: Value,
    options: &'a ParseOptions,
}

impl Parsed<'_> {
    /// Input to re-run candidates against. An absent input stands for
    /// whatever the schema substituted for it.
    fn source(&self) -> &Value {
        if self.input.is_undefined() {
            &self.value
        } else {
            self.input
        }
    }
}

type Convert<T> = Arc<dyn Fn(Parsed<'_>) -> Result<T, ParseError> + Send + Sync>;

/// A schema whose successful parse yields a `T`.
pub struct Typed<T> {
    schema: Schema,
    convert: Convert<T>,
}

impl<T> Clone for Typed<T> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema.clone(),
            convert: Arc::clone(&self.convert),
        }
    }
}

impl<T> fmt::Debug for Typed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typed")
            .field("schema", &self.schema)
            .field("output", &std::any::type_name::<T>())
            .finish()
    }
}

fn unexpected(expected: &str, found: &Value) -> ParseError {
    ParseError::conversion(format!("expected {expected}, found {}", found.kind()))
}

impl<T: 'static> Typed<T> {
    /// Pairs `schema` with a custom output conversion.
    pub fn new<F>(schema: impl Into<Schema>, convert: F) -> Self
    where
        F: Fn(Value) -> Result<T, ParseError> + Send + Sync + 'static,
    {
        Self::from_parts(schema.into(), move |parsed: Parsed<'_>| convert(parsed.value))
    }

    fn from_parts<F>(schema: Schema, convert: F) -> Self
    where
        F: Fn(Parsed<'_>) -> Result<T, ParseError> + Send + Sync + 'static,
    {
        Self {
            schema,
            convert: Arc::new(convert),
        }
    }

    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Converts an already-parsed value.
    pub fn convert(&self, value: Value) -> Result<T, ParseError> {
        let input = value.clone();
        (self.convert)(Parsed {
            input: &input,
            value,
            options: &ParseOptions::default(),
        })
    }

    pub fn parse(&self, input: &Value) -> Result<T, ParseError> {
        self.parse_with(input, &ParseOptions::default())
    }

    pub fn parse_with(&self, input: &Value, options: &ParseOptions) -> Result<T, ParseError> {
        self.commit(input, options)?
    }

    /// Outer error: the schema rejected `input`. Inner result: the
    /// conversion of what the schema accepted.
    fn commit(
        &self,
        input: &Value,
        options: &ParseOptions,
    ) -> Result<Result<T, ParseError>, ParseError> {
        let value = self.schema.parse_with(input, options)?;
        Ok((self.convert)(Parsed {
            input,
            value,
            options,
        }))
    }

    pub fn parse_safe(&self, input: &Value) -> SafeParse<T> {
        self.parse(input).into()
    }

    pub fn parse_safe_with(&self, input: &Value, options: &ParseOptions) -> SafeParse<T> {
        self.parse_with(input, options).into()
    }

    fn with_schema(&self, schema: Schema) -> Self {
        Self {
            schema,
            convert: Arc::clone(&self.convert),
        }
    }

    fn wrap_option(&self, schema: Schema, absent: fn(&Value) -> bool) -> Typed<Option<T>> {
        let inner = Arc::clone(&self.convert);
        Typed {
            schema,
            convert: Arc::new(move |parsed: Parsed<'_>| {
                if absent(&parsed.value) {
                    Ok(None)
                } else {
                    inner(parsed).map(Some)
                }
            }),
        }
    }

    /// `undefined` parses to `None`.
    pub fn optional(&self) -> Typed<Option<T>> {
        self.wrap_option(self.schema.optional(), Value::is_undefined)
    }

    /// `null` parses to `None`.
    pub fn nullable(&self) -> Typed<Option<T>> {
        self.wrap_option(self.schema.nullable(), Value::is_null)
    }

    /// `undefined` and `null` parse to `None`.
    pub fn nullish(&self) -> Typed<Option<T>> {
        self.wrap_option(self.schema.nullish(), |v| v.is_undefined() || v.is_null())
    }

    pub fn required(&self) -> Self {
        self.with_schema(self.schema.required())
    }

    pub fn non_nullable(&self) -> Self {
        self.with_schema(self.schema.non_nullable())
    }

    pub fn default(&self, value: impl Into<Value>) -> Self {
        self.with_schema(ModifierExt::default(&self.schema, value))
    }

    pub fn default_with<F>(&self, producer: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.with_schema(self.schema.default_with(producer))
    }
}

/// Element-count bounds.
///
/// On an array schema the bound joins the schema's own size bounds. Any
/// other schema keeps its structure and the bound is checked against the
/// converted `Vec` instead, after the schema and earlier checks pass.
impl<T: 'static> Typed<Vec<T>> {
    fn bound(&self, kind: ConstraintKind, limit: usize) -> Self {
        if let Schema::Array(node) = &self.schema {
            let refined = match kind {
                ConstraintKind::Min => node.min(limit),
                ConstraintKind::Max => node.max(limit),
                ConstraintKind::Length => node.length(limit),
            };
            return self.with_schema(refined.into());
        }

        let mut bounds = Bounds::default();
        bounds.set(kind, limit);
        let inner = Arc::clone(&self.convert);
        Self::from_parts(self.schema.clone(), move |parsed: Parsed<'_>| {
            let items = inner(parsed)?;
            bounds.check(Subject::ArrayLength, items.len())?;
            Ok(items)
        })
    }

    pub fn min(&self, limit: usize) -> Self {
        self.bound(ConstraintKind::Min, limit)
    }

    pub fn max(&self, limit: usize) -> Self {
        self.bound(ConstraintKind::Max, limit)
    }

    pub fn length(&self, length: usize) -> Self {
        self.bound(ConstraintKind::Length, length)
    }
}

// ============================================================================
// PRIMITIVES
// ============================================================================

/// Typed view of a primitive schema.
pub trait IntoTyped {
    type Output;

    fn typed(&self) -> Typed<Self::Output>;
}

impl IntoTyped for BooleanSchema {
    type Output = bool;

    fn typed(&self) -> Typed<bool> {
        Typed::new(self, |value| match value {
            Value::Bool(b) => Ok(b),
            other => Err(unexpected("boolean", &other)),
        })
    }
}

impl IntoTyped for NumberSchema {
    type Output = f64;

    fn typed(&self) -> Typed<f64> {
        Typed::new(self, |value| match value {
            Value::Number(n) => Ok(n),
            other => Err(unexpected("number", &other)),
        })
    }
}

impl IntoTyped for StringSchema {
    type Output = String;

    fn typed(&self) -> Typed<String> {
        Typed::new(self, |value| match value {
            Value::String(s) => Ok(s),
            other => Err(unexpected("string", &other)),
        })
    }
}

impl IntoTyped for NullSchema {
    type Output = ();

    fn typed(&self) -> Typed<()> {
        Typed::new(self, |value| match value {
            Value::Null => Ok(()),
            other => Err(unexpected("null", &other)),
        })
    }
}

impl IntoTyped for UndefinedSchema {
    type Output = ();

    fn typed(&self) -> Typed<()> {
        Typed::new(self, |value| match value {
            Value::Undefined => Ok(()),
            other => Err(unexpected("undefined", &other)),
        })
    }
}

// ============================================================================
// COMPOSITES
// ============================================================================

fn into_items(value: Value) -> Result<Vec<Value>, ParseError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(unexpected("array", &other)),
    }
}

/// Input elements aligned with `len` parsed elements, if the input was an
/// array of that length.
fn item_inputs(input: &Value, len: usize) -> Option<&[Value]> {
    match input {
        Value::Array(inputs) if inputs.len() == len => Some(inputs),
        _ => None,
    }
}

fn convert_item<T>(
    convert: &Convert<T>,
    index: usize,
    inputs: Option<&[Value]>,
    item: Value,
    options: &ParseOptions,
) -> Result<T, ParseError> {
    let fallback;
    let input = match inputs.and_then(|inputs| inputs.get(index)) {
        Some(input) => input,
        None => {
            fallback = item.clone();
            &fallback
        }
    };
    convert(Parsed {
        input,
        value: item,
        options,
    })
    .map_err(|e| e.prefixed(PathSegment::Index(index)))
}

/// `Vec<T>` from an array of `element`.
pub fn array<T: 'static>(element: &Typed<T>) -> Typed<Vec<T>> {
    let convert = Arc::clone(&element.convert);
    let schema = ArraySchema::new(&element.schema);
    Typed::from_parts(schema.into(), move |parsed: Parsed<'_>| {
        let Parsed {
            input,
            value,
            options,
        } = parsed;
        let items = into_items(value)?;
        let inputs = item_inputs(input, items.len());
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| convert_item(&convert, index, inputs, item, options))
            .collect()
    })
}

/// Deserializes a parsed object into `R` through serde.
///
/// ```
/// use nebula_shape::prelude::*;
/// use nebula_shape::typed;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct User {
///     name: String,
///     age: Option<u32>,
/// }
///
/// let schema = typed::record::<User>(&object! { name: string(), age: number().optional() });
/// let user = schema.parse(&Value::object([("name", "ada")])).unwrap();
/// assert_eq!(user.name, "ada");
/// assert_eq!(user.age, None);
/// ```
pub fn record<R: DeserializeOwned + 'static>(schema: &ObjectSchema) -> Typed<R> {
    Typed::new(schema, |value: Value| {
        serde_json::from_value(value.into_json())
            .map_err(|e| ParseError::conversion(e.to_string()))
    })
}

/// Tuples of typed schemas, arity 1 through 6.
pub trait TypedTuple {
    type Output;

    fn into_typed(self) -> Typed<Self::Output>;
}

/// `(A, B, ...)` from a tuple of typed positions.
pub fn tuple<P: TypedTuple>(positions: P) -> Typed<P::Output> {
    positions.into_typed()
}

macro_rules! typed_tuple {
    ($($ty:ident : $idx:tt),+) => {
        impl<$($ty: 'static),+> TypedTuple for ($(Typed<$ty>,)+) {
            type Output = ($($ty,)+);

            fn into_typed(self) -> Typed<Self::Output> {
                let schema = TupleSchema::new([$(self.$idx.schema.clone()),+]);
                let converters = ($(Arc::clone(&self.$idx.convert),)+);
                Typed::from_parts(schema.into(), move |parsed: Parsed<'_>| {
                    let Parsed { input, value, options } = parsed;
                    let items = into_items(value)?;
                    let inputs = item_inputs(input, items.len());
                    let mut items = items.into_iter();
                    Ok(($(
                        {
                            let item = items
                                .next()
                                .ok_or_else(|| ParseError::conversion("tuple is shorter than declared"))?;
                            convert_item(&converters.$idx, $idx, inputs, item, options)?
                        },
                    )+))
                })
            }
        }
    };
}

typed_tuple!(A: 0);
typed_tuple!(A: 0, B: 1);
typed_tuple!(A: 0, B: 1, C: 2);
typed_tuple!(A: 0, B: 1, C: 2, D: 3);
typed_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4);
typed_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);

/// Output of a two-candidate union.
#[derive(Debug, Clone, PartialEq)]
pub enum Union2<A, B> {
    A(A),
    B(B),
}

/// Output of a three-candidate union.
#[derive(Debug, Clone, PartialEq)]
pub enum Union3<A, B, C> {
    A(A),
    B(B),
    C(C),
}

fn exhausted(mut rejected: Vec<ParseError>, options: &ParseOptions) -> ParseError {
    if options.union_failures == UnionFailures::First {
        rejected.truncate(1);
    }
    ParseError::new(FailureKind::UnionExhausted {
        candidates: rejected,
    })
}

/// Commits to the candidate if its schema accepts the input, otherwise
/// records the rejection and falls through to the next one.
macro_rules! try_candidate {
    ($candidate:expr, $variant:path, $input:expr, $options:expr, $rejected:ident) => {
        match $candidate.commit($input, $options) {
            Ok(out) => return out.map($variant),
            Err(err) => $rejected.push(err),
        }
    };
}

/// Two-candidate union.
///
/// The variant is the first candidate whose schema parses the input, the
/// same candidate the untyped union commits to. That candidate's conversion
/// produces the output; a failing conversion does not fall through.
pub fn union2<A: 'static, B: 'static>(a: &Typed<A>, b: &Typed<B>) -> Typed<Union2<A, B>> {
    let schema = UnionSchema::new([a.schema.clone(), b.schema.clone()]);
    let (a, b) = (a.clone(), b.clone());
    Typed::from_parts(schema.into(), move |parsed: Parsed<'_>| {
        let (input, options) = (parsed.source(), parsed.options);
        let mut rejected = Vec::new();
        try_candidate!(a, Union2::A, input, options, rejected);
        try_candidate!(b, Union2::B, input, options, rejected);
        Err(exhausted(rejected, options))
    })
}

/// Three-candidate union, resolved like [`union2`].
pub fn union3<A: 'static, B: 'static, C: 'static>(
    a: &Typed<A>,
    b: &Typed<B>,
    c: &Typed<C>,
) -> Typed<Union3<A, B, C>> {
    let schema = UnionSchema::new([a.schema.clone(), b.schema.clone(), c.schema.clone()]);
    let (a, b, c) = (a.clone(), b.clone(), c.clone());
    Typed::from_parts(schema.into(), move |parsed: Parsed<'_>| {
        let (input, options) = (parsed.source(), parsed.options);
        let mut rejected = Vec::new();
        try_candidate!(a, Union3::A, input, options, rejected);
        try_candidate!(b, Union3::B, input, options, rejected);
        try_candidate!(c, Union3::C, input, options, rejected);
        Err(exhausted(rejected, options))
    })
}

//! Schema nodes.
//!
//! A schema is an immutable description of the values it accepts. There is
//! one node type per kind ([`NumberSchema`], [`ObjectSchema`], ...) and the
//! [`Schema`] enum that composites store their children as. Builders take
//! `&self` and return a new node, and composite children sit behind `Arc`,
//! so refining a shared base schema never affects other users of it.
//!
//! ```
//! use nebula_shape::prelude::*;
//!
//! let base = object! { id: number() };
//! let extended = base.field("name", string());
//!
//! assert_eq!(base.keys().count(), 1);
//! assert_eq!(extended.keys().count(), 2);
//! ```

mod array;
mod constraint;
mod modifiers;
mod object;
mod primitive;
mod tuple;
mod union;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::{self, ParseContext};
use crate::error::ParseError;
use crate::value::Value;

pub use array::ArraySchema;
pub use constraint::{Bound, Bounds, Measure};
pub use modifiers::{DefaultThunk, DefaultValue, ModifierExt, Modifiers};
pub use object::ObjectSchema;
pub use primitive::{BooleanSchema, NullSchema, NumberSchema, StringSchema, UndefinedSchema};
pub use tuple::TupleSchema;
pub use union::UnionSchema;

/// Kind tag of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
    Union,
    Tuple,
}

impl SchemaKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
            Self::Union => "union",
            Self::Tuple => "tuple",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Any schema node.
#[derive(Debug, Clone)]
pub enum Schema {
    Undefined(UndefinedSchema),
    Null(NullSchema),
    Boolean(BooleanSchema),
    Number(NumberSchema),
    String(StringSchema),
    Array(ArraySchema),
    Object(ObjectSchema),
    Union(UnionSchema),
    Tuple(TupleSchema),
}

/// Expands `$body` once per variant with `$node` bound to the inner node.
macro_rules! dispatch {
    ($schema:expr, $node:ident => $body:expr) => {
        match $schema {
            Schema::Undefined($node) => $body,
            Schema::Null($node) => $body,
            Schema::Boolean($node) => $body,
            Schema::Number($node) => $body,
            Schema::String($node) => $body,
            Schema::Array($node) => $body,
            Schema::Object($node) => $body,
            Schema::Union($node) => $body,
            Schema::Tuple($node) => $body,
        }
    };
}

impl Schema {
    pub const fn kind(&self) -> SchemaKind {
        match self {
            Self::Undefined(_) => SchemaKind::Undefined,
            Self::Null(_) => SchemaKind::Null,
            Self::Boolean(_) => SchemaKind::Boolean,
            Self::Number(_) => SchemaKind::Number,
            Self::String(_) => SchemaKind::String,
            Self::Array(_) => SchemaKind::Array,
            Self::Object(_) => SchemaKind::Object,
            Self::Union(_) => SchemaKind::Union,
            Self::Tuple(_) => SchemaKind::Tuple,
        }
    }

    /// Whether `undefined` input can succeed against this node.
    pub fn admits_undefined(&self) -> bool {
        use engine::Node;

        dispatch!(self, node => node.modifiers().admits_undefined() || node.handles_undefined())
    }

    pub(crate) fn enter(&self, input: &Value, ctx: &mut ParseContext<'_>) -> Result<Value, ParseError> {
        dispatch!(self, node => engine::enter(node, input, ctx))
    }
}

impl ModifierExt for Schema {
    fn modifiers(&self) -> &Modifiers {
        dispatch!(self, node => node.modifiers())
    }

    fn with_modifiers(&self, modifiers: Modifiers) -> Self {
        dispatch!(self, node => node.with_modifiers(modifiers).into())
    }
}

macro_rules! into_schema {
    ($($variant:ident($node:ty)),+ $(,)?) => {
        $(
            impl From<$node> for Schema {
                fn from(node: $node) -> Self {
                    Self::$variant(node)
                }
            }

            impl From<&$node> for Schema {
                fn from(node: &$node) -> Self {
                    Self::$variant(node.clone())
                }
            }
        )+
    };
}

into_schema!(
    Undefined(UndefinedSchema),
    Null(NullSchema),
    Boolean(BooleanSchema),
    Number(NumberSchema),
    String(StringSchema),
    Array(ArraySchema),
    Object(ObjectSchema),
    Union(UnionSchema),
    Tuple(TupleSchema),
);

impl From<&Schema> for Schema {
    fn from(schema: &Schema) -> Self {
        schema.clone()
    }
}

//! Prelude module for convenient imports.
//!
//! `use nebula_shape::prelude::*;` brings in the constructors, the composite
//! macros, the modifier and parse traits, and the value and error types.

// ============================================================================
// CONSTRUCTORS AND MACROS
// ============================================================================

pub use crate::combinators::{Merge, array, boolean, merge, null, number, string, undefined};
// Function and macro of the same name, both through the crate root.
pub use crate::{object, tuple, union};

// ============================================================================
// SCHEMA NODES AND TRAITS
// ============================================================================

pub use crate::engine::Parse;
pub use crate::schema::{
    ArraySchema, BooleanSchema, ModifierExt, NullSchema, NumberSchema, ObjectSchema, Schema,
    SchemaKind, StringSchema, TupleSchema, UndefinedSchema, UnionSchema,
};
pub use crate::typed::{IntoTyped, Typed};

// ============================================================================
// DATA, OPTIONS AND RESULTS
// ============================================================================

pub use crate::error::{FailureKind, ParseError, Path, PathSegment};
pub use crate::options::{ParseOptions, UnionFailures, UnknownKeys};
pub use crate::result::SafeParse;
pub use crate::value::{Value, ValueKind};

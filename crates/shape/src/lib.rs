//! # nebula-shape
//!
//! Runtime schema validation and parsing for untrusted, already-deserialized
//! data.
//!
//! Build a schema once from constructors, modifiers and combinators, then
//! parse any number of inputs against it. A successful parse returns a fresh
//! value that conforms to the schema; a failure returns a [`ParseError`]
//! naming what went wrong and where.
//!
//! ## Quick Start
//!
//! ```
//! use nebula_shape::prelude::*;
//! use serde_json::json;
//!
//! let user = object! {
//!     name: string().min(1),
//!     age: number().min(0.0).optional(),
//!     tags: array(string()).max(8).default(Value::Array(vec![])),
//!     contact: union![string(), object! { email: string() }].nullable(),
//! };
//!
//! let out = user.parse_json(&json!({"name": "ada", "contact": null})).unwrap();
//! assert_eq!(out.into_json(), json!({"name": "ada", "tags": [], "contact": null}));
//!
//! let err = user.parse_json(&json!({"name": "", "contact": null})).unwrap_err();
//! assert_eq!(err.to_string(), "name: string length must be at least 1, received 0");
//! ```
//!
//! ## Schema kinds
//!
//! - **Primitives**: [`undefined()`], [`null()`], [`boolean()`], [`number()`], [`string()`]
//! - **Composites**: [`array()`], [`object()`] / [`object!`], [`tuple()`] / [`tuple!`],
//!   [`union()`] / [`union!`], and [`merge()`] for objects and unions
//! - **Modifiers**: [`ModifierExt`] (`optional`, `nullable`, `nullish`, `required`,
//!   `non_nullable`, `default`, `default_with`)
//!
//! ## Parsing
//!
//! [`Parse`] gives every node `parse`, `parse_safe` and their `_with`
//! variants taking [`ParseOptions`]. For statically typed results see
//! [`typed`].

// ParseError carries an inline path; boxing it would add an allocation to
// every failing parse for no practical benefit.
#![allow(clippy::result_large_err)]

pub mod combinators;
mod engine;
pub mod error;
pub mod options;
pub mod prelude;
pub mod result;
pub mod schema;
pub mod typed;
pub mod value;

pub use combinators::{
    Merge, array, boolean, merge, null, number, object, string, tuple, undefined, union,
};
pub use engine::Parse;
pub use error::{ConstraintKind, FailureKind, ParseError, Path, PathSegment, Subject};
pub use options::{ParseOptions, UnionFailures, UnknownKeys};
pub use result::SafeParse;
pub use schema::{
    ArraySchema, BooleanSchema, ModifierExt, NullSchema, NumberSchema, ObjectSchema, Schema,
    SchemaKind, StringSchema, TupleSchema, UndefinedSchema, UnionSchema,
};
pub use typed::{IntoTyped, Typed};
pub use value::{Map, Value, ValueKind};

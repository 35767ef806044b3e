//! The recursive parse engine.
//!
//! Every node entry goes through [`enter`]:
//!
//! 1. the depth guard is checked and incremented;
//! 2. `undefined` input is resolved against the default / optional modifiers;
//! 3. `null` input is resolved against the nullable modifier;
//! 4. the node's kind-specific check runs and may recurse back into `enter`.
//!
//! Composite nodes prepend their field name or index to child failures, so a
//! failure reaching the caller carries its absolute path.

use crate::error::{FailureKind, ParseError};
use crate::options::ParseOptions;
use crate::result::SafeParse;
use crate::schema::ModifierExt;
use crate::value::Value;

/// Per-call state threaded through the recursion.
#[derive(Debug)]
pub(crate) struct ParseContext<'a> {
    pub(crate) options: &'a ParseOptions,
    depth: usize,
}

impl<'a> ParseContext<'a> {
    pub(crate) const fn new(options: &'a ParseOptions) -> Self {
        Self { options, depth: 0 }
    }

    fn descend(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.options.max_depth {
            tracing::debug!(
                limit = self.options.max_depth,
                "recursion limit reached, aborting parse"
            );
            return Err(ParseError::new(FailureKind::RecursionLimitExceeded {
                limit: self.options.max_depth,
            }));
        }
        self.depth += 1;
        Ok(())
    }

    fn ascend(&mut self) {
        self.depth -= 1;
    }
}

/// Kind-specific half of a schema node.
pub(crate) trait Node: ModifierExt {
    /// Checks a value that already passed modifier resolution.
    fn parse_value(&self, input: &Value, ctx: &mut ParseContext<'_>) -> Result<Value, ParseError>;

    /// Whether `undefined` input reaches [`parse_value`](Self::parse_value)
    /// instead of failing as missing.
    fn handles_undefined(&self) -> bool {
        false
    }
}

/// Parses `input` against `node`, applying the depth guard and modifiers.
pub(crate) fn enter<N: Node>(
    node: &N,
    input: &Value,
    ctx: &mut ParseContext<'_>,
) -> Result<Value, ParseError> {
    ctx.descend()?;
    let result = resolve(node, input, ctx, true);
    ctx.ascend();
    result
}

fn resolve<N: Node>(
    node: &N,
    input: &Value,
    ctx: &mut ParseContext<'_>,
    substitute: bool,
) -> Result<Value, ParseError> {
    let modifiers = node.modifiers();
    match input {
        Value::Undefined => {
            if substitute && let Some(default) = &modifiers.default {
                return resolve(node, &default.produce(), ctx, false);
            }
            if modifiers.optional {
                Ok(Value::Undefined)
            } else if node.handles_undefined() {
                node.parse_value(input, ctx)
            } else {
                Err(ParseError::missing())
            }
        }
        Value::Null if modifiers.nullable => Ok(Value::Null),
        _ => node.parse_value(input, ctx),
    }
}

/// Drives one top-level parse call.
pub(crate) fn run<F>(options: &ParseOptions, parse: F) -> Result<Value, ParseError>
where
    F: FnOnce(&mut ParseContext<'_>) -> Result<Value, ParseError>,
{
    let mut ctx = ParseContext::new(options);
    let result = parse(&mut ctx);
    if let Err(err) = &result {
        tracing::trace!(path = %err.path, code = err.kind.code(), "parse failed");
    }
    result
}

// ============================================================================
// PUBLIC SURFACE
// ============================================================================

/// Parse operations available on every schema node.
///
/// `parse` returns the conforming value or the failure; `parse_safe` never
/// fails and encodes the same outcome as a [`SafeParse`]. Both agree on every
/// input.
///
/// ```
/// use nebula_shape::prelude::*;
///
/// let schema = number().min(2.0).max(50.0);
/// assert_eq!(schema.parse(&Value::from(3)).unwrap(), Value::from(3));
///
/// let outcome = schema.parse_safe(&Value::from(100));
/// assert!(!outcome.success());
/// assert_eq!(outcome.reason().unwrap(), "number must be at most 50, received 100");
/// ```
pub trait Parse {
    /// Parses `input` under explicit options.
    fn parse_with(&self, input: &Value, options: &ParseOptions) -> Result<Value, ParseError>;

    /// Parses `input` under default options.
    fn parse(&self, input: &Value) -> Result<Value, ParseError> {
        self.parse_with(input, &ParseOptions::default())
    }

    fn parse_safe(&self, input: &Value) -> SafeParse<Value> {
        self.parse(input).into()
    }

    fn parse_safe_with(&self, input: &Value, options: &ParseOptions) -> SafeParse<Value> {
        self.parse_with(input, options).into()
    }

    /// Convenience entry point for already-deserialized JSON.
    fn parse_json(&self, input: &serde_json::Value) -> Result<Value, ParseError> {
        self.parse(&Value::from(input))
    }
}

macro_rules! impl_parse_for_nodes {
    ($($node:ty),+ $(,)?) => {
        $(
            impl Parse for $node {
                fn parse_with(
                    &self,
                    input: &Value,
                    options: &ParseOptions,
                ) -> Result<Value, ParseError> {
                    run(options, |ctx| enter(self, input, ctx))
                }
            }
        )+
    };
}

impl_parse_for_nodes!(
    crate::schema::UndefinedSchema,
    crate::schema::NullSchema,
    crate::schema::BooleanSchema,
    crate::schema::NumberSchema,
    crate::schema::StringSchema,
    crate::schema::ArraySchema,
    crate::schema::ObjectSchema,
    crate::schema::UnionSchema,
    crate::schema::TupleSchema,
);

impl Parse for crate::schema::Schema {
    fn parse_with(&self, input: &Value, options: &ParseOptions) -> Result<Value, ParseError> {
        run(options, |ctx| self.enter(input, ctx))
    }
}

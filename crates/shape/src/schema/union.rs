use std::sync::Arc;

use crate::engine::{Node, ParseContext};
use crate::error::{FailureKind, ParseError};
use crate::options::UnionFailures;
use crate::value::Value;

use super::Schema;
use super::modifiers::{ModifierExt, Modifiers};
use super::primitive::modifier_ext;

/// Ordered alternatives; the first candidate that parses wins.
#[derive(Debug, Clone)]
pub struct UnionSchema {
    pub(crate) modifiers: Modifiers,
    pub(crate) candidates: Arc<[Schema]>,
}

impl UnionSchema {
    pub fn new<S, I>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Schema>,
    {
        Self {
            modifiers: Modifiers::default(),
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }

    pub fn candidates(&self) -> &[Schema] {
        &self.candidates
    }

    /// Appends `other`'s candidates after this union's, keeping this
    /// union's modifiers.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            modifiers: self.modifiers.clone(),
            candidates: self
                .candidates
                .iter()
                .chain(other.candidates.iter())
                .cloned()
                .collect(),
        }
    }
}

modifier_ext!(UnionSchema);

impl Node for UnionSchema {
    fn parse_value(&self, input: &Value, ctx: &mut ParseContext<'_>) -> Result<Value, ParseError> {
        let keep_all = ctx.options.union_failures == UnionFailures::All;
        let mut failures = Vec::new();

        for (index, candidate) in self.candidates.iter().enumerate() {
            match candidate.enter(input, ctx) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    tracing::trace!(
                        candidate = index,
                        kind = %candidate.kind(),
                        code = err.kind.code(),
                        "union candidate rejected"
                    );
                    // A tripped depth guard is not a mismatch; stop trying.
                    if matches!(err.kind, FailureKind::RecursionLimitExceeded { .. }) {
                        return Err(err);
                    }
                    if keep_all || failures.is_empty() {
                        failures.push(err);
                    }
                }
            }
        }

        Err(ParseError::new(FailureKind::UnionExhausted {
            candidates: failures,
        }))
    }

    fn handles_undefined(&self) -> bool {
        self.candidates.iter().any(Schema::admits_undefined)
    }
}

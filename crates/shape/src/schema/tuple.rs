use std::sync::Arc;

use crate::engine::{Node, ParseContext};
use crate::error::{FailureKind, ParseError, PathSegment};
use crate::value::Value;

use super::modifiers::{ModifierExt, Modifiers};
use super::primitive::modifier_ext;
use super::{Schema, SchemaKind};

/// Fixed-arity sequence with one schema per position.
#[derive(Debug, Clone)]
pub struct TupleSchema {
    pub(crate) modifiers: Modifiers,
    pub(crate) items: Arc<[Schema]>,
}

impl TupleSchema {
    pub fn new<S, I>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Schema>,
    {
        Self {
            modifiers: Modifiers::default(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn items(&self) -> &[Schema] {
        &self.items
    }

    pub fn arity(&self) -> usize {
        self.items.len()
    }
}

modifier_ext!(TupleSchema);

impl Node for TupleSchema {
    fn parse_value(&self, input: &Value, ctx: &mut ParseContext<'_>) -> Result<Value, ParseError> {
        let Value::Array(values) = input else {
            return Err(ParseError::type_mismatch(SchemaKind::Tuple, input.kind()));
        };
        if values.len() != self.items.len() {
            return Err(ParseError::new(FailureKind::TupleLengthMismatch {
                expected: self.items.len(),
                received: values.len(),
            }));
        }

        let mut out = Vec::with_capacity(values.len());
        for (index, (schema, value)) in self.items.iter().zip(values).enumerate() {
            let parsed = schema
                .enter(value, ctx)
                .map_err(|e| e.prefixed(PathSegment::Index(index)))?;
            out.push(parsed);
        }
        Ok(Value::Array(out))
    }
}

use std::sync::Arc;

use crate::engine::{Node, ParseContext};
use crate::error::{ConstraintKind, ParseError, PathSegment, Subject};
use crate::value::Value;

use super::constraint::Bounds;
use super::modifiers::{ModifierExt, Modifiers};
use super::primitive::modifier_ext;
use super::{Schema, SchemaKind};

/// Homogeneous sequence; `min`/`max`/`length` count elements.
#[derive(Debug, Clone)]
pub struct ArraySchema {
    pub(crate) modifiers: Modifiers,
    pub(crate) element: Arc<Schema>,
    pub(crate) size: Bounds<usize>,
}

impl ArraySchema {
    pub fn new(element: impl Into<Schema>) -> Self {
        Self {
            modifiers: Modifiers::default(),
            element: Arc::new(element.into()),
            size: Bounds::default(),
        }
    }

    fn bound(&self, kind: ConstraintKind, limit: usize) -> Self {
        let mut next = self.clone();
        next.size.set(kind, limit);
        next
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

    pub fn element(&self) -> &Schema {
        &self.element
    }

    pub const fn bounds(&self) -> &Bounds<usize> {
        &self.size
    }
}

modifier_ext!(ArraySchema);

impl Node for ArraySchema {
    fn parse_value(&self, input: &Value, ctx: &mut ParseContext<'_>) -> Result<Value, ParseError> {
        let Value::Array(items) = input else {
            return Err(ParseError::type_mismatch(SchemaKind::Array, input.kind()));
        };
        self.size.check(Subject::ArrayLength, items.len())?;

        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let parsed = self
                .element
                .enter(item, ctx)
                .map_err(|e| e.prefixed(PathSegment::Index(index)))?;
            out.push(parsed);
        }
        Ok(Value::Array(out))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{ConstraintKind, FailureKind, Subject};
    use crate::prelude::*;

    #[test]
    fn length_and_min_max_pair_agree() {
        let exact = array(number()).length(2);
        let pinned = array(number()).min(2).max(2);
        for len in 0..4 {
            let input = Value::Array(vec![Value::from(1); len]);
            assert_eq!(exact.parse(&input).is_ok(), pinned.parse(&input).is_ok());
        }
    }

    #[test]
    fn size_checked_before_elements() {
        let err = array(number())
            .max(1)
            .parse(&Value::from(vec!["a", "b"]))
            .unwrap_err();
        assert_eq!(
            err.kind,
            FailureKind::ConstraintViolation {
                subject: Subject::ArrayLength,
                constraint: ConstraintKind::Max,
                limit: 1.0,
                actual: 2.0,
            }
        );
        assert!(err.path.is_root());
    }

    #[test]
    fn elements_are_rebuilt_from_parsed_values() {
        let schema = array(number().optional().default(7));
        let out = schema
            .parse(&Value::Array(vec![Value::Undefined, Value::from(1)]))
            .unwrap();
        assert_eq!(out, Value::from(vec![7, 1]));
    }
}

use crate::engine::{Node, ParseContext};
use crate::error::{ConstraintKind, ParseError, Subject};
use crate::value::Value;

use super::constraint::Bounds;
use super::modifiers::{ModifierExt, Modifiers};
use super::SchemaKind;

macro_rules! modifier_ext {
    ($node:ty) => {
        impl ModifierExt for $node {
            fn modifiers(&self) -> &Modifiers {
                &self.modifiers
            }

            fn with_modifiers(&self, modifiers: Modifiers) -> Self {
                let mut next = self.clone();
                next.modifiers = modifiers;
                next
            }
        }
    };
}

pub(crate) use modifier_ext;

// ============================================================================
// UNDEFINED / NULL
// ============================================================================

/// Matches only `undefined`.
#[derive(Debug, Clone)]
pub struct UndefinedSchema {
    pub(crate) modifiers: Modifiers,
}

impl UndefinedSchema {
    /// Optional from the start: `undefined` is its type match.
    pub fn new() -> Self {
        Self {
            modifiers: Modifiers {
                optional: true,
                ..Modifiers::default()
            },
        }
    }
}

modifier_ext!(UndefinedSchema);

impl Node for UndefinedSchema {
    fn parse_value(&self, input: &Value, _: &mut ParseContext<'_>) -> Result<Value, ParseError> {
        match input {
            Value::Undefined => Ok(Value::Undefined),
            other => Err(ParseError::type_mismatch(SchemaKind::Undefined, other.kind())),
        }
    }

    fn handles_undefined(&self) -> bool {
        true
    }
}

/// Matches only `null`.
#[derive(Debug, Clone)]
pub struct NullSchema {
    pub(crate) modifiers: Modifiers,
}

impl NullSchema {
    pub fn new() -> Self {
        Self {
            modifiers: Modifiers::default(),
        }
    }
}

modifier_ext!(NullSchema);

impl Node for NullSchema {
    fn parse_value(&self, input: &Value, _: &mut ParseContext<'_>) -> Result<Value, ParseError> {
        match input {
            Value::Null => Ok(Value::Null),
            other => Err(ParseError::type_mismatch(SchemaKind::Null, other.kind())),
        }
    }
}

// ============================================================================
// BOOLEAN
// ============================================================================

#[derive(Debug, Clone)]
pub struct BooleanSchema {
    pub(crate) modifiers: Modifiers,
}

impl BooleanSchema {
    pub fn new() -> Self {
        Self {
            modifiers: Modifiers::default(),
        }
    }
}

modifier_ext!(BooleanSchema);

impl Node for BooleanSchema {
    fn parse_value(&self, input: &Value, _: &mut ParseContext<'_>) -> Result<Value, ParseError> {
        match input {
            Value::Bool(b) => Ok(Value::Bool(*b)),
            other => Err(ParseError::type_mismatch(SchemaKind::Boolean, other.kind())),
        }
    }
}

// ============================================================================
// NUMBER
// ============================================================================

/// Double-precision number with inclusive `min`/`max` bounds.
#[derive(Debug, Clone)]
pub struct NumberSchema {
    pub(crate) modifiers: Modifiers,
    pub(crate) bounds: Bounds<f64>,
}

impl NumberSchema {
    pub fn new() -> Self {
        Self {
            modifiers: Modifiers::default(),
            bounds: Bounds::default(),
        }
    }

    fn bound(&self, kind: ConstraintKind, limit: f64) -> Self {
        let mut next = self.clone();
        next.bounds.set(kind, limit);
        next
    }

    pub fn min(&self, limit: f64) -> Self {
        self.bound(ConstraintKind::Min, limit)
    }

    pub fn max(&self, limit: f64) -> Self {
        self.bound(ConstraintKind::Max, limit)
    }

    /// Shorthand for `min(0.0)`; zero is accepted.
    pub fn positive(&self) -> Self {
        self.min(0.0)
    }

    /// Shorthand for `max(0.0)`; zero is accepted.
    pub fn negative(&self) -> Self {
        self.max(0.0)
    }

    pub const fn bounds(&self) -> &Bounds<f64> {
        &self.bounds
    }
}

modifier_ext!(NumberSchema);

impl Node for NumberSchema {
    fn parse_value(&self, input: &Value, _: &mut ParseContext<'_>) -> Result<Value, ParseError> {
        match input {
            Value::Number(n) => {
                self.bounds.check(Subject::Number, *n)?;
                Ok(Value::Number(*n))
            }
            other => Err(ParseError::type_mismatch(SchemaKind::Number, other.kind())),
        }
    }
}

// ============================================================================
// STRING
// ============================================================================

/// UTF-8 string; `min`/`max`/`length` count bytes.
#[derive(Debug, Clone)]
pub struct StringSchema {
    pub(crate) modifiers: Modifiers,
    pub(crate) bounds: Bounds<usize>,
}

impl StringSchema {
    pub fn new() -> Self {
        Self {
            modifiers: Modifiers::default(),
            bounds: Bounds::default(),
        }
    }

    fn bound(&self, kind: ConstraintKind, limit: usize) -> Self {
        let mut next = self.clone();
        next.bounds.set(kind, limit);
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

    pub const fn bounds(&self) -> &Bounds<usize> {
        &self.bounds
    }
}

modifier_ext!(StringSchema);

impl Node for StringSchema {
    fn parse_value(&self, input: &Value, _: &mut ParseContext<'_>) -> Result<Value, ParseError> {
        match input {
            Value::String(s) => {
                self.bounds.check(Subject::StringLength, s.len())?;
                Ok(Value::String(s.clone()))
            }
            other => Err(ParseError::type_mismatch(SchemaKind::String, other.kind())),
        }
    }
}

//! Optional / nullable / default handling shared by every node kind.

use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// Producer invoked each time a default is needed.
pub type DefaultThunk = Arc<dyn Fn() -> Value + Send + Sync>;

/// Value substituted for `undefined` input.
#[derive(Clone)]
pub enum DefaultValue {
    Value(Value),
    Thunk(DefaultThunk),
}

impl DefaultValue {
    pub fn produce(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Thunk(thunk) => thunk(),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Thunk(_) => f.write_str("Thunk(<fn>)"),
        }
    }
}

/// How a node treats `undefined` and `null` before its kind check runs.
#[derive(Debug, Clone, Default)]
pub struct Modifiers {
    pub optional: bool,
    pub nullable: bool,
    pub default: Option<DefaultValue>,
}

impl Modifiers {
    /// True when `undefined` input is satisfied by the modifiers alone.
    pub const fn admits_undefined(&self) -> bool {
        self.optional || self.default.is_some()
    }
}

/// Modifier builders, available on every node kind and on [`Schema`].
///
/// Each call returns a new node; the receiver is left untouched.
///
/// ```
/// use nebula_shape::prelude::*;
///
/// let base = string();
/// let maybe = base.nullish();
/// assert!(maybe.parse(&Value::Null).is_ok());
/// assert!(base.parse(&Value::Null).is_err());
/// ```
///
/// [`Schema`]: crate::Schema
pub trait ModifierExt: Sized {
    fn modifiers(&self) -> &Modifiers;

    /// Returns a copy of this node carrying `modifiers`.
    fn with_modifiers(&self, modifiers: Modifiers) -> Self;

    /// Accept `undefined` and yield `undefined`.
    fn optional(&self) -> Self {
        let mut modifiers = self.modifiers().clone();
        modifiers.optional = true;
        self.with_modifiers(modifiers)
    }

    /// Accept `null` and yield `null`.
    fn nullable(&self) -> Self {
        let mut modifiers = self.modifiers().clone();
        modifiers.nullable = true;
        self.with_modifiers(modifiers)
    }

    /// Both [`optional`](Self::optional) and [`nullable`](Self::nullable).
    fn nullish(&self) -> Self {
        let mut modifiers = self.modifiers().clone();
        modifiers.optional = true;
        modifiers.nullable = true;
        self.with_modifiers(modifiers)
    }

    /// Reject `undefined` again. A configured default still applies.
    fn required(&self) -> Self {
        let mut modifiers = self.modifiers().clone();
        modifiers.optional = false;
        self.with_modifiers(modifiers)
    }

    /// Reject `null` again.
    fn non_nullable(&self) -> Self {
        let mut modifiers = self.modifiers().clone();
        modifiers.nullable = false;
        self.with_modifiers(modifiers)
    }

    /// Substitute `value` for `undefined` input, then parse it as usual.
    fn default(&self, value: impl Into<Value>) -> Self {
        let mut modifiers = self.modifiers().clone();
        modifiers.default = Some(DefaultValue::Value(value.into()));
        self.with_modifiers(modifiers)
    }

    /// Like [`default`](Self::default), calling `producer` on every use.
    fn default_with<F>(&self, producer: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        let mut modifiers = self.modifiers().clone();
        modifiers.default = Some(DefaultValue::Thunk(Arc::new(producer)));
        self.with_modifiers(modifiers)
    }
}

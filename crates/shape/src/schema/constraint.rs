//! Ordered `min`/`max`/`length` bounds.

use smallvec::SmallVec;

use crate::error::{ConstraintKind, FailureKind, ParseError, Subject};

/// Quantity a bound can be compared against and reported as a number.
pub trait Measure: Copy + PartialOrd {
    fn as_f64(self) -> f64;
}

impl Measure for f64 {
    #[inline]
    fn as_f64(self) -> f64 {
        self
    }
}

impl Measure for usize {
    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

/// One declared bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound<T> {
    pub kind: ConstraintKind,
    pub limit: T,
}

impl<T: Measure> Bound<T> {
    /// Inclusive for `Min`/`Max`, exact for `Length`. Unordered values (NaN)
    /// never violate a bound.
    #[inline]
    fn is_violated_by(&self, actual: T) -> bool {
        match self.kind {
            ConstraintKind::Min => actual < self.limit,
            ConstraintKind::Max => actual > self.limit,
            ConstraintKind::Length => actual < self.limit || actual > self.limit,
        }
    }
}

/// Bounds in declaration order.
///
/// Redeclaring a kind overwrites its limit in place, keeping the original
/// position, so evaluation order always follows first declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds<T>(SmallVec<[Bound<T>; 3]>);

impl<T> Default for Bounds<T> {
    fn default() -> Self {
        Self(SmallVec::new())
    }
}

impl<T: Measure> Bounds<T> {
    pub fn set(&mut self, kind: ConstraintKind, limit: T) {
        match self.0.iter_mut().find(|bound| bound.kind == kind) {
            Some(bound) => bound.limit = limit,
            None => self.0.push(Bound { kind, limit }),
        }
    }

    pub fn get(&self, kind: ConstraintKind) -> Option<T> {
        self.0
            .iter()
            .find(|bound| bound.kind == kind)
            .map(|bound| bound.limit)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bound<T>> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fails with the first violated bound.
    pub fn check(&self, subject: Subject, actual: T) -> Result<(), ParseError> {
        match self.0.iter().find(|bound| bound.is_violated_by(actual)) {
            None => Ok(()),
            Some(bound) => Err(ParseError::new(FailureKind::ConstraintViolation {
                subject,
                constraint: bound.kind,
                limit: bound.limit.as_f64(),
                actual: actual.as_f64(),
            })),
        }
    }
}

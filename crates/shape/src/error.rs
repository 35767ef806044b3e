//! Failure model for parse operations.
//!
//! Every failure is a [`ParseError`]: a [`FailureKind`] describing what went
//! wrong plus the absolute [`Path`] from the schema root to the offending
//! value. Composite nodes prepend their field name or index as a failure
//! propagates upward, so the path at the top names the exact location.
//!
//! ```
//! use nebula_shape::prelude::*;
//!
//! let err = array(boolean()).parse(&Value::from(vec![Value::Bool(true), Value::from(1)])).unwrap_err();
//! assert_eq!(err.kind.code(), "type_mismatch");
//! assert_eq!(err.path.to_string(), "[1]");
//! assert_eq!(err.to_string(), "[1]: expected boolean, received number");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::schema::SchemaKind;
use crate::value::ValueKind;

// ============================================================================
// PATH
// ============================================================================

/// One step from a parent value into a child value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object field name.
    Key(String),
    /// Array or tuple position.
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Location of a value relative to the schema root.
///
/// Displayed as `user.tags[2].name`; the root path displays as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Path(SmallVec<[PathSegment; 4]>);

impl Path {
    /// The empty (root) path.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Inserts a segment at the front (closest to the root).
    pub fn prepend(&mut self, segment: PathSegment) {
        self.0.insert(0, segment);
    }

    /// Appends a segment at the back (closest to the value).
    pub fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

// ============================================================================
// CONSTRAINT DETAIL
// ============================================================================

/// Which bound a constraint expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// Inclusive lower bound.
    Min,
    /// Inclusive upper bound.
    Max,
    /// Exact size.
    Length,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Min => "min",
            Self::Max => "max",
            Self::Length => "length",
        })
    }
}

/// What a constraint measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    /// The number itself.
    Number,
    /// Byte length of a string.
    StringLength,
    /// Element count of an array.
    ArrayLength,
}

impl Subject {
    const fn describe(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::StringLength => "string length",
            Self::ArrayLength => "array length",
        }
    }
}

fn describe_constraint(
    subject: Subject,
    constraint: ConstraintKind,
    limit: f64,
    actual: f64,
) -> String {
    let subject = subject.describe();
    match constraint {
        ConstraintKind::Min => {
            format!("{subject} must be at least {limit}, received {actual}")
        }
        ConstraintKind::Max => {
            format!("{subject} must be at most {limit}, received {actual}")
        }
        ConstraintKind::Length => {
            format!("{subject} must be exactly {limit}, received {actual}")
        }
    }
}

fn describe_candidates(candidates: &[ParseError]) -> String {
    let mut out = format!("no union candidate matched ({} tried)", candidates.len());
    for (i, candidate) in candidates.iter().enumerate() {
        out.push_str(if i == 0 { ": " } else { "; " });
        out.push_str(&format!("#{i} {candidate}"));
    }
    out
}

// ============================================================================
// FAILURE KIND
// ============================================================================

/// Why a value failed to conform.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum FailureKind {
    /// Wrong primitive or structural type.
    #[error("expected {expected}, received {received}")]
    TypeMismatch {
        expected: SchemaKind,
        received: ValueKind,
    },

    /// A `min`/`max`/`length` bound was not satisfied.
    #[error("{}", describe_constraint(*subject, *constraint, *limit, *actual))]
    ConstraintViolation {
        subject: Subject,
        constraint: ConstraintKind,
        limit: f64,
        actual: f64,
    },

    /// Required value absent or `undefined`.
    #[error("required value is missing")]
    MissingOrUndefinedValue,

    /// Fixed-arity sequence had the wrong element count.
    #[error("tuple expects {expected} elements, received {received}")]
    TupleLengthMismatch { expected: usize, received: usize },

    /// No union candidate matched. Holds each attempted candidate's failure.
    #[error("{}", describe_candidates(candidates))]
    UnionExhausted { candidates: Vec<ParseError> },

    /// The depth guard tripped.
    #[error("recursion limit of {limit} exceeded")]
    RecursionLimitExceeded { limit: usize },

    /// A strict object received keys it does not declare.
    #[error("unrecognized keys: {}", keys.join(", "))]
    UnrecognizedKeys { keys: Vec<String> },

    /// A parsed value could not be converted into the requested Rust type.
    #[error("output conversion failed: {message}")]
    Conversion { message: String },
}

impl FailureKind {
    /// Stable snake_case code for programmatic handling.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::ConstraintViolation { .. } => "constraint_violation",
            Self::MissingOrUndefinedValue => "missing_or_undefined_value",
            Self::TupleLengthMismatch { .. } => "tuple_length_mismatch",
            Self::UnionExhausted { .. } => "union_exhausted",
            Self::RecursionLimitExceeded { .. } => "recursion_limit_exceeded",
            Self::UnrecognizedKeys { .. } => "unrecognized_keys",
            Self::Conversion { .. } => "conversion",
        }
    }
}

// ============================================================================
// PARSE ERROR
// ============================================================================

/// Structured description of a parse failure: kind, path and message.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// What went wrong.
    pub kind: FailureKind,
    /// Where it went wrong, from the schema root.
    pub path: Path,
}

impl ParseError {
    /// Creates a failure at the root path.
    pub fn new(kind: FailureKind) -> Self {
        Self {
            kind,
            path: Path::root(),
        }
    }

    pub fn type_mismatch(expected: SchemaKind, received: ValueKind) -> Self {
        Self::new(FailureKind::TypeMismatch { expected, received })
    }

    pub fn missing() -> Self {
        Self::new(FailureKind::MissingOrUndefinedValue)
    }

    pub fn conversion(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Conversion {
            message: message.into(),
        })
    }

    /// Prepends a path segment, also to every nested union candidate so
    /// their paths stay absolute.
    #[must_use]
    pub fn prefixed(mut self, segment: impl Into<PathSegment>) -> Self {
        self.prepend(&segment.into());
        self
    }

    fn prepend(&mut self, segment: &PathSegment) {
        self.path.prepend(segment.clone());
        if let FailureKind::UnionExhausted { candidates } = &mut self.kind {
            for candidate in candidates {
                candidate.prepend(segment);
            }
        }
    }

    /// Human-readable message without the path.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Number of failures including nested union candidates.
    pub fn total_error_count(&self) -> usize {
        match &self.kind {
            FailureKind::UnionExhausted { candidates } => {
                1 + candidates
                    .iter()
                    .map(ParseError::total_error_count)
                    .sum::<usize>()
            }
            _ => 1,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.path, self.kind)
        }
    }
}

impl std::error::Error for ParseError {}

//! Per-call parse configuration.

use serde::{Deserialize, Serialize};

/// What an object node does with input keys it does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownKeys {
    /// Copy undeclared keys into the output unvalidated.
    #[default]
    Passthrough,
    /// Fail with `UnrecognizedKeys`.
    Strict,
    /// Drop undeclared keys from the output.
    Strip,
}

/// How much detail a failed union reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnionFailures {
    /// Every attempted candidate's failure, in declaration order.
    #[default]
    All,
    /// Only the first candidate's failure.
    First,
}

/// Configurable limits and policies for one parse call.
///
/// # Example
///
/// ```
/// use nebula_shape::{ParseOptions, UnknownKeys};
///
/// let options = ParseOptions::default();
/// assert_eq!(options.max_depth, 100);
///
/// let strict = ParseOptions::strict();
/// assert_eq!(strict.max_depth, 50);
/// assert_eq!(strict.unknown_keys, Some(UnknownKeys::Strict));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Maximum number of nested node entries before `RecursionLimitExceeded`.
    pub max_depth: usize,

    /// Union failure detail.
    pub union_failures: UnionFailures,

    /// When set, overrides the unknown-key policy of every object node.
    pub unknown_keys: Option<UnknownKeys>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: 100,
            union_failures: UnionFailures::All,
            unknown_keys: None,
        }
    }
}

impl ParseOptions {
    /// Shallow depth limit and rejection of undeclared object keys.
    pub fn strict() -> Self {
        Self {
            max_depth: 50,
            union_failures: UnionFailures::All,
            unknown_keys: Some(UnknownKeys::Strict),
        }
    }

    /// Deeper depth limit for trusted input.
    pub fn permissive() -> Self {
        Self {
            max_depth: 200,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_union_failures(mut self, union_failures: UnionFailures) -> Self {
        self.union_failures = union_failures;
        self
    }

    pub fn with_unknown_keys(mut self, unknown_keys: UnknownKeys) -> Self {
        self.unknown_keys = Some(unknown_keys);
        self
    }
}

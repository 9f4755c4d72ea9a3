//! Buckets of the central certification list classification reply.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Run tokens
// ---------------------------------------------------------------------------

/// One entry of a classification bucket.
///
/// The reply mixes genuine run numbers with free-text tokens echoed back
/// from the pasted list, so both shapes have to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunToken {
    Number(u64),
    Text(String),
}

impl fmt::Display for RunToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunToken::Number(number) => write!(f, "{number}"),
            RunToken::Text(text) => write!(f, "{text}"),
        }
    }
}

impl Ord for RunToken {
    /// Numbers sort ascending ahead of text, text sorts lexicographically.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (RunToken::Number(a), RunToken::Number(b)) => a.cmp(b),
            (RunToken::Text(a), RunToken::Text(b)) => a.cmp(b),
            (RunToken::Number(_), RunToken::Text(_)) => Ordering::Less,
            (RunToken::Text(_), RunToken::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for RunToken {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Buckets
// ---------------------------------------------------------------------------

/// Classification reply for a pasted run list.
///
/// Carries every bucket either backend revision produces; absent buckets
/// stay empty and unknown keys are ignored. The older revision called the
/// flag-mismatch bucket `conflicting`, accepted here as an alias.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListBuckets {
    #[serde(default)]
    pub good: Vec<RunToken>,
    #[serde(default)]
    pub bad: Vec<RunToken>,
    #[serde(default)]
    pub missing: Vec<RunToken>,
    #[serde(default)]
    pub prompt_missing: Vec<RunToken>,
    #[serde(default)]
    pub changed_good: Vec<RunToken>,
    #[serde(default)]
    pub changed_bad: Vec<RunToken>,
    #[serde(default, alias = "conflicting")]
    pub different_flags: Vec<RunToken>,
}

impl ListBuckets {
    /// Whether every bucket is empty.
    pub fn is_empty(&self) -> bool {
        self.good.is_empty()
            && self.bad.is_empty()
            && self.missing.is_empty()
            && self.prompt_missing.is_empty()
            && self.changed_good.is_empty()
            && self.changed_bad.is_empty()
            && self.different_flags.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Interpretation of the server-side integrity check.
//!
//! When an Express or Prompt run is entered, the server compares the
//! snapshot against the already-certified counterpart pass of the same run
//! number and replies with a map of conflicting fields. This module turns
//! that map into per-field warnings.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::run::RecoType;
use crate::validation::report::FieldNote;

// ---------------------------------------------------------------------------
// Reply shape
// ---------------------------------------------------------------------------

/// Field-to-counterpart-value map returned by the integrity endpoint.
///
/// Keys are the conflicting field names, optionally suffixed `_lowstat` for
/// the low-statistics flags; an empty map means the counterpart
/// certification agrees on every field.
pub type IntegrityReply = BTreeMap<String, Value>;

// ---------------------------------------------------------------------------
// Warning rendering
// ---------------------------------------------------------------------------

/// Render a reply value the way the page interpolated it into the message.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One warning per conflicting field.
///
/// The message names the counterpart pass the snapshot was checked against,
/// e.g. a Prompt snapshot answered with `{"pixel": "Bad"}` yields a warning
/// on `pixel` reading `Express was certified as: Bad `. Snapshots without a
/// counterpart (reReco) are never cross-checked, so any reply is ignored.
pub fn counterpart_warnings(reco: RecoType, reply: &IntegrityReply) -> Vec<FieldNote> {
    let Some(counterpart) = reco.counterpart() else {
        return Vec::new();
    };
    reply
        .iter()
        .map(|(field, value)| {
            FieldNote::warning(
                field.clone(),
                format!("{} was certified as: {} ", counterpart.as_str(), value_text(value)),
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

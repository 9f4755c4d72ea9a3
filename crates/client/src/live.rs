//! Keystroke-driven endpoint bindings that only keep the latest reply.
//!
//! The run form re-checks integrity and the shift leader textarea
//! re-classifies on every edit. Both wrappers here race each request
//! against its gate ticket so a reply belonging to an outdated edit is
//! discarded instead of overwriting newer state.

use runcert_core::certlist::render::{annotate, ListAnnotation};
use runcert_core::run::RecoType;
use runcert_core::validation::integrity::counterpart_warnings;
use runcert_core::validation::report::FieldNote;

use crate::api::{CertHelperApi, ClientError, IntegrityRequest};
use crate::sequence::RequestGate;

// ---------------------------------------------------------------------------
// Run list classification
// ---------------------------------------------------------------------------

/// Live classification of the certification list textarea.
pub struct LiveRunList {
    api: CertHelperApi,
    gate: RequestGate,
}

impl LiveRunList {
    pub fn new(api: CertHelperApi) -> Self {
        Self {
            api,
            gate: RequestGate::new(),
        }
    }

    /// Classify the current textarea content.
    ///
    /// Returns `Ok(None)` when a newer edit superseded this one before
    /// its reply could be used; only the newest edit yields an
    /// annotation.
    pub async fn classify(&self, text: &str) -> Result<Option<ListAnnotation>, ClientError> {
        let ticket = self.gate.begin();

        let buckets = tokio::select! {
            _ = ticket.token().cancelled() => {
                tracing::debug!(serial = ticket.serial(), "Run list reply superseded");
                return Ok(None);
            }
            result = self.api.classify_run_list(text) => result?,
        };

        // The reply may have resolved in the same poll as a newer begin().
        if !self.gate.admits(&ticket) {
            tracing::debug!(serial = ticket.serial(), "Run list reply superseded");
            return Ok(None);
        }

        Ok(Some(annotate(buckets)))
    }
}

// ---------------------------------------------------------------------------
// Integrity checking
// ---------------------------------------------------------------------------

/// Live counterpart check for the run form.
pub struct LiveIntegrity {
    api: CertHelperApi,
    gate: RequestGate,
}

impl LiveIntegrity {
    pub fn new(api: CertHelperApi) -> Self {
        Self {
            api,
            gate: RequestGate::new(),
        }
    }

    /// Post the current form snapshot and derive counterpart warnings.
    ///
    /// `reco` is the snapshot's reconstruction type; the warnings name its
    /// counterpart. Superseded snapshots return `Ok(None)`.
    pub async fn check(
        &self,
        request: &IntegrityRequest,
        reco: RecoType,
    ) -> Result<Option<Vec<FieldNote>>, ClientError> {
        let ticket = self.gate.begin();

        let reply = tokio::select! {
            _ = ticket.token().cancelled() => {
                tracing::debug!(serial = ticket.serial(), "Integrity reply superseded");
                return Ok(None);
            }
            result = self.api.check_run_integrity(request) => result?,
        };

        if !self.gate.admits(&ticket) {
            tracing::debug!(serial = ticket.serial(), "Integrity reply superseded");
            return Ok(None);
        }

        Ok(Some(counterpart_warnings(reco, &reply)))
    }
}

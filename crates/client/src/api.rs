//! REST client for the certification helper endpoints.
//!
//! Wraps the helper's AJAX endpoints (dropdown cascade fragments, run
//! integrity checks, certification list classification) and its Run
//! Registry proxy using [`reqwest`].

use runcert_core::certlist::buckets::ListBuckets;
use runcert_core::filter::cascade::{self, SelectOption};
use runcert_core::run::RunSnapshot;
use runcert_core::types::{OptionId, RunNumber};
use runcert_core::validation::integrity::IntegrityReply;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;

/// Body text the helper serves while its Run Registry proxy is down.
const REGISTRY_UNAVAILABLE: &str = "Run Registry is unavailable.";

/// HTTP client for one certification helper instance.
pub struct CertHelperApi {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the certification helper HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The helper returned a non-2xx status code.
    #[error("CertHelper API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A reply body did not have the expected JSON shape.
    #[error("Invalid JSON reply: {0}")]
    Json(#[from] serde_json::Error),

    /// A dropdown fragment could not be parsed.
    #[error("Invalid reply: {0}")]
    Reply(#[from] runcert_core::CoreError),
}

// ---------------------------------------------------------------------------
// Request / reply payloads
// ---------------------------------------------------------------------------

/// Form fields of the integrity check POST, one per run form control.
///
/// Every non-flag value travels as the string the form control would
/// submit, with unset controls as empty strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegrityRequest {
    pub run_number: String,
    #[serde(rename = "type")]
    pub type_id: String,
    pub reference_run: String,
    pub trackermap: String,
    pub number_of_ls: String,
    pub int_luminosity: String,
    pub pixel: String,
    pub pixel_lowstat: bool,
    pub sistrip: String,
    pub sistrip_lowstat: bool,
    pub tracking: String,
    pub tracking_lowstat: bool,
    pub comment: String,
    pub date: String,
}

impl From<&RunSnapshot> for IntegrityRequest {
    fn from(snapshot: &RunSnapshot) -> Self {
        Self {
            run_number: snapshot
                .run_number
                .map(|n| n.to_string())
                .unwrap_or_default(),
            type_id: snapshot
                .run_type
                .as_ref()
                .map(|t| t.id.to_string())
                .unwrap_or_default(),
            reference_run: snapshot
                .reference_run
                .as_ref()
                .map(|r| r.id.to_string())
                .unwrap_or_default(),
            trackermap: snapshot
                .trackermap
                .map(|t| t.as_str().to_string())
                .unwrap_or_default(),
            number_of_ls: snapshot
                .number_of_ls
                .map(|n| n.to_string())
                .unwrap_or_default(),
            int_luminosity: snapshot
                .int_luminosity
                .map(|l| l.to_string())
                .unwrap_or_default(),
            pixel: snapshot
                .pixel
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
            pixel_lowstat: snapshot.pixel_lowstat,
            sistrip: snapshot
                .sistrip
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
            sistrip_lowstat: snapshot.sistrip_lowstat,
            tracking: snapshot
                .tracking
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
            tracking_lowstat: snapshot.tracking_lowstat,
            comment: snapshot.comment.clone(),
            date: snapshot
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

/// One run record from the Run Registry proxy.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegistryRun {
    pub run_number: u64,
    pub run_class: String,
    pub dataset: String,
    pub state: String,
    pub shifter: String,
    pub pixel: String,
    pub pixel_lowstat: bool,
    pub sistrip: String,
    pub sistrip_lowstat: bool,
    pub tracking: String,
    pub tracking_lowstat: bool,
}

/// Outcome of a Run Registry lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryLookup {
    /// Registry records matching the requested run number.
    Runs(Vec<RegistryRun>),
    /// The helper could not reach the registry.
    Unavailable,
}

// ---------------------------------------------------------------------------
// CertHelperApi
// ---------------------------------------------------------------------------

impl CertHelperApi {
    /// Create an API client from configuration.
    pub fn new(config: &ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            base_url: config.base_url.clone(),
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Fetch the subcategory dropdown options for a category.
    ///
    /// Sends a `GET /ajax/load-subcategories/?categoryid=` request and
    /// parses the returned `<option>` fragment.
    pub async fn load_subcategories(
        &self,
        category_id: OptionId,
    ) -> Result<Vec<SelectOption>, ClientError> {
        self.load_fragment("/ajax/load-subcategories/", "categoryid", category_id)
            .await
    }

    /// Fetch the subsubcategory dropdown options for a subcategory.
    ///
    /// Sends a `GET /ajax/load-subsubcategories/?subcategoryid=` request
    /// and parses the returned `<option>` fragment.
    pub async fn load_subsubcategories(
        &self,
        subcategory_id: OptionId,
    ) -> Result<Vec<SelectOption>, ClientError> {
        self.load_fragment("/ajax/load-subsubcategories/", "subcategoryid", subcategory_id)
            .await
    }

    /// Check a draft run against its counterpart certification.
    ///
    /// Sends a `POST /ajax/check_integrity_of_run/` request with the
    /// form-encoded snapshot. An empty reply map means no mismatch.
    pub async fn check_run_integrity(
        &self,
        request: &IntegrityRequest,
    ) -> Result<IntegrityReply, ClientError> {
        let response = self
            .client
            .post(format!("{}/ajax/check_integrity_of_run/", self.base_url))
            .form(request)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Classify a pasted certification run list into buckets.
    ///
    /// Sends a `GET /ajax/validate-cc-list/?text=` request.
    pub async fn classify_run_list(&self, text: &str) -> Result<ListBuckets, ClientError> {
        let response = self
            .client
            .get(format!("{}/ajax/validate-cc-list/", self.base_url))
            .query(&[("text", text)])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Look up a run number in the Run Registry proxy.
    ///
    /// Sends a `GET /runregistry/{run_number}` request. A degraded
    /// registry is reported in-band by the helper; that case is logged
    /// and returned as [`RegistryLookup::Unavailable`], not an error.
    pub async fn run_registry(&self, run_number: RunNumber) -> Result<RegistryLookup, ClientError> {
        let response = self
            .client
            .get(format!("{}/runregistry/{}", self.base_url, run_number))
            .send()
            .await?;
        let body = Self::ensure_success(response).await?.text().await?;

        if body.trim() == REGISTRY_UNAVAILABLE {
            tracing::warn!(run_number, "Run Registry is unavailable");
            return Ok(RegistryLookup::Unavailable);
        }

        let runs: Vec<RegistryRun> = serde_json::from_str(&body)?;
        Ok(RegistryLookup::Runs(runs))
    }

    // ---- private helpers ----

    /// Fetch and parse one dropdown `<option>` fragment.
    async fn load_fragment(
        &self,
        path: &str,
        param: &str,
        id: OptionId,
    ) -> Result<Vec<SelectOption>, ClientError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(&[(param, id)])
            .send()
            .await?;
        let body = Self::ensure_success(response).await?.text().await?;
        Ok(cascade::parse_option_fragment(&body)?)
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`ClientError::Api`] with the
    /// status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

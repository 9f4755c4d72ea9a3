//! `runcert-console` -- command line front end for the certification
//! list classifier.
//!
//! Reads pasted run-number lists line by line from stdin, classifies
//! each line through the helper's `validate-cc-list` endpoint and
//! prints the non-empty buckets. Mostly useful as a smoke test against
//! a running helper instance.
//!
//! # Environment variables
//!
//! | Variable                  | Required | Default                 | Description                    |
//! |---------------------------|----------|-------------------------|--------------------------------|
//! | `CERTHELPER_BASE_URL`     | no       | `http://localhost:8000` | Helper base URL                |
//! | `CERTHELPER_TIMEOUT_SECS` | no       | `30`                    | HTTP request timeout (seconds) |

use futures::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};

use runcert_client::api::CertHelperApi;
use runcert_client::config::ClientConfig;
use runcert_client::live::LiveRunList;
use runcert_core::certlist::render::BUCKET_ORDER;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "runcert_console=info,runcert_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env();
    tracing::info!(base_url = %config.base_url, "Starting runcert-console");

    let annotator = LiveRunList::new(CertHelperApi::new(&config));

    let reader = BufReader::new(tokio::io::stdin());
    let lines = futures::stream::unfold(reader.lines(), |mut lines| async move {
        lines
            .next_line()
            .await
            .ok()
            .flatten()
            .map(|line| (line, lines))
    });
    futures::pin_mut!(lines);

    while let Some(line) = lines.next().await {
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        match annotator.classify(text).await {
            Ok(Some(annotation)) => {
                for bucket in BUCKET_ORDER {
                    let mut runs = bucket.runs(&annotation.buckets).to_vec();
                    if runs.is_empty() {
                        continue;
                    }
                    runs.sort();
                    let joined = runs
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ");
                    println!("{}: {joined}", bucket.legend_label());
                }
            }
            // Sequential use never supersedes itself.
            Ok(None) => {}
            Err(e) => {
                tracing::error!(error = %e, "Classification request failed");
            }
        }
    }
}

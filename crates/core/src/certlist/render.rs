//! HTML annotation of a classified run list.
//!
//! The shift leader pastes the central certification list into a textarea
//! and every token comes back wrapped in a colour-coded span, followed by
//! a legend naming only the colours actually present.

use super::buckets::{ListBuckets, RunToken};

// ---------------------------------------------------------------------------
// Bucket kinds
// ---------------------------------------------------------------------------

/// The classification bucket a token landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Good,
    Bad,
    Missing,
    PromptMissing,
    ChangedGood,
    ChangedBad,
    DifferentFlags,
}

/// Render order of the buckets.
pub const BUCKET_ORDER: [Bucket; 7] = [
    Bucket::Good,
    Bucket::Bad,
    Bucket::Missing,
    Bucket::PromptMissing,
    Bucket::ChangedGood,
    Bucket::ChangedBad,
    Bucket::DifferentFlags,
];

impl Bucket {
    /// CSS class carrying the bucket colour.
    pub fn css_class(&self) -> &'static str {
        match self {
            Bucket::Good => "good-runs",
            Bucket::Bad => "bad-runs",
            Bucket::Missing => "missing-runs",
            Bucket::PromptMissing => "prompt-missing-runs",
            Bucket::ChangedGood => "changed-good-runs",
            Bucket::ChangedBad => "changed-bad-runs",
            Bucket::DifferentFlags => "different-flags-runs",
        }
    }

    /// Label shown in the legend.
    pub fn legend_label(&self) -> &'static str {
        match self {
            Bucket::Good => "GOOD",
            Bucket::Bad => "BAD",
            Bucket::Missing => "MISSING",
            Bucket::PromptMissing => "PROMPT MISSING",
            Bucket::ChangedGood => "CHANGED TO GOOD",
            Bucket::ChangedBad => "CHANGED TO BAD",
            Bucket::DifferentFlags => "DIFFERENT FLAGS",
        }
    }

    /// The runs this bucket holds within a reply.
    pub fn runs<'a>(&self, buckets: &'a ListBuckets) -> &'a [RunToken] {
        match self {
            Bucket::Good => &buckets.good,
            Bucket::Bad => &buckets.bad,
            Bucket::Missing => &buckets.missing,
            Bucket::PromptMissing => &buckets.prompt_missing,
            Bucket::ChangedGood => &buckets.changed_good,
            Bucket::ChangedBad => &buckets.changed_bad,
            Bucket::DifferentFlags => &buckets.different_flags,
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// One comma-joined stream of colour-coded run spans across all buckets,
/// each bucket sorted before rendering.
pub fn render_spans(buckets: &ListBuckets) -> String {
    let mut entries = Vec::new();
    for bucket in BUCKET_ORDER {
        let mut runs = bucket.runs(buckets).to_vec();
        runs.sort();
        for run in runs {
            entries.push(format!(
                "<span class=\"{}\">{run}</span>",
                bucket.css_class()
            ));
        }
    }
    entries.join(", ")
}

/// The legend line naming each non-empty bucket in its colour.
pub fn render_legend(buckets: &ListBuckets) -> String {
    let mut legend = String::from("<br/>Legend:");
    for bucket in BUCKET_ORDER {
        if !bucket.runs(buckets).is_empty() {
            legend.push_str(&format!(
                "<span class=\"{}\">{}</span> ",
                bucket.css_class(),
                bucket.legend_label()
            ));
        }
    }
    legend
}

/// Rendered annotation for one classification reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ListAnnotation {
    pub spans: String,
    pub legend: String,
    pub buckets: ListBuckets,
}

/// Build the full annotation for a classification reply.
pub fn annotate(buckets: ListBuckets) -> ListAnnotation {
    ListAnnotation {
        spans: render_spans(&buckets),
        legend: render_legend(&buckets),
        buckets,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

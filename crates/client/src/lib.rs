//! HTTP client library for the run certification helper.
//!
//! Wraps the helper's AJAX endpoints with typed requests and replies,
//! parses dropdown fragments through `runcert-core`, and adds
//! latest-request-wins sequencing for the keystroke-driven checks. The
//! reference console binary lives in `main.rs`.

pub mod api;
pub mod config;
pub mod live;
pub mod sequence;

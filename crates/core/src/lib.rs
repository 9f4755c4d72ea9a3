//! Pure domain logic for the run certification helper.
//!
//! Everything in this crate is synchronous and side-effect free: run
//! snapshots and their validation rules, checklist gating, dropdown
//! filtering, the list filter query model, luminosity unit handling and
//! the shift-leader certification list annotator. Network access lives
//! in `runcert-client`.

pub mod certlist;
pub mod checklist;
pub mod error;
pub mod filter;
pub mod luminosity;
pub mod options;
pub mod run;
pub mod types;
pub mod validation;

pub use error::CoreError;

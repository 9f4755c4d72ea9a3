//! Certification form validation.
//!
//! Pure synchronous checks over a [`RunSnapshot`](crate::run::RunSnapshot)
//! plus the interpretation of the server-side integrity reply. All feedback
//! is collected as per-field notes; nothing here touches a page.

pub mod checks;
pub mod integrity;
pub mod report;

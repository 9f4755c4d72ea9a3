//! Run list filtering: week navigation, the filter panel and the query
//! string it submits, and the category dropdown cascade.

pub mod cascade;
pub mod dates;
pub mod form;
pub mod panel;

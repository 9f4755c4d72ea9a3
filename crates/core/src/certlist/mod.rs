//! Central certification list tooling for the shift leader: bucket model
//! of the classification reply and the colour-coded HTML annotation.

pub mod buckets;
pub mod render;

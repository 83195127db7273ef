//! CLI library components for QA report pre-fill extraction.

pub mod logging;
pub mod pipeline;

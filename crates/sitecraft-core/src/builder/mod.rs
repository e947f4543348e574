//! Website builder pipeline.
//!
//! Prompt composition, tiered extraction of model replies, field-level
//! merging, the keyword heuristic fallback, and component generation. Every
//! function here is synchronous and side-effect free apart from logging.

pub mod component;
pub mod extractor;
pub mod heuristic;
pub mod merge;
pub mod prompt;
pub mod resolve;
pub mod suggestions;

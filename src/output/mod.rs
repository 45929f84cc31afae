//! Persisting generated images
//!
//! Resolves output paths, avoids overwriting existing files and records what
//! was written for reporting.

pub mod result;
pub mod writer;

pub use result::{render_json, GenerationResult, Params};
pub use writer::OutputWriter;

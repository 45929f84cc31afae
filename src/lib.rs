//! naba: a command-line client for Gemini image generation
//!
//! Builds `generateContent` requests from a prompt and an optional input
//! image, classifies the API's answer into a fixed exit-code taxonomy,
//! extracts the returned images and writes them to disk without clobbering
//! existing files.

pub mod ai;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod prompts;

pub use error::{ApiError, Error, ErrorKind, Result};

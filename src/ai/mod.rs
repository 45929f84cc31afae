//! Image generation backends
//!
//! The Gemini client turns a prompt (and optionally an input image) into
//! decoded images; the mock stands in for it in tests and harnesses.

pub mod gemini;
pub mod mime;
pub mod mock;

pub use gemini::{GeminiImageClient, ImageResult, InputImage};
pub use mock::MockImageGenerator;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Run one generation round trip and return every image it produced.
    async fn generate(&self, prompt: &str, input: Option<&InputImage>) -> Result<Vec<ImageResult>>;
}

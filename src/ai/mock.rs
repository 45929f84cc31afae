use super::{ImageGenerator, ImageResult, InputImage};
use crate::error::ApiError;
use crate::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// One scripted answer for [`MockImageGenerator`].
#[derive(Debug, Clone)]
pub enum MockResponse {
    Images(Vec<ImageResult>),
    Failure(ApiError),
}

/// Scripted generator: answers are consumed in order, and the last one
/// repeats once the script runs out. Clones share the script and the
/// recorded calls.
#[derive(Clone)]
pub struct MockImageGenerator {
    responses: Arc<Mutex<Vec<MockResponse>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    inputs: Arc<Mutex<Vec<Option<String>>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockImageGenerator {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            inputs: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_images(self, images: Vec<ImageResult>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(MockResponse::Images(images));
        self
    }

    pub fn with_image(self, data: Vec<u8>, mime_type: &str) -> Self {
        self.with_images(vec![ImageResult {
            data,
            mime_type: mime_type.to_string(),
        }])
    }

    pub fn with_failure(self, error: ApiError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(MockResponse::Failure(error));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// MIME type of the input image of each call, if one was sent.
    pub fn input_mime_types(&self) -> Vec<Option<String>> {
        self.inputs.lock().unwrap().clone()
    }
}

impl Default for MockImageGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate(&self, prompt: &str, input: Option<&InputImage>) -> Result<Vec<ImageResult>> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        self.prompts.lock().unwrap().push(prompt.to_string());
        self.inputs
            .lock()
            .unwrap()
            .push(input.map(|i| i.mime_type.clone()));

        let responses = self.responses.lock().unwrap();
        let response = if responses.is_empty() {
            // A 1x1 PNG signature is enough for the writer
            MockResponse::Images(vec![ImageResult {
                data: vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A],
                mime_type: "image/png".to_string(),
            }])
        } else {
            let index = (*count - 1).min(responses.len() - 1);
            responses[index].clone()
        };

        match response {
            MockResponse::Images(images) => Ok(images),
            MockResponse::Failure(error) => Err(error.into()),
        }
    }
}

use super::classify::classify;
use super::extract::extract_images;
use super::types::{GenerateContentRequest, ImageResult};
use crate::Result;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp-image-generation";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Gemini REST transport for `generateContent`.
pub struct GeminiHttpClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiHttpClient {
    /// Construct a Gemini client.
    ///
    /// `model` should be the bare model ID (for example
    /// `gemini-2.0-flash-exp-image-generation`); a `models/` prefix is stripped.
    pub fn new(api_key: String, model: String, timeout: Duration) -> Self {
        Self::new_with_client(api_key, model, timeout, Client::new())
    }

    pub fn new_with_client(
        api_key: String,
        model: String,
        timeout: Duration,
        client: Client,
    ) -> Self {
        let model = model.strip_prefix("models/").unwrap_or(&model).to_string();

        Self {
            client,
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
        }
    }

    /// Point the client at another endpoint, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the configured model ID without the `models/` prefix.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn generate_content_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// POST the request and return the raw status and body.
    ///
    /// Timeouts, refused connections and invalid URLs surface as
    /// [`crate::Error::Http`]; HTTP statuses are left to the classifier.
    pub async fn send(&self, request: &GenerateContentRequest) -> Result<(u16, String)> {
        let url = self.generate_content_url();
        let body = serde_json::to_vec(request)?;
        tracing::debug!("POST {} ({} bytes)", url, body.len());

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Gemini: {}", e);
                e
            })?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| {
            tracing::error!("Failed to read Gemini response body: {}", e);
            e
        })?;
        tracing::debug!("Gemini answered with status {} ({} bytes)", status, text.len());

        Ok((status, text))
    }

    /// Send, classify and extract in one round trip.
    pub async fn generate(&self, request: &GenerateContentRequest) -> Result<Vec<ImageResult>> {
        let (status, body) = self.send(request).await?;
        let response = classify(status, &body)?;
        Ok(extract_images(response)?)
    }
}

use super::client::{GeminiHttpClient, DEFAULT_TIMEOUT};
use super::request::{build_image_request, build_text_request, InputImage};
use super::types::ImageResult;
use crate::ai::ImageGenerator;
use crate::Result;
use async_trait::async_trait;
use std::time::Duration;

/// [`ImageGenerator`] backed by the Gemini `generateContent` endpoint.
pub struct GeminiImageClient {
    http: GeminiHttpClient,
}

impl GeminiImageClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, DEFAULT_TIMEOUT, client),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }

    pub fn model(&self) -> &str {
        self.http.model()
    }
}

#[async_trait]
impl ImageGenerator for GeminiImageClient {
    async fn generate(&self, prompt: &str, input: Option<&InputImage>) -> Result<Vec<ImageResult>> {
        let request = match input {
            Some(image) => build_image_request(prompt, &image.data, &image.mime_type),
            None => build_text_request(prompt),
        };

        self.http.generate(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::gemini::test_support;
    use crate::error::ErrorKind;
    use base64::Engine as _;
    use std::path::PathBuf;
    use wiremock::matchers::body_partial_json;
    use wiremock::{MockServer, ResponseTemplate};

    fn make_client(server: &MockServer) -> GeminiImageClient {
        GeminiImageClient::new("key".to_string(), test_support::MODEL.to_string())
            .with_base_url(server.uri())
    }

    #[test]
    fn test_model_prefix_is_stripped() {
        let client = GeminiImageClient::new("key".to_string(), "models/m2".to_string());
        assert_eq!(client.model(), "m2");
    }

    #[tokio::test]
    async fn test_generate_parses_inline_data() {
        let server = MockServer::start().await;
        let fake_image = vec![0x89, 0x50, 0x4E, 0x47];
        let body = test_support::image_response(&[("image/png", fake_image.as_slice())]);

        test_support::post_generate_content()
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let images = make_client(&server).generate("a dream", None).await.unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].data, fake_image);
        assert_eq!(images[0].mime_type, "image/png");
    }

    #[tokio::test]
    async fn test_input_image_is_sent_inline() {
        let server = MockServer::start().await;
        let input = InputImage {
            path: PathBuf::from("cat.jpg"),
            data: vec![0xFF, 0xD8, 0xFF],
            mime_type: "image/jpeg".to_string(),
        };
        let encoded = base64::engine::general_purpose::STANDARD.encode(&input.data);

        test_support::post_generate_content()
            .and(body_partial_json(serde_json::json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        { "text": "Edit this image: add a hat" },
                        { "inlineData": { "mimeType": "image/jpeg", "data": encoded } }
                    ]
                }]
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(test_support::image_response(&[("image/png", &[7u8][..])])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let images = make_client(&server)
            .generate("Edit this image: add a hat", Some(&input))
            .await
            .unwrap();
        assert_eq!(images[0].data, vec![7]);
    }

    #[tokio::test]
    async fn test_blocked_prompt_with_images_fails() {
        let server = MockServer::start().await;
        let mut body = test_support::image_response(&[("image/png", &[1u8, 2][..])]);
        body["promptFeedback"] = serde_json::json!({ "blockReason": "PROHIBITED_CONTENT" });

        test_support::post_generate_content()
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let err = make_client(&server).generate("x", None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.to_string(), "prompt blocked: PROHIBITED_CONTENT");
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_auth() {
        let server = MockServer::start().await;

        test_support::post_generate_content()
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "error": { "code": 403, "message": "Permission denied", "status": "PERMISSION_DENIED" }
            })))
            .mount(&server)
            .await;

        let err = make_client(&server).generate("x", None).await.unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}

use super::types::{GenerateContentResponse, ImageResult, Part};
use crate::error::{ApiError, ErrorKind};
use base64::Engine as _;

/// Collect every inline image, in candidate order then part order.
pub fn extract_images(response: GenerateContentResponse) -> Result<Vec<ImageResult>, ApiError> {
    let mut images = Vec::new();

    for candidate in response.candidates {
        let Some(content) = candidate.content else {
            tracing::debug!(
                "Skipping candidate without content (finish reason: {:?})",
                candidate.finish_reason
            );
            continue;
        };

        for part in content.parts {
            let inline_data = match part {
                Part::InlineData { inline_data } => inline_data,
                Part::Text { text } => {
                    tracing::debug!("Gemini returned text alongside images: {}", text);
                    continue;
                }
                Part::Other(_) => continue,
            };

            let data = base64::engine::general_purpose::STANDARD
                .decode(&inline_data.data)
                .map_err(|e| {
                    tracing::error!("Failed to decode Gemini base64 image: {}", e);
                    ApiError::new(ErrorKind::General, format!("decode image data: {}", e), 0)
                })?;

            tracing::debug!(
                "Gemini returned image with mime_type: {} ({} bytes)",
                inline_data.mime_type,
                data.len()
            );
            images.push(ImageResult {
                data,
                mime_type: inline_data.mime_type,
            });
        }
    }

    if images.is_empty() {
        return Err(ApiError::new(ErrorKind::Api, "no images in response", 0));
    }

    Ok(images)
}

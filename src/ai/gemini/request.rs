//! Request construction for `generateContent` calls.

use super::types::{
    Content, GenerateContentRequest, GenerationConfig, InlineData, Part, RESPONSE_MODALITIES,
};
use crate::ai::mime::mime_type_for_path;
use crate::error::{ApiError, ErrorKind};
use base64::Engine as _;
use std::path::{Path, PathBuf};

/// An input image read from disk for edit and restore flows.
#[derive(Debug, Clone)]
pub struct InputImage {
    pub path: PathBuf,
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl InputImage {
    pub fn load(path: &Path) -> std::result::Result<Self, ApiError> {
        let data = std::fs::read(path).map_err(|e| {
            let message = if e.kind() == std::io::ErrorKind::NotFound {
                format!("input file not found: {}", path.display())
            } else {
                format!("read image file {:?}: {}", path.display().to_string(), e)
            };
            ApiError::new(ErrorKind::FileIo, message, 0)
        })?;

        let mime_type = mime_type_for_path(path, &data).to_string();
        tracing::debug!(
            "Loaded input image {} ({} bytes, {})",
            path.display(),
            data.len(),
            mime_type
        );

        Ok(Self {
            path: path.to_path_buf(),
            data,
            mime_type,
        })
    }
}

fn user_turn(parts: Vec<Part>) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts,
        }],
        generation_config: GenerationConfig {
            response_modalities: RESPONSE_MODALITIES.iter().map(|m| m.to_string()).collect(),
        },
    }
}

pub fn build_text_request(prompt: &str) -> GenerateContentRequest {
    user_turn(vec![Part::Text {
        text: prompt.to_string(),
    }])
}

/// Text part first, then the base64-encoded image.
pub fn build_image_request(prompt: &str, image: &[u8], mime_type: &str) -> GenerateContentRequest {
    user_turn(vec![
        Part::Text {
            text: prompt.to_string(),
        },
        Part::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.to_string(),
                data: base64::engine::general_purpose::STANDARD.encode(image),
            },
        },
    ])
}

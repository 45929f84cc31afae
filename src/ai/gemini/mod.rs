pub mod classify;
pub mod client;
pub mod extract;
pub mod image;
pub mod request;
pub mod types;

pub use classify::classify;
pub use client::GeminiHttpClient;
pub use extract::extract_images;
pub use image::GeminiImageClient;
pub use request::{build_image_request, build_text_request, InputImage};
pub use types::{GenerateContentRequest, GenerateContentResponse, ImageResult};

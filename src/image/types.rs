//! Core types for image generation.

use serde::{Deserialize, Serialize};

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG format (lossless).
    Png,
    /// JPEG format (lossy).
    Jpeg,
    /// WebP format.
    WebP,
}

impl ImageFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
        }
    }

    /// Detects image format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 12 {
            return None;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some(Self::WebP);
        }

        None
    }
}

/// Image provider kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageProviderKind {
    /// OpenAI Images API.
    OpenAI,
}

impl std::fmt::Display for ImageProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAI => write!(f, "openai"),
        }
    }
}

/// Image model variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageModel {
    /// DALL-E 3.
    #[default]
    #[serde(rename = "dall-e-3")]
    DallE3,
    /// DALL-E 2.
    #[serde(rename = "dall-e-2")]
    DallE2,
}

impl ImageModel {
    /// Returns the API model identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DallE3 => "dall-e-3",
            Self::DallE2 => "dall-e-2",
        }
    }
}

/// Output resolutions accepted by the images endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSize {
    /// 256x256 (dall-e-2 only).
    #[serde(rename = "256x256")]
    Small,
    /// 512x512 (dall-e-2 only).
    #[serde(rename = "512x512")]
    Medium,
    /// 1024x1024.
    #[default]
    #[serde(rename = "1024x1024")]
    Square,
}

impl ImageSize {
    /// Returns the size as the API expects it (e.g., "1024x1024").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "256x256",
            Self::Medium => "512x512",
            Self::Square => "1024x1024",
        }
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A request to generate an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    /// Model to generate with.
    pub model: ImageModel,
    /// The text prompt describing the desired image.
    pub prompt: String,
    /// Number of images to generate.
    pub n: u32,
    /// Requested output resolution.
    pub size: ImageSize,
}

impl GenerationRequest {
    /// Creates a request for one 1024x1024 dall-e-3 image.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            model: ImageModel::default(),
            prompt: prompt.into(),
            n: 1,
            size: ImageSize::default(),
        }
    }

    /// Sets the model.
    pub fn with_model(mut self, model: ImageModel) -> Self {
        self.model = model;
        self
    }

    /// Sets the output resolution.
    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = size;
        self
    }
}

/// Metadata about the generation process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationMetadata {
    /// Model used for generation.
    pub model: Option<String>,
    /// Generation duration in milliseconds.
    pub duration_ms: Option<u64>,
}

/// The first result of a generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Hosted image URL. The provider may omit it.
    pub url: Option<String>,
    /// Prompt as rewritten by the provider, if it did so.
    pub revised_prompt: Option<String>,
    /// Provider that generated this image.
    pub provider: ImageProviderKind,
    /// Generation metadata.
    pub metadata: GenerationMetadata,
}

impl GeneratedImage {
    /// Creates a result with only a URL.
    pub fn from_url(url: impl Into<String>, provider: ImageProviderKind) -> Self {
        Self {
            url: Some(url.into()),
            revised_prompt: None,
            provider,
            metadata: GenerationMetadata::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 12] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_MAGIC: [u8; 12] = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0, 0, 0, 0, 0];
    const WEBP_MAGIC: [u8; 12] = *b"RIFF\x00\x00\x00\x00WEBP";

    #[test]
    fn test_format_from_magic_bytes() {
        assert_eq!(
            ImageFormat::from_magic_bytes(&PNG_MAGIC),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&JPEG_MAGIC),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&WEBP_MAGIC),
            Some(ImageFormat::WebP)
        );
        assert_eq!(ImageFormat::from_magic_bytes(b"<html>"), None);
    }

    #[test]
    fn test_request_defaults() {
        let req = GenerationRequest::new("A lighthouse at dusk");
        assert_eq!(req.model, ImageModel::DallE3);
        assert_eq!(req.n, 1);
        assert_eq!(req.size, ImageSize::Square);
    }

    #[test]
    fn test_request_serialization() {
        let req = GenerationRequest::new("A lighthouse at dusk");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "dall-e-3",
                "prompt": "A lighthouse at dusk",
                "n": 1,
                "size": "1024x1024",
            })
        );
    }

    #[test]
    fn test_size_as_str() {
        assert_eq!(ImageSize::Square.as_str(), "1024x1024");
        assert_eq!(ImageSize::Small.to_string(), "256x256");
    }

    #[test]
    fn test_provider_kind_display() {
        assert_eq!(ImageProviderKind::OpenAI.to_string(), "openai");
    }
}

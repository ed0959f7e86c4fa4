//! OpenAI image generation provider (dall-e-3, dall-e-2).

use crate::config::{Config, API_KEY_ENV, DEFAULT_BASE_URL};
use crate::error::{sanitize_error_message, Error, Result};
use crate::image::provider::ImageProvider;
use crate::image::types::{
    GeneratedImage, GenerationMetadata, GenerationRequest, ImageProviderKind,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;

const GENERATIONS_PATH: &str = "/images/generations";

/// Builder for OpenAiImageProvider.
#[derive(Debug, Clone, Default)]
pub struct OpenAiImageProviderBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    client: Option<reqwest::Client>,
}

impl OpenAiImageProviderBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Falls back to `OPENAI_API_KEY` env var.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the API base URL (default: `https://api.openai.com/v1`).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Uses an existing HTTP client instead of creating one.
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Builds the provider, resolving the API key.
    pub fn build(self) -> Result<OpenAiImageProvider> {
        let config = Config {
            api_key: self.api_key.or_else(|| std::env::var(API_KEY_ENV).ok()),
            base_url: DEFAULT_BASE_URL.to_string(),
        };
        let config = match self.base_url {
            Some(url) => config.with_base_url(url),
            None => config,
        };
        let api_key = config.api_key()?.to_string();

        Ok(OpenAiImageProvider {
            client: self.client.unwrap_or_default(),
            api_key,
            generations_url: format!("{}{}", config.base_url, GENERATIONS_PATH),
        })
    }
}

/// OpenAI image generation provider.
pub struct OpenAiImageProvider {
    client: reqwest::Client,
    api_key: String,
    generations_url: String,
}

impl OpenAiImageProvider {
    /// Creates a new `OpenAiImageProviderBuilder`.
    pub fn builder() -> OpenAiImageProviderBuilder {
        OpenAiImageProviderBuilder::new()
    }

    /// Builds a provider from an injected configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::builder()
            .api_key(config.api_key()?)
            .base_url(config.base_url.clone())
            .build()
    }

    fn parse_error(status: u16, text: &str) -> Error {
        match serde_json::from_str::<OpenAiErrorEnvelope>(text) {
            Ok(envelope) => Error::Api {
                status,
                code: envelope.error.code,
                message: envelope
                    .error
                    .message
                    .map(|m| sanitize_error_message(&m))
                    .unwrap_or_else(|| format!("HTTP {status}")),
            },
            Err(_) => Error::Api {
                status,
                code: None,
                message: sanitize_error_message(text),
            },
        }
    }

    fn parse_response(
        response: OpenAiImageResponse,
        request: &GenerationRequest,
        start: Instant,
    ) -> Result<GeneratedImage> {
        let image_data = response.data.into_iter().next().ok_or_else(|| {
            Error::UnexpectedResponse("No images in OpenAI response".into())
        })?;

        Ok(GeneratedImage {
            url: image_data.url,
            revised_prompt: image_data.revised_prompt,
            provider: ImageProviderKind::OpenAI,
            metadata: GenerationMetadata {
                model: Some(request.model.as_str().to_string()),
                duration_ms: Some(start.elapsed().as_millis() as u64),
            },
        })
    }
}

#[async_trait]
impl ImageProvider for OpenAiImageProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage> {
        let start = Instant::now();
        let body = OpenAiImageRequest::from_generation_request(request);

        tracing::debug!(
            model = body.model,
            size = body.size,
            n = body.n,
            "submitting OpenAI image generation request"
        );

        let response = self
            .client
            .post(&self.generations_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Self::parse_error(status.as_u16(), &text));
        }

        let openai_response: OpenAiImageResponse = response.json().await?;
        let image = Self::parse_response(openai_response, request, start)?;

        tracing::debug!(
            has_url = image.url.is_some(),
            duration_ms = image.metadata.duration_ms,
            "OpenAI image generation complete"
        );
        Ok(image)
    }

    fn kind(&self) -> ImageProviderKind {
        ImageProviderKind::OpenAI
    }
}

#[derive(Debug, Serialize)]
struct OpenAiImageRequest<'a> {
    model: &'static str,
    prompt: &'a str,
    n: u32,
    size: &'static str,
}

impl<'a> OpenAiImageRequest<'a> {
    fn from_generation_request(req: &'a GenerationRequest) -> Self {
        Self {
            model: req.model.as_str(),
            prompt: &req.prompt,
            n: req.n,
            size: req.size.as_str(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiImageResponse {
    data: Vec<OpenAiImageData>,
}

#[derive(Debug, Deserialize)]
struct OpenAiImageData {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    revised_prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorEnvelope {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PLACEHOLDER_API_KEY;
    use crate::image::types::{ImageModel, ImageSize};

    #[test]
    fn test_builder_with_explicit_key() {
        let provider = OpenAiImageProviderBuilder::new().api_key("sk-test").build();
        assert!(provider.is_ok());
    }

    #[test]
    fn test_builder_rejects_placeholder_key() {
        let provider = OpenAiImageProviderBuilder::new()
            .api_key(PLACEHOLDER_API_KEY)
            .build();
        assert!(matches!(provider, Err(Error::Config(_))));
    }

    #[test]
    fn test_builder_base_url() {
        let provider = OpenAiImageProviderBuilder::new()
            .api_key("sk-test")
            .base_url("http://localhost:9000/v1/")
            .build()
            .unwrap();
        assert_eq!(
            provider.generations_url,
            "http://localhost:9000/v1/images/generations"
        );
    }

    #[test]
    fn test_from_config() {
        let provider = OpenAiImageProvider::from_config(&Config::new("sk-test")).unwrap();
        assert_eq!(
            provider.generations_url,
            "https://api.openai.com/v1/images/generations"
        );
        assert_eq!(provider.kind(), ImageProviderKind::OpenAI);
        assert_eq!(provider.name(), "OpenAI (DALL-E)");
    }

    #[test]
    fn test_request_construction() {
        let req = GenerationRequest::new("A sunset");
        let json = serde_json::to_value(OpenAiImageRequest::from_generation_request(&req)).unwrap();

        assert_eq!(json["model"], "dall-e-3");
        assert_eq!(json["prompt"], "A sunset");
        assert_eq!(json["n"], 1);
        assert_eq!(json["size"], "1024x1024");
    }

    #[test]
    fn test_request_construction_overrides() {
        let req = GenerationRequest::new("A sunset")
            .with_model(ImageModel::DallE2)
            .with_size(ImageSize::Medium);
        let body = OpenAiImageRequest::from_generation_request(&req);
        assert_eq!(body.model, "dall-e-2");
        assert_eq!(body.size, "512x512");
    }

    #[test]
    fn test_response_with_url() {
        let json = r#"{"created": 1700000000, "data": [{"url": "https://example.com/img.png", "revised_prompt": "A beautiful sunset over the ocean"}]}"#;
        let resp: OpenAiImageResponse = serde_json::from_str(json).unwrap();
        let req = GenerationRequest::new("A sunset");
        let image = OpenAiImageProvider::parse_response(resp, &req, Instant::now()).unwrap();

        assert_eq!(image.url.as_deref(), Some("https://example.com/img.png"));
        assert_eq!(
            image.revised_prompt.as_deref(),
            Some("A beautiful sunset over the ocean")
        );
        assert_eq!(image.metadata.model.as_deref(), Some("dall-e-3"));
    }

    #[test]
    fn test_response_without_url() {
        let resp: OpenAiImageResponse = serde_json::from_str(r#"{"data": [{}]}"#).unwrap();
        let req = GenerationRequest::new("A sunset");
        let image = OpenAiImageProvider::parse_response(resp, &req, Instant::now()).unwrap();
        assert!(image.url.is_none());
    }

    #[test]
    fn test_response_empty_data() {
        let resp: OpenAiImageResponse = serde_json::from_str(r#"{"data": []}"#).unwrap();
        let req = GenerationRequest::new("A sunset");
        let err = OpenAiImageProvider::parse_response(resp, &req, Instant::now()).unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse(_)));
    }

    #[test]
    fn test_parse_error_invalid_key() {
        let body = r#"{"error": {"message": "Incorrect API key provided: sk-abc***wxyz. You can find your API key at https://platform.openai.com/account/api-keys.", "type": "invalid_request_error", "param": null, "code": "invalid_api_key"}}"#;
        let err = OpenAiImageProvider::parse_error(401, body);

        assert!(err.is_invalid_api_key());
        assert!(!err.message().contains("abc"));
        assert!(err.message().starts_with("Incorrect API key provided"));
    }

    #[test]
    fn test_parse_error_billing() {
        let body = r#"{"error": {"message": "Billing hard limit has been reached", "type": "invalid_request_error", "param": null, "code": "billing_hard_limit_reached"}}"#;
        let err = OpenAiImageProvider::parse_error(400, body);
        assert!(err.is_billing_limit());
    }

    #[test]
    fn test_parse_error_without_code() {
        let body = r#"{"error": {"message": "Your request was rejected", "type": "invalid_request_error", "code": null}}"#;
        let err = OpenAiImageProvider::parse_error(400, body);
        assert_eq!(err.code(), None);
        assert_eq!(err.message(), "Your request was rejected");
    }

    #[test]
    fn test_parse_error_unstructured_body() {
        let err = OpenAiImageProvider::parse_error(502, "<html>Bad Gateway</html>");
        match err {
            Error::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 502);
                assert!(code.is_none());
                assert_eq!(message, "<html>Bad Gateway</html>");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

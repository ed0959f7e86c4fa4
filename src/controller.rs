//! Prompt-to-image controller.
//!
//! Owns the UI state (prompt, image URL, in-flight flag, error message) and
//! runs one generation attempt per [`Controller::generate`] call. Every state
//! transition is published on a `watch` channel so a presentation layer can
//! render the busy indicator while the provider call is outstanding.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::image::providers::OpenAiImageProvider;
use crate::image::{GenerationRequest, ImageProvider};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Shown when the provider rejects the API key.
pub const INVALID_API_KEY_MESSAGE: &str =
    "Invalid API key. Please check your OpenAI API key in the .env file.";

/// Shown when the account billing limit was reached.
pub const BILLING_LIMIT_MESSAGE: &str =
    "OpenAI billing limit reached. Please check your OpenAI account billing status.";

/// Shown for every failure without a more specific message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate image. Please try again.";

/// State consumed by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    /// Current prompt text.
    pub prompt: String,
    /// URL of the most recent generated image, or empty.
    pub image: String,
    /// True while a generation call is outstanding.
    pub loading: bool,
    /// User-facing error message, or empty.
    pub error: String,
}

/// Creates a fresh provider handle for each generation attempt.
pub trait ProviderFactory: Send + Sync {
    /// Returns a provider authenticated with `api_key`.
    fn connect(&self, config: &Config, api_key: &str) -> Result<Box<dyn ImageProvider>>;
}

/// Connects to the OpenAI Images API.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiFactory;

impl ProviderFactory for OpenAiFactory {
    fn connect(&self, config: &Config, api_key: &str) -> Result<Box<dyn ImageProvider>> {
        let provider = OpenAiImageProvider::builder()
            .api_key(api_key)
            .base_url(config.base_url.clone())
            .build()?;
        Ok(Box::new(provider))
    }
}

/// Maps a failed attempt to the single message shown to the user.
pub fn user_message(err: &Error) -> String {
    if err.is_invalid_api_key() {
        return INVALID_API_KEY_MESSAGE.to_string();
    }
    if err.is_billing_limit() {
        return BILLING_LIMIT_MESSAGE.to_string();
    }
    let message = err.message();
    if message.contains("API key") {
        return message;
    }
    GENERIC_FAILURE_MESSAGE.to_string()
}

/// Holds UI state and drives generation attempts.
pub struct Controller<F = OpenAiFactory> {
    config: Config,
    factory: F,
    state: watch::Sender<UiState>,
}

impl Controller<OpenAiFactory> {
    /// Creates a controller talking to OpenAI.
    pub fn new(config: Config) -> Self {
        Self::with_factory(config, OpenAiFactory)
    }
}

impl<F: ProviderFactory> Controller<F> {
    /// Creates a controller that obtains providers from `factory`.
    pub fn with_factory(config: Config, factory: F) -> Self {
        let (state, _) = watch::channel(UiState::default());
        Self {
            config,
            factory,
            state,
        }
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    /// Returns a receiver that observes every state transition.
    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }

    /// Whether the trigger should be enabled.
    pub fn can_generate(&self) -> bool {
        let state = self.state.borrow();
        !state.loading && !state.prompt.trim().is_empty()
    }

    /// Replaces the prompt text.
    pub fn update_prompt(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_modify(|s| s.prompt = text);
    }

    /// Runs one generation attempt for the current prompt.
    ///
    /// Does nothing for an empty or whitespace-only prompt. Failures never
    /// escape: they land in [`UiState::error`], leaving any previous image in
    /// place.
    pub async fn generate(&mut self) {
        let prompt = self.state.borrow().prompt.clone();
        if prompt.trim().is_empty() {
            return;
        }

        self.state.send_modify(|s| {
            s.loading = true;
            s.error.clear();
        });

        let outcome = self.request_image(&prompt).await;

        if let Err(e) = &outcome {
            tracing::error!(error = ?e, "image generation failed");
        }
        self.state.send_modify(|s| {
            match outcome {
                Ok(url) => s.image = url,
                Err(e) => s.error = user_message(&e),
            }
            s.loading = false;
        });
    }

    async fn request_image(&self, prompt: &str) -> Result<String> {
        let api_key = self.config.api_key()?;
        let provider = self.factory.connect(&self.config, api_key)?;
        let request = GenerationRequest::new(prompt);

        tracing::info!(provider = provider.name(), "generating image");
        let image = provider.generate(&request).await?;
        Ok(image.url.unwrap_or_default())
    }
}

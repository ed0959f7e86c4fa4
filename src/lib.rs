#![warn(missing_docs)]
//! PromptCanvas - turn a text prompt into an image via the OpenAI Images API.
//!
//! The crate is built around a [`Controller`] that owns the UI state
//! (prompt, image URL, in-flight flag, error message) and runs one
//! generation attempt at a time. A presentation layer reads the state through
//! [`Controller::state`] or [`Controller::subscribe`] and projects it with
//! [`View`].
//!
//! # Quick Start
//!
//! ```no_run
//! use promptcanvas::{Config, Controller, View};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut controller = Controller::new(Config::from_env());
//!     controller.update_prompt("A golden retriever puppy playing in snow");
//!     controller.generate().await;
//!     println!("{}", View::from(&controller.state()));
//! }
//! ```
//!
//! # Using a provider directly
//!
//! ```no_run
//! use promptcanvas::{GenerationRequest, ImageProvider, OpenAiImageProvider};
//!
//! #[tokio::main]
//! async fn main() -> promptcanvas::Result<()> {
//!     let provider = OpenAiImageProvider::builder().build()?;
//!     let image = provider.generate(&GenerationRequest::new("A lighthouse")).await?;
//!     println!("{:?}", image.url);
//!     Ok(())
//! }
//! ```

mod config;
mod controller;
mod error;
pub mod image;
mod view;

pub use config::{
    Config, API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, MISSING_API_KEY_MESSAGE,
    PLACEHOLDER_API_KEY,
};
pub use controller::{
    user_message, Controller, OpenAiFactory, ProviderFactory, UiState, BILLING_LIMIT_MESSAGE,
    GENERIC_FAILURE_MESSAGE, INVALID_API_KEY_MESSAGE,
};
pub use error::{Error, Result, CODE_BILLING_HARD_LIMIT, CODE_INVALID_API_KEY};
pub use image::providers::{OpenAiImageProvider, OpenAiImageProviderBuilder};
pub use image::{
    GeneratedImage, GenerationMetadata, GenerationRequest, ImageFormat, ImageModel,
    ImageProvider, ImageProviderKind, ImageSize,
};
pub use view::{ImagePanel, View, IMAGE_PLACEHOLDER, PROMPT_PLACEHOLDER, TITLE};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::controller::{Controller, UiState};
    pub use crate::error::{Error, Result};
    pub use crate::image::providers::OpenAiImageProvider;
    pub use crate::image::{GeneratedImage, GenerationRequest, ImageProvider};
    pub use crate::view::View;
}

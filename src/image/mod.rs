//! Image generation module.

mod download;
mod provider;
pub mod providers;
mod types;

pub use download::download;
pub use provider::ImageProvider;
pub use types::{
    GeneratedImage, GenerationMetadata, GenerationRequest, ImageFormat, ImageModel,
    ImageProviderKind, ImageSize,
};

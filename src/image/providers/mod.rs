//! Image generation providers.

mod openai;

pub use openai::{OpenAiImageProvider, OpenAiImageProviderBuilder};

//! Presentation model derived from [`UiState`].

use crate::controller::UiState;
use std::fmt;

/// Page title.
pub const TITLE: &str = "AI Image Generator";

/// Hint shown in the empty prompt input.
pub const PROMPT_PLACEHOLDER: &str = "Enter your prompt here...";

/// Text shown in the image panel before any image exists.
pub const IMAGE_PLACEHOLDER: &str = "Your generated image will appear here";

/// What the image panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePanel {
    /// A generated image at this URL.
    Image(String),
    /// The empty-state placeholder text.
    Placeholder(&'static str),
}

/// Everything the presentation surface needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// Text in the prompt input.
    pub prompt: String,
    /// Trigger button label.
    pub trigger_label: &'static str,
    /// Whether the trigger accepts clicks.
    pub trigger_enabled: bool,
    /// Whether the busy indicator is shown.
    pub busy: bool,
    /// Error panel contents, when an error is active.
    pub error: Option<String>,
    /// Image panel contents.
    pub image: ImagePanel,
}

impl From<&UiState> for View {
    fn from(state: &UiState) -> Self {
        Self {
            prompt: state.prompt.clone(),
            trigger_label: if state.loading {
                "Generating..."
            } else {
                "Generate"
            },
            trigger_enabled: !state.loading && !state.prompt.trim().is_empty(),
            busy: state.loading,
            error: (!state.error.is_empty()).then(|| state.error.clone()),
            image: if state.image.is_empty() {
                ImagePanel::Placeholder(IMAGE_PLACEHOLDER)
            } else {
                ImagePanel::Image(state.image.clone())
            },
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{TITLE}")?;
        if self.prompt.is_empty() {
            writeln!(f, "  prompt: ({PROMPT_PLACEHOLDER})")?;
        } else {
            writeln!(f, "  prompt: {}", self.prompt)?;
        }

        let marker = if self.trigger_enabled { ">" } else { "-" };
        writeln!(f, "  [{marker} {}]", self.trigger_label)?;

        if let Some(error) = &self.error {
            writeln!(f, "  error: {error}")?;
        }
        match &self.image {
            ImagePanel::Image(url) => write!(f, "  image: {url}"),
            ImagePanel::Placeholder(text) => write!(f, "  image: ({text})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_view() {
        let view = View::from(&UiState::default());
        assert!(!view.trigger_enabled);
        assert!(!view.busy);
        assert_eq!(view.trigger_label, "Generate");
        assert_eq!(view.error, None);
        assert_eq!(view.image, ImagePanel::Placeholder(IMAGE_PLACEHOLDER));
    }

    #[test]
    fn test_loading_disables_trigger() {
        let state = UiState {
            prompt: "a red fox".into(),
            loading: true,
            ..UiState::default()
        };
        let view = View::from(&state);
        assert!(!view.trigger_enabled);
        assert!(view.busy);
        assert_eq!(view.trigger_label, "Generating...");
    }

    #[test]
    fn test_error_and_image_shown_together() {
        let state = UiState {
            prompt: "a red fox".into(),
            image: "https://x/y.png".into(),
            loading: false,
            error: "Failed to generate image. Please try again.".into(),
        };
        let view = View::from(&state);
        assert!(view.trigger_enabled);
        assert_eq!(
            view.error.as_deref(),
            Some("Failed to generate image. Please try again.")
        );
        assert_eq!(view.image, ImagePanel::Image("https://x/y.png".into()));
    }

    #[test]
    fn test_render_text() {
        let state = UiState {
            prompt: "a red fox".into(),
            image: "https://x/y.png".into(),
            ..UiState::default()
        };
        let text = View::from(&state).to_string();
        assert_eq!(
            text,
            "AI Image Generator\n  prompt: a red fox\n  [> Generate]\n  image: https://x/y.png"
        );
    }

    #[test]
    fn test_render_placeholders() {
        let text = View::from(&UiState::default()).to_string();
        assert!(text.contains(PROMPT_PLACEHOLDER));
        assert!(text.contains("[- Generate]"));
        assert!(text.ends_with("(Your generated image will appear here)"));
    }
}

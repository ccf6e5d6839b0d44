use crate::resolver::ResolveError;
use thiserror::Error;

/// Unified error type for the conversation runtime.
///
/// This aggregates the per-module errors into the categories a caller acts
/// on. Every variant maps to a user-visible message via
/// [`user_message`](Error::user_message); the process itself never dies on a
/// per-request error.
#[derive(Debug, Error)]
pub enum Error {
    /// User text was empty after trimming. No model work happened and no
    /// session state was touched.
    #[error("no prompt provided")]
    EmptyInput,

    /// Every candidate in the resolver's ladder failed. Fatal to the
    /// request, not the process — the next request retries the full ladder.
    #[error("model resolution failed: {0}")]
    Resolve(#[from] ResolveError),

    /// Prompt assembly, generation, or decode failed after the user turn was
    /// already recorded. The recorded turn is kept by design.
    #[error("generation failed: {message}")]
    GenerationFailed { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn generation(message: impl Into<String>) -> Self {
        Error::GenerationFailed {
            message: message.into(),
        }
    }

    /// The string surfaced to the user as the `{"error": ...}` payload.
    pub fn user_message(&self) -> String {
        match self {
            Error::EmptyInput => "No prompt provided.".to_string(),
            Error::Resolve(_) => {
                "No language model is currently available. Please try again later.".to_string()
            }
            Error::GenerationFailed { message } => format!("Generation failed: {}", message),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_presentable() {
        assert_eq!(Error::EmptyInput.user_message(), "No prompt provided.");
        let err = Error::Resolve(ResolveError::NoModelAvailable { tried: 3 });
        assert!(err.user_message().contains("try again later"));
        let err = Error::generation("decode blew up");
        assert_eq!(err.user_message(), "Generation failed: decode blew up");
    }
}

//! Runtime configuration.
//!
//! Defaults mirror a small-CPU deployment; everything is overridable through
//! `with_*` builders or, for deployment knobs, environment variables read by
//! [`RuntimeConfig::from_env`].

use crate::prompt::PreambleSource;
use std::env;

/// Configuration for the conversation runtime.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Candidates tried when the provider reports a GPU, in preference order.
    pub gpu_candidates: Vec<String>,
    /// Candidates tried on CPU-only hosts, in preference order.
    pub cpu_candidates: Vec<String>,
    /// Deployment-level model override, prepended to the candidate list.
    pub model_override: Option<String>,
    /// Per-session retention cap (FIFO eviction beyond this).
    pub history_cap: usize,
    /// How many trailing turns feed the prompt context.
    pub context_window: usize,
    /// Output budget passed to the provider.
    pub max_new_tokens: u32,
    /// Name used for assistant context lines and as the generation cue.
    pub assistant_name: String,
    /// Where the system preamble comes from.
    pub preamble_source: PreambleSource,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            gpu_candidates: vec![
                "openai/gpt-oss-20b".to_string(),
                "EleutherAI/gpt-neo-1.3B".to_string(),
            ],
            cpu_candidates: vec![
                "EleutherAI/gpt-neo-125M".to_string(),
                "distilgpt2".to_string(),
            ],
            model_override: None,
            history_cap: 10,
            context_window: 5,
            max_new_tokens: 150,
            assistant_name: "Helper".to_string(),
            preamble_source: PreambleSource::default(),
        }
    }
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults plus environment overrides: `MODEL_NAME`, `PROMPT_URL`,
    /// `PROMPT_FILE`, `CHAT_HISTORY_CAP`, `CHAT_MAX_NEW_TOKENS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // An empty MODEL_NAME means "no override", not a candidate.
        if let Ok(name) = env::var("MODEL_NAME") {
            let name = name.trim();
            if !name.is_empty() {
                config.model_override = Some(name.to_string());
            }
        }

        if let Ok(url) = env::var("PROMPT_URL") {
            if !url.trim().is_empty() {
                config.preamble_source = PreambleSource::Url(url);
            }
        } else if let Ok(path) = env::var("PROMPT_FILE") {
            if !path.trim().is_empty() {
                config.preamble_source = PreambleSource::File(path.into());
            }
        }

        if let Some(cap) = env::var("CHAT_HISTORY_CAP")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
        {
            config.history_cap = cap;
        }

        if let Some(n) = env::var("CHAT_MAX_NEW_TOKENS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
        {
            config.max_new_tokens = n;
        }

        config
    }

    pub fn with_gpu_candidates(mut self, candidates: Vec<String>) -> Self {
        self.gpu_candidates = candidates;
        self
    }

    pub fn with_cpu_candidates(mut self, candidates: Vec<String>) -> Self {
        self.cpu_candidates = candidates;
        self
    }

    pub fn with_model_override(mut self, model: impl Into<String>) -> Self {
        self.model_override = Some(model.into());
        self
    }

    pub fn with_history_cap(mut self, cap: usize) -> Self {
        self.history_cap = cap;
        self
    }

    pub fn with_context_window(mut self, window: usize) -> Self {
        self.context_window = window;
        self
    }

    pub fn with_max_new_tokens(mut self, n: u32) -> Self {
        self.max_new_tokens = n;
        self
    }

    pub fn with_assistant_name(mut self, name: impl Into<String>) -> Self {
        self.assistant_name = name.into();
        self
    }

    pub fn with_preamble_source(mut self, source: PreambleSource) -> Self {
        self.preamble_source = source;
        self
    }
}

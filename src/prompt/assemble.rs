//! Prompt assembly and reply extraction.

use crate::types::Profile;

/// Builds the generation prompt and extracts the model's continuation.
///
/// The cue marker (`"<assistant name>:"`) is the last line of every prompt;
/// the provider is expected to continue after it, and extraction splits the
/// decoded output on the LAST occurrence of that cue.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    assistant_name: String,
    preamble: String,
}

impl PromptAssembler {
    pub fn new(assistant_name: impl Into<String>, preamble: impl Into<String>) -> Self {
        Self {
            assistant_name: assistant_name.into(),
            preamble: preamble.into(),
        }
    }

    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// The literal cue marker the model is told to continue after.
    pub fn cue(&self) -> String {
        format!("{}:", self.assistant_name)
    }

    /// Compose preamble, profile lines, windowed context, the new user line,
    /// and the trailing cue. Recomputed per request, never cached.
    pub fn assemble(&self, profile: &Profile, context_lines: &str, user_text: &str) -> String {
        let mut prompt = String::with_capacity(
            self.preamble.len() + context_lines.len() + user_text.len() + 128,
        );
        prompt.push_str(&self.preamble);
        prompt.push_str("\n\n");
        prompt.push_str(&format!("Nickname: {}\n", profile.nickname()));
        prompt.push_str(&format!("Tone: {}\n", profile.tone()));
        prompt.push_str(&format!("Topics: {}\n", profile.topics()));
        prompt.push('\n');
        if !context_lines.is_empty() {
            prompt.push_str(context_lines);
            prompt.push('\n');
        }
        prompt.push_str(&format!("User: {}\n", user_text));
        prompt.push_str(&self.cue());
        prompt
    }

    /// Bound a prompt to the provider's context limit by dropping the OLDEST
    /// content: the front is truncated, the tail (newest turns and the cue)
    /// always survives. Cuts land on a char boundary.
    pub fn fit(prompt: &str, limit: usize) -> &str {
        if prompt.len() <= limit {
            return prompt;
        }
        let mut start = prompt.len() - limit;
        while !prompt.is_char_boundary(start) {
            start += 1;
        }
        &prompt[start..]
    }

    /// Extract the newly generated continuation from the raw decode: the
    /// text after the LAST cue occurrence. If the provider echoed nothing
    /// recognizable, fall back to the full text minus the known preamble.
    pub fn extract_reply(&self, raw: &str) -> String {
        let cue = self.cue();
        if let Some(idx) = raw.rfind(&cue) {
            raw[idx + cue.len()..].trim().to_string()
        } else {
            raw.replacen(&self.preamble, "", 1).trim().to_string()
        }
    }
}

//! Builder-style helper for the **Human/Assistant turn format** expected by
//! the text-completions endpoint.
//!
//! A completions prompt is one flat string: an optional system prefix, then
//! alternating `\n\nHuman:` / `\n\nAssistant:` turns, ending with an open
//! assistant turn the model continues from.
//!
//! ```rust
//! use claude_prompt::turns::TurnBuilder;
//!
//! let prompt = TurnBuilder::new()
//!     .add_system("You are terse.")
//!     .add_human("Name a prime.")
//!     .add_assistant_cue()
//!     .finalize();
//!
//! assert_eq!(prompt, "You are terse.\n\nHuman: Name a prime.\n\nAssistant:");
//! ```
//!
//! The builder performs **no validation** and emits whitespace exactly as
//! given.

/// Marker opening a human turn.
pub const HUMAN_PROMPT: &str = "\n\nHuman:";

/// Marker opening an assistant turn.
pub const AI_PROMPT: &str = "\n\nAssistant:";

/// Fluent helper to produce a turn-formatted prompt.
///
/// Internally it owns a `String` buffer that grows with each chained call.
/// Once you’re done, call [`Self::finalize`] to obtain the prompt.
#[derive(Debug, Default)]
pub struct TurnBuilder {
    buffer: String,
}

impl TurnBuilder {
    /// Create a fresh, empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the system prefix. It precedes the first turn without a marker.
    pub fn add_system(mut self, system: &str) -> Self {
        self.buffer.push_str(system);
        self
    }

    /// Add a human turn: `\n\nHuman: {text}`.
    pub fn add_human(mut self, text: &str) -> Self {
        self.buffer.push_str(HUMAN_PROMPT);
        self.buffer.push(' ');
        self.buffer.push_str(text);
        self
    }

    /// Add a completed assistant turn: `\n\nAssistant: {text}`.
    pub fn add_assistant(mut self, text: &str) -> Self {
        self.buffer.push_str(AI_PROMPT);
        self.buffer.push(' ');
        self.buffer.push_str(text);
        self
    }

    /// Open the assistant turn the model is asked to complete.
    pub fn add_assistant_cue(mut self) -> Self {
        self.buffer.push_str(AI_PROMPT);
        self
    }

    /// Retrieve the accumulated prompt and consume the builder.
    pub fn finalize(self) -> String {
        self.buffer
    }
}

/// Wrap a single user prompt in one human turn plus the assistant cue.
pub fn format_prompt(system: &str, prompt: &str) -> String {
    TurnBuilder::new()
        .add_system(system)
        .add_human(prompt)
        .add_assistant_cue()
        .finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_system_still_leads_with_separator() {
        assert_eq!(
            format_prompt("", "Why is the sky blue?"),
            "\n\nHuman: Why is the sky blue?\n\nAssistant:"
        );
    }

    #[test]
    fn system_prefix_comes_first() {
        assert_eq!(
            format_prompt("Answer in French.", "Hello"),
            "Answer in French.\n\nHuman: Hello\n\nAssistant:"
        );
    }

    #[test]
    fn multi_turn_history() {
        let prompt = TurnBuilder::new()
            .add_human("2+2?")
            .add_assistant("4")
            .add_human("and doubled?")
            .add_assistant_cue()
            .finalize();
        assert_eq!(
            prompt,
            "\n\nHuman: 2+2?\n\nAssistant: 4\n\nHuman: and doubled?\n\nAssistant:"
        );
    }
}

//! Prompt formatting for the text-completions API.
pub mod turns;

pub use turns::{AI_PROMPT, HUMAN_PROMPT, TurnBuilder, format_prompt};

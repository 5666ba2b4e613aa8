//! Model identifiers used throughout the **claude** workspace.
//!
//! Known models get an enum variant so the provider crate can map them onto
//! its wire names; anything else travels through [`Model::Custom`] verbatim.
//! Parsing never fails, which keeps `--model some-beta-model` working.
//!
//! ```rust
//! use claude_core::model::{AnthropicModel, Model};
//!
//! assert_eq!("claude-2".parse::<Model>().unwrap(),
//!            Model::Anthropic(AnthropicModel::Claude2));
//! assert_eq!("claude-9".parse::<Model>().unwrap(),
//!            Model::Custom("claude-9".into()));
//! ```
use std::{convert::Infallible, str::FromStr};

/// Universal identifier for an LLM model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    /// Models served by the text-completions endpoint.
    Anthropic(AnthropicModel),
    /// Any model name not covered by a dedicated variant.
    Custom(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnthropicModel {
    Claude2,
    Claude2_1,
    ClaudeInstant1,
    ClaudeInstant1_2,
}

impl AnthropicModel {
    pub const ALL: [AnthropicModel; 4] = [
        AnthropicModel::Claude2,
        AnthropicModel::Claude2_1,
        AnthropicModel::ClaudeInstant1,
        AnthropicModel::ClaudeInstant1_2,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AnthropicModel::Claude2 => "claude-2",
            AnthropicModel::Claude2_1 => "claude-2.1",
            AnthropicModel::ClaudeInstant1 => "claude-instant-1",
            AnthropicModel::ClaudeInstant1_2 => "claude-instant-1.2",
        }
    }
}

impl From<AnthropicModel> for Model {
    fn from(val: AnthropicModel) -> Self {
        Model::Anthropic(val)
    }
}

impl FromStr for Model {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(AnthropicModel::ALL
            .into_iter()
            .find(|model| model.as_str() == s)
            .map(Model::Anthropic)
            .unwrap_or_else(|| Model::Custom(s.to_owned())))
    }
}

//! Command-line surface of the `claude` binary.
use std::io::Read;

use clap::Parser;
use claude_anthropic::{DEFAULT_BASE_URL, api_v1::CompletionOptions};
use claude_core::{
    error::{ClaudeError, Result},
    model::Model,
};

/// Stream a Claude text completion to stdout.
#[derive(Debug, Parser)]
#[command(name = "claude", version, about)]
pub struct Cli {
    /// Model to sample from.
    #[arg(long, default_value = "claude-2")]
    pub model: Model,

    /// Text placed before the first human turn. Not allowed with `--raw`.
    #[arg(long, default_value = "")]
    pub system: String,

    /// Maximum number of tokens to generate.
    #[arg(long, default_value_t = 256)]
    pub max_tokens: u32,

    /// Sampling temperature. Negative values leave it to the server.
    #[arg(long, default_value_t = -1.0, allow_negative_numbers = true)]
    pub temperature: f64,

    /// Nucleus sampling cutoff. Negative values leave it to the server.
    #[arg(long, default_value_t = -1.0, allow_negative_numbers = true)]
    pub top_p: f64,

    /// Send the prompt verbatim instead of wrapping it in Human/Assistant turns.
    #[arg(long)]
    pub raw: bool,

    /// API origin. The API key is looked up for this URL's host.
    #[arg(long, env = "ANTHROPIC_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// The prompt. `-` reads it from stdin.
    pub prompt: Option<String>,
}

impl Cli {
    pub fn options(&self) -> CompletionOptions {
        CompletionOptions::new(self.model.clone())
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .top_p(self.top_p)
            .raw(self.raw)
            .system(self.system.clone())
    }

    /// The prompt text, reading `stdin` when the positional argument is `-`.
    ///
    /// A missing argument yields an empty prompt, which request building
    /// rejects.
    pub fn read_prompt(&self, mut stdin: impl Read) -> Result<String> {
        match self.prompt.as_deref() {
            Some("-") => {
                let mut prompt = String::new();
                stdin
                    .read_to_string(&mut prompt)
                    .map_err(|err| ClaudeError::config(format!("read prompt from stdin: {err}")))?;
                Ok(prompt)
            }
            Some(prompt) => Ok(prompt.to_owned()),
            None => Ok(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use claude_core::model::AnthropicModel;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("claude").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_the_api_defaults() {
        let cli = parse(&["hello"]);
        assert_eq!(cli.model, Model::Anthropic(AnthropicModel::Claude2));
        assert_eq!(cli.max_tokens, 256);
        assert_eq!(cli.prompt.as_deref(), Some("hello"));

        let options = cli.options();
        assert!(!options.raw);
        assert_eq!(options.system.as_deref(), Some(""));
        assert_eq!(options.temperature, Some(-1.0));
    }

    #[test]
    fn accepts_negative_and_custom_values() {
        let cli = parse(&[
            "--model",
            "claude-3-haiku",
            "--temperature",
            "-0.5",
            "--top-p",
            "0.9",
            "--max-tokens",
            "10",
            "--raw",
            "x",
        ]);
        assert_eq!(cli.model, Model::Custom("claude-3-haiku".into()));
        assert_eq!(cli.temperature, -0.5);
        assert_eq!(cli.top_p, 0.9);
        assert!(cli.raw);
    }

    #[test]
    fn dash_reads_prompt_from_stdin() {
        let cli = parse(&["-"]);
        let prompt = cli.read_prompt("piped prompt\n".as_bytes()).unwrap();
        assert_eq!(prompt, "piped prompt\n");
    }

    #[test]
    fn missing_prompt_is_empty() {
        let cli = parse(&[]);
        assert_eq!(cli.read_prompt(std::io::empty()).unwrap(), "");
    }

    #[test]
    fn raw_with_system_fails_validation() {
        let cli = parse(&["--raw", "--system", "be nice", "hi"]);
        assert!(matches!(
            cli.options().validate(),
            Err(ClaudeError::Config(_))
        ));
    }
}

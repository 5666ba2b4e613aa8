use claude_core::{
    error::{ClaudeError, Result},
    model::Model,
};
use claude_prompt::format_prompt;
use serde::{Deserialize, Deserializer, Serialize};

use crate::impl_builder_methods;
use crate::model_map::map_model;

pub const DEFAULT_MAX_TOKENS: u32 = 256;

/// Caller-facing knobs for one completion request.
///
/// `temperature` and `top_p` are omitted from the request unless set to a
/// non-negative value, so a negative sentinel behaves like "unset".
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOptions {
    pub model: Model,
    pub max_tokens: u32,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    /// Send the prompt as-is instead of wrapping it in Human/Assistant turns.
    pub raw: bool,
    /// Prefix placed before the first human turn. Incompatible with `raw`.
    pub system: Option<String>,
    pub stream: bool,
}

impl CompletionOptions {
    pub fn new(model: Model) -> Self {
        Self {
            model,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
            top_p: None,
            raw: false,
            system: None,
            stream: true,
        }
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    pub fn stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    /// Reject option combinations that cannot be honoured.
    pub fn validate(&self) -> Result<()> {
        let has_system = self.system.as_deref().is_some_and(|s| !s.is_empty());
        if self.raw && has_system {
            return Err(ClaudeError::config(
                "--system will be ignored when used with --raw",
            ));
        }
        Ok(())
    }
}

impl_builder_methods!(
    CompletionOptions,
    temperature: f64,
    top_p: f64,
    system: String
);

/// Body of `POST /v1/complete`.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens_to_sample: u32,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}

impl CompletionRequest {
    /// Assemble the request for `prompt`.
    ///
    /// # Errors
    ///
    /// * [`ClaudeError::Config`] – the prompt is empty or the options
    ///   conflict.
    pub fn build(prompt: &str, options: &CompletionOptions) -> Result<Self> {
        options.validate()?;
        if prompt.is_empty() {
            return Err(ClaudeError::config("no prompt given"));
        }

        let prompt = if options.raw {
            prompt.to_owned()
        } else {
            format_prompt(options.system.as_deref().unwrap_or_default(), prompt)
        };

        Ok(Self {
            model: map_model(&options.model).into_owned(),
            prompt,
            max_tokens_to_sample: options.max_tokens,
            stream: options.stream,
            temperature: options.temperature.filter(|t| *t >= 0.0),
            top_p: options.top_p.filter(|p| *p >= 0.0),
        })
    }

    /// Serialise into the JSON body sent on the wire.
    pub fn to_body(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Payload of a `completion` event.
///
/// Missing or `null` string fields read as empty; only malformed JSON is
/// rejected.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CompletionMessage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub completion: String,
    /// `null` on every event except the last one of a response.
    #[serde(default)]
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// Payload of an `error` event: `{"type": "error", "error": {...}}`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ErrorEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub error: ErrorMessage,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct ErrorMessage {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use claude_core::model::AnthropicModel;
    use serde_json::json;

    use super::*;

    fn options() -> CompletionOptions {
        CompletionOptions::new(AnthropicModel::Claude2.into())
    }

    #[test]
    fn unset_sampling_params_are_omitted() {
        let request = CompletionRequest::build("hi", &options()).unwrap();
        let body: serde_json::Value = serde_json::from_slice(&request.to_body().unwrap()).unwrap();

        assert_eq!(
            body,
            json!({
                "model": "claude-2",
                "prompt": "\n\nHuman: hi\n\nAssistant:",
                "max_tokens_to_sample": 256,
                "stream": true,
            })
        );
    }

    #[test]
    fn set_sampling_params_are_included_exactly() {
        let request = CompletionRequest::build("hi", &options().temperature(0.0)).unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["temperature"], json!(0.0));
        assert!(body.get("top_p").is_none());

        let request = CompletionRequest::build("hi", &options().top_p(0.7)).unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["top_p"], json!(0.7));
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn negative_sentinel_means_unset() {
        let request =
            CompletionRequest::build("hi", &options().temperature(-1.0).top_p(-1.0)).unwrap();
        assert_eq!(request.temperature, None);
        assert_eq!(request.top_p, None);
    }

    #[test]
    fn raw_prompt_is_sent_verbatim() {
        let request = CompletionRequest::build("Human: x", &options().raw(true)).unwrap();
        assert_eq!(request.prompt, "Human: x");
    }

    #[test]
    fn system_prefixes_formatted_prompt() {
        let options = options().system("Be brief.".into()).max_tokens(12);
        let request = CompletionRequest::build("hi", &options).unwrap();
        assert_eq!(request.prompt, "Be brief.\n\nHuman: hi\n\nAssistant:");
        assert_eq!(request.max_tokens_to_sample, 12);
    }

    #[test]
    fn raw_with_system_is_a_config_error() {
        let options = options().raw(true).system("ignored".into());
        let err = CompletionRequest::build("hi", &options).unwrap_err();
        assert!(matches!(err, ClaudeError::Config(_)));
    }

    #[test]
    fn raw_with_empty_system_is_allowed() {
        let options = options().raw(true).system(String::new());
        assert!(CompletionRequest::build("hi", &options).is_ok());
    }

    #[test]
    fn empty_prompt_is_rejected() {
        let err = CompletionRequest::build("", &options()).unwrap_err();
        assert_eq!(err.to_string(), "no prompt given");
    }

    #[test]
    fn completion_message_tolerates_missing_fields() {
        let msg: CompletionMessage = serde_json::from_str(r#"{"completion":" Hello"}"#).unwrap();
        assert_eq!(msg.completion, " Hello");
        assert_eq!(msg.stop_reason, None);

        let msg: CompletionMessage = serde_json::from_str(
            r#"{"completion":"","stop_reason":"stop_sequence","model":"claude-2.1","log_id":"x"}"#,
        )
        .unwrap();
        assert_eq!(msg.stop_reason.as_deref(), Some("stop_sequence"));
        assert_eq!(msg.model.as_deref(), Some("claude-2.1"));
    }

    #[test]
    fn missing_or_null_fields_read_as_empty() {
        let msg: CompletionMessage =
            serde_json::from_str(r#"{"completion":null,"stop_reason":"max_tokens"}"#).unwrap();
        assert_eq!(msg.completion, "");
        assert_eq!(msg.stop_reason.as_deref(), Some("max_tokens"));

        let msg: CompletionMessage = serde_json::from_str("{}").unwrap();
        assert_eq!(msg.completion, "");

        let envelope: ErrorEnvelope =
            serde_json::from_str(r#"{"type":"error","error":{"type":"overloaded_error"}}"#)
                .unwrap();
        assert_eq!(envelope.error.kind, "overloaded_error");
        assert_eq!(envelope.error.message, "");

        let envelope: ErrorEnvelope =
            serde_json::from_str(r#"{"error":{"type":null,"message":null}}"#).unwrap();
        assert_eq!(envelope.error, ErrorMessage::default());

        let envelope: ErrorEnvelope = serde_json::from_str(r#"{"error":null}"#).unwrap();
        assert_eq!(envelope.error, ErrorMessage::default());
    }

    #[test]
    fn malformed_json_is_still_rejected() {
        assert!(serde_json::from_str::<CompletionMessage>("{").is_err());
        assert!(serde_json::from_str::<CompletionMessage>(r#"{"completion":5}"#).is_err());
    }

    #[test]
    fn error_envelope_reads_nested_error() {
        let envelope: ErrorEnvelope = serde_json::from_str(
            r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#,
        )
        .unwrap();
        assert_eq!(envelope.error.kind, "overloaded_error");
        assert_eq!(envelope.error.message, "Overloaded");
    }
}

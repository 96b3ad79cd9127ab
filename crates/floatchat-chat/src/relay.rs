//! Chat completion relay to the hosted LLM endpoint.
//!
//! Forwards the conversation (fixed domain system prompt + history) to the
//! Groq OpenAI-compatible completions API and returns the first choice's
//! text. Failures are classified into a small taxonomy and every class maps
//! to a fixed user-facing string; nothing here is fatal to the session.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use floatchat_core::config::LlmConfig;
use floatchat_core::types::ChatMessage;
use floatchat_core::{FloatChatError, Result};

/// Sentinel the model is instructed to append when the user asked for a
/// visualization. Stripped from displayed text; the visualization itself is
/// always derived from the raw user query, never from this marker.
pub const CHART_MARKER: &str = "GENERATE_CHART";

/// Reply substituted when the completion response has an unexpected shape.
pub const FALLBACK_REPLY: &str = "Sorry, I could not process your request.";

/// Fixed domain prompt prepended to every completion request.
pub const SYSTEM_PROMPT: &str = "You are FloatChat, an AI assistant with access to the global ARGO float network database containing real-time oceanographic measurements.

ARGO FLOAT NETWORK DETAILS:
- 4,000+ active autonomous profiling floats globally
- Measurements: Temperature, Salinity, Pressure, Dissolved Oxygen, pH, Nitrate, Chlorophyll
- Coverage: Global oceans, 10-day cycling, 0-2000m depth profiles
- Data since 2000, with real-time updates
- Highest density: North Pacific, North Atlantic, Southern Ocean
- Special focus areas: Indian Ocean, Arabian Sea, Bay of Bengal

AVAILABLE MEASUREMENTS:
- Core ARGO: Temperature (°C), Salinity (PSU), Pressure (dbar)
- BGC Floats: Dissolved O2, pH, Nitrate, Chlorophyll-a, Backscattering
- Deep Floats: Extended profiles to 4000-6000m depth
- Data quality: Real-time and delayed-mode (quality controlled)

WHEN RESPONDING:
1. Reference specific ARGO float data and measurements
2. Mention realistic depth ranges (0-2000m standard, 0-6000m for deep floats)
3. Use actual oceanographic parameters and units
4. Reference real ocean regions where ARGO floats operate
5. Explain data in terms of what ARGO floats actually measure
6. Mention data collection cycles (10-day profiles)

EXAMPLE RESPONSES:
- \"ARGO float data from the Arabian Sea shows typical tropical ocean stratification. Surface temperatures reach 28-30°C, with the thermocline beginning around 50m depth. Salinity profiles indicate values of 36.0-36.5 PSU in surface waters...\"
- \"BGC ARGO floats in this region measure dissolved oxygen concentrations that typically range from 200-250 μmol/kg in surface waters, decreasing to 20-40 μmol/kg in the oxygen minimum zone around 200-800m depth...\"
- \"The ARGO float network provides temperature-salinity data every 10 days. In the location you're asking about, we have approximately 15 active floats providing continuous monitoring...\"

Always base your responses on realistic ARGO float capabilities, actual ocean measurements, and real oceanographic phenomena. Be specific about data sources, measurement ranges, and geographic coverage.

IMPORTANT: When users ask for visualizations, charts, or data plots, include the phrase \"GENERATE_CHART\" at the end of your response to trigger the visualization system. For example: \"...showing the thermocline development in this region. GENERATE_CHART\"";

/// Remove every chart marker occurrence from a model reply for display.
pub fn strip_chart_marker(text: &str) -> String {
    text.replace(CHART_MARKER, "").trim().to_string()
}

// =============================================================================
// Failure taxonomy
// =============================================================================

/// Classified relay failures. Every variant degrades to a displayed chat
/// message via [`RelayError::user_message`]; none propagate further.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    #[error("completion relay is not configured")]
    NotConfigured,
    #[error("completion endpoint rejected the API key: {0}")]
    Unauthorized(String),
    #[error("completion endpoint rate limit exceeded: {0}")]
    RateLimited(String),
    #[error("completion endpoint unavailable: {0}")]
    Unavailable(String),
    #[error("completion request failed: {0}")]
    Network(String),
    #[error("unexpected completion response shape")]
    MalformedResponse,
}

impl RelayError {
    /// The fixed string shown to the user for this failure class.
    pub fn user_message(&self) -> &'static str {
        match self {
            RelayError::NotConfigured => {
                "Please configure your Groq API key. Set the GROQ_API_KEY environment variable \
                 or the [llm] api_key entry in your config file."
            }
            RelayError::Unauthorized(_) => {
                "Invalid API key. Please check your Groq API key configuration."
            }
            RelayError::RateLimited(_) => {
                "Rate limit exceeded. Please wait a moment before trying again."
            }
            RelayError::Unavailable(_) => {
                "Groq service is temporarily unavailable. Please try again later."
            }
            RelayError::Network(_) => {
                "Sorry, there was an error processing your request. Please try again."
            }
            RelayError::MalformedResponse => FALLBACK_REPLY,
        }
    }
}

impl From<RelayError> for FloatChatError {
    fn from(err: RelayError) -> Self {
        FloatChatError::Relay(err.to_string())
    }
}

/// Classify a failure by substring inspection of its message.
///
/// Checked in order: unauthorized, rate-limited, upstream-unavailable;
/// anything else is a generic network failure.
pub fn classify_failure(message: &str) -> RelayError {
    if message.contains("401") || message.contains("Unauthorized") {
        RelayError::Unauthorized(message.to_string())
    } else if message.contains("429") || message.contains("rate limit") {
        RelayError::RateLimited(message.to_string())
    } else if message.contains("500") || message.contains("502") {
        RelayError::Unavailable(message.to_string())
    } else {
        RelayError::Network(message.to_string())
    }
}

// =============================================================================
// ChatCompleter trait
// =============================================================================

/// Narrow contract over the hosted completion endpoint, so the orchestrator
/// and API tests can swap in a local stub.
#[async_trait]
pub trait ChatCompleter: Send + Sync {
    /// Relay the conversation and return the completion text.
    async fn complete(&self, history: &[ChatMessage]) -> std::result::Result<String, RelayError>;
}

// =============================================================================
// GroqClient
// =============================================================================

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Reqwest-backed client for the Groq completions endpoint.
pub struct GroqClient {
    client: reqwest::Client,
    config: LlmConfig,
    include_system_prompt: bool,
}

impl GroqClient {
    /// Create a client from the `[llm]` configuration section.
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| FloatChatError::Relay(e.to_string()))?;

        Ok(Self {
            client,
            config,
            include_system_prompt: true,
        })
    }

    /// Control whether the fixed domain prompt is prepended.
    pub fn with_system_prompt(mut self, enabled: bool) -> Self {
        self.include_system_prompt = enabled;
        self
    }

    /// Whether a usable API key is present.
    pub fn is_configured(&self) -> bool {
        self.config.is_key_configured()
    }

    fn build_request<'a>(&'a self, history: &'a [ChatMessage]) -> CompletionRequest<'a> {
        let mut messages = Vec::with_capacity(history.len() + 1);
        if self.include_system_prompt {
            messages.push(WireMessage {
                role: "system",
                content: SYSTEM_PROMPT,
            });
        }
        for msg in history {
            messages.push(WireMessage {
                role: msg.role.as_str(),
                content: &msg.content,
            });
        }
        CompletionRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }
}

/// Extract the first choice's text from a completion response body, falling
/// back to [`FALLBACK_REPLY`] when the shape is unexpected.
fn parse_completion(body: &Value) -> String {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_REPLY.to_string())
}

#[async_trait]
impl ChatCompleter for GroqClient {
    async fn complete(&self, history: &[ChatMessage]) -> std::result::Result<String, RelayError> {
        // Short-circuit before any network traffic when no key is set.
        if !self.is_configured() {
            return Err(RelayError::NotConfigured);
        }

        let request = self.build_request(history);
        tracing::debug!(
            model = %self.config.model,
            messages = request.messages.len(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Completion request failed");
                classify_failure(&e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            // Tolerate an unparseable error body.
            let body = response.json::<Value>().await.unwrap_or(Value::Null);
            let detail = body
                .pointer("/error/message")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error");
            let message = format!("HTTP {}: {}", status.as_u16(), detail);
            tracing::warn!(status = status.as_u16(), "Completion endpoint returned error");
            return Err(classify_failure(&message));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|_| RelayError::MalformedResponse)?;
        Ok(parse_completion(&body))
    }
}

// =============================================================================
// MockCompleter
// =============================================================================

/// In-memory completer for tests: returns a canned reply or failure.
pub struct MockCompleter {
    response: std::result::Result<String, RelayError>,
}

impl MockCompleter {
    /// A mock that always replies with the given text.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            response: Ok(reply.into()),
        }
    }

    /// A mock that always fails with the given error.
    pub fn failing(error: RelayError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

#[async_trait]
impl ChatCompleter for MockCompleter {
    async fn complete(&self, _history: &[ChatMessage]) -> std::result::Result<String, RelayError> {
        self.response.clone()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use floatchat_core::types::Role;

    // ---- Failure classification ----

    #[test]
    fn test_classify_unauthorized_by_status() {
        let err = classify_failure("HTTP 401: Invalid API Key");
        assert!(matches!(err, RelayError::Unauthorized(_)));
        assert_eq!(
            err.user_message(),
            "Invalid API key. Please check your Groq API key configuration."
        );
    }

    #[test]
    fn test_classify_unauthorized_by_word() {
        let err = classify_failure("Unauthorized request");
        assert!(matches!(err, RelayError::Unauthorized(_)));
    }

    #[test]
    fn test_classify_rate_limited() {
        let err = classify_failure("HTTP 429: Too Many Requests");
        assert!(matches!(err, RelayError::RateLimited(_)));
        assert_eq!(
            err.user_message(),
            "Rate limit exceeded. Please wait a moment before trying again."
        );
    }

    #[test]
    fn test_classify_rate_limited_by_phrase() {
        let err = classify_failure("you hit the rate limit, slow down");
        assert!(matches!(err, RelayError::RateLimited(_)));
    }

    #[test]
    fn test_classify_unavailable_500() {
        let err = classify_failure("error sending request: server returned 500");
        assert!(matches!(err, RelayError::Unavailable(_)));
        assert_eq!(
            err.user_message(),
            "Groq service is temporarily unavailable. Please try again later."
        );
    }

    #[test]
    fn test_classify_unavailable_502() {
        let err = classify_failure("HTTP 502: Bad Gateway");
        assert!(matches!(err, RelayError::Unavailable(_)));
    }

    #[test]
    fn test_classify_generic_network() {
        let err = classify_failure("connection reset by peer");
        assert!(matches!(err, RelayError::Network(_)));
        assert_eq!(
            err.user_message(),
            "Sorry, there was an error processing your request. Please try again."
        );
    }

    #[test]
    fn test_unauthorized_checked_before_unavailable() {
        // A message carrying both markers classifies by the first rule.
        let err = classify_failure("HTTP 401 from upstream 500");
        assert!(matches!(err, RelayError::Unauthorized(_)));
    }

    #[test]
    fn test_not_configured_user_message() {
        let msg = RelayError::NotConfigured.user_message();
        assert!(msg.contains("GROQ_API_KEY"));
    }

    #[test]
    fn test_malformed_user_message_is_fallback() {
        assert_eq!(RelayError::MalformedResponse.user_message(), FALLBACK_REPLY);
    }

    // ---- Marker stripping ----

    #[test]
    fn test_strip_marker_at_end() {
        let text = "Here is the thermocline analysis. GENERATE_CHART";
        assert_eq!(
            strip_chart_marker(text),
            "Here is the thermocline analysis."
        );
    }

    #[test]
    fn test_strip_marker_multiple_occurrences() {
        let text = "GENERATE_CHART data below GENERATE_CHART";
        assert_eq!(strip_chart_marker(text), "data below");
    }

    #[test]
    fn test_strip_marker_absent_is_identity() {
        assert_eq!(strip_chart_marker("plain reply"), "plain reply");
    }

    #[test]
    fn test_strip_marker_only_marker() {
        assert_eq!(strip_chart_marker("GENERATE_CHART"), "");
    }

    // ---- Completion parsing ----

    #[test]
    fn test_parse_completion_happy_path() {
        let body = serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": "surface is warm" } }]
        });
        assert_eq!(parse_completion(&body), "surface is warm");
    }

    #[test]
    fn test_parse_completion_empty_choices() {
        let body = serde_json::json!({ "choices": [] });
        assert_eq!(parse_completion(&body), FALLBACK_REPLY);
    }

    #[test]
    fn test_parse_completion_missing_content() {
        let body = serde_json::json!({ "choices": [{ "message": { "role": "assistant" } }] });
        assert_eq!(parse_completion(&body), FALLBACK_REPLY);
    }

    #[test]
    fn test_parse_completion_wrong_shape() {
        let body = serde_json::json!({ "unexpected": true });
        assert_eq!(parse_completion(&body), FALLBACK_REPLY);
    }

    #[test]
    fn test_parse_completion_non_string_content() {
        let body = serde_json::json!({ "choices": [{ "message": { "content": 42 } }] });
        assert_eq!(parse_completion(&body), FALLBACK_REPLY);
    }

    // ---- Not-configured short circuit ----

    #[tokio::test]
    async fn test_unconfigured_client_makes_no_request() {
        // Default config carries the placeholder key; the endpoint is
        // unroutable so any attempted request would error differently.
        let config = LlmConfig {
            endpoint: "http://127.0.0.1:1/never".to_string(),
            ..LlmConfig::default()
        };
        let client = GroqClient::new(config).unwrap();
        assert!(!client.is_configured());

        let history = vec![ChatMessage::now(Role::User, "hello")];
        let result = client.complete(&history).await;
        assert_eq!(result.unwrap_err(), RelayError::NotConfigured);
    }

    // ---- Request construction ----

    #[test]
    fn test_build_request_prepends_system_prompt() {
        let client = GroqClient::new(LlmConfig::default()).unwrap();
        let history = vec![
            ChatMessage::now(Role::User, "first"),
            ChatMessage::now(Role::Assistant, "second"),
        ];
        let request = client.build_request(&history);
        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[0].content, SYSTEM_PROMPT);
        assert_eq!(request.messages[1].role, "user");
        assert_eq!(request.messages[2].role, "assistant");
        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.max_tokens, 1024);
        assert_eq!(request.model, "llama-3.3-70b-versatile");
    }

    #[test]
    fn test_build_request_without_system_prompt() {
        let client = GroqClient::new(LlmConfig::default())
            .unwrap()
            .with_system_prompt(false);
        let history = vec![ChatMessage::now(Role::User, "only")];
        let request = client.build_request(&history);
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, "user");
    }

    #[test]
    fn test_request_serializes_to_wire_format() {
        let client = GroqClient::new(LlmConfig::default()).unwrap();
        let history = vec![ChatMessage::now(Role::User, "hi")];
        let request = client.build_request(&history);
        let v = serde_json::to_value(&request).unwrap();
        assert_eq!(v["model"], "llama-3.3-70b-versatile");
        assert_eq!(v["temperature"], 0.7);
        assert_eq!(v["max_tokens"], 1024);
        assert_eq!(v["messages"][0]["role"], "system");
        assert_eq!(v["messages"][1]["content"], "hi");
    }

    #[test]
    fn test_system_prompt_carries_marker_instruction() {
        assert!(SYSTEM_PROMPT.contains(CHART_MARKER));
    }

    // ---- MockCompleter ----

    #[tokio::test]
    async fn test_mock_completer_replies() {
        let mock = MockCompleter::replying("canned");
        let result = mock.complete(&[]).await.unwrap();
        assert_eq!(result, "canned");
    }

    #[tokio::test]
    async fn test_mock_completer_fails() {
        let mock = MockCompleter::failing(RelayError::RateLimited("429".to_string()));
        let result = mock.complete(&[]).await;
        assert!(matches!(result, Err(RelayError::RateLimited(_))));
    }
}

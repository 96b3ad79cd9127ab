//! Conversational core for FloatChat.
//!
//! Provides keyword-based query classification over canned oceanographic
//! data, the completion relay to the hosted LLM endpoint, and the
//! orchestrator owning the conversation state.

pub mod classifier;
pub mod error;
pub mod orchestrator;
pub mod profiles;
pub mod relay;

pub use classifier::{QueryClassifier, HELP_MESSAGE};
pub use error::ChatError;
pub use orchestrator::{ChatOrchestrator, ChatTurn};
pub use relay::{
    classify_failure, strip_chart_marker, ChatCompleter, GroqClient, MockCompleter, RelayError,
    CHART_MARKER, FALLBACK_REPLY, SYSTEM_PROMPT,
};

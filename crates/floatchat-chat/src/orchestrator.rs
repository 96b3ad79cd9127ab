//! Conversation orchestrator: owns the message log and the current
//! visualization, and coordinates classifier and completion relay.
//!
//! One orchestrator holds one conversation. The visualization is always
//! synthesized from the raw user query before the relay call; the model's
//! chart marker is cosmetic text and is stripped from the displayed reply.

use std::sync::{Arc, Mutex};

use floatchat_core::types::{ChatMessage, Role, VisualizationResponse};

use crate::classifier::QueryClassifier;
use crate::error::ChatError;
use crate::relay::{strip_chart_marker, ChatCompleter};

/// Maximum message length in characters.
const MAX_MESSAGE_LENGTH: usize = 2000;

/// State owned by the orchestrator: the append-only log and the single
/// "current" visualization, replaced wholesale on every query.
#[derive(Default)]
struct ConversationState {
    messages: Vec<ChatMessage>,
    current_visualization: Option<VisualizationResponse>,
}

/// The outcome of one user submission.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatTurn {
    /// Displayed reply text (relay output with the chart marker stripped, or
    /// the fixed string for the relay's failure class).
    pub reply: String,
    /// Visualization synthesized from the raw user query.
    pub visualization: VisualizationResponse,
}

/// Central coordinator wiring classifier and relay around owned state.
pub struct ChatOrchestrator {
    classifier: QueryClassifier,
    completer: Arc<dyn ChatCompleter>,
    state: Mutex<ConversationState>,
    max_message_length: usize,
}

impl ChatOrchestrator {
    /// Create an orchestrator around the given completion relay.
    pub fn new(completer: Arc<dyn ChatCompleter>) -> Self {
        Self {
            classifier: QueryClassifier::new(),
            completer,
            state: Mutex::new(ConversationState::default()),
            max_message_length: MAX_MESSAGE_LENGTH,
        }
    }

    /// Override the maximum accepted message length.
    pub fn with_max_message_length(mut self, max: usize) -> Self {
        self.max_message_length = max;
        self
    }

    /// Handle an incoming user message.
    ///
    /// Appends the user message, relays the full history, appends the
    /// assistant reply, and replaces the current visualization. The state
    /// lock is never held across the relay await, so appends are strictly
    /// sequenced per submission.
    pub async fn handle_message(&self, message: &str) -> Result<ChatTurn, ChatError> {
        if message.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if message.len() > self.max_message_length {
            return Err(ChatError::MessageTooLong(self.max_message_length));
        }

        // The visualization comes from the raw query, independent of the
        // model's reply.
        let visualization = self.classifier.classify(message);

        let history = {
            let mut state = self.lock_state()?;
            state.messages.push(ChatMessage::now(Role::User, message));
            state.messages.clone()
        };

        let reply = match self.completer.complete(&history).await {
            Ok(raw) => strip_chart_marker(&raw),
            Err(e) => {
                tracing::warn!(error = %e, "Completion relay failed");
                e.user_message().to_string()
            }
        };

        {
            let mut state = self.lock_state()?;
            state
                .messages
                .push(ChatMessage::now(Role::Assistant, reply.clone()));
            state.current_visualization = Some(visualization.clone());
        }

        Ok(ChatTurn {
            reply,
            visualization,
        })
    }

    /// Snapshot of the conversation log.
    pub fn history(&self) -> Result<Vec<ChatMessage>, ChatError> {
        Ok(self.lock_state()?.messages.clone())
    }

    /// The visualization from the most recent query, if any.
    pub fn current_visualization(&self) -> Result<Option<VisualizationResponse>, ChatError> {
        Ok(self.lock_state()?.current_visualization.clone())
    }

    /// Reset the conversation: clears the log and the visualization.
    pub fn clear(&self) -> Result<(), ChatError> {
        let mut state = self.lock_state()?;
        state.messages.clear();
        state.current_visualization = None;
        Ok(())
    }

    fn lock_state(&self) -> Result<std::sync::MutexGuard<'_, ConversationState>, ChatError> {
        self.state
            .lock()
            .map_err(|e| ChatError::State(format!("state lock poisoned: {}", e)))
    }
}

// =============================================================================
// Tests
// =============================================================================

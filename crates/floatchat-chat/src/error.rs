//! Error types for the conversational core.

use floatchat_core::FloatChatError;

/// Errors from the conversation orchestrator.
///
/// The classifier itself has no error conditions (every input resolves to a
/// response); these cover input validation and internal state access.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("state error: {0}")]
    State(String),
}

impl From<ChatError> for FloatChatError {
    fn from(err: ChatError) -> Self {
        FloatChatError::Chat(err.to_string())
    }
}

pub mod config;
pub mod error;
pub mod types;

pub use config::{FloatChatConfig, API_KEY_PLACEHOLDER};
pub use error::{FloatChatError, Result};
pub use types::*;

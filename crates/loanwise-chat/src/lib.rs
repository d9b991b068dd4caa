//! Chat relay: forwards a conversation and a fixed system prompt to a hosted
//! generative-language endpoint and returns the reply text.

mod error;
mod prompt;
mod relay;

pub use error::ChatError;
pub use prompt::LOAN_ADVISOR_PROMPT;
pub use relay::{ChatEndpoint, ChatRelay, FALLBACK_REPLY, build_payload, extract_text};

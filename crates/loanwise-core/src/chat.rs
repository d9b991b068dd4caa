//! Conversation turns exchanged with the chat assistant.
//!
//! The browser keeps the whole history and resends it with every message;
//! the server holds no session state.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    #[serde(alias = "assistant")]
    Model,
}

/// One message in a conversation.
///
/// Accepts either `{"role", "text"}` or the generative-language wire shape
/// `{"role", "parts": [{"text"}]}`, and always serializes as the latter.
/// A turn must carry some text in one of those shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTurn", into = "WireTurn")]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

pub type ChatHistory = Vec<ChatTurn>;

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

#[derive(Deserialize)]
struct RawTurn {
    role: ChatRole,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    parts: Vec<RawPart>,
}

#[derive(Deserialize)]
struct RawPart {
    #[serde(default)]
    text: Option<String>,
}

impl TryFrom<RawTurn> for ChatTurn {
    type Error = &'static str;

    fn try_from(raw: RawTurn) -> Result<Self, Self::Error> {
        let text: String = match raw.text {
            Some(text) => text,
            None => raw.parts.into_iter().filter_map(|p| p.text).collect(),
        };
        if text.is_empty() {
            return Err("chat turn has no text");
        }
        Ok(Self {
            role: raw.role,
            text,
        })
    }
}

#[derive(Serialize)]
struct WireTurn {
    role: ChatRole,
    parts: [WirePart; 1],
}

#[derive(Serialize)]
struct WirePart {
    text: String,
}

impl From<ChatTurn> for WireTurn {
    fn from(turn: ChatTurn) -> Self {
        Self {
            role: turn.role,
            parts: [WirePart { text: turn.text }],
        }
    }
}

use serde::{Deserialize, Serialize};

/// A role-tagged message exchanged with the completion service.
///
/// The service is stateless: the full ordered message history is the
/// only context it sees, so the order of these values in a request is
/// meaningful.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "role", content = "content", rename_all = "lowercase")]
pub enum ChatMessage {
    /// A user input text.
    User(String),
    /// A completion previously produced by the service.
    Assistant(String),
}

impl ChatMessage {
    /// Returns the wire name of this message's role.
    #[inline]
    pub fn role(&self) -> &'static str {
        match self {
            ChatMessage::User(_) => "user",
            ChatMessage::Assistant(_) => "assistant",
        }
    }

    /// Returns the text content of this message.
    #[inline]
    pub fn content(&self) -> &str {
        match self {
            ChatMessage::User(content) => content,
            ChatMessage::Assistant(content) => content,
        }
    }
}

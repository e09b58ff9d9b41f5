use crate::ChatMessage;

/// A request to be sent to the completion provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CompletionRequest {
    /// The ordered message history, oldest first.
    pub messages: Vec<ChatMessage>,
}

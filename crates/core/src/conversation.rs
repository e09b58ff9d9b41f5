//! Conversation-related types.

use std::sync::Arc;

use glow_model::ChatMessage;
use serde::{Deserialize, Serialize};

use crate::storage::{CONVERSATION_KEY, Storage};

/// Identifies which side of an exchange produced a transcript line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TranscriptSource {
    /// The line came from the user.
    User,
    /// The line came from the completion service.
    Assistant,
}

/// An item in the conversation.
///
/// Each item carries both the wire message that is sent to the
/// completion service and a display transcript. The two usually match,
/// but a user question keeps the raw text as its transcript while the
/// wire message is the scoped prompt built around it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    msg: ChatMessage,
    transcript: String,
}

impl Item {
    /// Creates an item from a wire message and its display transcript.
    #[inline]
    pub fn new(msg: ChatMessage, transcript: impl Into<String>) -> Self {
        Self {
            msg,
            transcript: transcript.into(),
        }
    }

    /// Returns the transcript of this item.
    #[inline]
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Returns the wire message of this item.
    #[inline]
    pub fn message(&self) -> &ChatMessage {
        &self.msg
    }

    /// Returns which side produced this item.
    #[inline]
    pub fn source(&self) -> TranscriptSource {
        match self.msg {
            ChatMessage::User(_) => TranscriptSource::User,
            ChatMessage::Assistant(_) => TranscriptSource::Assistant,
        }
    }
}

/// The ordered message history exchanged with the completion service.
///
/// Append-only: items are never reordered or deduplicated, and the
/// insertion order is exactly the payload order sent to the stateless
/// service on every turn. Every append is written through to storage
/// with the same fail-open policy as the selection store.
pub struct ConversationStore {
    items: Vec<Item>,
    storage: Arc<dyn Storage>,
}

impl ConversationStore {
    /// Creates an empty store backed by the given storage.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            items: Vec::new(),
            storage,
        }
    }

    /// Replaces the in-memory history with the persisted one, if any.
    ///
    /// Fails open exactly like [`crate::SelectionStore::restore`].
    pub fn restore(&mut self) {
        let blob = match self.storage.read(CONVERSATION_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => return,
            Err(err) => {
                warn!("failed to read persisted conversation: {err}");
                return;
            }
        };
        match serde_json::from_str::<Vec<Item>>(&blob) {
            Ok(items) => self.items = items,
            Err(err) => {
                warn!("discarding unparsable persisted conversation: {err}");
            }
        }
    }

    /// Adds an item to the end of the history.
    pub fn append(&mut self, item: Item) {
        self.items.push(item);
        self.persist();
    }

    /// Returns the full ordered wire history for transmission.
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.items.iter().map(|i| i.msg.clone()).collect()
    }

    /// Returns the items in insertion order.
    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    fn persist(&self) {
        let blob = match serde_json::to_string(&self.items) {
            Ok(blob) => blob,
            Err(err) => {
                error!("failed to serialize conversation: {err}");
                return;
            }
        };
        if let Err(err) = self.storage.write(CONVERSATION_KEY, &blob) {
            warn!("failed to persist conversation: {err}");
        }
    }
}

use std::sync::Arc;

use glow_model::CompletionProvider;

use super::{RequestState, Session};
use crate::catalog::Product;
use crate::completion_client::CompletionClient;
use crate::conversation::TranscriptSource;
use crate::storage::{MemoryStorage, Storage};

#[derive(Default)]
pub(crate) struct Callbacks {
    pub on_selection_changed: Option<Box<dyn Fn(&[Product]) + Send + Sync>>,
    pub on_transcript:
        Option<Box<dyn Fn(&str, TranscriptSource) + Send + Sync>>,
    pub on_request_state: Option<Box<dyn Fn(RequestState) + Send + Sync>>,
    pub on_notice: Option<Box<dyn Fn(&str) + Send + Sync>>,
    pub on_idle: Option<Box<dyn Fn() + Send + Sync>>,
}

/// [`Session`] builder.
pub struct SessionBuilder {
    pub(crate) completion_client: CompletionClient,
    pub(crate) storage: Arc<dyn Storage>,
    pub(crate) callbacks: Callbacks,
}

impl SessionBuilder {
    /// Creates a new builder with the specified completion provider.
    ///
    /// Until [`Self::with_storage`] is called, session state is held in
    /// a process-local in-memory store.
    #[inline]
    pub fn with_completion_provider<P: CompletionProvider + 'static>(
        provider: P,
    ) -> Self {
        Self {
            completion_client: CompletionClient::new(provider),
            storage: Arc::new(MemoryStorage::default()),
            callbacks: Callbacks::default(),
        }
    }

    /// Sets the storage backend that selection and conversation state
    /// are persisted to and restored from.
    #[inline]
    pub fn with_storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = storage;
        self
    }

    /// Attaches a callback to be invoked with the new selection
    /// contents after every toggle.
    #[inline]
    pub fn on_selection_changed(
        mut self,
        on_selection_changed: impl Fn(&[Product]) + Send + Sync + 'static,
    ) -> Self {
        self.callbacks.on_selection_changed =
            Some(Box::new(on_selection_changed));
        self
    }

    /// Attaches a callback to be invoked when a transcript line is
    /// appended to the conversation.
    #[inline]
    pub fn on_transcript(
        mut self,
        on_transcript: impl Fn(&str, TranscriptSource) + Send + Sync + 'static,
    ) -> Self {
        self.callbacks.on_transcript = Some(Box::new(on_transcript));
        self
    }

    /// Attaches a callback to be invoked when the request state of the
    /// current exchange changes.
    #[inline]
    pub fn on_request_state(
        mut self,
        on_request_state: impl Fn(RequestState) + Send + Sync + 'static,
    ) -> Self {
        self.callbacks.on_request_state = Some(Box::new(on_request_state));
        self
    }

    /// Attaches a callback to be invoked with transient user-visible
    /// notices (empty selection, failed exchange).
    #[inline]
    pub fn on_notice(
        mut self,
        on_notice: impl Fn(&str) + Send + Sync + 'static,
    ) -> Self {
        self.callbacks.on_notice = Some(Box::new(on_notice));
        self
    }

    /// Attaches a callback to be invoked when the intent queue drains.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.callbacks.on_idle = Some(Box::new(on_idle));
        self
    }

    /// Builds the session, restoring persisted state and spawning the
    /// session task.
    #[inline]
    pub fn build(self) -> Session {
        Session::spawn_from_builder(self)
    }
}

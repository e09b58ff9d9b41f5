mod builder;
mod state;

use tokio::sync::mpsc;

use crate::catalog::Product;
pub use builder::SessionBuilder;
use state::{Intent, SessionState};

/// The state of the current exchange with the completion service.
///
/// Exists only for the duration of one exchange and is never
/// persisted; it is what drives the pending indicator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RequestState {
    /// No exchange is in flight.
    #[default]
    Idle,
    /// A request has been issued and its reply is awaited.
    Pending,
    /// The last exchange completed with an accepted reply.
    Succeeded,
    /// The last exchange failed; the session stays usable.
    Failed,
}

/// A running session, which owns the selection and conversation stores
/// and processes user intents against them.
///
/// Intents are handled by a single-writer task: each one runs to
/// completion, including its network step, before the next queued
/// intent begins mutating shared state. This keeps conversation
/// appends in the order the requests were initiated even when intents
/// arrive in rapid succession.
pub struct Session {
    intent_tx: mpsc::UnboundedSender<Intent>,
}

impl Session {
    /// Toggles a product in the selection set.
    pub fn toggle_selection(&self, product: Product) {
        self.send_intent(Intent::ToggleSelection(product));
    }

    /// Requests a routine generated from the current selection.
    pub fn request_routine(&self) {
        self.send_intent(Intent::RequestRoutine);
    }

    /// Asks a follow-up question. Blank input is a no-op.
    pub fn ask_question<S: Into<String>>(&self, text: S) {
        self.send_intent(Intent::AskQuestion(text.into()));
    }

    fn send_intent(&self, intent: Intent) {
        self.intent_tx
            .send(intent)
            .expect("session task has been dropped too early");
    }

    fn spawn_from_builder(builder: SessionBuilder) -> Self {
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let state = SessionState::from_builder(builder);
        tokio::spawn(state::run_session(state, intent_rx));
        Self { intent_tx }
    }
}

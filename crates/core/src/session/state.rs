use glow_model::{ChatMessage, CompletionRequest};
use tokio::sync::mpsc;

use super::RequestState;
use super::builder::{Callbacks, SessionBuilder};
use crate::catalog::Product;
use crate::completion_client::CompletionClient;
use crate::conversation::{ConversationStore, Item};
use crate::selection::SelectionStore;

const EMPTY_SELECTION_NOTICE: &str =
    "Please select products to generate a routine.";
const ROUTINE_FAILED_NOTICE: &str =
    "Failed to generate routine. Please try again later.";
const QUESTION_FAILED_NOTICE: &str =
    "Failed to fetch a response. Please try again later.";

/// The transcript line shown for a routine request, in place of the
/// product-enumerating prompt that actually goes over the wire.
const ROUTINE_REQUEST_TRANSCRIPT: &str =
    "Generate a routine for the selected products.";

#[derive(Debug)]
pub(crate) enum Intent {
    ToggleSelection(Product),
    RequestRoutine,
    AskQuestion(String),
}

pub(crate) struct SessionState {
    selection: SelectionStore,
    conversation: ConversationStore,
    completion_client: CompletionClient,
    request_state: RequestState,
    callbacks: Callbacks,
}

impl SessionState {
    pub fn from_builder(builder: SessionBuilder) -> Self {
        let SessionBuilder {
            completion_client,
            storage,
            callbacks,
        } = builder;

        let mut selection = SelectionStore::new(storage.clone());
        selection.restore();
        let mut conversation = ConversationStore::new(storage);
        conversation.restore();

        Self {
            selection,
            conversation,
            completion_client,
            request_state: RequestState::default(),
            callbacks,
        }
    }

    async fn handle_intent(&mut self, intent: Intent) {
        match intent {
            Intent::ToggleSelection(product) => self.toggle_selection(product),
            Intent::RequestRoutine => self.request_routine().await,
            Intent::AskQuestion(text) => self.ask_question(text).await,
        }
    }

    fn toggle_selection(&mut self, product: Product) {
        let current = self.selection.toggle(product);
        if let Some(on_selection_changed) = &self.callbacks.on_selection_changed
        {
            on_selection_changed(current);
        }
    }

    async fn request_routine(&mut self) {
        if self.selection.current().is_empty() {
            // Recovered locally: no request is issued and the history
            // is left untouched.
            self.notify_notice(EMPTY_SELECTION_NOTICE);
            return;
        }

        let prompt = routine_prompt(self.selection.current());
        self.append_item(Item::new(
            ChatMessage::User(prompt),
            ROUTINE_REQUEST_TRANSCRIPT,
        ));
        self.exchange(ROUTINE_FAILED_NOTICE).await;
    }

    async fn ask_question(&mut self, text: String) {
        let text = text.trim();
        if text.is_empty() {
            // Blank input is silently ignored.
            return;
        }

        let prompt = question_prompt(text);
        self.append_item(Item::new(ChatMessage::User(prompt), text));
        self.exchange(QUESTION_FAILED_NOTICE).await;
    }

    /// Runs one request/response exchange against the full history.
    ///
    /// The history at this point already ends with the user turn of
    /// this exchange. On failure that turn stays in place, so the
    /// context is resent with the next attempt.
    async fn exchange(&mut self, failure_notice: &str) {
        self.set_request_state(RequestState::Pending);

        let req = CompletionRequest {
            messages: self.conversation.snapshot(),
        };
        match self.completion_client.send(req).await {
            Ok(reply) => {
                self.append_item(Item::new(
                    ChatMessage::Assistant(reply.clone()),
                    reply,
                ));
                self.set_request_state(RequestState::Succeeded);
            }
            Err(err) => {
                warn!("exchange failed: {err}");
                self.set_request_state(RequestState::Failed);
                self.notify_notice(failure_notice);
            }
        }
    }

    fn append_item(&mut self, item: Item) {
        let source = item.source();
        let transcript = item.transcript().to_owned();
        self.conversation.append(item);
        if let Some(on_transcript) = &self.callbacks.on_transcript {
            on_transcript(&transcript, source);
        }
    }

    fn set_request_state(&mut self, request_state: RequestState) {
        if self.request_state == request_state {
            return;
        }
        self.request_state = request_state;
        if let Some(on_request_state) = &self.callbacks.on_request_state {
            on_request_state(request_state);
        }
    }

    fn notify_notice(&self, notice: &str) {
        if let Some(on_notice) = &self.callbacks.on_notice {
            on_notice(notice);
        }
    }

    fn notify_idle(&self) {
        if let Some(on_idle) = &self.callbacks.on_idle {
            on_idle();
        }
    }
}

fn routine_prompt(products: &[Product]) -> String {
    let listing = products
        .iter()
        .map(|p| format!("{} by {}", p.name, p.brand))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Create a skincare or beauty routine using the following products: \
         {listing}. Format the response with line breaks and bullet points \
         for clarity."
    )
}

fn question_prompt(text: &str) -> String {
    format!(
        "Answer only questions related to beauty routines, skincare \
         products, or related topics. User asked: \"{text}\""
    )
}

pub(crate) async fn run_session(
    mut state: SessionState,
    mut intent_rx: mpsc::UnboundedReceiver<Intent>,
) {
    debug!("started");
    while let Some(intent) = intent_rx.recv().await {
        trace!("received intent: {intent:?}");
        state.handle_intent(intent).await;

        if intent_rx.is_empty() {
            state.notify_idle();
        }
    }
    debug!("will terminate");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, brand: &str) -> Product {
        Product {
            id: 1,
            name: name.to_owned(),
            brand: brand.to_owned(),
            category: String::new(),
            image: String::new(),
            description: String::new(),
        }
    }

    #[test]
    fn test_routine_prompt_enumerates_products() {
        let prompt = routine_prompt(&[
            product("Foam Cleanser", "Acme"),
            product("Daily Toner", "Glow Labs"),
        ]);
        assert!(
            prompt.contains("Foam Cleanser by Acme, Daily Toner by Glow Labs")
        );
    }

    #[test]
    fn test_question_prompt_embeds_raw_text() {
        let prompt = question_prompt("What order do I apply these?");
        assert!(prompt.contains("\"What order do I apply these?\""));
    }
}

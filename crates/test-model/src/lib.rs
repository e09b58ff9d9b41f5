//! A local fake completion service for testing purpose.

mod preset;

use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use glow_model::{
    CompletionProvider, CompletionProviderError, CompletionRequest, ErrorKind,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    #[allow(dead_code)]
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl StdError for Error {}

impl CompletionProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Clone)]
enum ConversationStep {
    UserTurn,
    AssistantTurn(PresetReply),
}

/// A local fake completion service for testing purpose.
///
/// Before sending requests, you need to setup the conversation script,
/// which is how the service should reply to a request. The added steps
/// will be selected according to the number of history messages in your
/// request. If there are no enough steps in the script, an error will
/// be returned.
#[derive(Clone, Default)]
pub struct TestProvider {
    conversation_script: Vec<ConversationStep>,
    delay: Option<Duration>,
    attempts: Arc<Mutex<HashMap<usize, u64>>>,
}

impl TestProvider {
    #[inline]
    pub fn add_user_turn(&mut self) {
        self.conversation_script.push(ConversationStep::UserTurn);
    }

    #[inline]
    pub fn add_assistant_turn(&mut self, preset: PresetReply) {
        self.conversation_script
            .push(ConversationStep::AssistantTurn(preset));
    }

    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns how many requests have been attempted in total.
    pub fn total_attempts(&self) -> u64 {
        self.attempts.lock().unwrap().values().sum()
    }
}

impl CompletionProvider for TestProvider {
    type Error = crate::Error;

    fn complete(
        &self,
        req: &CompletionRequest,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'static
    {
        let step_idx = req.messages.len();
        let step = self.conversation_script.get(step_idx).cloned();
        let delay = self.delay.unwrap_or(Duration::from_millis(1));
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            let counter = attempts.entry(step_idx).or_insert(0);
            *counter += 1;
            *counter
        };

        async move {
            sleep(delay).await;

            let preset = match step {
                Some(ConversationStep::AssistantTurn(preset)) => preset,
                Some(ConversationStep::UserTurn) => {
                    return Err(Error {
                        message: "not an assistant reply step",
                        kind: ErrorKind::Other,
                    });
                }
                None => {
                    return Err(Error {
                        message: "no enough steps",
                        kind: ErrorKind::Other,
                    });
                }
            };

            match preset.failures {
                // `Some(0)` fails forever, `Some(n)` fails the first
                // `n` attempts.
                Some(0) => Err(Error {
                    message: "preset failure",
                    kind: ErrorKind::Transport,
                }),
                Some(n) if attempt <= n => Err(Error {
                    message: "preset failure",
                    kind: ErrorKind::Transport,
                }),
                _ => Ok(preset.content),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glow_model::ChatMessage;

    use super::*;

    #[tokio::test]
    async fn test_scripted_replies() {
        let mut provider = TestProvider::default();
        provider.add_user_turn();
        provider.add_assistant_turn(PresetReply::with_content("Hello, world!"));
        provider.add_user_turn();
        provider.add_assistant_turn(PresetReply::with_content("Sure."));

        let mut req = CompletionRequest {
            messages: vec![ChatMessage::User("Hi".to_owned())],
        };
        let reply = provider.complete(&req).await.unwrap();
        assert_eq!(reply, "Hello, world!");

        req.messages.push(ChatMessage::Assistant(reply));
        req.messages.push(ChatMessage::User("Go on".to_owned()));
        let reply = provider.complete(&req).await.unwrap();
        assert_eq!(reply, "Sure.");
    }

    #[tokio::test]
    async fn test_empty_script_fails() {
        let provider = TestProvider::default();
        let req = CompletionRequest {
            messages: vec![ChatMessage::User("Hi".to_owned())],
        };
        assert!(provider.complete(&req).await.is_err());
    }

    #[tokio::test]
    async fn test_preset_failures() {
        let mut provider = TestProvider::default();
        provider.add_user_turn();
        provider
            .add_assistant_turn(PresetReply::with_content("Ok").with_failures(1));

        let req = CompletionRequest {
            messages: vec![ChatMessage::User("Hi".to_owned())],
        };
        assert!(provider.complete(&req).await.is_err());
        assert_eq!(provider.complete(&req).await.unwrap(), "Ok");
        assert_eq!(provider.total_attempts(), 2);
    }
}

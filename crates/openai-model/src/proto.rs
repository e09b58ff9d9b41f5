use glow_model::{ChatMessage, CompletionRequest, ErrorKind};
use serde::{Deserialize, Serialize};

use crate::{Error, OpenAIConfig};

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct ChatCompletion {
    pub choices: Vec<Choice>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    User { content: String },
    Assistant { content: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_request(
    req: &CompletionRequest,
    config: &OpenAIConfig,
) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: config.model.clone(),
        messages: req.messages.iter().map(create_message).collect(),
    }
}

#[inline]
fn create_message(msg: &ChatMessage) -> Message {
    match msg {
        ChatMessage::User(content) => Message::User {
            content: content.clone(),
        },
        ChatMessage::Assistant(content) => Message::Assistant {
            content: content.clone(),
        },
    }
}

/// Pulls the completion text out of a raw response body.
///
/// Accepts only well-formed JSON with a non-empty `choices` list whose
/// first entry has a non-empty `message.content` string. Anything else
/// is a protocol error with no partial result.
pub fn extract_completion(body: &[u8]) -> Result<String, Error> {
    let completion: ChatCompletion = match serde_json::from_slice(body) {
        Ok(completion) => completion,
        Err(err) => {
            return Err(Error::new(
                format!("malformed response body: {err}"),
                ErrorKind::Protocol,
            ));
        }
    };
    let Some(choice) = completion.choices.into_iter().next() else {
        return Err(Error::new("response has no choices", ErrorKind::Protocol));
    };
    match choice.message.content {
        Some(content) if !content.is_empty() => Ok(content),
        _ => Err(Error::new(
            "first choice has no message content",
            ErrorKind::Protocol,
        )),
    }
}

//! A completion provider for OpenAI-compatible chat APIs.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use glow_model::{
    CompletionProvider, CompletionProviderError, CompletionRequest, ErrorKind,
};
use mime::Mime;
use reqwest::{Client, Response, header};

pub use config::{OpenAIConfig, OpenAIConfigBuilder};

/// Error type for [`OpenAIProvider`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl CompletionProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// OpenAI-compatible completion provider.
///
/// Issues one non-streaming `chat/completions` request per call and
/// validates the response shape before handing the completion text back:
/// the body must be well-formed JSON with a non-empty `choices` list
/// whose first entry carries a non-empty `message.content` string.
#[derive(Clone, Debug)]
pub struct OpenAIProvider {
    client: Client,
    config: Arc<OpenAIConfig>,
}

impl OpenAIProvider {
    /// Creates a new `OpenAIProvider` with the given configuration.
    #[inline]
    pub fn new(config: OpenAIConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    /// Creates a provider that reuses an existing HTTP client.
    ///
    /// Useful when the host wants to configure transport concerns such
    /// as a request timeout, which this crate does not impose itself.
    #[inline]
    pub fn with_client(client: Client, config: OpenAIConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }
}

impl CompletionProvider for OpenAIProvider {
    type Error = Error;

    fn complete(
        &self,
        req: &CompletionRequest,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'static
    {
        let openai_req = proto::create_request(req, &self.config);
        let mut builder = self
            .client
            .post(self.config.endpoint.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json");
        if let Some(api_key) = &self.config.api_key {
            builder =
                builder.header(header::AUTHORIZATION, format!("Bearer {api_key}"));
        }
        let resp_fut = builder.json(&openai_req).send();

        async move {
            let resp = match resp_fut.await.and_then(Response::error_for_status)
            {
                Ok(resp) => resp,
                Err(err) => {
                    return Err(Error::new(
                        format!("{err}"),
                        ErrorKind::Transport,
                    ));
                }
            };

            let content_type = resp
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok());
            let is_valid_content_type = content_type
                .and_then(|v| v.parse().ok())
                .map(|m: Mime| m.subtype().as_str() == "json")
                .unwrap_or(false);
            if !is_valid_content_type {
                return Err(Error::new(
                    format!("Unexpected content type: {content_type:?}"),
                    ErrorKind::Protocol,
                ));
            }

            let body = match resp.bytes().await {
                Ok(body) => body,
                Err(err) => {
                    return Err(Error::new(
                        format!("{err}"),
                        ErrorKind::Transport,
                    ));
                }
            };
            trace!("got a response of {} bytes", body.len());
            proto::extract_completion(&body)
        }
    }
}

#[cfg(test)]
mod tests {
    use glow_model::ChatMessage;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Serves one canned HTTP response on a local port and returns the
    /// endpoint URL for it.
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();

            // Drain the request (headers plus content-length body)
            // before replying, so the client never sees a reset while
            // it is still writing.
            let mut req = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let count = stream.read(&mut buf).await.unwrap();
                if count == 0 {
                    break;
                }
                req.extend_from_slice(&buf[..count]);
                let Some(header_end) = find(&req, b"\r\n\r\n") else {
                    continue;
                };
                let headers = String::from_utf8_lossy(&req[..header_end]);
                let content_length = headers
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0);
                if req.len() >= header_end + 4 + content_length {
                    break;
                }
            }

            stream.write_all(response.as_bytes()).await.unwrap();
        });
        format!("http://{addr}/")
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    async fn complete_against(endpoint: String) -> Result<String, Error> {
        let provider = OpenAIProvider::new(
            OpenAIConfigBuilder::with_endpoint(endpoint).build(),
        );
        provider
            .complete(&CompletionRequest {
                messages: vec![ChatMessage::User("Hi".to_owned())],
            })
            .await
    }

    #[tokio::test]
    async fn test_server_error_is_a_transport_failure() {
        let endpoint = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\n\
             content-length: 0\r\n\
             connection: close\r\n\r\n",
        )
        .await;
        let err = complete_against(endpoint).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[tokio::test]
    async fn test_unexpected_content_type_is_rejected() {
        let endpoint = serve_once(
            "HTTP/1.1 200 OK\r\n\
             content-type: text/html\r\n\
             content-length: 2\r\n\
             connection: close\r\n\r\nok",
        )
        .await;
        let err = complete_against(endpoint).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Protocol);
    }

    #[tokio::test]
    async fn test_valid_response_roundtrip() {
        let body = r#"{"choices":[{"message":{"content":"A routine."}}]}"#;
        let endpoint = serve_once(
            "HTTP/1.1 200 OK\r\n\
             content-type: application/json\r\n\
             content-length: 50\r\n\
             connection: close\r\n\r\n\
             {\"choices\":[{\"message\":{\"content\":\"A routine.\"}}]}",
        )
        .await;
        assert_eq!(body.len(), 50);
        let reply = complete_against(endpoint).await.unwrap();
        assert_eq!(reply, "A routine.");
    }
}

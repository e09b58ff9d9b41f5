use std::pin::Pin;
use std::sync::Arc;

use glow_model::{
    CompletionProvider, CompletionProviderError, CompletionRequest,
};
use tracing::Instrument;

type CompleteResult = Result<String, Box<dyn CompletionProviderError>>;
type BoxedCompleteFuture =
    Pin<Box<dyn Future<Output = CompleteResult> + Send>>;
type HandlerFn =
    Arc<dyn Fn(CompletionRequest) -> BoxedCompleteFuture + Send + Sync>;

/// A wrapper around a completion provider that normalizes accepted
/// completions and provides a type-erased interface for the session.
///
/// Pure with respect to the stores: one call maps the input history to
/// one result, makes exactly one attempt, and touches nothing else.
#[derive(Clone)]
pub struct CompletionClient {
    handler_fn: HandlerFn,
}

impl CompletionClient {
    /// Creates a client wrapping the given provider.
    #[inline]
    pub fn new<P: CompletionProvider + 'static>(provider: P) -> Self {
        // We have to erase the type `P`, since `CompletionClient` doesn't
        // have a generic parameter and we don't want it either.
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let fut = provider.complete(&req);
            Box::pin(
                async move {
                    trace!("got a request: {:?}", req);
                    match fut.await {
                        Ok(text) => Ok(normalize_newlines(&text)),
                        Err(err) => {
                            error!("got an error: {err:?}");
                            Err(Box::new(err)
                                as Box<dyn CompletionProviderError>)
                        }
                    }
                }
                .instrument(trace_span!("completion client req")),
            )
        });
        Self { handler_fn }
    }

    /// Sends a request and returns the normalized completion text.
    ///
    /// The caller decides whether to re-invoke after a failure; the
    /// client itself never retries.
    #[inline]
    pub async fn send(&self, req: CompletionRequest) -> CompleteResult {
        (self.handler_fn)(req).await
    }
}

/// Collapses runs of 2-or-more consecutive newlines to a single one.
///
/// Idempotent: `normalize_newlines(normalize_newlines(x))` equals
/// `normalize_newlines(x)`.
pub fn normalize_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for ch in text.chars() {
        if ch == '\n' {
            in_run = true;
            continue;
        }
        if in_run {
            out.push('\n');
            in_run = false;
        }
        out.push(ch);
    }
    if in_run {
        out.push('\n');
    }
    out
}

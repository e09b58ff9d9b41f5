use std::error::Error;

use crate::error::ErrorKind;
use crate::request::CompletionRequest;

/// The error type for a completion provider.
pub trait CompletionProviderError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A type that represents a completion provider, which turns an ordered
/// message history into a single generated reply.
///
/// Once the provider is created, it should behave like a stateless object.
/// It can still have internal state, but callers should not rely on it,
/// and the provider should be prepared for being dropped anytime.
///
/// Implementations make exactly one attempt per call; whether to call
/// again after a failure is the caller's decision.
pub trait CompletionProvider: Send + Sync {
    /// The error type that may be returned by the provider.
    type Error: CompletionProviderError;

    /// Sends a request to the service and returns the completion text.
    ///
    /// A returned `Ok` value is already validated: it is the non-empty
    /// content of the service's first choice. Any other outcome (network
    /// failure, bad status, malformed payload, missing or empty fields)
    /// is reported as an error with no partial result.
    fn complete(
        &self,
        req: &CompletionRequest,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'static;
}

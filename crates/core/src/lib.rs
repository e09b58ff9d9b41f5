//! Core logic of the routine-advisor session: the selection and
//! conversation stores, the completion client, and the session state
//! machine that ties them together.
//!
//! Nothing in this crate renders anything. A view layer subscribes to
//! the session's change notifications and re-renders from them, which
//! keeps the whole state machine testable without a rendering surface.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

pub mod catalog;
mod completion_client;
pub mod conversation;
mod selection;
mod session;
pub mod storage;

pub use completion_client::{CompletionClient, normalize_newlines};
pub use selection::SelectionStore;
pub use session::{RequestState, Session, SessionBuilder};

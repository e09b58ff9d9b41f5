//! An abstraction layer for completion services.
//!
//! This crate establishes an unified protocol for the session core to
//! interact with a remote completion service, so that the core can be
//! exercised against a fake service without modifying its codebase.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod error;
mod message;
mod provider;
mod request;

pub use error::*;
pub use message::*;
pub use provider::*;
pub use request::*;

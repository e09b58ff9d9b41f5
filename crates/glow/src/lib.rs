//! An out-of-the-box routine advisor that assembles the session core
//! with a catalog source, file-backed persistence, and locale helpers.
//!
//! The crate includes a CLI tool for using in the terminal. And you can
//! also use it as a library to bring the advisor session into your own
//! host apps.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

pub mod catalog;
pub mod locale;
pub mod storage;

/// Re-exports of [`glow_core`] crate.
pub mod core {
    pub use glow_core::*;
}

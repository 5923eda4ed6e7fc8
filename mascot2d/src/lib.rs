//! Host-agnostic runtime for scroll-triggered mascot overlay animations.
//!
//! This crate is DOM-agnostic. The host supplies read-only scroll/viewport
//! snapshots and a stream of gesture events; the runtime answers with a set
//! of presentation classes per mascot and lifecycle events. Browser
//! integrations live in separate crates (e.g. `mascot2d-web`).

#![forbid(unsafe_code)]

mod error;
mod model;
mod runtime;

#[cfg(feature = "json")]
pub mod json;

pub use error::*;
pub use model::*;
pub use runtime::*;

#[cfg(all(test, feature = "json"))]
mod json_tests;

//! Push-history resolution for regression bisection.
//!
//! Resolves calendar dates and changeset identifiers against a Mercurial
//! `json-pushes` endpoint into ordered push records, so a bisection engine
//! can turn a requested range into a well-ordered sequence of candidate
//! builds.
//!
//! The HTTP layer is injected through the [`Transport`] trait; a
//! reqwest-backed implementation lives in the `hgbisect-net` crate and
//! scripted in-memory fakes for testing live in [`fakes`].

pub mod branches;
pub mod client;
pub mod error;
pub mod fakes;
pub mod model;
pub mod telemetry;
pub mod transport;

pub use client::PushLogClient;
pub use error::{PushlogError, Result};
pub use model::{PushId, PushLogSet, PushRecord, RangeBoundary};
pub use telemetry::init_tracing;
pub use transport::{Transport, TransportError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

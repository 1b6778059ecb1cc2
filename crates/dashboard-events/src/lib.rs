#![forbid(unsafe_code)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls
)]
#![warn(unused, unused_imports, unused_must_use, unreachable_pub, missing_docs)]

//! In-process event bus for the dashboard.
//!
//! The bus carries any typed payload implementing [`EventKind`], assigns
//! sequential identifiers, and keeps a bounded replay ring so late subscribers
//! (a widget mounted after the first theme change, for example) can catch up.
//! Delivery is synchronous on the calling thread; the dashboard runs on a
//! single UI thread and every publish runs to completion before the next
//! event is handled.
//!
//! Layout: `payloads.rs` (envelope + kind trait), `routing.rs` (`EventBus`),
//! `error.rs` (subscription errors).

pub mod error;
pub mod payloads;
pub mod routing;

pub use error::{EventBusError, EventBusResult};
pub use payloads::{DEFAULT_REPLAY_CAPACITY, EventEnvelope, EventId, EventKind};
pub use routing::{EventBus, SubscriptionId};

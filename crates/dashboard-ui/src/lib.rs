#![forbid(unsafe_code)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls
)]
#![warn(unused, unused_imports, unused_must_use, unreachable_pub, missing_docs)]
#![allow(clippy::module_name_repetitions)]
//! Browser front-end for the dashboard settings.
//!
//! The platform-neutral pieces (surface selectors, the notice feed and the
//! yewdux slice) build everywhere; localStorage, DOM and `storage`-event
//! adapters are wasm32 only.

pub mod notices;
pub mod slice;
pub mod surfaces;

#[cfg(target_arch = "wasm32")]
pub mod browser;

#[cfg(target_arch = "wasm32")]
mod app;

#[cfg(target_arch = "wasm32")]
pub use app::{DashboardSession, run_app};
pub use notices::NoticeFeed;
pub use slice::SettingsSlice;

#![forbid(unsafe_code)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls
)]
#![warn(unused, unused_imports, unused_must_use, unreachable_pub, missing_docs)]

//! Shared test helpers used across integration suites.
//!
//! Layout:
//! - `storage.rs`: storage shared by simulated tabs, with per-tab inboxes
//! - `display.rs`: display environment that records applied effects
//! - `fixtures.rs`: profile files and sample backup documents

pub mod display;
pub mod fixtures;
pub mod storage;

pub use display::RecordingEnvironment;
pub use fixtures::{profile_file, sample_backup};
pub use storage::{SharedStorage, TabStorage};

#![forbid(unsafe_code)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls
)]
#![warn(unused, unused_imports, unused_must_use, unreachable_pub, missing_docs)]
#![allow(clippy::redundant_pub_crate)]

//! Administrative CLI for a dashboard profile file.
//!
//! A profile file is a JSON object of raw strings mirroring the browser's
//! localStorage, so the same settings core reads and writes it.
//!
//! Layout:
//! - `cli.rs`: argument parsing and command dispatch
//! - `commands/`: command handlers grouped by concern
//! - `profile.rs`: file-backed storage
//! - `error.rs`: CLI error classification and exit codes
//! - `output.rs`: renderers and formatting helpers
//! - `main.rs`: thin entrypoint delegating to `run()`

pub(crate) mod cli;
pub(crate) mod commands;
pub(crate) mod error;
pub(crate) mod output;
pub mod profile;

pub use cli::{run, run_from};
pub use profile::ProfileStorage;

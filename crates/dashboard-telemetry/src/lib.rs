#![forbid(unsafe_code)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls
)]
#![warn(unused, unused_imports, unused_must_use, unreachable_pub, missing_docs)]

//! Logging setup shared by the native dashboard tools.
//!
//! The browser build reports through the console instead; everything that
//! runs as a process installs its subscriber through [`init_logging`].

pub mod init;

pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging, validate_level};

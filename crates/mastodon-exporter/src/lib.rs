//! mastodon-exporter library entry.
//!
//! Wires configuration, the admin API client, scrape-time collection, and
//! exposition rendering into an axum app. Consumed by the binary (`main.rs`)
//! and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod app_state;
pub mod client;
pub mod collect;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;

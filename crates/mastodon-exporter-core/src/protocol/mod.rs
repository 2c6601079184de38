//! Mastodon API wire contracts.
//!
//! - `admin`: `/api/v1/admin/measures` request/response and normalization
//! - `instance`: the small payloads used for the startup credential check

pub mod admin;
pub mod instance;

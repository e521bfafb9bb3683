//! Widget integration tests.

mod support;
mod config;
mod dispatch;
mod edit;
mod shortcode;

#[cfg(feature = "http")]
mod http;

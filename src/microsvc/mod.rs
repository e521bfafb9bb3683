//! microsvc: command dispatch and HTTP transport for the widget.
//!
//! A `Service` owns the widget and a table of named commands. Each command
//! handler receives a `Context` carrying the payload, the requester derived
//! from the session, and the widget.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use chatbot_instructions::{microsvc, InMemorySettingsStore, NonceKeeper, Widget};
//!
//! let widget = Widget::new(InMemorySettingsStore::new(), NonceKeeper::random(86_400));
//! let service = Arc::new(microsvc::Service::new(widget));
//!
//! // Direct dispatch
//! let saved = service.dispatch("save_chatbot_instructions", input, session);
//!
//! // HTTP transport (requires "http" feature)
//! // microsvc::serve(service, "0.0.0.0:3000").await?;
//! ```
//!
//! ## Handler Convention
//!
//! Each handler module exports:
//!
//! - `COMMAND: &str`: the command name
//! - `guard(ctx) -> bool`: payload shape check
//! - `handle(ctx) -> Result<Value, HandlerError>`: the handler

mod context;
mod error;
pub mod save_instructions;
mod service;
mod session;

pub use context::Context;
pub use error::HandlerError;
pub use service::Service;
pub use session::{Session, ROLES_HEADER, USER_ID_HEADER};

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve};

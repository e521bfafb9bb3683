//! Display and edit chatbot instructions kept in a shared settings store.
//!
//! The collection of chatbot records lives as one JSON value under one key
//! of a [`SettingsStore`]. [`Widget`] renders a record's instructions as an
//! HTML fragment, read-only or editable depending on the requester's role
//! rank, and saves edits back through a nonce-protected command.

pub mod access;
pub mod config;
pub mod edit;
pub mod microsvc;
pub mod nonce;
pub mod record;
pub mod render;
pub mod store;
mod widget;

pub use access::{can_edit, Rank, Requester};
pub use config::{ConfigError, WidgetConfig};
pub use edit::{submit_edit, EditError, EditRequest, EditState};
pub use nonce::{AntiForgery, NonceKeeper};
pub use record::{find_by_identifier, Collection, Record};
pub use render::{render, render_inventory, ViewConfig};
pub use store::{
    InMemorySettingsStore, JsonFileSettingsStore, RecordStore, SettingsStore, StoreError,
};
pub use widget::Widget;

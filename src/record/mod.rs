//! Records - the chatbot entries held in the shared settings store.
//!
//! A `Collection` is the ordered list of every chatbot record, stored as one
//! JSON array under a single settings key. Only three fields are understood
//! here; everything else a record carries is kept verbatim so that a
//! fetch/persist cycle never drops data owned by other writers.
//!
//! ## Example
//!
//! ```ignore
//! use chatbot_instructions::record::{find_by_identifier, Collection};
//!
//! let collection: Collection = serde_json::from_str(raw)?;
//! if let Some(record) = find_by_identifier(&collection, "support_bot") {
//!     println!("{}", record.body.as_deref().unwrap_or_default());
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The full ordered set of records, persisted as one unit.
pub type Collection = Vec<Record>;

/// One chatbot entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier (`botId`). Records without one never match a lookup.
    #[serde(rename = "botId", default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Human-readable label (`name`).
    #[serde(rename = "name", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Instruction text shown and edited by the widget (`instructions`).
    #[serde(rename = "instructions", default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Fields this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// Create a record with an identifier and body.
    pub fn new(identifier: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            identifier: Some(identifier.into()),
            body: Some(body.into()),
            ..Self::default()
        }
    }

    /// Builder-style display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    fn has_identifier(&self, id: &str) -> bool {
        self.identifier.as_deref() == Some(id)
    }
}

/// Find the first record whose identifier equals `id` exactly.
///
/// Returns `None` when nothing matches or when that first match carries no
/// body. Later duplicates are never consulted.
pub fn find_by_identifier<'a>(collection: &'a Collection, id: &str) -> Option<&'a Record> {
    collection
        .iter()
        .find(|record| record.has_identifier(id))
        .filter(|record| record.body.is_some())
}

/// Index of the first record whose identifier equals `id`, body or not.
pub fn position_of(collection: &Collection, id: &str) -> Option<usize> {
    collection.iter().position(|record| record.has_identifier(id))
}

/// Identifiers are non-empty and limited to `[A-Za-z0-9_-]`.
pub fn is_valid_identifier(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

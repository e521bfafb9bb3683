//! Edit - the submission handler that saves new instructions for one record.
//!
//! A submission moves through `Received → Authorizing → Locating →
//! Persisting` and ends `Succeeded` or `Failed`, in a single synchronous
//! attempt with no retries.
//!
//! ## Concurrent edits
//!
//! Every submission fetches the whole collection, replaces one body, and
//! writes the whole collection back. Nothing spans that read and that write.
//! If submission B reads before submission A writes, B's write carries A's
//! stale copy and silently discards A's change, even when A and B touch
//! different records. Last writer wins; there is no version check or lock.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::access::{can_edit, Rank, Requester};
use crate::nonce::{scoped_action, AntiForgery};
use crate::record::position_of;
use crate::render::escape::{sanitize_text_field, sanitize_textarea};
use crate::store::{RecordStore, SettingsStore};

/// Message returned on a successful save.
pub const SAVED_MESSAGE: &str = "Instructions saved successfully";

/// Payload of a save submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRequest {
    #[serde(default)]
    pub bot_id: String,
    #[serde(default = "default_min_role")]
    pub min_role: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub nonce: String,
}

fn default_min_role() -> String {
    Rank::Administrator.as_str().to_string()
}

/// Progress of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Received,
    Authorizing,
    Locating,
    Persisting,
    Succeeded,
    Failed,
}

impl fmt::Display for EditState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EditState::Received => "received",
            EditState::Authorizing => "authorizing",
            EditState::Locating => "locating",
            EditState::Persisting => "persisting",
            EditState::Succeeded => "succeeded",
            EditState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Why a submission failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// Anti-forgery token missing, expired, or issued for something else.
    /// Fatal for the request: no normal response envelope is produced.
    SecurityCheck,
    /// Requester is anonymous or below the minimum role.
    InsufficientPermissions,
    /// Bot id was empty after sanitizing.
    MissingIdentifier,
    /// The collection is empty or unreadable.
    NoRecords,
    /// No record carries the bot id.
    RecordNotFound,
    /// The store rejected the write.
    SaveFailed,
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            EditError::SecurityCheck => "Security check failed",
            EditError::InsufficientPermissions => "Insufficient permissions",
            EditError::MissingIdentifier => "Bot ID is required",
            EditError::NoRecords => "No chatbots found in database",
            EditError::RecordNotFound => "Chatbot not found",
            EditError::SaveFailed => "Failed to save instructions to database",
        };
        f.write_str(message)
    }
}

impl std::error::Error for EditError {}

impl EditError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            EditError::SecurityCheck => 403,
            EditError::InsufficientPermissions => 403,
            EditError::MissingIdentifier => 400,
            EditError::NoRecords => 404,
            EditError::RecordNotFound => 404,
            EditError::SaveFailed => 500,
        }
    }

    /// True for errors that end the request without a response envelope.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EditError::SecurityCheck)
    }
}

fn advance(bot_id: &str, state: EditState) {
    debug!(bot_id, %state, "edit submission");
}

fn fail(bot_id: &str, error: EditError) -> EditError {
    debug!(bot_id, state = %EditState::Failed, %error, "edit submission");
    error
}

/// Save `request.instructions` as the body of the record named `request.bot_id`.
///
/// The token must have been issued for this bot id and minimum role, so the
/// threshold checked here is the one the widget was rendered with.
pub fn submit_edit<S: SettingsStore>(
    request: &EditRequest,
    requester: &Requester,
    records: &RecordStore<S>,
    tokens: &dyn AntiForgery,
) -> Result<String, EditError> {
    advance(&request.bot_id, EditState::Received);

    let action = scoped_action(&request.bot_id, &request.min_role);
    if !tokens.verify(&request.nonce, &action, requester) {
        warn!(
            bot_id = %request.bot_id,
            user_id = requester.user_id().unwrap_or_default(),
            "edit rejected by security check"
        );
        return Err(fail(&request.bot_id, EditError::SecurityCheck));
    }

    advance(&request.bot_id, EditState::Authorizing);
    let min_role = sanitize_text_field(&request.min_role);
    if !can_edit(requester, &min_role) {
        return Err(fail(&request.bot_id, EditError::InsufficientPermissions));
    }

    let bot_id = sanitize_text_field(&request.bot_id);
    if bot_id.is_empty() {
        return Err(fail(&request.bot_id, EditError::MissingIdentifier));
    }
    let instructions = sanitize_textarea(&request.instructions);

    advance(&bot_id, EditState::Locating);
    let mut collection = records.fetch_collection();
    if collection.is_empty() {
        return Err(fail(&bot_id, EditError::NoRecords));
    }
    let Some(index) = position_of(&collection, &bot_id) else {
        return Err(fail(&bot_id, EditError::RecordNotFound));
    };
    collection[index].body = Some(instructions);

    advance(&bot_id, EditState::Persisting);
    if !records.persist_collection(&collection) {
        return Err(fail(&bot_id, EditError::SaveFailed));
    }

    advance(&bot_id, EditState::Succeeded);
    info!(
        bot_id = %bot_id,
        user_id = requester.user_id().unwrap_or_default(),
        "chatbot instructions saved"
    );
    Ok(SAVED_MESSAGE.to_string())
}

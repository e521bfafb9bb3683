//! Handler: save_chatbot_instructions
//!
//! Decodes an `EditRequest` and runs it through the edit submission handler
//! as the session's requester.

use serde_json::{json, Value};

use super::{Context, HandlerError};
use crate::edit::EditRequest;
use crate::nonce::SAVE_ACTION;
use crate::store::SettingsStore;

pub const COMMAND: &str = SAVE_ACTION;

pub fn guard<S: SettingsStore>(ctx: &Context<'_, S>) -> bool {
    ctx.raw_input().is_object()
}

pub fn handle<S: SettingsStore>(ctx: &Context<'_, S>) -> Result<Value, HandlerError> {
    let request = ctx.input::<EditRequest>()?;
    let message = ctx.widget().submit_edit(&request, &ctx.requester())?;
    Ok(json!(message))
}

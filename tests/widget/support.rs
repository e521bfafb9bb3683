//! Shared fixtures: a seeded settings store and a few requesters.

use chatbot_instructions::nonce::scoped_action;
use chatbot_instructions::{
    AntiForgery, EditRequest, InMemorySettingsStore, NonceKeeper, Record, Requester, SettingsStore,
    Widget,
};
use serde_json::json;

pub const KEY: &str = "mwai_chatbots";

pub fn keeper() -> NonceKeeper {
    NonceKeeper::new(b"integration-secret".to_vec(), 3_600)
}

pub fn seeded_store() -> InMemorySettingsStore {
    let store = InMemorySettingsStore::new();
    let collection = json!([
        {
            "botId": "support",
            "name": "Support Bot",
            "instructions": "Answer politely.\nEscalate <b>refunds</b>.",
            "model": "gpt-4o",
            "temperature": 0.2
        },
        {
            "botId": "sales",
            "instructions": "Upsell gently."
        },
        {
            "botId": "draft"
        },
        {
            "botId": "blank",
            "instructions": ""
        }
    ]);
    store
        .set_setting(KEY, collection.to_string())
        .expect("seed settings");
    store
}

pub fn widget() -> Widget<InMemorySettingsStore> {
    Widget::new(seeded_store(), keeper())
}

pub fn admin() -> Requester {
    Requester::user("admin-1", ["administrator"])
}

pub fn editor() -> Requester {
    Requester::user("editor-1", ["editor"])
}

pub fn author() -> Requester {
    Requester::user("author-1", ["author"])
}

/// A save request carrying a valid token for `requester`.
pub fn edit_request(
    tokens: &dyn AntiForgery,
    requester: &Requester,
    bot_id: &str,
    min_role: &str,
    instructions: &str,
) -> EditRequest {
    EditRequest {
        bot_id: bot_id.into(),
        min_role: min_role.into(),
        instructions: instructions.into(),
        nonce: tokens.issue(&scoped_action(bot_id, min_role), requester),
    }
}

pub fn body_of(widget: &Widget<InMemorySettingsStore>, bot_id: &str) -> Option<String> {
    widget
        .records()
        .fetch_collection()
        .into_iter()
        .find(|record: &Record| record.identifier.as_deref() == Some(bot_id))
        .and_then(|record| record.body)
}

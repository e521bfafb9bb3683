//! Widgets built from a loaded `WidgetConfig`.

use chatbot_instructions::nonce::scoped_action;
use chatbot_instructions::{InMemorySettingsStore, SettingsStore, ViewConfig, Widget, WidgetConfig};
use serde_json::json;

use crate::support::{admin, edit_request, seeded_store, KEY};

const CONFIG: &str = r#"
collection_key = "team_bots"
ajax_base = "/bots-api/"
nonce_secret = "shared-secret"
nonce_lifetime_secs = 7200
"#;

fn team_store() -> InMemorySettingsStore {
    let store = InMemorySettingsStore::new();
    let collection = json!([{ "botId": "triage", "instructions": "Ask for the order number." }]);
    store.set_setting("team_bots", collection.to_string()).unwrap();
    store
}

#[test]
fn configured_secret_is_shared_across_widgets() {
    let config = WidgetConfig::from_toml_str(CONFIG).unwrap();
    let store = team_store();
    let first = Widget::from_config(store.clone(), &config);
    let second = Widget::from_config(store, &config);

    let requester = admin();
    let action = scoped_action("triage", "editor");
    let token = first.tokens().issue(&action, &requester);
    assert!(second.tokens().verify(&token, &action, &requester));

    let request = edit_request(first.tokens(), &requester, "triage", "editor", "Ask politely.");
    assert!(second.submit_edit(&request, &requester).is_ok());
    assert_eq!(
        first.records().fetch_collection()[0].body.as_deref(),
        Some("Ask politely.")
    );
}

#[test]
fn empty_secret_gives_each_widget_its_own_tokens() {
    let config = WidgetConfig::default();
    let first = Widget::from_config(seeded_store(), &config);
    let second = Widget::from_config(seeded_store(), &config);

    let requester = admin();
    let action = scoped_action("support", "editor");
    let token = first.tokens().issue(&action, &requester);
    assert!(first.tokens().verify(&token, &action, &requester));
    assert!(!second.tokens().verify(&token, &action, &requester));
}

#[test]
fn collection_key_is_honoured() {
    let config = WidgetConfig::from_toml_str(CONFIG).unwrap();
    let store = team_store();
    store
        .set_setting(KEY, json!([{ "botId": "triage", "instructions": "default key" }]).to_string())
        .unwrap();
    let widget = Widget::from_config(store.clone(), &config);

    let html = widget.render(&ViewConfig::named("triage"), &admin());
    assert!(html.contains("Ask for the order number."));
    assert!(!html.contains("default key"));

    let requester = admin();
    let request = edit_request(widget.tokens(), &requester, "triage", "administrator", "Updated.");
    widget.submit_edit(&request, &requester).unwrap();
    assert!(store.get_setting("team_bots").unwrap().unwrap().contains("Updated."));
    assert!(store.get_setting(KEY).unwrap().unwrap().contains("default key"));
}

#[test]
fn ajax_base_reaches_page_settings() {
    let config = WidgetConfig::from_toml_str(CONFIG).unwrap();
    let widget = Widget::from_config(team_store(), &config);
    let html = widget.render_page(&ViewConfig::named("triage"), &admin());
    assert!(html.contains(r#"window.chatbotInstructions = {"ajaxBase":"/bots-api"};"#));
}

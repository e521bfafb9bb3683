//! Edit submissions against a seeded store.

use chatbot_instructions::{EditError, Record};
use serde_json::json;

use crate::support::{admin, author, body_of, edit_request, editor, widget};

#[test]
fn saves_and_round_trips() {
    let widget = widget();
    let requester = editor();
    let request = edit_request(widget.tokens(), &requester, "sales", "editor", "Never upsell.");

    let saved = widget.submit_edit(&request, &requester);
    assert_eq!(saved, Ok("Instructions saved successfully".to_string()));

    assert_eq!(body_of(&widget, "sales").as_deref(), Some("Never upsell."));
    assert_eq!(
        body_of(&widget, "support").as_deref(),
        Some("Answer politely.\nEscalate <b>refunds</b>.")
    );
}

#[test]
fn opaque_fields_survive_edit() {
    let widget = widget();
    let requester = admin();
    let request = edit_request(widget.tokens(), &requester, "support", "administrator", "Be terse.");
    widget.submit_edit(&request, &requester).unwrap();

    let collection = widget.records().fetch_collection();
    let support: &Record = &collection[0];
    assert_eq!(support.body.as_deref(), Some("Be terse."));
    assert_eq!(support.display_name.as_deref(), Some("Support Bot"));
    assert_eq!(support.extra["model"], json!("gpt-4o"));
    assert_eq!(support.extra["temperature"], json!(0.2));
    assert_eq!(collection.len(), 4);
}

#[test]
fn submitted_markup_is_stripped() {
    let widget = widget();
    let requester = admin();
    let request = edit_request(
        widget.tokens(),
        &requester,
        "sales",
        "administrator",
        "<script>steal()</script>Be <i>nice</i>\r\nalways",
    );
    widget.submit_edit(&request, &requester).unwrap();
    assert_eq!(body_of(&widget, "sales").as_deref(), Some("Be nice\nalways"));
}

#[test]
fn comparisons_in_plain_text_survive() {
    let widget = widget();
    let requester = admin();
    let text = "Reply in < 100 words.\nIf score < 5 and x > 3, escalate.";
    let request = edit_request(widget.tokens(), &requester, "sales", "administrator", text);
    widget.submit_edit(&request, &requester).unwrap();
    assert_eq!(body_of(&widget, "sales").as_deref(), Some(text));
}

#[test]
fn missing_record_leaves_store_unchanged() {
    let widget = widget();
    let before = widget.records().fetch_collection();
    let requester = admin();
    let request = edit_request(widget.tokens(), &requester, "bot1", "administrator", "x");

    let err = widget.submit_edit(&request, &requester).unwrap_err();
    assert_eq!(err, EditError::RecordNotFound);
    assert_eq!(err.to_string(), "Chatbot not found");
    assert_eq!(widget.records().fetch_collection(), before);
}

#[test]
fn permission_is_rechecked_on_submit() {
    let widget = widget();
    let requester = author();
    let request = edit_request(widget.tokens(), &requester, "sales", "editor", "x");

    assert_eq!(
        widget.submit_edit(&request, &requester),
        Err(EditError::InsufficientPermissions)
    );
    assert_eq!(body_of(&widget, "sales").as_deref(), Some("Upsell gently."));
}

#[test]
fn token_from_another_user_is_rejected() {
    let widget = widget();
    let request = edit_request(widget.tokens(), &admin(), "sales", "editor", "x");

    let err = widget.submit_edit(&request, &editor()).unwrap_err();
    assert_eq!(err, EditError::SecurityCheck);
    assert!(err.is_fatal());
}

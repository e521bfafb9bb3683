//! Direct command dispatch through the microsvc service.

use chatbot_instructions::microsvc::{HandlerError, Service, Session};
use chatbot_instructions::EditError;
use serde_json::json;

use crate::support::{admin, body_of, edit_request, widget};

#[test]
fn save_command_round_trip() {
    let service = Service::new(widget());
    let request = edit_request(
        service.widget().tokens(),
        &admin(),
        "sales",
        "administrator",
        "Quote list prices.",
    );

    let result = service
        .dispatch(
            "save_chatbot_instructions",
            serde_json::to_value(&request).unwrap(),
            Session::for_user("admin-1", &["administrator"]),
        )
        .unwrap();
    assert_eq!(result, json!("Instructions saved successfully"));
    assert_eq!(body_of(service.widget(), "sales").as_deref(), Some("Quote list prices."));
}

#[test]
fn unknown_command() {
    let service = Service::new(widget());
    let err = service
        .dispatch("delete_everything", json!({}), Session::new())
        .unwrap_err();
    assert!(matches!(err, HandlerError::UnknownCommand(_)));
    assert_eq!(err.status_code(), 404);
}

#[test]
fn non_object_input_is_guard_rejected() {
    let service = Service::new(widget());
    let err = service
        .dispatch("save_chatbot_instructions", json!(["nope"]), Session::new())
        .unwrap_err();
    assert!(matches!(err, HandlerError::GuardRejected(_)));
}

#[test]
fn missing_nonce_is_security_failure() {
    let service = Service::new(widget());
    let err = service
        .dispatch(
            "save_chatbot_instructions",
            json!({ "bot_id": "sales", "instructions": "x" }),
            Session::for_user("admin-1", &["administrator"]),
        )
        .unwrap_err();
    assert!(matches!(err, HandlerError::Edit(EditError::SecurityCheck)));
    assert!(err.is_fatal());
}

#[test]
fn mistyped_field_is_decode_failure() {
    let service = Service::new(widget());
    let err = service
        .dispatch(
            "save_chatbot_instructions",
            json!({ "bot_id": 7 }),
            Session::new(),
        )
        .unwrap_err();
    assert!(matches!(err, HandlerError::DecodeFailed(_)));
    assert_eq!(err.status_code(), 400);
}

#[test]
fn widget_answers_only_the_save_command() {
    let service = Service::new(widget());
    assert_eq!(service.commands(), vec!["save_chatbot_instructions"]);
}

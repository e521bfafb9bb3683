//! Directive expansion inside page content.

use crate::support::{admin, author, widget};

#[test]
fn expands_widget_directives() {
    let widget = widget();
    let content = r#"<p>Intro</p>[chatbot_instructions name="support" title_text="Rules"]<p>Outro</p>"#;
    let html = widget.expand(content, &author());

    assert!(html.starts_with("<p>Intro</p><div class=\"chatbot-instructions-container\">"));
    assert!(html.contains(">Support Bot Rules</h3>"));
    assert!(html.ends_with("</div><p>Outro</p>"));
}

#[test]
fn several_directives_render_independently() {
    let widget = widget();
    let content = "[chatbot_instructions name=support][chatbot_instructions name='ghost']";
    let html = widget.expand(content, &author());
    assert!(html.contains("Answer politely."));
    assert!(html.contains("botId &quot;ghost&quot; not found"));
}

#[test]
fn editable_directive_honours_rank() {
    let widget = widget();
    let content = r#"[chatbot_instructions name="sales" editable="1" min_role="editor"]"#;
    assert!(!widget.expand(content, &author()).contains("editable-instructions"));
    assert!(widget.expand(content, &admin()).contains("editable-instructions"));
}

#[test]
fn inventory_directive_is_admin_only() {
    let widget = widget();
    let content = "before [debug_mwai_chatbots] after";
    assert_eq!(widget.expand(content, &author()), "before  after");
    assert!(widget.expand(content, &admin()).contains("<strong>botId:</strong> draft"));
}

#[test]
fn other_brackets_are_untouched() {
    let widget = widget();
    let content = "[gallery ids=\"1,2\"] [chatbot_instructionsX] [ note ]";
    assert_eq!(widget.expand(content, &admin()), content);
}

//! Page assets: the widget stylesheet and the client-side edit controller.
//!
//! The controller is plain JavaScript with no dependencies. It finds widget
//! instances only through their render-instance id, so any number of widgets
//! can share a page.

use serde_json::json;

use super::escape::escape_html;

/// Widget stylesheet.
pub const STYLESHEET: &str = include_str!("assets/widget.css");

/// Client-side edit controller.
pub const CONTROLLER_SCRIPT: &str = include_str!("assets/controller.js");

/// Markup for the page `<head>`: stylesheet, controller settings, controller.
///
/// `ajax_base` is the URL prefix the save command is posted under.
pub fn head_assets(ajax_base: &str) -> String {
    let settings = json!({ "ajaxBase": ajax_base.trim_end_matches('/') }).to_string();
    format!(
        "<style>\n{}</style>\n<script>window.chatbotInstructions = {};</script>\n<script>\n{}</script>\n",
        STYLESHEET,
        script_safe(&settings),
        CONTROLLER_SCRIPT
    )
}

/// A complete HTML document wrapping `body` with the widget assets.
pub fn page(title: &str, body: &str, ajax_base: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n{}</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        head_assets(ajax_base),
        body
    )
}

/// JSON is inlined in a `<script>` element; `</` would end it early.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

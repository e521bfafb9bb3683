//! Render - server-side markup for the instructions widget.
//!
//! `render` turns a `ViewConfig` plus the requester into an HTML fragment.
//! It never fails: bad identifiers and missing records become inline
//! `chatbot-error` fragments, and a requester who may not edit simply gets
//! the read-only view.
//!
//! ## Example
//!
//! ```ignore
//! use chatbot_instructions::render::{render, ViewConfig};
//!
//! let config = ViewConfig::from_attributes([("name", "support_bot"), ("editable", "1")]);
//! let html = render(&config, &requester, &records, &nonces);
//! ```

pub mod assets;
pub mod escape;
mod inventory;
pub mod shortcode;

use rand::Rng;
use tracing::debug;

use crate::access::{can_edit, Rank, Requester};
use crate::nonce::{scoped_action, AntiForgery};
use crate::record::{find_by_identifier, is_valid_identifier};
use crate::store::{RecordStore, SettingsStore};
use escape::{escape_attr, escape_html, sanitize_rich};

pub use inventory::render_inventory;

/// Display options for one widget instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    /// Identifier (`botId`) of the record to show. Required.
    pub name: String,
    pub container_class: String,
    pub title_class: String,
    pub content_class: String,
    pub show_title: bool,
    pub title_text: String,
    /// Read-only view shows the body as escaped preformatted text.
    pub escape_html: bool,
    /// Editing requested; still subject to the permission check.
    pub editable: bool,
    /// Minimum role name required to edit.
    pub min_role: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            container_class: "chatbot-instructions-container".into(),
            title_class: "chatbot-instructions-title".into(),
            content_class: "chatbot-instructions-content".into(),
            show_title: true,
            title_text: "Chatbot Instructions".into(),
            escape_html: true,
            editable: false,
            min_role: Rank::Administrator.as_str().into(),
        }
    }
}

impl ViewConfig {
    /// Config for the record named `name`, everything else defaulted.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build from directive or query attributes. Unknown keys are ignored.
    ///
    /// `show_title` and `escape_html` are on only for the string `"true"`;
    /// `editable` is on only for `"1"`.
    pub fn from_attributes<I, K, V>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::default();
        for (key, value) in attributes {
            let value: String = value.into();
            match key.as_ref() {
                "name" => config.name = value,
                "container_class" => config.container_class = value,
                "title_class" => config.title_class = value,
                "content_class" => config.content_class = value,
                "show_title" => config.show_title = value == "true",
                "title_text" => config.title_text = value,
                "escape_html" => config.escape_html = value == "true",
                "editable" => config.editable = value == "1",
                "min_role" => config.min_role = value,
                _ => {}
            }
        }
        config
    }
}

/// Inline error fragment.
pub fn error_fragment(message: &str) -> String {
    format!("<div class=\"chatbot-error\">Error: {}</div>", message)
}

/// Render the widget for `config` as seen by `requester`.
pub fn render<S: SettingsStore>(
    config: &ViewConfig,
    requester: &Requester,
    records: &RecordStore<S>,
    tokens: &dyn AntiForgery,
) -> String {
    if !is_valid_identifier(&config.name) {
        return error_fragment(
            "Please specify a valid chatbot name using the &quot;name&quot; attribute.",
        );
    }

    let collection = records.fetch_collection();
    if collection.is_empty() {
        return error_fragment("No AI Engine chatbots found in the database.");
    }

    let Some(record) = find_by_identifier(&collection, &config.name) else {
        return error_fragment(&format!(
            "Chatbot with botId &quot;{}&quot; not found in AI Engine chatbots.",
            escape_html(&config.name)
        ));
    };

    let body = record.body.as_deref().unwrap_or_default();
    if body.is_empty() {
        return error_fragment(&format!(
            "No instructions found for chatbot with botId &quot;{}&quot;.",
            escape_html(&config.name)
        ));
    }

    let editable = config.editable && can_edit(requester, &config.min_role);
    debug!(
        bot_id = %config.name,
        requested = config.editable,
        editable,
        "rendering chatbot instructions"
    );

    let title = match record.display_name.as_deref() {
        Some(name) if !name.is_empty() => format!("{} {}", name, config.title_text),
        _ => config.title_text.clone(),
    };

    let mut out = format!("<div class=\"{}\">", escape_attr(&config.container_class));
    if editable {
        let token = tokens.issue(&scoped_action(&config.name, &config.min_role), requester);
        push_editable(&mut out, config, &title, body, &instance_id(&config.name), &token);
    } else {
        push_read_only(&mut out, config, &title, body);
    }
    out.push_str("</div>");
    out
}

/// Render-instance id: lowercased identifier plus a random suffix so several
/// widgets for the same record can share a page.
pub fn instance_id(name: &str) -> String {
    let suffix: u32 = rand::thread_rng().gen();
    format!("chatbot-instructions-{}-{:08x}", name.to_ascii_lowercase(), suffix)
}

fn push_editable(
    out: &mut String,
    config: &ViewConfig,
    title: &str,
    body: &str,
    uid: &str,
    token: &str,
) {
    let uid = escape_attr(uid);
    let modify_link = format!(
        "<a href=\"#\" class=\"modify-instructions-link\" data-target=\"{}\">Modify these instructions</a>",
        uid
    );

    if config.show_title {
        out.push_str("<div class=\"title-with-modify\">");
        out.push_str(&format!(
            "<h3 class=\"{}\">{}</h3>",
            escape_attr(&config.title_class),
            escape_html(title)
        ));
        out.push_str(&modify_link);
        out.push_str("</div>");
    } else {
        out.push_str("<div class=\"modify-link-container\">");
        out.push_str(&modify_link);
        out.push_str("</div>");
    }

    out.push_str(&format!(
        "<div id=\"{uid}\" class=\"{} editable-instructions\" contenteditable=\"false\" data-bot-id=\"{}\" data-min-role=\"{}\" data-nonce=\"{}\" data-original=\"{}\">",
        escape_attr(&config.content_class),
        escape_attr(&config.name),
        escape_attr(&config.min_role),
        escape_attr(token),
        escape_attr(body),
    ));
    out.push_str(&sanitize_rich(body));
    out.push_str("</div>");

    out.push_str(&format!(
        "<div class=\"instructions-controls\" id=\"controls-{uid}\" style=\"display: none;\">"
    ));
    out.push_str(&format!(
        "<button type=\"button\" class=\"save-instructions-btn\" data-target=\"{uid}\">Save Changes</button>"
    ));
    out.push_str(&format!(
        "<button type=\"button\" class=\"cancel-instructions-btn\" data-target=\"{uid}\">Cancel</button>"
    ));
    out.push_str(&format!(
        "<div class=\"instructions-status\" id=\"status-{uid}\"></div>"
    ));
    out.push_str("</div>");
}

fn push_read_only(out: &mut String, config: &ViewConfig, title: &str, body: &str) {
    if config.show_title {
        out.push_str(&format!(
            "<h3 class=\"{}\">{}</h3>",
            escape_attr(&config.title_class),
            escape_html(title)
        ));
    }

    out.push_str(&format!("<div class=\"{}\">", escape_attr(&config.content_class)));
    if config.escape_html {
        out.push_str("<pre>");
        out.push_str(&escape_html(body));
        out.push_str("</pre>");
    } else {
        out.push_str(&sanitize_rich(body));
    }
    out.push_str("</div>");
}

//! Shortcode expansion: embed widgets in page content with directives like
//! `[chatbot_instructions name="support_bot" editable="1" min_role="editor"]`.
//!
//! `[debug_mwai_chatbots]` expands to the administrator inventory. Any other
//! bracketed text is left as-is.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::access::Requester;
use crate::nonce::AntiForgery;
use crate::store::{RecordStore, SettingsStore};

use super::{render, render_inventory, ViewConfig};

/// Directive that renders one widget.
pub const INSTRUCTIONS_TAG: &str = "chatbot_instructions";
/// Directive that renders the administrator inventory.
pub const INVENTORY_TAG: &str = "debug_mwai_chatbots";

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\[({}|{})(\s[^\]]*)?\]",
        INSTRUCTIONS_TAG, INVENTORY_TAG
    ))
    .expect("invalid directive pattern")
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_][A-Za-z0-9_-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"']+))"#)
        .expect("invalid attribute pattern")
});

/// Parse `key="value"` pairs. Later duplicates win.
pub fn parse_attributes(raw: &str) -> Vec<(String, String)> {
    ATTRIBUTE
        .captures_iter(raw)
        .map(|caps| {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str())
                .unwrap_or_default();
            (caps[1].to_ascii_lowercase(), value.to_string())
        })
        .collect()
}

/// Replace every known directive in `content` with its rendered markup.
pub fn expand_shortcodes<S: SettingsStore>(
    content: &str,
    requester: &Requester,
    records: &RecordStore<S>,
    tokens: &dyn AntiForgery,
) -> String {
    DIRECTIVE
        .replace_all(content, |caps: &Captures| {
            let raw = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            if &caps[1] == INVENTORY_TAG {
                return render_inventory(requester, records);
            }
            let config = ViewConfig::from_attributes(parse_attributes(raw));
            render(&config, requester, records, tokens)
        })
        .into_owned()
}

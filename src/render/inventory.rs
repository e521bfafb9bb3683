//! Diagnostic listing of every stored record, for administrators only.

use crate::access::{Rank, Requester};
use crate::store::{RecordStore, SettingsStore};

use super::escape::escape_html;

/// List every record's identifier, name, and whether it has instructions,
/// followed by the full collection as pretty JSON.
///
/// Anyone below `administrator` gets an empty string, not an error.
pub fn render_inventory<S: SettingsStore>(requester: &Requester, records: &RecordStore<S>) -> String {
    if requester.highest_rank() != Some(Rank::Administrator) {
        return String::new();
    }

    let collection = records.fetch_collection();
    let mut out = String::from("<div class=\"chatbot-inventory\">");
    out.push_str("<h4>Stored chatbots</h4>");

    if collection.is_empty() {
        out.push_str("<p>No chatbots found in database.</p>");
        out.push_str("</div>");
        return out;
    }

    out.push_str("<p><strong>Available chatbot botIds:</strong></p><ul>");
    for record in &collection {
        out.push_str(&format!(
            "<li><strong>botId:</strong> {} | <strong>Name:</strong> {} | <strong>Has Instructions:</strong> {}</li>",
            escape_html(record.identifier.as_deref().unwrap_or("No botId")),
            escape_html(record.display_name.as_deref().unwrap_or("No name")),
            if record.body.is_some() { "Yes" } else { "No" },
        ));
    }
    out.push_str("</ul>");

    let dump = serde_json::to_string_pretty(&collection).unwrap_or_default();
    out.push_str("<details><summary>Full data structure</summary><pre>");
    out.push_str(&escape_html(&dump));
    out.push_str("</pre></details></div>");
    out
}

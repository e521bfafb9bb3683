//! Text safety for the three contexts the widget writes into: HTML text
//! nodes, HTML attribute values, and sanitized rich text. Plus the
//! plain-text sanitizers applied to submitted edits.

use std::sync::LazyLock;

use regex::Regex;

static SCRIPT_OR_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(?:script|style)\b[^>]*>.*?</(?:script|style)\s*>")
        .expect("invalid script/style pattern")
});

// A tag opens with `<` and a name, `/`, `!` or `?`. A bare `<` is text.
static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<[A-Za-z/!?][^>]*>?").expect("invalid tag pattern")
});

static HORIZONTAL_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("invalid whitespace pattern"));

/// Escape for an HTML text node.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape for a double-quoted HTML attribute value.
///
/// Newlines are encoded too so multi-line values survive a round trip
/// through `data-*` attributes unchanged.
pub fn escape_attr(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(c),
        }
    }
    out
}

/// Allow-list sanitize rich text. Scripts, event handlers, and unsafe URL
/// schemes are always removed; common formatting markup is kept.
pub fn sanitize_rich(input: &str) -> String {
    ammonia::clean(input)
}

/// Remove every tag. `<script>` and `<style>` lose their contents as well.
pub fn strip_all_tags(input: &str) -> String {
    let without_blocks = SCRIPT_OR_STYLE.replace_all(input, "");
    TAG.replace_all(&without_blocks, "").into_owned()
}

/// Sanitize multi-line plain text: strip markup, drop control characters
/// other than newline and tab, normalize line endings, trim.
pub fn sanitize_textarea(input: &str) -> String {
    let normalized = input.replace("\r\n", "\n").replace('\r', "\n");
    let stripped = strip_all_tags(&normalized);
    let cleaned: String = stripped
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();
    cleaned.trim().to_string()
}

/// Sanitize a single-line text field: like [`sanitize_textarea`] but line
/// breaks and tabs collapse to single spaces.
pub fn sanitize_text_field(input: &str) -> String {
    let stripped = strip_all_tags(input);
    let flattened: String = stripped
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    HORIZONTAL_SPACE
        .replace_all(flattened.trim(), " ")
        .into_owned()
}

//! Widget - bundles the record store, the anti-forgery capability, and the
//! save endpoint location, and exposes the render and edit operations.
//!
//! ## Example
//!
//! ```ignore
//! use chatbot_instructions::{InMemorySettingsStore, NonceKeeper, Widget};
//!
//! let widget = Widget::new(InMemorySettingsStore::new(), NonceKeeper::random(86_400));
//! let html = widget.render(&ViewConfig::named("support_bot"), &requester);
//! let saved = widget.submit_edit(&request, &requester)?;
//! ```

use crate::access::Requester;
use crate::config::WidgetConfig;
use crate::edit::{submit_edit, EditError, EditRequest};
use crate::nonce::{AntiForgery, NonceKeeper};
use crate::render::assets::page;
use crate::render::shortcode::expand_shortcodes;
use crate::render::{render, render_inventory, ViewConfig};
use crate::store::{RecordStore, SettingsStore, DEFAULT_COLLECTION_KEY};

/// The instructions widget.
pub struct Widget<S> {
    records: RecordStore<S>,
    tokens: Box<dyn AntiForgery>,
    ajax_base: String,
}

impl<S: SettingsStore> Widget<S> {
    /// Widget over `settings` using the default collection key and an empty
    /// ajax base (save posts to `/save_chatbot_instructions`).
    pub fn new(settings: S, tokens: impl AntiForgery + 'static) -> Self {
        Self {
            records: RecordStore::new(settings, DEFAULT_COLLECTION_KEY),
            tokens: Box::new(tokens),
            ajax_base: String::new(),
        }
    }

    /// Widget configured from `config`.
    pub fn from_config(settings: S, config: &WidgetConfig) -> Self {
        let tokens = if config.nonce_secret.is_empty() {
            NonceKeeper::random(config.nonce_lifetime_secs)
        } else {
            NonceKeeper::new(config.nonce_secret.as_bytes().to_vec(), config.nonce_lifetime_secs)
        };
        Self {
            records: RecordStore::new(settings, config.collection_key.clone()),
            tokens: Box::new(tokens),
            ajax_base: config.ajax_base.clone(),
        }
    }

    /// Builder-style ajax base URL prefix.
    pub fn with_ajax_base(mut self, ajax_base: impl Into<String>) -> Self {
        self.ajax_base = ajax_base.into();
        self
    }

    /// The record accessor.
    pub fn records(&self) -> &RecordStore<S> {
        &self.records
    }

    /// The anti-forgery capability.
    pub fn tokens(&self) -> &dyn AntiForgery {
        self.tokens.as_ref()
    }

    /// Render one widget fragment.
    pub fn render(&self, config: &ViewConfig, requester: &Requester) -> String {
        render(config, requester, &self.records, self.tokens())
    }

    /// Render one widget inside a full page carrying the stylesheet and controller.
    pub fn render_page(&self, config: &ViewConfig, requester: &Requester) -> String {
        let fragment = self.render(config, requester);
        page(&config.title_text, &fragment, &self.ajax_base)
    }

    /// Expand widget directives inside page content.
    pub fn expand(&self, content: &str, requester: &Requester) -> String {
        expand_shortcodes(content, requester, &self.records, self.tokens())
    }

    /// Administrator inventory of every stored record.
    pub fn inventory(&self, requester: &Requester) -> String {
        render_inventory(requester, &self.records)
    }

    /// Handle one save submission.
    pub fn submit_edit(&self, request: &EditRequest, requester: &Requester) -> Result<String, EditError> {
        submit_edit(request, requester, &self.records, self.tokens())
    }
}

//! Service: the widget's command table.
//!
//! Commands arrive by name (the action the client controller posts to) with
//! a JSON payload and the caller's session. Each entry pairs a payload shape
//! check with a handler that runs against the widget.
//!
//! ## Example
//!
//! ```ignore
//! use chatbot_instructions::microsvc::{Service, Session};
//!
//! let service = Service::new(widget);
//! let saved = service.dispatch("save_chatbot_instructions", payload, Session::for_user("u1", &["editor"]));
//! ```

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use super::context::Context;
use super::error::HandlerError;
use super::save_instructions;
use super::session::Session;
use crate::store::SettingsStore;
use crate::widget::Widget;

type Guard<S> = fn(&Context<'_, S>) -> bool;
type Handle<S> = fn(&Context<'_, S>) -> Result<Value, HandlerError>;

struct Command<S> {
    guard: Guard<S>,
    handle: Handle<S>,
}

/// The widget plus every command it answers.
pub struct Service<S> {
    widget: Widget<S>,
    commands: BTreeMap<&'static str, Command<S>>,
}

impl<S: SettingsStore> Service<S> {
    /// Serve `widget` with the save command registered.
    pub fn new(widget: Widget<S>) -> Self {
        let mut commands = BTreeMap::new();
        commands.insert(
            save_instructions::COMMAND,
            Command {
                guard: save_instructions::guard::<S>,
                handle: save_instructions::handle::<S>,
            },
        );
        Self { widget, commands }
    }

    /// Run `command` with `input` as the requester described by `session`.
    ///
    /// Unknown names fail with `UnknownCommand`; a payload failing the shape
    /// check fails with `GuardRejected` before the handler runs.
    pub fn dispatch(
        &self,
        command: &str,
        input: Value,
        session: Session,
    ) -> Result<Value, HandlerError> {
        let entry = self
            .commands
            .get(command)
            .ok_or_else(|| HandlerError::UnknownCommand(command.to_string()))?;

        let ctx = Context::new(input, session, &self.widget);
        if !(entry.guard)(&ctx) {
            debug!(command, "payload rejected before handling");
            return Err(HandlerError::GuardRejected(command.to_string()));
        }
        (entry.handle)(&ctx)
    }

    /// Registered command names, sorted.
    pub fn commands(&self) -> Vec<&'static str> {
        self.commands.keys().copied().collect()
    }

    /// The widget commands run against.
    pub fn widget(&self) -> &Widget<S> {
        &self.widget
    }
}

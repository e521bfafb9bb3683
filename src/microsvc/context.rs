//! What a command handler sees: the payload, who sent it, and the widget.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::HandlerError;
use super::session::Session;
use crate::access::Requester;
use crate::widget::Widget;

pub struct Context<'a, S> {
    input: Value,
    session: Session,
    widget: &'a Widget<S>,
}

impl<'a, S> Context<'a, S> {
    pub(crate) fn new(input: Value, session: Session, widget: &'a Widget<S>) -> Self {
        Self {
            input,
            session,
            widget,
        }
    }

    /// Decode the payload into a typed request.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        serde_json::from_value(self.input.clone()).map_err(HandlerError::from)
    }

    pub fn raw_input(&self) -> &Value {
        &self.input
    }

    /// The requester described by the session headers.
    pub fn requester(&self) -> Requester {
        self.session.requester()
    }

    pub fn widget(&self) -> &'a Widget<S> {
        self.widget
    }
}

//! Session variables from the request context.

use std::collections::HashMap;

use crate::access::Requester;

/// Header carrying the authenticated user id, set by the upstream authenticator.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the user's comma-separated role names.
pub const ROLES_HEADER: &str = "x-user-roles";

/// Parsed session variables from the incoming request.
///
/// The widget sits behind an authenticating proxy that forwards identity as
/// headers:
///
/// ```text
/// x-user-id: user-42
/// x-user-roles: author,editor
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    variables: HashMap<String, String>,
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session from a map of variables.
    pub fn from_map(variables: HashMap<String, String>) -> Self {
        Self { variables }
    }

    /// Session for an authenticated user with `roles`.
    pub fn for_user(user_id: &str, roles: &[&str]) -> Self {
        let mut session = Self::new();
        session.set(USER_ID_HEADER, user_id);
        session.set(ROLES_HEADER, roles.join(","));
        session
    }

    /// Get the user ID (`x-user-id`).
    pub fn user_id(&self) -> Option<&str> {
        self.get(USER_ID_HEADER)
    }

    /// Get the raw role list (`x-user-roles`).
    pub fn roles(&self) -> Option<&str> {
        self.get(ROLES_HEADER)
    }

    /// The requester these variables describe.
    pub fn requester(&self) -> Requester {
        Requester::from_parts(self.user_id(), self.roles())
    }

    /// Get a session variable by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|v| v.as_str())
    }

    /// Set a session variable.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }
}

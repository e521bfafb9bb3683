//! Access - role ranks and the edit permission check.
//!
//! Roles are ranked `subscriber < contributor < author < editor <
//! administrator`. A requester ranks as the highest role they hold; roles
//! outside the ladder are ignored. The check is pure, so it is run once
//! when deciding how to render and again on every submission.

use std::fmt;

/// Role rank, ordered lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Subscriber = 1,
    Contributor = 2,
    Author = 3,
    Editor = 4,
    Administrator = 5,
}

impl Rank {
    /// Every rank, lowest first.
    pub const ALL: [Rank; 5] = [
        Rank::Subscriber,
        Rank::Contributor,
        Rank::Author,
        Rank::Editor,
        Rank::Administrator,
    ];

    /// Look up a rank by its role name. Exact, lowercase match.
    pub fn from_name(name: &str) -> Option<Rank> {
        Rank::ALL.into_iter().find(|rank| rank.as_str() == name)
    }

    /// The role name for this rank.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Subscriber => "subscriber",
            Rank::Contributor => "contributor",
            Rank::Author => "author",
            Rank::Editor => "editor",
            Rank::Administrator => "administrator",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who is asking: an optional authenticated user and the roles they hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requester {
    user_id: Option<String>,
    roles: Vec<String>,
}

impl Requester {
    /// An unauthenticated visitor.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// An authenticated user holding `roles`.
    pub fn user<I, R>(user_id: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Self {
            user_id: Some(user_id.into()),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// Build from raw identity data. Empty user ids count as anonymous.
    pub fn from_parts(user_id: Option<&str>, roles: Option<&str>) -> Self {
        let user_id = user_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        let roles = roles
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|role| !role.is_empty())
            .map(str::to_string)
            .collect();
        Self { user_id, roles }
    }

    /// Authenticated iff a user id is present.
    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// The authenticated user id, if any.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Role names as supplied by the identity source.
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Highest rank among held roles. None for anonymous requesters or when
    /// no held role is on the ladder.
    pub fn highest_rank(&self) -> Option<Rank> {
        if !self.is_authenticated() {
            return None;
        }
        self.roles.iter().filter_map(|role| Rank::from_name(role)).max()
    }
}

/// Can `requester` edit when the minimum role is `min_role`?
///
/// Fails closed: anonymous requesters and unknown `min_role` names never pass.
pub fn can_edit(requester: &Requester, min_role: &str) -> bool {
    let Some(minimum) = Rank::from_name(min_role) else {
        return false;
    };
    requester
        .highest_rank()
        .is_some_and(|held| held >= minimum)
}

//! Authorization guard for pet and profile operations.
//!
//! Every operation receives the [`Caller`] resolved once per request by the
//! inbound adapter. The guard is the only place that turns a caller into an
//! admitted identity; services must consult it on every call, whatever the
//! client UI chose to show.

use tracing::debug;

use super::{Error, Pet, UserId};

/// Who is making a request: a verified identity, or nobody.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Caller(Option<UserId>);

impl Caller {
    /// A caller without a verified session.
    pub fn anonymous() -> Self {
        Self(None)
    }

    /// A caller whose session resolved to `user_id`.
    pub fn authenticated(user_id: UserId) -> Self {
        Self(Some(user_id))
    }

    /// The verified identity, if any.
    pub fn identity(&self) -> Option<&UserId> {
        self.0.as_ref()
    }
}

impl From<Option<UserId>> for Caller {
    fn from(value: Option<UserId>) -> Self {
        Self(value)
    }
}

/// Why the guard refused a caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    #[error("login required")]
    Unauthenticated,
    #[error("only the owner may modify this pet")]
    Forbidden,
}

impl From<AccessDenied> for Error {
    fn from(value: AccessDenied) -> Self {
        match value {
            AccessDenied::Unauthenticated => Error::unauthorized(value.to_string()),
            AccessDenied::Forbidden => Error::forbidden(value.to_string()),
        }
    }
}

/// Admit any verified identity. Used for reads, creation and
/// self-service profile operations.
///
/// # Examples
/// ```
/// use pet_registry::domain::{AccessDenied, Caller, UserId, authorization::require_identity};
///
/// assert_eq!(require_identity(&Caller::anonymous()), Err(AccessDenied::Unauthenticated));
/// let id = UserId::random();
/// assert_eq!(require_identity(&Caller::authenticated(id.clone())), Ok(&id));
/// ```
pub fn require_identity(caller: &Caller) -> Result<&UserId, AccessDenied> {
    caller.identity().ok_or(AccessDenied::Unauthenticated)
}

/// Admit a mutation of `target` only when the caller owns it.
pub fn authorize_mutation<'a>(caller: &'a Caller, target: &Pet) -> Result<&'a UserId, AccessDenied> {
    let identity = require_identity(caller)?;
    if target.is_owned_by(identity) {
        Ok(identity)
    } else {
        debug!(pet_id = %target.id, caller = %identity, "mutation refused for non-owner");
        Err(AccessDenied::Forbidden)
    }
}

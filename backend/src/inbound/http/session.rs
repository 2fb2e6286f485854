//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The encrypted session cookie carries only the user id. Handlers turn it
//! into a [`Caller`] once and hand that to the domain.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Caller, Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    ///
    /// The session id is rotated first so a pre-login cookie cannot be
    /// replayed as the new identity.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id from the session, if present.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let id = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match id {
            Some(raw) => match UserId::new(raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    warn!(%error, "invalid user id in session cookie");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// The identity behind this request, anonymous when no valid id is
    /// stored.
    pub fn caller(&self) -> Result<Caller, Error> {
        self.user_id().map(Caller::from)
    }

    /// Drop the session entirely; the response clears the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

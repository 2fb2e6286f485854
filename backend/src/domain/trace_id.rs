//! Request-scoped trace identifier.
//!
//! The `Trace` middleware puts a fresh identifier in task-local storage for
//! every request; errors built while handling the request pick it up through
//! [`TraceId::current`]. Task-locals do not follow spawned tasks, so wrap
//! spawned work in [`TraceId::scope`].

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Response header carrying the trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static TRACE_ID: TraceId;
}

/// Per-request correlation identifier.
///
/// # Examples
/// ```
/// use pet_registry::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
///     .parse()
///     .expect("valid UUID");
/// let observed = TraceId::scope(trace_id, async move { TraceId::current() }).await;
/// assert_eq!(observed, Some(trace_id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    #[must_use]
    #[rustfmt::skip]
    pub(crate) fn generate() -> Self { Self(Uuid::new_v4()) }

    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The identifier of the request being served, if any.
    #[must_use]
    #[rustfmt::skip]
    pub fn current() -> Option<Self> { TRACE_ID.try_with(|id| *id).ok() }

    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Run `fut` with `trace_id` as the current identifier.
    pub async fn scope<Fut>(trace_id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn scope_sets_current_identifier() {
        let expected = TraceId::generate();
        let observed = TraceId::scope(expected, async move { TraceId::current() }).await;
        assert_eq!(observed, Some(expected));
    }

    #[tokio::test]
    async fn no_identifier_outside_a_scope() {
        assert!(TraceId::current().is_none());
    }

    #[test]
    fn parses_hyphenated_uuid() {
        let uuid = Uuid::new_v4();
        let trace_id: TraceId = uuid.to_string().parse().expect("parse uuid");
        assert_eq!(trace_id.as_uuid(), &uuid);
    }

    #[test]
    fn rejects_non_uuid_text() {
        assert!("not-a-trace".parse::<TraceId>().is_err());
    }
}

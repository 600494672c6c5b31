//! Abstract paginated-query capability over the remote log service.
//!
//! Each method fetches exactly one page and hands back an opaque
//! continuation token, which keeps the poll loop's per-page throttling
//! retry visible and testable. The tailing core only ever talks to this
//! trait; the AWS wiring lives in [`crate::client`].

use async_trait::async_trait;

use cwtail_core::{StreamDescriptor, TailError};
use cwtail_core::types::LogRecord;

/// One page of log group names.
#[derive(Debug, Clone, Default)]
pub struct GroupPage {
    pub groups: Vec<String>,
    pub next_token: Option<String>,
}

/// One page of stream descriptors.
#[derive(Debug, Clone, Default)]
pub struct StreamPage {
    pub streams: Vec<StreamDescriptor>,
    pub next_token: Option<String>,
}

/// One page of filtered log events.
#[derive(Debug, Clone, Default)]
pub struct EventPage {
    pub events: Vec<LogRecord>,
    pub next_token: Option<String>,
}

/// Parameters of one filter query, frozen for the duration of a poll
/// cycle (pagination within the cycle reuses the same window).
#[derive(Debug, Clone)]
pub struct FilterRequest {
    pub group: String,
    /// Scoped stream names; empty means every stream in the group.
    /// The directory caps this at 100, the service's per-query limit.
    pub stream_names: Vec<String>,
    pub start_time_ms: i64,
    pub end_time_ms: Option<i64>,
    /// Server-side include pattern.
    pub filter_pattern: Option<String>,
}

/// Paginated access to the remote log service.
#[async_trait]
pub trait LogsBackend: Send + Sync {
    /// List log groups, one page per call.
    async fn describe_log_groups(
        &self,
        next_token: Option<String>,
    ) -> Result<GroupPage, TailError>;

    /// List log streams in a group, optionally narrowed by a name
    /// prefix, one page per call. Fails with [`TailError::NotFound`]
    /// when the group does not exist.
    async fn describe_log_streams(
        &self,
        group: &str,
        prefix: Option<&str>,
        next_token: Option<String>,
    ) -> Result<StreamPage, TailError>;

    /// Fetch one page of events matching the request. Fails with
    /// [`TailError::Throttled`] when the account request rate is
    /// exceeded.
    async fn filter_log_events(
        &self,
        request: &FilterRequest,
        next_token: Option<String>,
    ) -> Result<EventPage, TailError>;
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Target configuration ───────────────────────────────────────────

/// One requested (group, stream-prefix) tailing unit.
///
/// Built once by the CLI layer from validated input and never mutated;
/// its lifetime is the lifetime of the target's poll loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailTarget {
    /// Log group name.
    pub group: String,
    /// Stream-name prefix. `None` means all streams in the group.
    pub prefix: Option<String>,
    /// Keep polling after the requested window is exhausted.
    pub follow: bool,
    /// Keep re-probing a missing group at start-up instead of failing.
    pub retry: bool,
    /// Window start (also the initial watermark).
    pub start_time: DateTime<Utc>,
    /// Window end; `None` leaves the window open.
    pub end_time: Option<DateTime<Utc>>,
    /// Server-side include pattern, passed through to the filter call.
    pub include_pattern: Option<String>,
    /// Client-side exclude pattern, a regular expression tested against
    /// the raw message.
    pub exclude_pattern: Option<String>,
}

impl TailTarget {
    /// Window start in epoch milliseconds.
    pub fn start_time_ms(&self) -> i64 {
        self.start_time.timestamp_millis()
    }

    /// Window end in epoch milliseconds, if bounded.
    pub fn end_time_ms(&self) -> Option<i64> {
        self.end_time.map(|t| t.timestamp_millis())
    }
}

// ─── Records ────────────────────────────────────────────────────────

/// One log event returned by the remote filter API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Service-assigned unique event id, the dedup key.
    pub id: String,
    /// Event timestamp in epoch milliseconds.
    pub timestamp: i64,
    /// Raw message text.
    pub message: String,
    /// Name of the stream the event belongs to.
    pub stream_name: String,
}

/// A stream listed by the directory, with its recency marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    pub name: String,
    /// Last ingestion time in epoch milliseconds; `None` if the stream
    /// has no recorded activity (sorts as time zero).
    pub last_activity: Option<i64>,
}

/// An emitted record tagged with its source group, the unit of the
/// merged output stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TailEvent {
    pub record: LogRecord,
    pub group: String,
}

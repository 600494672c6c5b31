//! Target start-up: probe the stream directory until the target's
//! streams resolve, then keep the shared set fresh in the background.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, sleep};

use cwtail_core::{StreamSet, TailError};

use crate::backend::LogsBackend;
use crate::directory;

/// Re-probe interval while a missing group is awaited (`--retry`).
pub const PROBE_RETRY_INTERVAL: Duration = Duration::from_millis(150);

/// Period of the background stream-set refresh for a live target.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(5);

/// Probe the directory for `group` + `prefix` and populate `streams`.
///
/// A `NotFound` probe result is absorbed and re-tried every 150ms when
/// `retry` is set (indefinitely — the caller is interrupted by process
/// exit); otherwise it is surfaced, as is any other error class.
///
/// On success the stream set is replaced wholesale and a refresh task is
/// spawned that re-resolves the set every 5 seconds for the lifetime of
/// the target. Refresh failures keep the previous generation and are
/// only logged: a transient listing failure must not stop a running
/// follow. The returned handle lets the owning poll loop stop the
/// refresher when the target ends.
pub async fn initialise_streams<B: LogsBackend + 'static>(
    backend: Arc<B>,
    group: String,
    prefix: String,
    retry: bool,
    streams: Arc<StreamSet>,
) -> Result<JoinHandle<()>, TailError> {
    loop {
        match directory::fetch_stream_names(backend.as_ref(), &group, Some(&prefix)).await {
            Ok(names) => {
                streams.replace(names);
                break;
            }
            Err(err) if err.is_not_found() && retry => {
                tracing::info!(
                    %group,
                    "log group not available yet, re-probing in {}ms",
                    PROBE_RETRY_INTERVAL.as_millis()
                );
                sleep(PROBE_RETRY_INTERVAL).await;
            }
            Err(err) => return Err(err),
        }
    }

    let handle = tokio::spawn(async move {
        let mut ticker = interval(REFRESH_INTERVAL);
        ticker.tick().await; // immediate first tick; the probe just ran
        loop {
            ticker.tick().await;
            match directory::fetch_stream_names(backend.as_ref(), &group, Some(&prefix)).await {
                Ok(names) => streams.replace(names),
                Err(err) => {
                    tracing::warn!(%group, error = %err, "stream refresh failed, keeping previous set");
                }
            }
        }
    });
    Ok(handle)
}

//! Stream directory: resolves a group + prefix into the concrete set of
//! stream names a filter query may be scoped to.

use std::sync::Arc;

use tokio::sync::mpsc;

use cwtail_core::{StreamDescriptor, TailError};

use crate::backend::LogsBackend;

/// The filter API rejects more than 100 scoped stream names per query;
/// when a prefix matches more candidates, only the 100 most recently
/// active are kept.
pub const MAX_STREAMS_PER_QUERY: usize = 100;

/// Drain every page of streams matching `prefix` in `group`, stably
/// sorted ascending by last-activity time (no recorded activity sorts
/// as time zero), capped at the [`MAX_STREAMS_PER_QUERY`] most recent.
pub async fn fetch_streams<B: LogsBackend + ?Sized>(
    backend: &B,
    group: &str,
    prefix: Option<&str>,
) -> Result<Vec<StreamDescriptor>, TailError> {
    let mut streams = Vec::new();
    let mut token = None;
    loop {
        let page = backend.describe_log_streams(group, prefix, token).await?;
        streams.extend(page.streams);
        match page.next_token {
            Some(next) => token = Some(next),
            None => break,
        }
    }

    streams.sort_by_key(|s| s.last_activity.unwrap_or(0));
    if streams.len() > MAX_STREAMS_PER_QUERY {
        let keep_from = streams.len() - MAX_STREAMS_PER_QUERY;
        streams.drain(..keep_from);
    }
    tracing::debug!(group, count = streams.len(), "streams resolved");
    Ok(streams)
}

/// [`fetch_streams`], names only.
pub async fn fetch_stream_names<B: LogsBackend + ?Sized>(
    backend: &B,
    group: &str,
    prefix: Option<&str>,
) -> Result<Vec<String>, TailError> {
    Ok(fetch_streams(backend, group, prefix)
        .await?
        .into_iter()
        .map(|s| s.name)
        .collect())
}

/// Lazily list every log group. The producer task closes the channel on
/// completion, or after sending a single error — never both.
pub fn ls_groups<B: LogsBackend + 'static>(
    backend: Arc<B>,
) -> mpsc::Receiver<Result<String, TailError>> {
    let (tx, rx) = mpsc::channel(64);
    tokio::spawn(async move {
        let mut token = None;
        loop {
            match backend.describe_log_groups(token.take()).await {
                Ok(page) => {
                    for group in page.groups {
                        if tx.send(Ok(group)).await.is_err() {
                            return;
                        }
                    }
                    match page.next_token {
                        Some(next) => token = Some(next),
                        None => return,
                    }
                }
                Err(err) => {
                    let _ = tx.send(Err(err)).await;
                    return;
                }
            }
        }
    });
    rx
}

/// Lazily list streams in a group, each page stably sorted ascending by
/// last-activity time before it is forwarded. Same close-once contract
/// as [`ls_groups`].
pub fn ls_streams<B: LogsBackend + 'static>(
    backend: Arc<B>,
    group: String,
    prefix: Option<String>,
) -> mpsc::Receiver<Result<StreamDescriptor, TailError>> {
    let (tx, rx) = mpsc::channel(64);
    tokio::spawn(async move {
        let mut token = None;
        loop {
            match backend
                .describe_log_streams(&group, prefix.as_deref(), token.take())
                .await
            {
                Ok(mut page) => {
                    page.streams.sort_by_key(|s| s.last_activity.unwrap_or(0));
                    for stream in page.streams {
                        if tx.send(Ok(stream)).await.is_err() {
                            return;
                        }
                    }
                    match page.next_token {
                        Some(next) => token = Some(next),
                        None => return,
                    }
                }
                Err(err) => {
                    let _ = tx.send(Err(err)).await;
                    return;
                }
            }
        }
    });
    rx
}

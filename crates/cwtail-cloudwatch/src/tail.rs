//! Per-target poll loop: each trigger signal runs one filter cycle,
//! deduplicates against the event cache, advances the watermark and
//! forwards fresh records downstream.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use regex::Regex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep};

use cwtail_core::cache::{DEFAULT_SWEEP_PERIOD, DEFAULT_TTL};
use cwtail_core::{EventCache, StreamSet, TailError, TailEvent, TailTarget};

use crate::backend::{FilterRequest, LogsBackend};
use crate::init;

/// Single back-off before a throttled page is retried. A second
/// throttle on the same page is fatal for the whole process.
pub const POLL_BACKOFF: Duration = Duration::from_millis(250);

/// Tail one target until its window is exhausted, the trigger source
/// closes, the output side hangs up, or a fatal error occurs.
///
/// Each received trigger signal runs one complete poll cycle. The query
/// window is frozen when the cycle starts: the low edge is the
/// watermark (initially the target's start time, advanced to the
/// highest timestamp forwarded so far, never moved backward), and the
/// scoped stream set is whatever generation the refresher last
/// published. In non-follow mode the first completed cycle ends the
/// loop.
pub async fn tail_target<B: LogsBackend + 'static>(
    backend: Arc<B>,
    target: TailTarget,
    trigger: mpsc::Receiver<()>,
    out: mpsc::Sender<TailEvent>,
) -> Result<(), TailError> {
    let exclude = match target.exclude_pattern.as_deref() {
        Some(pattern) => Some(Regex::new(pattern)?),
        None => None,
    };

    let cache = Arc::new(EventCache::new(DEFAULT_TTL));
    let sweeper = spawn_sweeper(Arc::clone(&cache));

    let streams = Arc::new(StreamSet::new());
    let refresher = match target.prefix.clone() {
        Some(prefix) => {
            match init::initialise_streams(
                Arc::clone(&backend),
                target.group.clone(),
                prefix,
                target.retry,
                Arc::clone(&streams),
            )
            .await
            {
                Ok(handle) => Some(handle),
                Err(err) => {
                    sweeper.abort();
                    return Err(err);
                }
            }
        }
        None => None,
    };

    let result = run_poll_loop(
        backend.as_ref(),
        &target,
        exclude.as_ref(),
        &streams,
        &cache,
        trigger,
        out,
    )
    .await;

    sweeper.abort();
    if let Some(refresher) = refresher {
        refresher.abort();
    }
    result
}

/// Periodic TTL sweep of the dedup cache against wall-clock time.
fn spawn_sweeper(cache: Arc<EventCache>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(DEFAULT_SWEEP_PERIOD);
        ticker.tick().await; // the immediate tick would sweep an empty cache
        loop {
            ticker.tick().await;
            cache.purge(Utc::now().timestamp_millis());
        }
    })
}

async fn run_poll_loop<B: LogsBackend + ?Sized>(
    backend: &B,
    target: &TailTarget,
    exclude: Option<&Regex>,
    streams: &StreamSet,
    cache: &EventCache,
    mut trigger: mpsc::Receiver<()>,
    out: mpsc::Sender<TailEvent>,
) -> Result<(), TailError> {
    let mut watermark = target.start_time_ms();
    let end_time_ms = if target.follow {
        None
    } else {
        target.end_time_ms()
    };

    while trigger.recv().await.is_some() {
        let request = FilterRequest {
            group: target.group.clone(),
            stream_names: streams.get(),
            start_time_ms: watermark,
            end_time_ms,
            filter_pattern: target.include_pattern.clone(),
        };

        let mut token: Option<String> = None;
        loop {
            let page = match backend.filter_log_events(&request, token.clone()).await {
                Ok(page) => page,
                Err(err) if err.is_throttled() => {
                    tracing::warn!(
                        group = %target.group,
                        "query throttled, backing off {}ms",
                        POLL_BACKOFF.as_millis()
                    );
                    sleep(POLL_BACKOFF).await;
                    backend.filter_log_events(&request, token.clone()).await?
                }
                Err(err) => return Err(err),
            };

            for record in page.events {
                if let Some(exclude) = exclude {
                    if exclude.is_match(&record.message) {
                        continue;
                    }
                }
                if cache.has(&record.id) {
                    tracing::debug!(id = %record.id, "event already seen, skipping");
                    continue;
                }
                if record.timestamp < watermark {
                    tracing::debug!(
                        id = %record.id,
                        timestamp = record.timestamp,
                        watermark,
                        "late event behind the watermark"
                    );
                } else {
                    watermark = record.timestamp;
                }
                cache.add(&record.id, record.timestamp);
                let event = TailEvent {
                    record,
                    group: target.group.clone(),
                };
                if out.send(event).await.is_err() {
                    // Downstream hung up; nothing left to tail for.
                    return Ok(());
                }
            }

            match page.next_token {
                Some(next) => token = Some(next),
                None => break,
            }
        }

        if !target.follow {
            break;
        }
    }
    Ok(())
}

//! Scripted fake backend for directory/initializer/poll-loop tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use cwtail_core::types::LogRecord;
use cwtail_core::{StreamDescriptor, TailError};

use crate::backend::{EventPage, FilterRequest, GroupPage, LogsBackend, StreamPage};

/// Fake remote service: each call pops the next scripted response.
///
/// Stream listings fall back to `stream_fallback` once the scripted queue
/// is drained (so periodic refreshes keep working); event queries fall
/// back to an empty page.
#[derive(Default)]
pub(crate) struct FakeBackend {
    group_responses: Mutex<VecDeque<Result<GroupPage, TailError>>>,
    stream_responses: Mutex<VecDeque<Result<StreamPage, TailError>>>,
    stream_fallback: Mutex<Option<StreamPage>>,
    event_responses: Mutex<VecDeque<Result<EventPage, TailError>>>,
    /// Recorded (request, continuation token) pairs for every event call.
    pub(crate) filter_calls: Mutex<Vec<(FilterRequest, Option<String>)>>,
    /// Recorded (group, prefix, token) for every stream listing call.
    pub(crate) stream_calls: Mutex<Vec<(String, Option<String>, Option<String>)>>,
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_group_page(&self, groups: &[&str], next_token: Option<&str>) {
        self.group_responses
            .lock()
            .expect("lock")
            .push_back(Ok(GroupPage {
                groups: groups.iter().map(|g| g.to_string()).collect(),
                next_token: next_token.map(str::to_string),
            }));
    }

    pub(crate) fn push_group_err(&self, err: TailError) {
        self.group_responses.lock().expect("lock").push_back(Err(err));
    }

    pub(crate) fn push_stream_page(
        &self,
        streams: &[(&str, Option<i64>)],
        next_token: Option<&str>,
    ) {
        self.stream_responses
            .lock()
            .expect("lock")
            .push_back(Ok(stream_page(streams, next_token)));
    }

    pub(crate) fn push_stream_err(&self, err: TailError) {
        self.stream_responses.lock().expect("lock").push_back(Err(err));
    }

    pub(crate) fn set_stream_fallback(&self, streams: &[(&str, Option<i64>)]) {
        *self.stream_fallback.lock().expect("lock") = Some(stream_page(streams, None));
    }

    pub(crate) fn push_event_page(&self, events: &[(&str, i64, &str)], next_token: Option<&str>) {
        self.event_responses
            .lock()
            .expect("lock")
            .push_back(Ok(EventPage {
                events: events
                    .iter()
                    .map(|(id, ts, msg)| LogRecord {
                        id: id.to_string(),
                        timestamp: *ts,
                        message: msg.to_string(),
                        stream_name: "stream1".to_string(),
                    })
                    .collect(),
                next_token: next_token.map(str::to_string),
            }));
    }

    pub(crate) fn push_event_err(&self, err: TailError) {
        self.event_responses.lock().expect("lock").push_back(Err(err));
    }

    pub(crate) fn filter_call_count(&self) -> usize {
        self.filter_calls.lock().expect("lock").len()
    }
}

fn stream_page(streams: &[(&str, Option<i64>)], next_token: Option<&str>) -> StreamPage {
    StreamPage {
        streams: streams
            .iter()
            .map(|(name, last_activity)| StreamDescriptor {
                name: name.to_string(),
                last_activity: *last_activity,
            })
            .collect(),
        next_token: next_token.map(str::to_string),
    }
}

#[async_trait]
impl LogsBackend for FakeBackend {
    async fn describe_log_groups(
        &self,
        _next_token: Option<String>,
    ) -> Result<GroupPage, TailError> {
        self.group_responses
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Ok(GroupPage::default()))
    }

    async fn describe_log_streams(
        &self,
        group: &str,
        prefix: Option<&str>,
        next_token: Option<String>,
    ) -> Result<StreamPage, TailError> {
        self.stream_calls.lock().expect("lock").push((
            group.to_string(),
            prefix.map(str::to_string),
            next_token,
        ));
        if let Some(response) = self.stream_responses.lock().expect("lock").pop_front() {
            return response;
        }
        Ok(self
            .stream_fallback
            .lock()
            .expect("lock")
            .clone()
            .unwrap_or_default())
    }

    async fn filter_log_events(
        &self,
        request: &FilterRequest,
        next_token: Option<String>,
    ) -> Result<EventPage, TailError> {
        self.filter_calls
            .lock()
            .expect("lock")
            .push((request.clone(), next_token));
        self.event_responses
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Ok(EventPage::default()))
    }
}

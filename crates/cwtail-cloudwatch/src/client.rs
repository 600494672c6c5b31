//! Real CloudWatch Logs backend built on the AWS SDK.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_cloudwatchlogs::Client;
use aws_sdk_cloudwatchlogs::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

use cwtail_core::types::LogRecord;
use cwtail_core::{StreamDescriptor, TailError};

use crate::backend::{EventPage, FilterRequest, GroupPage, LogsBackend, StreamPage};

/// CloudWatch Logs client with optional profile/region/endpoint
/// overrides resolved from the CLI.
#[derive(Debug, Clone)]
pub struct CloudWatchBackend {
    client: Client,
}

impl CloudWatchBackend {
    /// Load the shared AWS configuration (credentials file, environment)
    /// and apply the caller's overrides on top.
    pub async fn new(
        endpoint_url: Option<&str>,
        profile: Option<&str>,
        region: Option<&str>,
    ) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = profile.filter(|p| !p.is_empty()) {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = region.filter(|r| !r.is_empty()) {
            loader = loader.region(Region::new(region.to_string()));
        }
        let shared = loader.load().await;

        let mut builder = aws_sdk_cloudwatchlogs::config::Builder::from(&shared);
        if let Some(url) = endpoint_url.filter(|u| !u.is_empty()) {
            tracing::debug!(endpoint = url, "using custom service endpoint");
            builder = builder.endpoint_url(url);
        }

        Self {
            client: Client::from_conf(builder.build()),
        }
    }
}

/// Classify an SDK failure into the tail error taxonomy by error code.
fn map_sdk_err<E>(err: SdkError<E>) -> TailError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let detail = || {
        err.message()
            .map(str::to_string)
            .unwrap_or_else(|| DisplayErrorContext(&err).to_string())
    };
    match err.code() {
        Some("ResourceNotFoundException") => TailError::NotFound(detail()),
        Some("ThrottlingException") => TailError::Throttled(detail()),
        _ => TailError::Service(DisplayErrorContext(&err).to_string()),
    }
}

#[async_trait]
impl LogsBackend for CloudWatchBackend {
    async fn describe_log_groups(
        &self,
        next_token: Option<String>,
    ) -> Result<GroupPage, TailError> {
        let out = self
            .client
            .describe_log_groups()
            .set_next_token(next_token)
            .send()
            .await
            .map_err(map_sdk_err)?;

        Ok(GroupPage {
            groups: out
                .log_groups
                .unwrap_or_default()
                .into_iter()
                .filter_map(|g| g.log_group_name)
                .collect(),
            next_token: out.next_token,
        })
    }

    async fn describe_log_streams(
        &self,
        group: &str,
        prefix: Option<&str>,
        next_token: Option<String>,
    ) -> Result<StreamPage, TailError> {
        let mut req = self
            .client
            .describe_log_streams()
            .log_group_name(group)
            .set_next_token(next_token);
        if let Some(prefix) = prefix.filter(|p| !p.is_empty()) {
            req = req.log_stream_name_prefix(prefix);
        }
        let out = req.send().await.map_err(map_sdk_err)?;

        Ok(StreamPage {
            streams: out
                .log_streams
                .unwrap_or_default()
                .into_iter()
                .filter_map(|s| {
                    s.log_stream_name.map(|name| StreamDescriptor {
                        name,
                        last_activity: s.last_ingestion_time,
                    })
                })
                .collect(),
            next_token: out.next_token,
        })
    }

    async fn filter_log_events(
        &self,
        request: &FilterRequest,
        next_token: Option<String>,
    ) -> Result<EventPage, TailError> {
        let mut req = self
            .client
            .filter_log_events()
            .log_group_name(&request.group)
            .start_time(request.start_time_ms)
            .set_end_time(request.end_time_ms)
            .set_next_token(next_token);
        if !request.stream_names.is_empty() {
            req = req.set_log_stream_names(Some(request.stream_names.clone()));
        }
        if let Some(pattern) = request.filter_pattern.as_deref().filter(|p| !p.is_empty()) {
            req = req.filter_pattern(pattern);
        }
        let out = req.send().await.map_err(map_sdk_err)?;

        Ok(EventPage {
            events: out
                .events
                .unwrap_or_default()
                .into_iter()
                .filter_map(|e| {
                    Some(LogRecord {
                        id: e.event_id?,
                        timestamp: e.timestamp?,
                        message: e.message.unwrap_or_default(),
                        stream_name: e.log_stream_name.unwrap_or_default(),
                    })
                })
                .collect(),
            next_token: out.next_token,
        })
    }
}

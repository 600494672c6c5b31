//! Best-effort check for a newer released version.
//!
//! GitHub answers `releases/latest` with a redirect to the concrete tag,
//! so one un-followed request is enough to learn the latest version.
//! The lookup runs concurrently with the command and its hint (if any)
//! is printed once the command finishes; any failure, and a lookup that
//! is still in flight by then, is silently dropped.

use tokio::task::JoinHandle;

const LATEST_RELEASE_URL: &str = "https://github.com/cwtail/cwtail/releases/latest";

/// Resolves to an upgrade hint when a newer release exists.
pub fn spawn_version_check() -> JoinHandle<Option<String>> {
    tokio::spawn(async {
        let current = env!("CARGO_PKG_VERSION");
        let latest = fetch_latest_version().await?;
        if is_newer(&latest, current) {
            Some(format!(
                "cwtail {latest} is available (you have {current}): {LATEST_RELEASE_URL}"
            ))
        } else {
            None
        }
    })
}

async fn fetch_latest_version() -> Option<String> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .ok()?;
    let response = client.get(LATEST_RELEASE_URL).send().await.ok()?;
    if !response.status().is_redirection() {
        tracing::debug!(status = %response.status(), "unexpected release lookup response");
        return None;
    }
    let location = response
        .headers()
        .get(reqwest::header::LOCATION)?
        .to_str()
        .ok()?;
    version_from_location(location)
}

/// Extract `X.Y.Z` from a `…/releases/tag/vX.Y.Z` redirect target.
fn version_from_location(location: &str) -> Option<String> {
    let tag = location.rsplit_once("/tag/")?.1;
    let version = tag.strip_prefix('v').unwrap_or(tag);
    if version.is_empty() {
        None
    } else {
        Some(version.to_string())
    }
}

fn is_newer(latest: &str, current: &str) -> bool {
    match (parse_version(latest), parse_version(current)) {
        (Some(latest), Some(current)) => latest > current,
        _ => false,
    }
}

fn parse_version(version: &str) -> Option<(u64, u64, u64)> {
    let mut parts = version.splitn(3, '.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    let patch = parts.next()?.parse().ok()?;
    Some((major, minor, patch))
}

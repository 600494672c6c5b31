//! `cwtail ls` — list log groups or the streams of one group.

use std::sync::Arc;

use cwtail_cloudwatch::CloudWatchBackend;
use cwtail_cloudwatch::directory;

/// Entry point for `cwtail ls groups`.
pub async fn cmd_ls_groups(backend: Arc<CloudWatchBackend>) -> anyhow::Result<()> {
    let mut rx = directory::ls_groups(backend);
    while let Some(item) = rx.recv().await {
        println!("{}", item?);
    }
    Ok(())
}

/// Entry point for `cwtail ls streams <group> [prefix]`.
pub async fn cmd_ls_streams(
    backend: Arc<CloudWatchBackend>,
    group: &str,
    prefix: Option<String>,
) -> anyhow::Result<()> {
    let mut rx = directory::ls_streams(backend, group.to_string(), prefix);
    while let Some(item) = rx.recv().await {
        println!("{}", item?.name);
    }
    Ok(())
}

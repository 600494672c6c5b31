//! `cwtail tail` — run one poll loop per target under the shared clock
//! and print the merged event stream.

use std::sync::Arc;

use anyhow::bail;
use chrono::{Duration, Utc};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use cwtail_cloudwatch::tail::tail_target;
use cwtail_cloudwatch::LogsBackend;
use cwtail_core::{TailEvent, TailTarget};

use crate::cli::{self, TailOpts};
use crate::coordinator::Coordinator;
use crate::format::{FormatOpts, MessageQuery, format_event};
use crate::timeparse;

/// Entry point for `cwtail tail`.
///
/// Targets share one output channel; the printer drains it until every
/// poll loop has dropped its sender. The first loop that fails takes the
/// whole invocation down with its error.
pub async fn cmd_tail<B: LogsBackend + 'static>(
    backend: Arc<B>,
    targets: Vec<TailTarget>,
    format: FormatOpts,
    query: Option<MessageQuery>,
) -> anyhow::Result<()> {
    let (out_tx, mut out_rx) = mpsc::channel::<TailEvent>(256);
    let mut coordinator = Coordinator::new();
    let mut loops = JoinSet::new();
    for target in targets {
        let trigger = coordinator.register();
        let backend = Arc::clone(&backend);
        let out = out_tx.clone();
        let group = target.group.clone();
        loops.spawn(async move { (group, tail_target(backend, target, trigger, out).await) });
    }
    drop(out_tx);
    let clock = coordinator.spawn();

    let result = async {
        loop {
            tokio::select! {
                event = out_rx.recv() => match event {
                    Some(event) => println!("{}", format_event(&event, &format, query.as_ref())),
                    None => return Ok(()),
                },
                Some(joined) = loops.join_next() => {
                    let (group, result) = joined?;
                    if let Err(err) = result {
                        bail!("{group}: {err}");
                    }
                }
            }
        }
    }
    .await;

    clock.abort();
    result
}

/// Resolve CLI options into concrete targets: the positional targets
/// plus any piped on stdin, in that order.
pub fn build_targets(opts: &TailOpts) -> anyhow::Result<Vec<TailTarget>> {
    assemble_targets(opts, stdin_targets())
}

fn assemble_targets(opts: &TailOpts, piped: Vec<String>) -> anyhow::Result<Vec<TailTarget>> {
    let mut raw = opts.targets.clone();
    raw.extend(piped);
    if raw.is_empty() {
        bail!("no log groups given (pass group[:stream-prefix] or pipe them on stdin)");
    }

    let start_time = match opts.start.as_deref() {
        Some(start) => timeparse::parse_time(start, opts.local)?,
        None => Utc::now() - Duration::seconds(45),
    };
    let end_time = opts
        .end
        .as_deref()
        .map(|end| timeparse::parse_time(end, opts.local))
        .transpose()?;

    Ok(raw
        .iter()
        .map(|raw| {
            let (group, prefix) = cli::parse_target(raw);
            TailTarget {
                group,
                prefix,
                follow: opts.follow,
                retry: opts.retry,
                start_time,
                end_time,
                include_pattern: opts.grep.clone(),
                exclude_pattern: opts.grepv.clone(),
            }
        })
        .collect())
}

fn stdin_targets() -> Vec<String> {
    use std::io::{IsTerminal, Read};
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Vec::new();
    }
    let mut input = String::new();
    if stdin.read_to_string(&mut input).is_err() {
        return Vec::new();
    }
    input.split_whitespace().map(str::to_string).collect()
}

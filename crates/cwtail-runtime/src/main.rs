//! cwtail: tail AWS CloudWatch Logs from the terminal.
//! Single-process binary running one poll loop per target under a
//! shared fair clock.

use std::io::IsTerminal;
use std::sync::Arc;

use clap::Parser;

use cwtail_cloudwatch::CloudWatchBackend;

mod cli;
mod cmd_ls;
mod cmd_tail;
mod coordinator;
mod format;
mod timeparse;
mod version_check;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    let filter = if args.debug {
        "debug".to_string()
    } else {
        std::env::var("CWTAIL_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "warn".to_string())
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let version_check = if args.no_version_check {
        None
    } else {
        Some(version_check::spawn_version_check())
    };

    let backend = Arc::new(
        CloudWatchBackend::new(
            args.endpoint_url.as_deref(),
            args.profile.as_deref(),
            args.region.as_deref(),
        )
        .await,
    );

    match args.command {
        cli::Command::Tail(opts) => {
            let targets = cmd_tail::build_targets(&opts)?;
            let query = opts
                .query
                .as_deref()
                .map(format::MessageQuery::compile)
                .transpose()?;
            let format = format::FormatOpts {
                timestamp: opts.timestamp,
                event_id: opts.event_id,
                stream_name: opts.stream_name,
                group_name: opts.group_name,
                local: opts.local,
                use_color: !args.no_color && std::io::stdout().is_terminal(),
            };
            cmd_tail::cmd_tail(backend, targets, format, query).await?;
        }
        cli::Command::Ls(cli::LsCommand::Groups) => {
            cmd_ls::cmd_ls_groups(backend).await?;
        }
        cli::Command::Ls(cli::LsCommand::Streams(opts)) => {
            cmd_ls::cmd_ls_streams(backend, &opts.group, opts.prefix).await?;
        }
    }

    // A lookup still in flight is not worth waiting for.
    if let Some(check) = version_check {
        if check.is_finished() {
            if let Ok(Some(hint)) = check.await {
                eprintln!("{hint}");
            }
        }
    }

    Ok(())
}

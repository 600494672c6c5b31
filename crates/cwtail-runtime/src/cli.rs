//! CLI definition using clap derive.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cwtail", version, about = "Tail AWS CloudWatch Logs from the terminal")]
pub struct Cli {
    /// Override the CloudWatch Logs endpoint URL (e.g. a local emulator)
    #[arg(long, global = true)]
    pub endpoint_url: Option<String>,

    /// AWS profile to load credentials from
    #[arg(long, short = 'p', global = true)]
    pub profile: Option<String>,

    /// AWS region override
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Skip the check for a newer released version
    #[arg(long, global = true)]
    pub no_version_check: bool,

    /// Force debug-level diagnostics on stderr
    #[arg(long, global = true, hide = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Tail log groups, optionally scoped to a stream-name prefix
    Tail(TailOpts),
    /// List log groups and streams
    #[command(subcommand)]
    Ls(LsCommand),
}

#[derive(Subcommand)]
pub enum LsCommand {
    /// List all log groups
    Groups,
    /// List the streams of a log group
    Streams(StreamsOpts),
}

#[derive(clap::Args)]
pub struct StreamsOpts {
    /// Log group name
    pub group: String,

    /// Only list streams whose name starts with this prefix
    pub prefix: Option<String>,
}

#[derive(clap::Args)]
pub struct TailOpts {
    /// Targets as `group` or `group:stream-prefix`; read one per line
    /// from stdin when omitted
    pub targets: Vec<String>,

    /// Keep following new events after the window is caught up
    #[arg(long, short = 'f')]
    pub follow: bool,

    /// Print the event timestamp
    #[arg(long, short = 't')]
    pub timestamp: bool,

    /// Print the event id
    #[arg(long, short = 'i')]
    pub event_id: bool,

    /// Print the stream name
    #[arg(long, short = 's')]
    pub stream_name: bool,

    /// Print the group name
    #[arg(long, short = 'n')]
    pub group_name: bool,

    /// Keep waiting for a log group that does not exist yet
    #[arg(long, short = 'r')]
    pub retry: bool,

    /// Start of the window, absolute (2026-02-25[T12[:00[:00]]], 12:00)
    /// or relative (45m, 2h30m); defaults to 45 seconds ago
    #[arg(long, short = 'b')]
    pub start: Option<String>,

    /// End of the window, same forms as --start; ignored with --follow
    #[arg(long, short = 'e')]
    pub end: Option<String>,

    /// Parse and print times in the local timezone instead of UTC
    #[arg(long, short = 'l')]
    pub local: bool,

    /// Server-side filter pattern applied by the service
    #[arg(long, short = 'g')]
    pub grep: Option<String>,

    /// JMESPath expression applied to JSON-bodied messages; messages
    /// that are not JSON (or do not match) are printed unchanged
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Client-side exclude regular expression tested against messages
    #[arg(long, short = 'v')]
    pub grepv: Option<String>,
}

/// Split a `group[:stream-prefix]` target. An empty or `*` prefix means
/// every stream in the group.
pub fn parse_target(raw: &str) -> (String, Option<String>) {
    match raw.split_once(':') {
        Some((group, prefix)) if !prefix.is_empty() && prefix != "*" => {
            (group.to_string(), Some(prefix.to_string()))
        }
        Some((group, _)) => (group.to_string(), None),
        None => (raw.to_string(), None),
    }
}

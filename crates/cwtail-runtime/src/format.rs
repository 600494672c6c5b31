//! Rendering of emitted events as terminal lines, including the
//! optional `--query` reshaping of JSON-bodied messages.

use chrono::{Local, TimeZone, Utc};

use cwtail_core::TailEvent;

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// Which optional fields are prepended to each message.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOpts {
    pub timestamp: bool,
    pub event_id: bool,
    pub stream_name: bool,
    pub group_name: bool,
    /// Print timestamps in the local timezone instead of UTC.
    pub local: bool,
    pub use_color: bool,
}

/// Compiled `--query` expression, applied to each JSON-bodied message.
pub struct MessageQuery {
    expression: jmespath::Expression<'static>,
}

impl MessageQuery {
    /// Compile failures are surfaced before any polling starts.
    pub fn compile(query: &str) -> anyhow::Result<Self> {
        let expression = jmespath::compile(query)
            .map_err(|err| anyhow::anyhow!("invalid query expression: {err}"))?;
        Ok(Self { expression })
    }

    /// Query result as display text: the bare string for string
    /// results, compact JSON otherwise. `None` when the message is not
    /// JSON or the expression matched nothing, in which case the raw
    /// message is printed unchanged.
    fn apply(&self, message: &str) -> Option<String> {
        let data = jmespath::Variable::from_json(message).ok()?;
        let result = self.expression.search(data).ok()?;
        if result.is_null() {
            return None;
        }
        match result.as_string() {
            Some(text) => Some(text.clone()),
            None => serde_json::to_string(result.as_ref()).ok(),
        }
    }
}

/// One output line: `group - stream - id - timestamp - message`, each
/// prefix present only when asked for, colored when writing to a tty.
pub fn format_event(event: &TailEvent, opts: &FormatOpts, query: Option<&MessageQuery>) -> String {
    let paint = |color: &str, text: &str| {
        if opts.use_color {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    };

    let mut line = query
        .and_then(|q| q.apply(&event.record.message))
        .unwrap_or_else(|| event.record.message.trim_end().to_string());
    if opts.timestamp {
        let stamp = match Utc.timestamp_millis_opt(event.record.timestamp).single() {
            Some(t) if opts.local => t
                .with_timezone(&Local)
                .format("%Y-%m-%dT%H:%M:%S")
                .to_string(),
            Some(t) => t.format("%Y-%m-%dT%H:%M:%S").to_string(),
            None => event.record.timestamp.to_string(),
        };
        line = format!("{} - {line}", paint(GREEN, &stamp));
    }
    if opts.event_id {
        line = format!("{} - {line}", paint(YELLOW, &event.record.id));
    }
    if opts.stream_name {
        line = format!("{} - {line}", paint(BLUE, &event.record.stream_name));
    }
    if opts.group_name {
        line = format!("{} - {line}", paint(CYAN, &event.group));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use cwtail_core::types::LogRecord;

    fn event() -> TailEvent {
        TailEvent {
            record: LogRecord {
                id: "evt-1".to_string(),
                // 2026-02-25T12:00:00Z
                timestamp: 1772020800000,
                message: "payment accepted  \n".to_string(),
                stream_name: "web-1".to_string(),
            },
            group: "prod/api".to_string(),
        }
    }

    #[test]
    fn bare_message_is_trimmed() {
        let opts = FormatOpts::default();
        assert_eq!(format_event(&event(), &opts, None), "payment accepted");
    }

    #[test]
    fn prefixes_stack_in_fixed_order() {
        let opts = FormatOpts {
            timestamp: true,
            event_id: true,
            stream_name: true,
            group_name: true,
            ..Default::default()
        };
        assert_eq!(
            format_event(&event(), &opts, None),
            "prod/api - web-1 - evt-1 - 2026-02-25T12:00:00 - payment accepted"
        );
    }

    #[test]
    fn timestamp_only() {
        let opts = FormatOpts {
            timestamp: true,
            ..Default::default()
        };
        assert_eq!(
            format_event(&event(), &opts, None),
            "2026-02-25T12:00:00 - payment accepted"
        );
    }

    #[test]
    fn color_wraps_prefixes_not_the_message() {
        let opts = FormatOpts {
            group_name: true,
            use_color: true,
            ..Default::default()
        };
        assert_eq!(
            format_event(&event(), &opts, None),
            "\x1b[36mprod/api\x1b[0m - payment accepted"
        );
    }

    #[test]
    fn no_ansi_without_color() {
        let opts = FormatOpts {
            timestamp: true,
            event_id: true,
            stream_name: true,
            group_name: true,
            ..Default::default()
        };
        assert!(!format_event(&event(), &opts, None).contains('\x1b'));
    }

    fn json_event(message: &str) -> TailEvent {
        let mut event = event();
        event.record.message = message.to_string();
        event
    }

    #[test]
    fn query_extracts_string_field_without_quotes() {
        let query = MessageQuery::compile("msg").expect("valid expression");
        let event = json_event(r#"{"level":"error","msg":"payment declined"}"#);
        assert_eq!(
            format_event(&event, &FormatOpts::default(), Some(&query)),
            "payment declined"
        );
    }

    #[test]
    fn query_non_string_result_rendered_as_json() {
        let query = MessageQuery::compile("attempts").expect("valid expression");
        let event = json_event(r#"{"attempts":[1,2,3]}"#);
        assert_eq!(
            format_event(&event, &FormatOpts::default(), Some(&query)),
            "[1,2,3]"
        );
    }

    #[test]
    fn query_falls_back_on_non_json_message() {
        let query = MessageQuery::compile("msg").expect("valid expression");
        assert_eq!(
            format_event(&event(), &FormatOpts::default(), Some(&query)),
            "payment accepted",
            "raw message printed unchanged"
        );
    }

    #[test]
    fn query_falls_back_when_nothing_matches() {
        let query = MessageQuery::compile("missing").expect("valid expression");
        let event = json_event(r#"{"msg":"hello"}"#);
        assert_eq!(
            format_event(&event, &FormatOpts::default(), Some(&query)),
            r#"{"msg":"hello"}"#
        );
    }

    #[test]
    fn query_result_still_gets_prefixes() {
        let query = MessageQuery::compile("msg").expect("valid expression");
        let event = json_event(r#"{"msg":"hello"}"#);
        let opts = FormatOpts {
            group_name: true,
            ..Default::default()
        };
        assert_eq!(
            format_event(&event, &opts, Some(&query)),
            "prod/api - hello"
        );
    }

    #[test]
    fn malformed_query_expression_is_rejected() {
        assert!(MessageQuery::compile("foo[").is_err());
    }
}

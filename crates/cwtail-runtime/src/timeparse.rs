//! Parsing of the `--start`/`--end` time arguments.
//!
//! Accepted forms, mirroring what people actually type at a terminal:
//! full dates with progressively finer time parts
//! (`2026-02-25`, `2026-02-25T12`, `…T12:00`, `…T12:00:00`),
//! today-relative clock times (`12`, `12:00`), and ago-style offsets
//! (`45m`, `2h30m`, `2d4h`), minute granularity.

use anyhow::{Context, bail};
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};

/// Parse a time argument against the current instant. `local` selects
/// the local timezone for both naive forms and "today"; otherwise UTC.
pub fn parse_time(input: &str, local: bool) -> anyhow::Result<DateTime<Utc>> {
    parse_time_at(input, local, Utc::now())
}

fn parse_time_at(input: &str, local: bool, now: DateTime<Utc>) -> anyhow::Result<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        bail!("empty time argument");
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%dT%H"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return naive_to_utc(naive, local);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let naive = date.and_hms_opt(0, 0, 0).context("invalid date")?;
        return naive_to_utc(naive, local);
    }

    // Bare clock times resolve against today's date in the chosen zone.
    let today = if local {
        now.with_timezone(&Local).date_naive()
    } else {
        now.date_naive()
    };
    if let Ok(time) = NaiveTime::parse_from_str(input, "%H:%M") {
        return naive_to_utc(today.and_time(time), local);
    }
    if input.len() <= 2 {
        if let Ok(hour) = input.parse::<u32>() {
            let naive = today
                .and_hms_opt(hour, 0, 0)
                .with_context(|| format!("invalid hour: {input}"))?;
            return naive_to_utc(naive, local);
        }
    }

    if let Some(offset) = parse_offset(input) {
        let at = now - offset;
        // Offsets are minute-granular; drop the stray seconds of "now".
        return at
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .context("time arithmetic overflow");
    }

    bail!("unrecognized time: {input}");
}

fn naive_to_utc(naive: NaiveDateTime, local: bool) -> anyhow::Result<DateTime<Utc>> {
    if local {
        Local
            .from_local_datetime(&naive)
            .single()
            .map(|t| t.with_timezone(&Utc))
            .with_context(|| format!("ambiguous local time: {naive}"))
    } else {
        Ok(Utc.from_utc_datetime(&naive))
    }
}

/// `45m`, `2h`, `3d`, or compounds like `2d4h30m`, largest unit first.
fn parse_offset(input: &str) -> Option<Duration> {
    let pattern = regex::Regex::new(r"^(?:(\d+)d)?(?:(\d+)h)?(?:(\d+)m)?$").ok()?;
    let captures = pattern.captures(input)?;
    if captures.get(1).is_none() && captures.get(2).is_none() && captures.get(3).is_none() {
        return None;
    }
    let part = |i: usize| {
        captures
            .get(i)
            .and_then(|m| m.as_str().parse::<i64>().ok())
            .unwrap_or(0)
    };
    Some(Duration::days(part(1)) + Duration::hours(part(2)) + Duration::minutes(part(3)))
}

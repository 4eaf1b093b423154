//! Newline-delimited JSON event feed from the upstream chat client.
//!
//! Each feed line carries one typed event. Malformed lines are skipped with a
//! warning so one bad payload cannot stall the feed; a failing append aborts
//! it, since the daemon must not keep running while unable to persist
//! records.

use anyhow::{Context, Result};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

use crate::events::ChannelEvent;
use crate::observer::{dispatch, ChannelObserver};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventParseError {
    #[error("event line is empty")]
    EmptyLine,
    #[error("invalid event json: {0}")]
    InvalidJson(String),
}

/// Parses one feed line into a typed event.
pub fn parse_event_line(line: &str) -> Result<ChannelEvent, EventParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(EventParseError::EmptyLine);
    }
    serde_json::from_str(trimmed).map_err(|error| EventParseError::InvalidJson(error.to_string()))
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EventFeedReport {
    pub dispatched: usize,
    pub malformed_skipped: usize,
}

/// Consumes the event feed until EOF, dispatching each event in order.
pub async fn run_event_feed<R>(
    reader: R,
    observer: &dyn ChannelObserver,
) -> Result<EventFeedReport>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut report = EventFeedReport::default();
    while let Some(line) = lines
        .next_line()
        .await
        .context("failed reading event feed")?
    {
        if line.trim().is_empty() {
            continue;
        }
        match parse_event_line(&line) {
            Ok(event) => {
                dispatch(observer, &event)?;
                report.dispatched = report.dispatched.saturating_add(1);
            }
            Err(error) => {
                report.malformed_skipped = report.malformed_skipped.saturating_add(1);
                warn!(error = %error, "skipping malformed event line");
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use historian_core::resolve_log_path;
    use tempfile::tempdir;

    use super::{parse_event_line, run_event_feed, EventParseError};
    use crate::events::ChannelEvent;
    use crate::historian::{Historian, HistorianConfig};

    #[test]
    fn unit_parse_event_line_accepts_typed_events_and_rejects_garbage() {
        let event = parse_event_line(r#"{"type":"connected"}"#).expect("parse connected");
        assert_eq!(event, ChannelEvent::Connected);

        assert_eq!(parse_event_line("   "), Err(EventParseError::EmptyLine));
        assert!(matches!(
            parse_event_line("not json"),
            Err(EventParseError::InvalidJson(_))
        ));
        assert!(matches!(
            parse_event_line(r#"{"type":"unknown_event"}"#),
            Err(EventParseError::InvalidJson(_))
        ));
    }

    #[tokio::test]
    async fn integration_feed_dispatches_events_and_skips_malformed_lines() {
        let temp = tempdir().expect("tempdir");
        let historian = Historian::new(HistorianConfig {
            log_root: temp.path().to_path_buf(),
            channel: "#plans".to_string(),
            login: "historian".to_string(),
            version: "historian-0.1.0".to_string(),
        })
        .expect("historian");

        let feed = concat!(
            r#"{"type":"connected"}"#,
            "\n",
            "this line is not json\n",
            "\n",
            r#"{"type":"message","user":{"login":"bob","hostmask":"bob@host","nick":"bob"},"text":"hello"}"#,
            "\n",
            r#"{"type":"parted","user":{"login":"historian","hostmask":"h@host","nick":"historian"},"reason":"quit"}"#,
            "\n",
        );

        let report = run_event_feed(feed.as_bytes(), &historian)
            .await
            .expect("run feed");
        assert_eq!(report.dispatched, 3);
        assert_eq!(report.malformed_skipped, 1);

        let writer = historian.writer();
        let path = resolve_log_path(writer.root(), writer.channel(), Utc::now());
        let content = std::fs::read_to_string(path).expect("read log");
        let lines: Vec<_> = content.lines().collect();
        // The self-part dispatched but produced no record.
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("self: connected"));
        assert!(lines[1].ends_with("chat: bob@bob@host/bob: hello"));
    }
}

//! Serialized append-only writer for a channel's date-partitioned log.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};

use crate::log_path::resolve_log_path;
use crate::record::LogRecord;

/// Owns serialized append access to one channel's log stream.
///
/// The lock covers taking the wall clock, resolving the target path, and the
/// write+flush, so concurrent events can never interleave partial lines or
/// reorder records relative to lock acquisition. The file handle is scoped to
/// a single append and closed unconditionally, including on write failure;
/// nothing stays open across a midnight rollover.
#[derive(Debug)]
pub struct ChannelLogWriter {
    root: PathBuf,
    channel: String,
    append_lock: Mutex<()>,
}

impl ChannelLogWriter {
    pub fn new(root: impl Into<PathBuf>, channel: impl Into<String>) -> Result<Self> {
        let root = root.into();
        let channel = channel.into();
        if root.as_os_str().is_empty() {
            bail!("log root directory must be non-empty");
        }
        if channel.trim().is_empty() {
            bail!("channel identifier must be non-empty");
        }
        Ok(Self {
            root,
            channel,
            append_lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Appends one record to the log file for the current UTC date.
    ///
    /// The record is flushed before this returns; failures propagate to the
    /// caller without retry.
    pub fn append(&self, record: &LogRecord) -> Result<()> {
        let _guard = self
            .append_lock
            .lock()
            .map_err(|_| anyhow!("log append lock poisoned"))?;
        let now = Utc::now();
        let path = resolve_log_path(&self.root, &self.channel, now);
        append_line(&path, &format_log_timestamp(now), &record.render())
    }
}

/// Formats the record timestamp prefix, e.g. `2024-01-01T00:00:01.000+0000`.
pub fn format_log_timestamp(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%S%.3f%z").to_string()
}

fn append_line(path: &Path, timestamp: &str, body: &str) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| anyhow!("log file {} has no parent directory", path.display()))?;
    std::fs::create_dir_all(parent)
        .with_context(|| format!("could not create log directory {}", parent.display()))?;
    if !parent.is_dir() {
        bail!(
            "could not create log directory {}: not a directory",
            parent.display()
        );
    }

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    writeln!(file, "{timestamp} {body}")
        .with_context(|| format!("failed to append to {}", path.display()))?;
    file.flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    use super::{format_log_timestamp, ChannelLogWriter};
    use crate::log_path::resolve_log_path;
    use crate::record::LogRecord;
    use crate::UserRef;

    fn read_current_log(writer: &ChannelLogWriter) -> String {
        let path = resolve_log_path(writer.root(), writer.channel(), Utc::now());
        std::fs::read_to_string(path).expect("read log file")
    }

    #[test]
    fn unit_timestamp_format_matches_expected_shape() {
        let instant = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 1)
            .single()
            .expect("ts");
        assert_eq!(format_log_timestamp(instant), "2024-01-01T00:00:01.000+0000");
    }

    #[test]
    fn unit_new_rejects_empty_root_and_channel() {
        assert!(ChannelLogWriter::new("", "#plans").is_err());
        assert!(ChannelLogWriter::new("/logs", "  ").is_err());
    }

    #[test]
    fn functional_first_append_creates_full_directory_chain() {
        let temp = tempdir().expect("tempdir");
        let writer = ChannelLogWriter::new(temp.path(), "#plans").expect("writer");
        let user = UserRef::new("bob", "bob@host", "bob");

        writer
            .append(&LogRecord::chat(&user, "hello"))
            .expect("append");

        let path = resolve_log_path(writer.root(), writer.channel(), Utc::now());
        assert!(path.exists(), "log file should exist at the resolved path");
        assert!(path.parent().expect("parent").is_dir());

        let content = read_current_log(&writer);
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("chat: bob@bob@host/bob: hello"));
        assert!(lines[0].contains("+0000"));
    }

    #[test]
    fn functional_appends_accumulate_without_truncation() {
        let temp = tempdir().expect("tempdir");
        let writer = ChannelLogWriter::new(temp.path(), "#plans").expect("writer");

        writer.append(&LogRecord::self_connected()).expect("first");
        writer
            .append(&LogRecord::self_shutting_down())
            .expect("second");

        let content = read_current_log(&writer);
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("self: connected"));
        assert!(lines[1].ends_with("self: shutting down"));
    }

    #[test]
    fn integration_concurrent_appends_yield_complete_non_interleaved_lines() {
        let temp = tempdir().expect("tempdir");
        let writer = Arc::new(ChannelLogWriter::new(temp.path(), "#plans").expect("writer"));

        let threads = 8;
        let per_thread = 25;
        let mut handles = Vec::new();
        for thread_index in 0..threads {
            let writer = Arc::clone(&writer);
            handles.push(std::thread::spawn(move || {
                for sequence in 0..per_thread {
                    let user = UserRef::new(
                        format!("user{thread_index}"),
                        "host.example",
                        format!("nick{thread_index}"),
                    );
                    writer
                        .append(&LogRecord::chat(&user, &format!("message {sequence}")))
                        .expect("append");
                }
            }));
        }
        for handle in handles {
            handle.join().expect("writer thread");
        }

        let content = read_current_log(&writer);
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), threads * per_thread);
        for line in lines {
            let (_timestamp, record) = line.split_once(' ').expect("timestamp prefix");
            assert!(record.starts_with("chat: "), "incomplete line: {line}");
            assert!(record.ends_with(|c: char| c.is_ascii_digit()));
        }
        assert!(content.ends_with('\n'));
    }

    #[test]
    fn regression_parent_path_collision_with_file_surfaces_error() {
        let temp = tempdir().expect("tempdir");
        // Occupy the channel segment with a regular file so the directory
        // chain cannot be created.
        std::fs::write(temp.path().join("#plans"), "occupied").expect("seed file");

        let writer = ChannelLogWriter::new(temp.path(), "#plans").expect("writer");
        let error = writer
            .append(&LogRecord::self_connected())
            .expect_err("append into non-directory should fail");
        assert!(error.to_string().contains("could not create log directory"));
    }
}

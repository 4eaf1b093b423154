use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Utc};

/// Resolves the log file for `channel` at the UTC instant `now`.
///
/// Layout is `root/channel/YYYY/MM/DD.txt` with zero-padded UTC calendar
/// fields. Recomputed on every append since the date may roll over between
/// calls. Pure; performs no I/O.
pub fn resolve_log_path(root: &Path, channel: &str, now: DateTime<Utc>) -> PathBuf {
    root.join(channel)
        .join(format!("{:04}", now.year()))
        .join(format!("{:02}", now.month()))
        .join(format!("{:02}.txt", now.day()))
}

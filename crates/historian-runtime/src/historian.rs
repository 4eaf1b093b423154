//! The dispatcher implementation: every observed event becomes a log record.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Result};
use historian_core::{ChannelLogWriter, LogRecord, UserRef};
use tracing::warn;

use crate::events::DisconnectCause;
use crate::observer::ChannelObserver;

#[derive(Debug, Clone)]
/// Immutable session configuration, set once at startup and consulted by
/// every handler.
pub struct HistorianConfig {
    pub log_root: PathBuf,
    pub channel: String,
    /// Login under which the daemon's own session is authenticated; used to
    /// tell the daemon's own presence events apart from other users'.
    pub login: String,
    pub version: String,
}

/// Records every observable channel event into the append-only log.
#[derive(Debug)]
pub struct Historian {
    config: HistorianConfig,
    writer: ChannelLogWriter,
}

impl Historian {
    pub fn new(config: HistorianConfig) -> Result<Self> {
        if config.login.trim().is_empty() {
            bail!("session login must be non-empty");
        }
        let writer = ChannelLogWriter::new(config.log_root.clone(), config.channel.clone())?;
        Ok(Self { config, writer })
    }

    pub fn writer(&self) -> &ChannelLogWriter {
        &self.writer
    }

    fn is_self(&self, user: &UserRef) -> bool {
        user.login == self.config.login
    }

    /// Appends the startup record; called before any network event is
    /// possible.
    pub fn record_started(&self) -> Result<()> {
        self.writer
            .append(&LogRecord::self_started(&self.config.version))
    }

    /// Appends the final teardown record. Invoked best-effort by the hosting
    /// process on shutdown; abrupt termination may skip it.
    pub fn record_shutdown(&self) -> Result<()> {
        self.writer.append(&LogRecord::self_shutting_down())
    }
}

impl ChannelObserver for Historian {
    fn on_connected(&self) -> Result<()> {
        self.writer.append(&LogRecord::self_connected())
    }

    fn on_connection_failed(&self, failures: &BTreeMap<String, String>) -> Result<()> {
        // Each address is logged independently; a write failure for one must
        // not prevent attempts for the rest.
        for (address, exception_class) in failures {
            if let Err(error) = self
                .writer
                .append(&LogRecord::connection_failed(address, exception_class))
            {
                warn!(
                    address = %address,
                    error = %error,
                    "failed to record connection failure"
                );
            }
        }
        Ok(())
    }

    fn on_disconnected(&self, cause: Option<&DisconnectCause>) -> Result<()> {
        let record = match cause {
            Some(cause) => LogRecord::self_disconnected(&cause.class, &cause.message),
            None => LogRecord::self_disconnected_unknown(),
        };
        self.writer.append(&record)
    }

    fn on_message(&self, user: &UserRef, text: &str) -> Result<()> {
        self.writer.append(&LogRecord::chat(user, text))
    }

    fn on_private_message(&self, user: &UserRef, text: &str) -> Result<()> {
        self.writer.append(&LogRecord::chat(user, text))
    }

    fn on_action(&self, user: &UserRef, text: &str) -> Result<()> {
        self.writer.append(&LogRecord::action(user, text))
    }

    fn on_notice(&self, user: &UserRef, text: &str) -> Result<()> {
        self.writer.append(&LogRecord::notice(user, text))
    }

    fn on_topic_changed(&self, user: &UserRef, topic: &str) -> Result<()> {
        self.writer.append(&LogRecord::topic_change(user, topic))
    }

    fn on_join(&self, user: &UserRef, channel_id: &str, channel_name: &str) -> Result<()> {
        if self.is_self(user) {
            return self
                .writer
                .append(&LogRecord::self_joined(channel_id, channel_name));
        }
        self.writer.append(&LogRecord::available(user))
    }

    fn on_part(&self, user: &UserRef, reason: &str) -> Result<()> {
        // The daemon's own part is not recorded.
        if self.is_self(user) {
            return Ok(());
        }
        self.writer.append(&LogRecord::unavailable(user, reason))
    }
}

//! Core record model and append-only log storage for the channel historian.
//!
//! Provides user identity rendering, canonical record construction, UTC
//! date-partitioned log path resolution, and the serialized log writer used
//! by the event dispatcher.

pub mod identity;
pub mod log_path;
pub mod log_writer;
pub mod record;

pub use identity::UserRef;
pub use log_path::resolve_log_path;
pub use log_writer::{format_log_timestamp, ChannelLogWriter};
pub use record::{LogRecord, RecordKind};

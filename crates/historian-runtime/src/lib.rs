//! Channel event dispatch for the historian daemon.
//!
//! Receives typed events from the upstream chat-client boundary, normalizes
//! them into canonical records, and appends them through the serialized log
//! writer. Also hosts the newline-delimited JSON event feed used to drive the
//! dispatcher from a single upstream source.

pub mod events;
pub mod historian;
pub mod ingress;
pub mod observer;

pub use events::{ChannelEvent, DisconnectCause};
pub use historian::{Historian, HistorianConfig};
pub use ingress::{parse_event_line, run_event_feed, EventFeedReport, EventParseError};
pub use observer::{dispatch, ChannelObserver};

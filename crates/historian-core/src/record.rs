//! Canonical record construction for observable channel events.

use serde::{Deserialize, Serialize};

use crate::identity::UserRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Enumerates the record categories written to channel logs.
pub enum RecordKind {
    Chat,
    Notice,
    Topic,
    Status,
    SelfLifecycle,
}

impl RecordKind {
    /// Stable lowercase prefix the record is rendered under.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Notice => "notice",
            Self::Topic => "topic",
            Self::Status => "status",
            Self::SelfLifecycle => "self",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One formatted record, ephemeral until serialized to a log line.
pub struct LogRecord {
    pub kind: RecordKind,
    pub body: String,
}

impl LogRecord {
    pub fn chat(user: &UserRef, text: &str) -> Self {
        Self {
            kind: RecordKind::Chat,
            body: format!("{}: {}", user.identity_string(), text),
        }
    }

    pub fn action(user: &UserRef, text: &str) -> Self {
        Self {
            kind: RecordKind::Chat,
            body: format!("{}: /me {}", user.identity_string(), text),
        }
    }

    pub fn notice(user: &UserRef, text: &str) -> Self {
        Self {
            kind: RecordKind::Notice,
            body: format!("{}: {}", user.identity_string(), text),
        }
    }

    pub fn topic_change(changer: &UserRef, topic: &str) -> Self {
        Self {
            kind: RecordKind::Topic,
            body: format!("{}: {}", changer.identity_string(), topic),
        }
    }

    pub fn available(user: &UserRef) -> Self {
        Self {
            kind: RecordKind::Status,
            body: format!("{}: available", user.identity_string()),
        }
    }

    pub fn unavailable(user: &UserRef, reason: &str) -> Self {
        Self {
            kind: RecordKind::Status,
            body: format!("{}: unavailable ({})", user.identity_string(), reason),
        }
    }

    pub fn self_joined(channel_id: &str, channel_name: &str) -> Self {
        Self {
            kind: RecordKind::SelfLifecycle,
            body: format!("joined: {channel_id} {channel_name}"),
        }
    }

    pub fn self_connected() -> Self {
        Self {
            kind: RecordKind::SelfLifecycle,
            body: "connected".to_string(),
        }
    }

    pub fn self_disconnected(cause_class: &str, cause_message: &str) -> Self {
        Self {
            kind: RecordKind::SelfLifecycle,
            body: format!("disconnected: {cause_class} - {cause_message}"),
        }
    }

    pub fn self_disconnected_unknown() -> Self {
        Self {
            kind: RecordKind::SelfLifecycle,
            body: "disconnected: (no exception information available)".to_string(),
        }
    }

    pub fn connection_failed(address: &str, exception_class: &str) -> Self {
        Self {
            kind: RecordKind::SelfLifecycle,
            body: format!("connection failed: {address} - {exception_class}"),
        }
    }

    pub fn self_started(version: &str) -> Self {
        Self {
            kind: RecordKind::SelfLifecycle,
            body: format!("started: {version}"),
        }
    }

    pub fn self_shutting_down() -> Self {
        Self {
            kind: RecordKind::SelfLifecycle,
            body: "shutting down".to_string(),
        }
    }

    /// Renders the record portion of a log line, without the timestamp.
    pub fn render(&self) -> String {
        format!("{}: {}", self.kind.prefix(), self.body)
    }
}

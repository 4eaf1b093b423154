//! Typed events delivered by the upstream chat client.

use std::collections::BTreeMap;

use historian_core::UserRef;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Cause attached to a disconnect, when the upstream client knows one.
pub struct DisconnectCause {
    pub class: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// One observable occurrence on the monitored channel, in delivery order.
pub enum ChannelEvent {
    Connected,
    ConnectionFailed {
        /// Remote address mapped to the class of the failure it produced.
        failures: BTreeMap<String, String>,
    },
    Disconnected {
        #[serde(default)]
        cause: Option<DisconnectCause>,
    },
    Message {
        user: UserRef,
        text: String,
    },
    PrivateMessage {
        user: UserRef,
        text: String,
    },
    Action {
        user: UserRef,
        text: String,
    },
    Notice {
        user: UserRef,
        text: String,
    },
    TopicChanged {
        user: UserRef,
        topic: String,
    },
    Joined {
        user: UserRef,
        #[serde(default)]
        channel_id: String,
        #[serde(default)]
        channel_name: String,
    },
    Parted {
        user: UserRef,
        #[serde(default)]
        reason: String,
    },
}

use std::collections::BTreeMap;

use anyhow::Result;
use historian_core::UserRef;

use crate::events::{ChannelEvent, DisconnectCause};

/// Named event-handling entry points invoked by the upstream chat client.
///
/// One entry point per observable event kind. Implementations only observe
/// and record; no entry point transforms protocol state.
pub trait ChannelObserver: Send + Sync {
    fn on_connected(&self) -> Result<()>;
    fn on_connection_failed(&self, failures: &BTreeMap<String, String>) -> Result<()>;
    fn on_disconnected(&self, cause: Option<&DisconnectCause>) -> Result<()>;
    fn on_message(&self, user: &UserRef, text: &str) -> Result<()>;
    fn on_private_message(&self, user: &UserRef, text: &str) -> Result<()>;
    fn on_action(&self, user: &UserRef, text: &str) -> Result<()>;
    fn on_notice(&self, user: &UserRef, text: &str) -> Result<()>;
    fn on_topic_changed(&self, user: &UserRef, topic: &str) -> Result<()>;
    fn on_join(&self, user: &UserRef, channel_id: &str, channel_name: &str) -> Result<()>;
    fn on_part(&self, user: &UserRef, reason: &str) -> Result<()>;
}

/// Routes one typed event to its observer entry point.
pub fn dispatch(observer: &dyn ChannelObserver, event: &ChannelEvent) -> Result<()> {
    match event {
        ChannelEvent::Connected => observer.on_connected(),
        ChannelEvent::ConnectionFailed { failures } => observer.on_connection_failed(failures),
        ChannelEvent::Disconnected { cause } => observer.on_disconnected(cause.as_ref()),
        ChannelEvent::Message { user, text } => observer.on_message(user, text),
        ChannelEvent::PrivateMessage { user, text } => observer.on_private_message(user, text),
        ChannelEvent::Action { user, text } => observer.on_action(user, text),
        ChannelEvent::Notice { user, text } => observer.on_notice(user, text),
        ChannelEvent::TopicChanged { user, topic } => observer.on_topic_changed(user, topic),
        ChannelEvent::Joined {
            user,
            channel_id,
            channel_name,
        } => observer.on_join(user, channel_id, channel_name),
        ChannelEvent::Parted { user, reason } => observer.on_part(user, reason),
    }
}

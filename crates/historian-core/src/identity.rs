use serde::{Deserialize, Serialize};

const EMPTY_FIELD_PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Reference to a channel user as reported by the upstream chat client.
///
/// Any field may be empty; upstream clients routinely omit one or more of
/// them. References are constructed fresh per event and never persisted.
pub struct UserRef {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub hostmask: String,
    #[serde(default)]
    pub nick: String,
}

impl UserRef {
    pub fn new(
        login: impl Into<String>,
        hostmask: impl Into<String>,
        nick: impl Into<String>,
    ) -> Self {
        Self {
            login: login.into(),
            hostmask: hostmask.into(),
            nick: nick.into(),
        }
    }

    /// Renders the composite `login@hostmask/nick` identity string, with a
    /// literal `-` substituted for each empty field.
    pub fn identity_string(&self) -> String {
        format!(
            "{}@{}/{}",
            placeholder_if_empty(&self.login),
            placeholder_if_empty(&self.hostmask),
            placeholder_if_empty(&self.nick)
        )
    }
}

fn placeholder_if_empty(field: &str) -> &str {
    if field.is_empty() {
        EMPTY_FIELD_PLACEHOLDER
    } else {
        field
    }
}

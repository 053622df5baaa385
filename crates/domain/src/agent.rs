use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// Which booking source dialect an `Agent`s calendar credential speaks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarApiVersion {
    /// Key based query API.
    Legacy,
    /// Bearer token API with a version header.
    V2,
}

impl Default for CalendarApiVersion {
    fn default() -> Self {
        Self::Legacy
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarApiSettings {
    pub provider: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    #[serde(default)]
    pub version: CalendarApiVersion,
}

impl CalendarApiSettings {
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }
}

/// An `Agent` is the owning context for reminder rules. It carries the
/// calendar credential used to query bookings and points at the messaging
/// `Channel` used for message deliveries.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub id: ID,
    pub name: String,
    pub calendar: CalendarApiSettings,
    /// Event type used by rules that do not pin one themselves.
    pub default_event_type: Option<String>,
    pub channel_id: Option<ID>,
}

impl Agent {
    pub fn new(name: &str) -> Self {
        Self {
            id: Default::default(),
            name: name.into(),
            calendar: CalendarApiSettings {
                provider: "calcom".into(),
                api_key: None,
                base_url: None,
                version: Default::default(),
            },
            default_event_type: None,
            channel_id: None,
        }
    }
}

impl Entity for Agent {
    fn id(&self) -> &ID {
        &self.id
    }
}

use crate::shared::entity::{Entity, ID};

/// Messaging gateway dialects the dispatcher can speak.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GatewayKind {
    /// Self hosted gateway with a token header and a sendText endpoint.
    Evolution,
    /// Hosted cloud API with bearer auth and a messages endpoint.
    CloudApi,
}

impl GatewayKind {
    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind.trim().to_lowercase().as_str() {
            "evolution" => Some(Self::Evolution),
            "cloudapi" | "cloud-api" | "cloud_api" => Some(Self::CloudApi),
            _ => None,
        }
    }
}

/// A `Channel` is the messaging destination configuration an `Agent` sends
/// reminders through. The `kind` field is stored as free text; an unknown
/// kind makes the channel unusable for reminders rather than failing the
/// row when it is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub id: ID,
    pub kind: String,
    pub base_url: Option<String>,
    pub api_token: Option<String>,
    /// Gateway specific sender id: instance name for the self hosted
    /// gateway, sender number id for the cloud API.
    pub instance: Option<String>,
}

impl Channel {
    pub fn new(kind: &str) -> Self {
        Self {
            id: Default::default(),
            kind: kind.into(),
            base_url: None,
            api_token: None,
            instance: None,
        }
    }

    pub fn gateway(&self) -> Option<GatewayKind> {
        GatewayKind::from_kind(&self.kind)
    }

    /// True when the kind is supported and every field that dialect needs
    /// is present. Reminders for agents pointing at a channel that is not
    /// ready are skipped with a configuration message.
    pub fn is_ready(&self) -> bool {
        let has = |field: &Option<String>| field.as_deref().map_or(false, |v| !v.is_empty());
        match self.gateway() {
            Some(GatewayKind::Evolution) => {
                has(&self.base_url) && has(&self.api_token) && has(&self.instance)
            }
            Some(GatewayKind::CloudApi) => has(&self.api_token) && has(&self.instance),
            None => false,
        }
    }
}

impl Entity for Channel {
    fn id(&self) -> &ID {
        &self.id
    }
}

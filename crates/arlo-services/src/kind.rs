//! Service kinds
//!
//! Services are identified by a closed enum rather than raw strings; the
//! string form appears only at the registration boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ServiceError;

/// Every service the integration exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    /// Sound the siren on the addressed entities
    SirenOn,
    /// Sound the siren on every siren-capable device
    SirensOn,
    /// Silence the siren on the addressed entities
    SirenOff,
    /// Silence the siren on every siren-capable device
    SirensOff,
    /// Reboot the addressed devices
    RestartDevice,
    /// Feed a canned backend packet into the event stream
    InjectResponse,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 6] = [
        ServiceKind::SirenOn,
        ServiceKind::SirensOn,
        ServiceKind::SirenOff,
        ServiceKind::SirensOff,
        ServiceKind::RestartDevice,
        ServiceKind::InjectResponse,
    ];

    /// Service name as registered with the frontend
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::SirenOn => "siren_on",
            ServiceKind::SirensOn => "sirens_on",
            ServiceKind::SirenOff => "siren_off",
            ServiceKind::SirensOff => "sirens_off",
            ServiceKind::RestartDevice => "restart_device",
            ServiceKind::InjectResponse => "inject_response",
        }
    }

    /// Whether this kind only acts on siren-capable devices
    pub fn is_siren_service(&self) -> bool {
        matches!(
            self,
            ServiceKind::SirenOn
                | ServiceKind::SirensOn
                | ServiceKind::SirenOff
                | ServiceKind::SirensOff
        )
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceKind {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ServiceError::UnknownService(s.to_string()))
    }
}

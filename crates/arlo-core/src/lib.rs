//! Core types for the Arlo integration
//!
//! Shared vocabulary used by every other crate in the workspace: entity IDs,
//! the entity domains Arlo devices surface under, and device capability keys.

mod capability;
mod entity_id;

pub use capability::Capability;
pub use entity_id::{EntityId, EntityIdError};

/// Integration domain name (service calls are namespaced under it)
pub const COMPONENT_DOMAIN: &str = "aarlo";

/// Entity domains an Arlo device can be registered under.
///
/// Base stations show up as alarm control panels, cameras and doorbells as
/// cameras. Siren and restart services search both.
pub mod domains {
    /// Alarm control panel domain (base stations)
    pub const ALARM_CONTROL_PANEL: &str = "alarm_control_panel";

    /// Camera domain (cameras, doorbells)
    pub const CAMERA: &str = "camera";

    /// Lookup order for device-targeting services
    pub const SERVICE_LOOKUP: [&str; 2] = [ALARM_CONTROL_PANEL, CAMERA];
}

/// The kind of physical Arlo device behind an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Camera,
    BaseStation,
    Doorbell,
    Light,
}

impl DeviceKind {
    /// Entity domain this kind of device registers under
    pub fn entity_domain(&self) -> &'static str {
        match self {
            DeviceKind::BaseStation => domains::ALARM_CONTROL_PANEL,
            DeviceKind::Camera | DeviceKind::Doorbell => domains::CAMERA,
            DeviceKind::Light => "light",
        }
    }
}

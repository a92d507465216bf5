//! Device capability keys
//!
//! Arlo reports per-device capabilities as string keys in its device
//! properties. Services gate on these before acting on a device.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A capability an Arlo device may advertise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    /// Device has a controllable siren
    SirenState,
    /// Device can detect motion
    MotionDetected,
    /// Device has a doorbell button
    ButtonPressed,
    /// Device reports battery level
    BatteryLevel,
    /// Device reports signal strength
    SignalStrength,
}

impl Capability {
    /// Wire key as reported by the Arlo backend
    pub fn key(&self) -> &'static str {
        match self {
            Capability::SirenState => "sirenState",
            Capability::MotionDetected => "motionDetected",
            Capability::ButtonPressed => "buttonPressed",
            Capability::BatteryLevel => "batteryLevel",
            Capability::SignalStrength => "signalStrength",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

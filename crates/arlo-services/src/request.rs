//! Typed service data
//!
//! Raw service data arrives as JSON; it is parsed into a [`ServiceRequest`]
//! up front so handlers never look at loose maps.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use arlo_client::SirenArgs;
use arlo_core::EntityId;

use crate::{ServiceError, ServiceKind};

/// `entity_id` may be a single id or a list of ids
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(EntityId),
    Many(Vec<EntityId>),
}

impl From<OneOrMany> for Vec<EntityId> {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(id) => vec![id],
            OneOrMany::Many(ids) => ids,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SirenOnData {
    entity_id: OneOrMany,
    duration: u64,
    volume: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SirensOnData {
    duration: u64,
    volume: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EntityTargetData {
    entity_id: OneOrMany,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InjectResponseData {
    filename: String,
}

/// A fully parsed and validated service call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceRequest {
    SirenOn {
        entity_ids: Vec<EntityId>,
        args: SirenArgs,
    },
    SirensOn {
        args: SirenArgs,
    },
    SirenOff {
        entity_ids: Vec<EntityId>,
    },
    SirensOff,
    RestartDevice {
        entity_ids: Vec<EntityId>,
    },
    InjectResponse {
        filename: String,
    },
}

impl ServiceRequest {
    /// Parse raw service data for the given service kind
    pub fn parse(kind: ServiceKind, data: serde_json::Value) -> Result<Self, ServiceError> {
        match kind {
            ServiceKind::SirenOn => {
                let data: SirenOnData = decode(kind, data)?;
                Ok(ServiceRequest::SirenOn {
                    entity_ids: data.entity_id.into(),
                    args: siren_args(kind, data.duration, data.volume)?,
                })
            }
            ServiceKind::SirensOn => {
                let data: SirensOnData = decode(kind, data)?;
                Ok(ServiceRequest::SirensOn {
                    args: siren_args(kind, data.duration, data.volume)?,
                })
            }
            ServiceKind::SirenOff => {
                let data: EntityTargetData = decode(kind, data)?;
                Ok(ServiceRequest::SirenOff {
                    entity_ids: data.entity_id.into(),
                })
            }
            ServiceKind::SirensOff => Ok(ServiceRequest::SirensOff),
            ServiceKind::RestartDevice => {
                let data: EntityTargetData = decode(kind, data)?;
                Ok(ServiceRequest::RestartDevice {
                    entity_ids: data.entity_id.into(),
                })
            }
            ServiceKind::InjectResponse => {
                let data: InjectResponseData = decode(kind, data)?;
                if data.filename.is_empty() {
                    return Err(ServiceError::InvalidData {
                        kind,
                        reason: "filename must not be empty".to_string(),
                    });
                }
                Ok(ServiceRequest::InjectResponse {
                    filename: data.filename,
                })
            }
        }
    }

    /// The service kind this request belongs to
    pub fn kind(&self) -> ServiceKind {
        match self {
            ServiceRequest::SirenOn { .. } => ServiceKind::SirenOn,
            ServiceRequest::SirensOn { .. } => ServiceKind::SirensOn,
            ServiceRequest::SirenOff { .. } => ServiceKind::SirenOff,
            ServiceRequest::SirensOff => ServiceKind::SirensOff,
            ServiceRequest::RestartDevice { .. } => ServiceKind::RestartDevice,
            ServiceRequest::InjectResponse { .. } => ServiceKind::InjectResponse,
        }
    }
}

fn decode<T: DeserializeOwned>(
    kind: ServiceKind,
    data: serde_json::Value,
) -> Result<T, ServiceError> {
    serde_json::from_value(data).map_err(|err| ServiceError::InvalidData {
        kind,
        reason: err.to_string(),
    })
}

fn siren_args(kind: ServiceKind, duration: u64, volume: u32) -> Result<SirenArgs, ServiceError> {
    if duration == 0 {
        return Err(ServiceError::InvalidData {
            kind,
            reason: "duration must be positive".to_string(),
        });
    }
    if volume == 0 {
        return Err(ServiceError::InvalidData {
            kind,
            reason: "volume must be positive".to_string(),
        });
    }
    Ok(SirenArgs {
        duration: Duration::from_secs(duration),
        volume,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_siren_on_single_entity() {
        let request = ServiceRequest::parse(
            ServiceKind::SirenOn,
            json!({"entity_id": "camera.front_door", "duration": 10, "volume": 4}),
        )
        .unwrap();
        assert_eq!(
            request,
            ServiceRequest::SirenOn {
                entity_ids: vec!["camera.front_door".parse().unwrap()],
                args: SirenArgs {
                    duration: Duration::from_secs(10),
                    volume: 4
                },
            }
        );
    }

    #[test]
    fn test_siren_on_entity_list() {
        let request = ServiceRequest::parse(
            ServiceKind::SirenOn,
            json!({
                "entity_id": ["camera.front_door", "alarm_control_panel.home"],
                "duration": 5,
                "volume": 8,
            }),
        )
        .unwrap();
        match request {
            ServiceRequest::SirenOn { entity_ids, .. } => assert_eq!(entity_ids.len(), 2),
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn test_missing_fields_rejected() {
        let err = ServiceRequest::parse(
            ServiceKind::SirenOn,
            json!({"entity_id": "camera.front_door"}),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::InvalidData {
                kind: ServiceKind::SirenOn,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_duration_and_volume_rejected() {
        for bad in [
            json!({"duration": 0, "volume": 4}),
            json!({"duration": 10, "volume": 0}),
        ] {
            assert!(ServiceRequest::parse(ServiceKind::SirensOn, bad).is_err());
        }
    }

    #[test]
    fn test_sirens_off_takes_no_data() {
        let request = ServiceRequest::parse(ServiceKind::SirensOff, json!({})).unwrap();
        assert_eq!(request, ServiceRequest::SirensOff);
        assert_eq!(request.kind(), ServiceKind::SirensOff);
    }

    #[test]
    fn test_inject_response_requires_filename() {
        let request = ServiceRequest::parse(
            ServiceKind::InjectResponse,
            json!({"filename": "packet.json"}),
        )
        .unwrap();
        assert_eq!(
            request,
            ServiceRequest::InjectResponse {
                filename: "packet.json".to_string()
            }
        );

        assert!(ServiceRequest::parse(ServiceKind::InjectResponse, json!({"filename": ""})).is_err());
        assert!(ServiceRequest::parse(ServiceKind::InjectResponse, json!({})).is_err());
    }

    #[test]
    fn test_bad_entity_id_rejected() {
        let err = ServiceRequest::parse(
            ServiceKind::RestartDevice,
            json!({"entity_id": "not-an-entity"}),
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidData { .. }));
    }
}

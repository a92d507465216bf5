//! Entity registry
//!
//! Maps entity IDs to the devices behind them. Device-targeting services
//! search the alarm-control-panel domain first, then the camera domain,
//! mirroring where base stations and cameras register.

use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

use arlo_client::ArloDevice;
use arlo_core::{domains, Capability, EntityId};

use crate::ServiceError;

/// Registry of entities owned by this integration
#[derive(Default)]
pub struct EntityRegistry {
    entities: DashMap<EntityId, Arc<dyn ArloDevice>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a device under its entity id. Re-registering replaces.
    pub fn register(&self, entity_id: EntityId, device: Arc<dyn ArloDevice>) {
        debug!(entity_id = %entity_id, device = device.unique_id(), "registering entity");
        self.entities.insert(entity_id, device);
    }

    /// Look up a single entity by full id
    pub fn get(&self, entity_id: &EntityId) -> Option<Arc<dyn ArloDevice>> {
        self.entities.get(entity_id).map(|r| r.value().clone())
    }

    /// Resolve an entity for a device-targeting service.
    ///
    /// The id must live in one of the service lookup domains; anything else
    /// (or an unknown id) reports not-found naming the searched domains.
    pub fn service_entity(&self, entity_id: &EntityId) -> Result<Arc<dyn ArloDevice>, ServiceError> {
        for domain in domains::SERVICE_LOOKUP {
            if entity_id.domain() == domain {
                if let Some(device) = self.get(entity_id) {
                    return Ok(device);
                }
            }
        }
        Err(ServiceError::EntityNotFound {
            entity_id: entity_id.to_string(),
            domains: domains::SERVICE_LOOKUP.join(","),
        })
    }

    /// Every registered device advertising a given capability
    pub fn devices_with_capability(&self, capability: Capability) -> Vec<Arc<dyn ArloDevice>> {
        self.entities
            .iter()
            .filter(|r| r.value().has_capability(capability))
            .map(|r| r.value().clone())
            .collect()
    }

    /// Whether any registered device has a siren
    pub fn has_sirens(&self) -> bool {
        self.entities
            .iter()
            .any(|r| r.value().has_capability(Capability::SirenState))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

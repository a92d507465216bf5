//! Service layer errors

use std::path::PathBuf;
use thiserror::Error;

use crate::ServiceKind;
use arlo_client::DeviceError;

/// Result type for service calls
pub type ServiceResult<T = ()> = Result<T, ServiceError>;

/// Errors a service call can produce
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The service name does not belong to this integration
    #[error("unknown service: {0}")]
    UnknownService(String),

    /// The service exists but was not enabled at registration time
    #[error("service {0} is not registered")]
    NotRegistered(ServiceKind),

    /// Service data failed to parse or validate
    #[error("invalid service data for {kind}: {reason}")]
    InvalidData { kind: ServiceKind, reason: String },

    /// No registered entity matched the requested id in any searched domain
    #[error("{entity_id} not found in {domains}")]
    EntityNotFound { entity_id: String, domains: String },

    /// Reading the injection file failed
    #[error("failed to read injection file {path}: {source}")]
    InjectionFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The injection file was not valid JSON
    #[error("injection file {path} is not valid JSON: {source}")]
    InjectionJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A device rejected the command
    #[error(transparent)]
    Device(#[from] DeviceError),
}

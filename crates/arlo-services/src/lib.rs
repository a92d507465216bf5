//! Services for the Arlo integration
//!
//! The component exposes six services: per-entity siren on/off, all-device
//! siren on/off, device restart, and (opt-in) backend packet injection. This
//! crate owns the service vocabulary, typed service-data parsing, the entity
//! registry the calls resolve against, and the dispatcher.

mod dispatcher;
mod error;
mod kind;
mod registry;
mod request;

pub use dispatcher::{DispatchOptions, ServiceDispatcher};
pub use error::{ServiceError, ServiceResult};
pub use kind::ServiceKind;
pub use registry::EntityRegistry;
pub use request::ServiceRequest;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

//! Configuration for the Arlo integration
//!
//! Declares the YAML schema the component accepts (the mirror of the source
//! component's `CONFIG_SCHEMA`), applies defaults, validates the result and
//! translates it into the [`arlo_client::Credentials`] bundle the client
//! constructor takes.
//!
//! ```ignore
//! let config = arlo_config::load_config("/config/aarlo.yaml")?;
//! let credentials = config.credentials(Path::new("/config"));
//! ```

mod error;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use schema::ArloConfig;

use std::path::Path;

/// Load and validate the integration configuration from a YAML file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<ArloConfig> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "loaded configuration file");
    ArloConfig::from_yaml_str(&raw)
}

//! Configuration schema and credentials translation

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use arlo_client::{
    BackendOptions, Credentials, DoorbellDebounce, Endpoints, MediaOptions, RefreshCadence,
    SnapshotOptions, TfaSettings, Timeouts, DEFAULT_AUTH_HOST, DEFAULT_HOST,
};

use crate::{ConfigError, ConfigResult};

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_auth_host() -> String {
    DEFAULT_AUTH_HOST.to_string()
}

fn default_scan_interval() -> u64 {
    60
}

fn default_db_motion_time() -> u64 {
    30
}

fn default_db_ding_time() -> u64 {
    10
}

fn default_recent_time() -> u64 {
    600
}

fn default_last_format() -> String {
    "%m-%d %H:%M".to_string()
}

fn default_req_timeout() -> u64 {
    60
}

fn default_str_timeout() -> u64 {
    120
}

fn default_snapshot_timeout() -> u64 {
    60
}

fn default_user_agent() -> String {
    "arlo".to_string()
}

fn default_mode_api() -> String {
    "auto".to_string()
}

fn default_tfa_source() -> String {
    "imap".to_string()
}

fn default_tfa_type() -> String {
    "email".to_string()
}

fn default_library_days() -> u32 {
    27
}

fn default_stream_snapshot_stop() -> u64 {
    10
}

fn default_user_stream_delay() -> u64 {
    1
}

fn default_true() -> bool {
    true
}

fn default_backend() -> String {
    "sse".to_string()
}

/// The integration's YAML configuration.
///
/// Only `username` and `password` are required; every other key carries the
/// same default the source component declares. Durations are plain seconds.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ArloConfig {
    pub username: String,
    pub password: String,

    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_auth_host")]
    pub auth_host: String,

    /// Entity poll interval, seconds
    #[serde(default = "default_scan_interval")]
    pub scan_interval: u64,

    #[serde(default)]
    pub packet_dump: bool,
    #[serde(default)]
    pub cache_videos: bool,

    /// Doorbell motion debounce window, seconds
    #[serde(default = "default_db_motion_time")]
    pub db_motion_time: u64,
    /// Doorbell ding debounce window, seconds
    #[serde(default = "default_db_ding_time")]
    pub db_ding_time: u64,
    /// Window within which library activity counts as recent, seconds
    #[serde(default = "default_recent_time")]
    pub recent_time: u64,

    #[serde(default = "default_last_format")]
    pub last_format: String,

    /// Client state directory; empty means `<config_dir>/.aarlo`
    #[serde(default)]
    pub conf_dir: String,

    #[serde(default = "default_req_timeout")]
    pub req_timeout: u64,
    #[serde(default = "default_str_timeout")]
    pub str_timeout: u64,

    #[serde(default)]
    pub no_media_upload: bool,
    #[serde(default)]
    pub media_retry: Vec<u64>,
    #[serde(default)]
    pub snapshot_checks: Vec<u64>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_mode_api")]
    pub mode_api: String,

    /// How often to refresh the device list, seconds (0 disables)
    #[serde(default)]
    pub device_refresh: u64,
    /// How often to refresh modes, seconds (0 disables)
    #[serde(default)]
    pub mode_refresh: u64,
    /// Forced backend reconnect cadence, seconds (0 disables)
    #[serde(default)]
    pub reconnect_every: u64,

    #[serde(default)]
    pub verbose_debug: bool,

    /// Expose the packet-injection service
    #[serde(default)]
    pub injection_service: bool,

    #[serde(default = "default_snapshot_timeout")]
    pub snapshot_timeout: u64,

    #[serde(default = "default_tfa_source")]
    pub tfa_source: String,
    #[serde(default = "default_tfa_type")]
    pub tfa_type: String,
    #[serde(default)]
    pub tfa_host: Option<String>,
    #[serde(default)]
    pub tfa_username: Option<String>,
    #[serde(default)]
    pub tfa_password: Option<String>,

    #[serde(default = "default_library_days")]
    pub library_days: u32,

    #[serde(default)]
    pub serial_ids: bool,

    #[serde(default)]
    pub stream_snapshot: bool,
    #[serde(default = "default_stream_snapshot_stop")]
    pub stream_snapshot_stop: u64,

    #[serde(default)]
    pub save_updates_to: Option<String>,
    #[serde(default)]
    pub save_media_to: Option<String>,

    #[serde(default = "default_user_stream_delay")]
    pub user_stream_delay: u64,

    #[serde(default)]
    pub no_unicode_squash: bool,

    #[serde(default = "default_true")]
    pub save_session: bool,

    #[serde(default = "default_backend")]
    pub backend: String,

    #[serde(default)]
    pub cipher_list: Option<String>,
}

impl ArloConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(raw: &str) -> ConfigResult<Self> {
        let config: ArloConfig = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.username.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "username".into(),
                reason: "must not be empty",
            });
        }
        if self.password.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "password".into(),
                reason: "must not be empty",
            });
        }
        if self.scan_interval == 0 {
            return Err(ConfigError::InvalidValue {
                key: "scan_interval".into(),
                reason: "must be at least one second",
            });
        }
        match self.backend.as_str() {
            "sse" | "mqtt" => {}
            _ => {
                return Err(ConfigError::InvalidValue {
                    key: "backend".into(),
                    reason: "must be 'sse' or 'mqtt'",
                })
            }
        }
        Ok(())
    }

    /// Translate the configuration into the client credentials bundle.
    ///
    /// `config_dir` supplies the fallback state directory when `conf_dir` is
    /// left empty.
    pub fn credentials(&self, config_dir: &Path) -> Credentials {
        let storage_dir = if self.conf_dir.is_empty() {
            config_dir.join(".aarlo")
        } else {
            self.conf_dir.clone().into()
        };

        Credentials::builder(&self.username, &self.password)
            .endpoints(Endpoints {
                host: self.host.clone(),
                auth_host: self.auth_host.clone(),
            })
            .storage_dir(storage_dir)
            .timeouts(Timeouts {
                request: Duration::from_secs(self.req_timeout),
                stream: Duration::from_secs(self.str_timeout),
                snapshot: Duration::from_secs(self.snapshot_timeout),
            })
            .debounce(DoorbellDebounce {
                motion: Duration::from_secs(self.db_motion_time),
                ding: Duration::from_secs(self.db_ding_time),
            })
            .recent_activity_window(Duration::from_secs(self.recent_time))
            .last_format(&self.last_format)
            .media(MediaOptions {
                cache_videos: self.cache_videos,
                no_upload: self.no_media_upload,
                retry_schedule: self.media_retry.clone(),
                library_days: self.library_days,
                save_media_to: self.save_media_to.clone(),
                save_updates_to: self.save_updates_to.clone(),
                user_stream_delay: Duration::from_secs(self.user_stream_delay),
            })
            .snapshots(SnapshotOptions {
                checks: self.snapshot_checks.clone(),
                from_stream: self.stream_snapshot,
                stream_stop_after: self.stream_snapshot_stop,
            })
            .refresh(RefreshCadence {
                devices: Duration::from_secs(self.device_refresh),
                modes: Duration::from_secs(self.mode_refresh),
                reconnect: Duration::from_secs(self.reconnect_every),
            })
            .tfa(TfaSettings {
                source: self.tfa_source.clone(),
                kind: self.tfa_type.clone(),
                host: self.tfa_host.clone(),
                username: self.tfa_username.clone(),
                password: self.tfa_password.clone(),
            })
            .backend(BackendOptions {
                backend: self.backend.clone(),
                user_agent: self.user_agent.clone(),
                mode_api: self.mode_api.clone(),
                cipher_list: self.cipher_list.clone(),
                packet_dump: self.packet_dump,
                verbose_debug: self.verbose_debug,
                serial_ids: self.serial_ids,
                keep_unicode_names: self.no_unicode_squash,
                save_session: self.save_session,
            })
            .build()
    }
}

//! Connection parameters for the Arlo cloud client
//!
//! The vendor client takes a large bag of options at construction time. They
//! are grouped here by concern; the bundle is immutable once built and opaque
//! to the connection supervisor, which only passes it through.

use std::path::PathBuf;
use std::time::Duration;

use crate::{DEFAULT_AUTH_HOST, DEFAULT_HOST};

/// API and authentication endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub host: String,
    pub auth_host: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            auth_host: DEFAULT_AUTH_HOST.to_string(),
        }
    }
}

/// Request, stream and snapshot timeouts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeouts {
    pub request: Duration,
    pub stream: Duration,
    pub snapshot: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            request: Duration::from_secs(60),
            stream: Duration::from_secs(120),
            snapshot: Duration::from_secs(60),
        }
    }
}

/// Debounce windows for doorbell-style events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorbellDebounce {
    pub motion: Duration,
    pub ding: Duration,
}

impl Default for DoorbellDebounce {
    fn default() -> Self {
        Self {
            motion: Duration::from_secs(30),
            ding: Duration::from_secs(10),
        }
    }
}

/// Media library handling options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaOptions {
    /// Keep downloaded videos on disk
    pub cache_videos: bool,
    /// Skip media uploads entirely
    pub no_upload: bool,
    /// Seconds to wait between media fetch retries
    pub retry_schedule: Vec<u64>,
    /// Days of recordings to fetch from the cloud library
    pub library_days: u32,
    /// Directory to mirror recordings into, if any
    pub save_media_to: Option<String>,
    /// Directory to mirror raw state updates into, if any
    pub save_updates_to: Option<String>,
    /// Delay before handing a stream to the user
    pub user_stream_delay: Duration,
}

impl Default for MediaOptions {
    fn default() -> Self {
        Self {
            cache_videos: false,
            no_upload: false,
            retry_schedule: Vec::new(),
            library_days: 27,
            save_media_to: None,
            save_updates_to: None,
            user_stream_delay: Duration::from_secs(1),
        }
    }
}

/// Snapshot behavior
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotOptions {
    /// Seconds after a snapshot request at which to re-check for the image
    pub checks: Vec<u64>,
    /// Take snapshots from the stream instead of the snapshot API
    pub from_stream: bool,
    /// Seconds after which a stream-snapshot stream is shut down (0 = never)
    pub stream_stop_after: u64,
}

/// How often the client refreshes state behind the scenes (zero disables)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshCadence {
    pub devices: Duration,
    pub modes: Duration,
    pub reconnect: Duration,
}

/// Two-factor authentication settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TfaSettings {
    /// Where the code arrives ("imap", "rest-api", "push", "console")
    pub source: String,
    /// Delivery channel ("email", "sms", "push")
    pub kind: String,
    pub host: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for TfaSettings {
    fn default() -> Self {
        Self {
            source: "imap".to_string(),
            kind: "email".to_string(),
            host: None,
            username: None,
            password: None,
        }
    }
}

/// Low-level client tuning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendOptions {
    /// Event backend ("sse" or "mqtt")
    pub backend: String,
    pub user_agent: String,
    /// Mode API selection ("auto", "v1", "v2")
    pub mode_api: String,
    /// Custom TLS cipher list, if the backend needs one
    pub cipher_list: Option<String>,
    /// Dump raw packets to the storage dir
    pub packet_dump: bool,
    pub verbose_debug: bool,
    /// Build entity unique ids from serial numbers
    pub serial_ids: bool,
    /// Keep unicode in device names instead of squashing to ascii
    pub keep_unicode_names: bool,
    /// Persist the session token across restarts
    pub save_session: bool,
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self {
            backend: "sse".to_string(),
            user_agent: "arlo".to_string(),
            mode_api: "auto".to_string(),
            cipher_list: None,
            packet_dump: false,
            verbose_debug: false,
            serial_ids: false,
            keep_unicode_names: false,
            save_session: true,
        }
    }
}

/// The full, immutable connection parameter bundle
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub endpoints: Endpoints,
    /// Directory for session tokens, packet dumps and cached media
    pub storage_dir: PathBuf,
    pub timeouts: Timeouts,
    pub debounce: DoorbellDebounce,
    /// Window within which library activity counts as "recent"
    pub recent_activity_window: Duration,
    /// strftime-style format for last-activity timestamps
    pub last_format: String,
    pub media: MediaOptions,
    pub snapshots: SnapshotOptions,
    pub refresh: RefreshCadence,
    pub tfa: TfaSettings,
    pub backend: BackendOptions,
}

impl Credentials {
    /// Start building a bundle; everything but the login pair has defaults
    pub fn builder(username: impl Into<String>, password: impl Into<String>) -> CredentialsBuilder {
        CredentialsBuilder {
            inner: Credentials {
                username: username.into(),
                password: password.into(),
                endpoints: Endpoints::default(),
                storage_dir: PathBuf::new(),
                timeouts: Timeouts::default(),
                debounce: DoorbellDebounce::default(),
                recent_activity_window: Duration::from_secs(600),
                last_format: "%m-%d %H:%M".to_string(),
                media: MediaOptions::default(),
                snapshots: SnapshotOptions::default(),
                refresh: RefreshCadence::default(),
                tfa: TfaSettings::default(),
                backend: BackendOptions::default(),
            },
        }
    }
}

/// Builder for [`Credentials`]
#[derive(Debug, Clone)]
pub struct CredentialsBuilder {
    inner: Credentials,
}

impl CredentialsBuilder {
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.inner.endpoints = endpoints;
        self
    }

    pub fn storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.inner.storage_dir = dir.into();
        self
    }

    pub fn timeouts(mut self, timeouts: Timeouts) -> Self {
        self.inner.timeouts = timeouts;
        self
    }

    pub fn debounce(mut self, debounce: DoorbellDebounce) -> Self {
        self.inner.debounce = debounce;
        self
    }

    pub fn recent_activity_window(mut self, window: Duration) -> Self {
        self.inner.recent_activity_window = window;
        self
    }

    pub fn last_format(mut self, format: impl Into<String>) -> Self {
        self.inner.last_format = format.into();
        self
    }

    pub fn media(mut self, media: MediaOptions) -> Self {
        self.inner.media = media;
        self
    }

    pub fn snapshots(mut self, snapshots: SnapshotOptions) -> Self {
        self.inner.snapshots = snapshots;
        self
    }

    pub fn refresh(mut self, refresh: RefreshCadence) -> Self {
        self.inner.refresh = refresh;
        self
    }

    pub fn tfa(mut self, tfa: TfaSettings) -> Self {
        self.inner.tfa = tfa;
        self
    }

    pub fn backend(mut self, backend: BackendOptions) -> Self {
        self.inner.backend = backend;
        self
    }

    pub fn build(self) -> Credentials {
        self.inner
    }
}

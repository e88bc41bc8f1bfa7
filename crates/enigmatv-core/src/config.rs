// ── Runtime device configuration ──
//
// These types describe *how* to talk to one receiver and how to present
// its catalog. They carry credential data but never touch disk: the host
// (or `enigmatv-config`) builds a `DeviceConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

use enigmatv_api::{DeviceFamily, Dialect, RadioDetection};

use crate::error::CoreError;

const DEFAULT_BITRATE_BPS: u64 = 1_000_000;

/// Web interface login.
#[derive(Debug, Clone)]
pub struct Login {
    pub username: String,
    pub password: SecretString,
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed certs). Default for receivers.
    #[default]
    DangerAcceptInvalid,
}

/// Which bouquets make up the channel catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BouquetScope {
    /// Every top-level bouquet, numbered independently.
    All,
    /// One bouquet, looked up by its exact display name.
    Single(String),
}

/// Where channel logos come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PiconSource {
    /// `http(s)://host:port/picon/<name>` on the receiver.
    Device,
    /// `<dir>/<name>` on the host's filesystem.
    LocalDir(PathBuf),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoCodec {
    #[default]
    H264,
    H265,
}

impl VideoCodec {
    pub fn as_param(self) -> &'static str {
        match self {
            Self::H264 => "h264",
            Self::H265 => "h265",
        }
    }
}

/// Transcoded streaming via the receiver's encoder port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodingConfig {
    pub enabled: bool,
    pub port: Option<u16>,
    /// Target bitrate in kbit/s, as entered by the user.
    pub bitrate_kbps: String,
    pub codec: VideoCodec,
}

impl Default for TranscodingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: Some(8002),
            bitrate_kbps: "1000".into(),
            codec: VideoCodec::H264,
        }
    }
}

impl TranscodingConfig {
    /// Bitrate in bit/s. Unparseable input falls back to 1 Mbit/s.
    pub fn bitrate_bps(&self) -> u64 {
        self.bitrate_kbps
            .trim()
            .parse::<u64>()
            .ok()
            .and_then(|kbps| kbps.checked_mul(1000))
            .unwrap_or(DEFAULT_BITRATE_BPS)
    }
}

/// Configuration for one receiver.
///
/// Immutable for the lifetime of an `Adapter`.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Hostname or IP address, without scheme or port.
    pub host: String,
    pub web_port: Option<u16>,
    pub streaming_port: Option<u16>,
    pub web_tls: bool,
    pub stream_tls: bool,
    pub tls: TlsVerification,
    pub timeout: Duration,
    pub family: DeviceFamily,
    /// Overrides the family's radio rule.
    pub radio_detection: Option<RadioDetection>,
    pub login: Option<Login>,
    /// Embed the login in stream URLs.
    pub use_login_for_streams: bool,
    pub bouquet: BouquetScope,
    pub picons: PiconSource,
    /// Tune the receiver before handing out a stream URL.
    pub zap_before_stream: bool,
    /// Directory new timers record into; receiver default when unset.
    pub recording_path: Option<String>,
    pub transcoding: TranscodingConfig,
    /// Log raw response bodies.
    pub debug_logging: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            web_port: Some(8000),
            streaming_port: Some(8001),
            web_tls: false,
            stream_tls: false,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            family: DeviceFamily::default(),
            radio_detection: None,
            login: None,
            use_login_for_streams: false,
            bouquet: BouquetScope::Single("Favourites (TV)".into()),
            picons: PiconSource::Device,
            zap_before_stream: false,
            recording_path: None,
            transcoding: TranscodingConfig::default(),
            debug_logging: false,
        }
    }
}

impl DeviceConfig {
    /// Check every setting an operation depends on.
    ///
    /// Runs before any network traffic; the first violation is returned.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.host.trim().is_empty() {
            return Err(CoreError::config("host must be configured"));
        }
        if self.streaming_port.is_none() {
            return Err(CoreError::config("streaming port must be configured"));
        }
        if self.web_port.is_none() {
            return Err(CoreError::config("web interface port must be configured"));
        }
        if self.transcoding.enabled {
            if self.family == DeviceFamily::Vuplus {
                return Err(CoreError::config(
                    "transcoding is not available on the vuplus device family",
                ));
            }
            if self.transcoding.port.is_none() {
                return Err(CoreError::config("transcoding port must be configured"));
            }
            if self.transcoding.bitrate_kbps.trim().is_empty() {
                return Err(CoreError::config("transcoding bitrate must be configured"));
            }
        }
        if let BouquetScope::Single(name) = &self.bouquet {
            if name.is_empty() {
                return Err(CoreError::config("bouquet name must be configured"));
            }
        }
        if let PiconSource::LocalDir(dir) = &self.picons {
            if dir.as_os_str().is_empty() {
                return Err(CoreError::config("local picon path must be configured"));
            }
        }
        Ok(())
    }

    /// The dialect for the configured family, radio override applied.
    pub fn dialect(&self) -> Dialect {
        let dialect = Dialect::for_family(self.family);
        match self.radio_detection {
            Some(rule) => dialect.with_radio_detection(rule),
            None => dialect,
        }
    }

    /// `http(s)://{host}:{web_port}/`
    pub fn web_base_url(&self) -> Result<Url, CoreError> {
        let port = self
            .web_port
            .ok_or_else(|| CoreError::config("web interface port must be configured"))?;
        let scheme = if self.web_tls { "https" } else { "http" };
        Url::parse(&format!("{scheme}://{}:{port}/", self.host.trim()))
            .map_err(|e| CoreError::config(format!("invalid receiver address: {e}")))
    }
}

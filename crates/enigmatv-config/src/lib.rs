//! Shared configuration for the enigmatv command line.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `enigmatv_core::DeviceConfig`. The CLI adds
//! flag-aware overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use enigmatv_core::{
    BouquetScope, CoreError, DeviceConfig, DeviceFamily, Login, PiconSource, RadioDetection,
    TlsVerification, TranscodingConfig, VideoCodec,
};

const KEYRING_SERVICE: &str = "enigmatv";
const PASSWORD_ENV: &str = "ENIGMATV_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no password configured for user '{username}' in profile '{profile}'")]
    NoCredentials { profile: String, username: String },

    #[error("profile '{profile}' rejected: {source}")]
    Device {
        profile: String,
        #[source]
        source: CoreError,
    },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named receiver profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named receiver profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Receiver hostname or IP, without scheme.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_web_port")]
    pub web_port: Option<u16>,

    #[serde(default = "default_streaming_port")]
    pub streaming_port: Option<u16>,

    #[serde(default)]
    pub web_tls: bool,

    /// Ignored by the `vuplus` family, which streams with the web scheme.
    #[serde(default)]
    pub stream_tls: bool,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// `true` skips certificate checks, `false` enforces the system store.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Firmware family: "enigma2" or "vuplus".
    #[serde(default)]
    pub family: DeviceFamily,

    /// "case-insensitive" or "lowercase-only".
    pub radio_detection: Option<RadioDetection>,

    pub username: Option<String>,

    /// Password (plaintext, prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    #[serde(default)]
    pub use_login_for_streams: bool,

    /// Bouquet display name; ignored when `all_bouquets` is set.
    #[serde(default = "default_bouquet")]
    pub bouquet: String,

    #[serde(default)]
    pub all_bouquets: bool,

    /// Local picon directory; picons come from the receiver when unset.
    pub picon_dir: Option<PathBuf>,

    #[serde(default)]
    pub zap_before_stream: bool,

    pub recording_path: Option<String>,

    #[serde(default)]
    pub transcoding: TranscodingProfile,

    /// Log raw receiver responses.
    #[serde(default)]
    pub debug_logging: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            host: default_host(),
            web_port: default_web_port(),
            streaming_port: default_streaming_port(),
            web_tls: false,
            stream_tls: false,
            ca_cert: None,
            insecure: None,
            timeout: None,
            family: DeviceFamily::default(),
            radio_detection: None,
            username: None,
            password: None,
            password_env: None,
            use_login_for_streams: false,
            bouquet: default_bouquet(),
            all_bouquets: false,
            picon_dir: None,
            zap_before_stream: false,
            recording_path: None,
            transcoding: TranscodingProfile::default(),
            debug_logging: false,
        }
    }
}

fn default_host() -> String {
    "localhost".into()
}
#[allow(clippy::unnecessary_wraps)]
fn default_web_port() -> Option<u16> {
    Some(8000)
}
#[allow(clippy::unnecessary_wraps)]
fn default_streaming_port() -> Option<u16> {
    Some(8001)
}
fn default_bouquet() -> String {
    "Favourites (TV)".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranscodingProfile {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_transcoding_port")]
    pub port: Option<u16>,

    /// kbit/s, kept as entered.
    #[serde(default = "default_bitrate")]
    pub bitrate_kbps: String,

    #[serde(default)]
    pub codec: VideoCodec,
}

impl Default for TranscodingProfile {
    fn default() -> Self {
        Self {
            enabled: false,
            port: default_transcoding_port(),
            bitrate_kbps: default_bitrate(),
            codec: VideoCodec::default(),
        }
    }
}

#[allow(clippy::unnecessary_wraps)]
fn default_transcoding_port() -> Option<u16> {
    Some(8002)
}
fn default_bitrate() -> String {
    "1000".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "enigmatv", "enigmatv").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("enigmatv");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment.
///
/// `ENIGMATV_`-prefixed variables override file values; `__` separates
/// nesting levels (`ENIGMATV_PROFILES__HOME__HOST`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("ENIGMATV_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve the web interface login of a profile.
///
/// `None` when the profile has no username. The password comes from the
/// first of: `password_env`, `ENIGMATV_PASSWORD`, the system keyring,
/// the plaintext `password` field.
pub fn resolve_login(profile: &Profile, profile_name: &str) -> Result<Option<Login>, ConfigError> {
    let Some(username) = profile.username.clone().filter(|u| !u.is_empty()) else {
        return Ok(None);
    };

    let password = resolve_password(profile, profile_name).ok_or_else(|| {
        ConfigError::NoCredentials {
            profile: profile_name.into(),
            username: username.clone(),
        }
    })?;

    Ok(Some(Login { username, password }))
}

fn resolve_password(profile: &Profile, profile_name: &str) -> Option<SecretString> {
    // 1. Profile's password_env → env var lookup
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }

    // 2. Global env var
    if let Ok(val) = std::env::var(PASSWORD_ENV) {
        return Some(SecretString::from(val));
    }

    // 3. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password")) {
        if let Ok(secret) = entry.get_password() {
            return Some(SecretString::from(secret));
        }
    }

    // 4. Plaintext in config
    profile
        .password
        .as_ref()
        .map(|pw| SecretString::from(pw.clone()))
}

// ── Profile translation ─────────────────────────────────────────────

/// Build a validated `DeviceConfig` from a profile.
pub fn profile_to_device_config(
    profile: &Profile,
    profile_name: &str,
) -> Result<DeviceConfig, ConfigError> {
    let login = resolve_login(profile, profile_name)?;

    let tls = match (profile.insecure, &profile.ca_cert) {
        (Some(true), _) => TlsVerification::DangerAcceptInvalid,
        (_, Some(ca_path)) => TlsVerification::CustomCa(ca_path.clone()),
        (Some(false), None) => TlsVerification::SystemDefaults,
        (None, None) => TlsVerification::DangerAcceptInvalid,
    };

    let bouquet = if profile.all_bouquets {
        BouquetScope::All
    } else {
        BouquetScope::Single(profile.bouquet.clone())
    };

    let picons = profile
        .picon_dir
        .clone()
        .map_or(PiconSource::Device, PiconSource::LocalDir);

    let config = DeviceConfig {
        host: profile.host.clone(),
        web_port: profile.web_port,
        streaming_port: profile.streaming_port,
        web_tls: profile.web_tls,
        stream_tls: profile.stream_tls,
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or_else(default_timeout)),
        family: profile.family,
        radio_detection: profile.radio_detection,
        login,
        use_login_for_streams: profile.use_login_for_streams,
        bouquet,
        picons,
        zap_before_stream: profile.zap_before_stream,
        recording_path: profile.recording_path.clone(),
        transcoding: TranscodingConfig {
            enabled: profile.transcoding.enabled,
            port: profile.transcoding.port,
            bitrate_kbps: profile.transcoding.bitrate_kbps.clone(),
            codec: profile.transcoding.codec,
        },
        debug_logging: profile.debug_logging,
    };

    config.validate().map_err(|source| ConfigError::Device {
        profile: profile_name.into(),
        source,
    })?;

    Ok(config)
}

//! CLI configuration: thin wrapper around `enigmatv_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--host, --web-port, --timeout).

use enigmatv_core::DeviceConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use enigmatv_config::{Config, Profile, config_path, load_config_or_default};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `DeviceConfig` from the config file, profile, and CLI overrides.
///
/// Without a matching profile, `--host` alone is enough: every other
/// setting takes its default.
pub fn build_device_config(global: &GlobalOpts) -> Result<DeviceConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let mut profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.host.is_some() && global.profile.is_none() => Profile::default(),
        None => {
            let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
            names.sort();
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: if names.is_empty() {
                    "(none)".into()
                } else {
                    names.join(", ")
                },
                path: config_path().display().to_string(),
            });
        }
    };

    apply_overrides(&mut profile, global);
    Ok(enigmatv_config::profile_to_device_config(
        &profile,
        &profile_name,
    )?)
}

/// Flag > env > profile.
fn apply_overrides(profile: &mut Profile, global: &GlobalOpts) {
    if let Some(ref host) = global.host {
        profile.host.clone_from(host);
    }
    if let Some(port) = global.web_port {
        profile.web_port = Some(port);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
}

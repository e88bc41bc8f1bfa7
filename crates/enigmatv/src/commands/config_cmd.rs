//! Config subcommand handlers.

use enigmatv_config::Defaults;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

const MASK: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

/// Copy of `cfg` with plaintext passwords masked.
fn redacted(cfg: &Config) -> Config {
    Config {
        default_profile: cfg.default_profile.clone(),
        defaults: Defaults {
            output: cfg.defaults.output.clone(),
            color: cfg.defaults.color.clone(),
            timeout: cfg.defaults.timeout,
        },
        profiles: cfg
            .profiles
            .iter()
            .map(|(name, profile)| {
                let mut profile = profile.clone();
                if profile.password.is_some() {
                    profile.password = Some(MASK.into());
                }
                (name.clone(), profile)
            })
            .collect(),
    }
}

/// Format config for display.
fn format_config(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        write_profile(&mut out, &cfg.profiles[name]);
    }

    out
}

fn write_profile(out: &mut String, p: &Profile) {
    use std::fmt::Write;

    let port = |p: Option<u16>| p.map_or_else(|| "-".into(), |p| p.to_string());
    let _ = writeln!(out, "host = \"{}\"", p.host);
    let _ = writeln!(out, "web_port = {}", port(p.web_port));
    let _ = writeln!(out, "streaming_port = {}", port(p.streaming_port));
    let _ = writeln!(out, "family = \"{}\"", p.family);
    if p.all_bouquets {
        let _ = writeln!(out, "all_bouquets = true");
    } else {
        let _ = writeln!(out, "bouquet = \"{}\"", p.bouquet);
    }
    if let Some(ref u) = p.username {
        let _ = writeln!(out, "username = \"{u}\"");
    }
    if let Some(ref pw) = p.password {
        let _ = writeln!(out, "password = \"{pw}\"");
    }
    if let Some(ref env) = p.password_env {
        let _ = writeln!(out, "password_env = \"{env}\"");
    }
    if let Some(ref dir) = p.picon_dir {
        let _ = writeln!(out, "picon_dir = \"{}\"", dir.display());
    }
    if p.zap_before_stream {
        let _ = writeln!(out, "zap_before_stream = true");
    }
    if p.transcoding.enabled {
        let _ = writeln!(
            out,
            "transcoding = {} kbit/s {} on port {}",
            p.transcoding.bitrate_kbps,
            p.transcoding.codec.as_param(),
            port(p.transcoding.port)
        );
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config_or_default());
            let out = output::render_single(&global.output, &cfg, format_config, |_| {
                "config".into()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn passwords_are_masked() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                username: Some("root".into()),
                password: Some("dreambox".into()),
                ..Profile::default()
            },
        );

        let text = format_config(&redacted(&cfg));

        assert!(text.contains("username = \"root\""));
        assert!(text.contains("password = \"****\""));
        assert!(!text.contains("dreambox"));
    }
}

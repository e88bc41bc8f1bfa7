//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use enigmatv_config::ConfigError;
use enigmatv_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const UNSUPPORTED: i32 = 5;
    pub const REJECTED: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const CANCELLED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(unused_assignments)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach receiver at {url}")]
    #[diagnostic(
        code(enigmatv::connection_failed),
        help(
            "Check that the receiver is switched on and OpenWebIf is enabled.\n\
             Reason: {reason}\n\
             Try: enigmatv status --host <address> --web-port <port>"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("No password configured for user '{username}' in profile '{profile}'")]
    #[diagnostic(
        code(enigmatv::no_credentials),
        help(
            "Set ENIGMATV_PASSWORD, store it in the system keyring under\n\
             service 'enigmatv', entry '{profile}/password', or add `password` to the profile."
        )
    )]
    NoCredentials { profile: String, username: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(enigmatv::not_found),
        help("Run: enigmatv {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Receiver ─────────────────────────────────────────────────────
    #[error("Receiver rejected '{operation}': {message}")]
    #[diagnostic(code(enigmatv::rejected))]
    Rejected { operation: String, message: String },

    #[error("Could not read the receiver's {endpoint} response: {message}")]
    #[diagnostic(
        code(enigmatv::parse),
        help("Run with -vv and `debug_logging = true` in the profile to see the raw response.")
    )]
    Parse { endpoint: String, message: String },

    #[error("'{operation}' is not supported by Enigma2 receivers")]
    #[diagnostic(code(enigmatv::unsupported))]
    Unsupported { operation: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(enigmatv::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(enigmatv::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Config file: {path}"
        )
    )]
    ProfileNotFound {
        name: String,
        available: String,
        path: String,
    },

    #[error("Receiver configuration is invalid: {message}")]
    #[diagnostic(
        code(enigmatv::configuration),
        help("Fix the profile in {path} or pass --host / --web-port.")
    )]
    Configuration { message: String, path: String },

    #[error(transparent)]
    #[diagnostic(code(enigmatv::config))]
    Config(Box<ConfigError>),

    // ── Interrupt ────────────────────────────────────────────────────
    #[error("Interrupted")]
    #[diagnostic(code(enigmatv::cancelled))]
    Cancelled,

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not render JSON: {0}")]
    #[diagnostic(code(enigmatv::json))]
    Json(#[from] serde_json::Error),

    #[error("Could not render YAML: {0}")]
    #[diagnostic(code(enigmatv::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Rejected { .. } => exit_code::REJECTED,
            Self::Unsupported { .. } => exit_code::UNSUPPORTED,
            Self::Validation { .. }
            | Self::ProfileNotFound { .. }
            | Self::Configuration { .. } => exit_code::USAGE,
            Self::Cancelled => exit_code::CANCELLED,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile, username } => {
                Self::NoCredentials { profile, username }
            }
            ConfigError::Device { source, .. } => Self::from(source),
            other => Self::Config(Box::new(other)),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Configuration { message } => Self::Configuration {
                message,
                path: enigmatv_config::config_path().display().to_string(),
            },

            CoreError::Connectivity { url, reason } => Self::ConnectionFailed { url, reason },

            CoreError::Cancelled => Self::Cancelled,

            CoreError::Parse { endpoint, message } => Self::Parse { endpoint, message },

            CoreError::NotFound { entity, identifier } => {
                let list_command = match entity.as_str() {
                    "bouquet" | "channel" => "channels".to_owned(),
                    other => format!("{other}s list"),
                };
                Self::NotFound {
                    resource_type: entity,
                    identifier,
                    list_command,
                }
            }

            CoreError::InvalidId { kind, value } => Self::Validation {
                field: kind.into(),
                reason: format!("malformed id '{value}'"),
            },

            CoreError::OperationFailed {
                operation,
                status_text,
            } => Self::Rejected {
                operation,
                message: status_text,
            },

            CoreError::Unsupported { operation } => Self::Unsupported { operation },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_distinct_exit_codes() {
        let connectivity = CliError::from(CoreError::Connectivity {
            url: "http://box:8000/web/getservices".into(),
            reason: "receiver unreachable".into(),
        });
        let not_found = CliError::from(CoreError::NotFound {
            entity: "bouquet".into(),
            identifier: "Sports".into(),
        });
        let rejected = CliError::from(CoreError::OperationFailed {
            operation: "zap".into(),
            status_text: "No tuner".into(),
        });

        assert_eq!(connectivity.exit_code(), exit_code::CONNECTION);
        assert_eq!(not_found.exit_code(), exit_code::NOT_FOUND);
        assert_eq!(rejected.exit_code(), exit_code::REJECTED);
        assert_eq!(CliError::from(CoreError::Cancelled).exit_code(), exit_code::CANCELLED);
    }

    #[test]
    fn bouquet_not_found_points_at_channels() {
        let err = CliError::from(CoreError::NotFound {
            entity: "bouquet".into(),
            identifier: "Sports".into(),
        });
        match err {
            CliError::NotFound { list_command, .. } => assert_eq!(list_command, "channels"),
            other => panic!("unexpected {other:?}"),
        }
    }
}

// ── Core error types ──
//
// The adapter's error taxonomy. Hosts never see HTTP status codes or XML
// reader failures directly: the `From<enigmatv_api::Error>` impl folds
// transport-layer errors into these variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach receiver at {url}: {reason}")]
    Connectivity { url: String, reason: String },

    #[error("Operation cancelled")]
    Cancelled,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Unexpected response from {endpoint}: {message}")]
    Parse { endpoint: String, message: String },

    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    #[error("Invalid {kind} id: {value:?}")]
    InvalidId { kind: &'static str, value: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Receiver rejected {operation}: {status_text}")]
    OperationFailed {
        operation: String,
        status_text: String,
    },

    #[error("Operation not supported by Enigma2 receivers: {operation}")]
    Unsupported { operation: String },
}

impl CoreError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<enigmatv_api::Error> for CoreError {
    fn from(err: enigmatv_api::Error) -> Self {
        match err {
            enigmatv_api::Error::Transport(ref e) => {
                let url = e
                    .url()
                    .map_or_else(|| "<unknown>".into(), |u| redact(u).to_string());
                let reason = if err.is_unreachable() {
                    format!("receiver unreachable ({e})")
                } else {
                    e.to_string()
                };
                CoreError::Connectivity { url, reason }
            }
            enigmatv_api::Error::InvalidUrl(e) => CoreError::Configuration {
                message: format!("Invalid receiver URL: {e}"),
            },
            enigmatv_api::Error::Tls(reason) => CoreError::Connectivity {
                url: String::new(),
                reason: format!("TLS error: {reason}"),
            },
            enigmatv_api::Error::Status { endpoint, status } => CoreError::Connectivity {
                url: endpoint,
                reason: format!("HTTP {status}"),
            },
            enigmatv_api::Error::Cancelled { .. } => CoreError::Cancelled,
            enigmatv_api::Error::Xml { endpoint, message } => {
                CoreError::Parse { endpoint, message }
            }
            enigmatv_api::Error::MissingRecord { endpoint, tag } => CoreError::Parse {
                endpoint,
                message: format!("no <{tag}> record in response"),
            },
            enigmatv_api::Error::Rejected {
                endpoint,
                state_text,
                ..
            } => CoreError::OperationFailed {
                operation: endpoint,
                status_text: state_text,
            },
        }
    }
}

/// Strip userinfo so credentials never end up in error messages.
fn redact(url: &url::Url) -> url::Url {
    let mut url = url.clone();
    // Both calls only fail on hostless URLs, which cannot carry userinfo.
    let _ = url.set_username("");
    let _ = url.set_password(None);
    url
}

use thiserror::Error;

/// Top-level error type for the `enigmatv-api` crate.
///
/// Covers every failure mode of talking to a receiver's web interface:
/// transport, HTTP status, XML decoding, and rejected actions.
/// `enigmatv-core` maps these into its own taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// The receiver answered with a non-success HTTP status.
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// The caller's cancellation token fired while the request was in flight.
    #[error("Request to {endpoint} was cancelled")]
    Cancelled { endpoint: String },

    // ── Data ────────────────────────────────────────────────────────
    /// The response body was not well-formed XML.
    #[error("Malformed XML from {endpoint}: {message}")]
    Xml { endpoint: String, message: String },

    /// A response carried no record of the expected kind.
    #[error("{endpoint} returned no <{tag}> record")]
    MissingRecord { endpoint: String, tag: String },

    // ── Actions ─────────────────────────────────────────────────────
    /// The receiver executed the action but reported failure.
    #[error("{endpoint} rejected the request: {state_text}")]
    Rejected {
        endpoint: String,
        state: String,
        state_text: String,
    },
}

impl Error {
    /// Returns `true` if the receiver could not be reached at all.
    pub fn is_unreachable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }

    /// Returns `true` if the request was aborted by cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

// OpenWebIf HTTP client
//
// Wraps `reqwest::Client` with receiver URL construction, Basic auth,
// cancellation, and XML record decoding. Endpoint methods live in the
// sibling modules as inherent impls so this file stays about transport.

use secrecy::{ExposeSecret, SecretString};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;
use url::form_urlencoded::byte_serialize;

use crate::dialect::Dialect;
use crate::error::Error;
use crate::openwebif::models::E2SimpleResult;
use crate::transport::TransportConfig;
use crate::xml::{self, XmlRecord};

/// HTTP Basic credentials for the web interface.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

/// Raw HTTP client for a receiver's OpenWebIf interface.
///
/// Every method takes the caller's `CancellationToken`; firing it aborts the
/// in-flight request with [`Error::Cancelled`]. Bodies are returned as
/// decoded records, never as raw text.
pub struct OpenWebIfClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Option<Credentials>,
    dialect: Dialect,
    /// Emit every response body at debug level.
    log_bodies: bool,
}

impl OpenWebIfClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the web interface root, e.g. `http://192.168.1.20:80/`.
    pub fn new(
        base_url: Url,
        credentials: Option<Credentials>,
        dialect: Dialect,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, credentials, dialect))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        credentials: Option<Credentials>,
        dialect: Dialect,
    ) -> Self {
        Self {
            http,
            base_url,
            credentials,
            dialect,
            log_bodies: false,
        }
    }

    /// Log raw response bodies at debug level.
    pub fn with_body_logging(mut self, enabled: bool) -> Self {
        self.log_bodies = enabled;
        self
    }

    /// The web interface root URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    // ── Consumer-facing URLs ─────────────────────────────────────────

    /// The root URL with the credentials embedded as userinfo.
    ///
    /// For URLs handed to consumers that fetch them without going through
    /// this client and so cannot send an `Authorization` header.
    ///
    /// Fails when the root has no host to attach the userinfo to.
    pub fn public_base_url(&self) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        if let Some(creds) = &self.credentials {
            url.set_username(&creds.username)
                .and_then(|()| url.set_password(Some(creds.password.expose_secret())))
                .map_err(|()| url::ParseError::EmptyHost)?;
        }
        Ok(url)
    }

    /// `{root}/picon/`, to which picon file names are appended.
    pub fn picon_base_url(&self) -> Result<String, Error> {
        let base = self.public_base_url()?;
        Ok(format!("{}/picon/", base.as_str().trim_end_matches('/')))
    }

    /// `{root}/picon/{file_name}`
    pub fn picon_url(&self, file_name: &str) -> Result<String, Error> {
        Ok(format!("{}{file_name}", self.picon_base_url()?))
    }

    /// `{root}/file?file={file_name}` with the name form-encoded.
    pub fn file_url(&self, file_name: &str) -> Result<String, Error> {
        let base = self.public_base_url()?;
        let encoded: String = byte_serialize(file_name.as_bytes()).collect();
        Ok(format!(
            "{}/file?file={encoded}",
            base.as_str().trim_end_matches('/')
        ))
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Build `{root}/web/{endpoint}`.
    pub(crate) fn web_url(&self, endpoint: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(&format!("web/{endpoint}"))?)
    }

    /// GET a `/web/` endpoint and return the body text.
    pub(crate) async fn get_text(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        cancel: &CancellationToken,
    ) -> Result<String, Error> {
        let url = self.web_url(endpoint)?;
        debug!(endpoint, "GET {url}");

        let mut builder = self.http.get(url).query(query);
        if let Some(creds) = &self.credentials {
            builder = builder.basic_auth(&creds.username, Some(creds.password.expose_secret()));
        }

        let request = async {
            let resp = builder.send().await?;
            let status = resp.status();
            if !status.is_success() {
                return Err(Error::Status {
                    endpoint: endpoint.to_owned(),
                    status: status.as_u16(),
                });
            }
            Ok::<_, Error>(resp.text().await?)
        };

        let body = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!(endpoint, "request cancelled");
                return Err(Error::Cancelled { endpoint: endpoint.to_owned() });
            }
            result = request => result?,
        };

        if self.log_bodies {
            debug!(endpoint, body = %body, "response body");
        }
        Ok(body)
    }

    /// GET an endpoint and decode every `<tag>` record of the body.
    pub(crate) async fn get_records(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        tag: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<XmlRecord>, Error> {
        let body = self.get_text(endpoint, query, cancel).await?;
        xml::records(&body, tag).map_err(|e| Error::Xml {
            endpoint: endpoint.to_owned(),
            message: e.to_string(),
        })
    }

    /// GET an action endpoint and check its `e2simplexmlresult`.
    ///
    /// Returns [`Error::Rejected`] with the receiver's status text when the
    /// state is anything but the dialect's success literal.
    pub(crate) async fn perform_action(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        cancel: &CancellationToken,
    ) -> Result<E2SimpleResult, Error> {
        let tag = self.dialect.tags.simple_result;
        let result = self
            .get_records(endpoint, query, tag, cancel)
            .await?
            .first()
            .map(E2SimpleResult::from)
            .ok_or_else(|| Error::MissingRecord {
                endpoint: endpoint.to_owned(),
                tag: tag.to_owned(),
            })?;

        if self.dialect.is_success(&result.state) {
            debug!(endpoint, "action accepted");
            Ok(result)
        } else {
            Err(Error::Rejected {
                endpoint: endpoint.to_owned(),
                state: result.state,
                state_text: result.state_text,
            })
        }
    }
}

// ── Adapter facade ──
//
// The host-facing surface of one receiver. Every public operation runs the
// session preamble (validate configuration, probe the receiver, resolve the
// bouquet) and then its own request. Failures are logged here, at the
// operation boundary, and returned as `CoreError`; nothing is retried.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use enigmatv_api::{
    Credentials, Dialect, E2Service, OpenWebIfClient, TlsMode, TransportConfig,
};

use crate::config::{BouquetScope, DeviceConfig, PiconSource, TlsVerification};
use crate::convert::{self, FieldError, PiconBase};
use crate::epg::programs_in_window;
use crate::error::CoreError;
use crate::model::{
    Channel, DeviceStatus, MediaStream, MediaStreamKind, NewTimer, PlaybackDescriptor, Program,
    Recording, StreamProtocol, Timer, TimerId, TunerStatus,
};
use crate::store::CatalogStore;
use crate::stream;

/// Outcome of the session preamble.
enum Scope {
    /// Reference of the configured bouquet.
    Single(String),
    /// Every top-level bouquet, as returned by the probe.
    All(Vec<E2Service>),
}

// ── Adapter ──────────────────────────────────────────────────────

/// Live TV adapter for one Enigma2 receiver.
///
/// Cheaply cloneable via `Arc<AdapterInner>`. Holds a single HTTP client
/// and the channel catalog shared by EPG and recording correlation.
#[derive(Clone)]
pub struct Adapter {
    inner: Arc<AdapterInner>,
}

struct AdapterInner {
    config: DeviceConfig,
    client: OpenWebIfClient,
    picons: PiconBase,
    catalog: CatalogStore,
    /// Serializes catalog refreshes; readers never take it.
    refresh_lock: Mutex<()>,
    live_streams: AtomicU64,
}

impl Adapter {
    /// Create an adapter from configuration. Performs no network traffic.
    pub fn new(config: DeviceConfig) -> Result<Self, CoreError> {
        config.validate()?;

        let transport = TransportConfig {
            tls: tls_mode(&config.tls),
            timeout: config.timeout,
        };
        let credentials = config
            .login
            .as_ref()
            .filter(|login| !login.username.is_empty())
            .map(|login| Credentials::new(login.username.clone(), login.password.clone()));
        let client = OpenWebIfClient::new(
            config.web_base_url()?,
            credentials,
            config.dialect(),
            &transport,
        )?
        .with_body_logging(config.debug_logging);

        Self::with_client(config, client)
    }

    /// Create an adapter around an existing client.
    pub fn with_client(config: DeviceConfig, client: OpenWebIfClient) -> Result<Self, CoreError> {
        let picons = match &config.picons {
            PiconSource::Device => PiconBase::Url(client.picon_base_url()?),
            PiconSource::LocalDir(dir) => PiconBase::Dir(dir.clone()),
        };

        info!(
            host = %config.host,
            web_port = ?config.web_port,
            streaming_port = ?config.streaming_port,
            family = ?config.family,
            bouquet = ?config.bouquet,
            login = config.login.is_some(),
            transcoding = config.transcoding.enabled,
            debug_logging = config.debug_logging,
            "adapter configured"
        );

        Ok(Self {
            inner: Arc::new(AdapterInner {
                config,
                client,
                picons,
                catalog: CatalogStore::new(),
                refresh_lock: Mutex::new(()),
                live_streams: AtomicU64::new(0),
            }),
        })
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.inner.config
    }

    pub fn dialect(&self) -> &Dialect {
        self.inner.client.dialect()
    }

    /// The most recent channel catalog.
    pub fn catalog(&self) -> &CatalogStore {
        &self.inner.catalog
    }

    // ── Session ──────────────────────────────────────────────────

    /// Validate, probe, and resolve the configured bouquet.
    async fn session(&self, cancel: &CancellationToken) -> Result<Scope, CoreError> {
        self.inner.config.validate()?;
        let bouquets = self.inner.client.list_bouquets(cancel).await?;

        match &self.inner.config.bouquet {
            BouquetScope::All => Ok(Scope::All(bouquets)),
            BouquetScope::Single(name) => bouquets
                .into_iter()
                .find(|b| &b.name == name)
                .map(|b| {
                    debug!(bouquet = %name, reference = %b.reference, "bouquet resolved");
                    Scope::Single(b.reference)
                })
                .ok_or_else(|| CoreError::NotFound {
                    entity: "bouquet".into(),
                    identifier: name.clone(),
                }),
        }
    }

    // ── Channels ─────────────────────────────────────────────────

    /// List channels and replace the catalog with the result.
    pub async fn list_channels(&self, cancel: &CancellationToken) -> Result<Vec<Channel>, CoreError> {
        info!("listing channels");
        let result = async {
            let scope = self.session(cancel).await?;
            self.refresh_catalog(scope, cancel).await
        }
        .await;
        at_boundary("list_channels", result)
    }

    async fn refresh_catalog(
        &self,
        scope: Scope,
        cancel: &CancellationToken,
    ) -> Result<Vec<Channel>, CoreError> {
        let _writer = self.inner.refresh_lock.lock().await;

        let channels = match scope {
            Scope::Single(reference) => self.bouquet_channels(&reference, cancel).await?,
            Scope::All(bouquets) => {
                let mut seen = HashSet::new();
                let mut all = Vec::new();
                for bouquet in &bouquets {
                    debug!(bouquet = %bouquet.name, "reading bouquet");
                    let channels = self.bouquet_channels(&bouquet.reference, cancel).await?;
                    all.extend(channels.into_iter().filter(|c| seen.insert(c.id.clone())));
                }
                all
            }
        };

        self.inner.catalog.replace(channels.clone());
        info!(count = channels.len(), "channel catalog refreshed");
        Ok(channels)
    }

    async fn bouquet_channels(
        &self,
        reference: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Channel>, CoreError> {
        let services = self
            .inner
            .client
            .list_bouquet_services(reference, cancel)
            .await?;
        Ok(convert::channels_from_services(
            &services,
            &self.inner.picons,
            self.dialect().radio_detection,
        ))
    }

    // ── Programs ─────────────────────────────────────────────────

    /// Programs of one channel starting no later than `end`.
    ///
    /// The receiver always returns its whole EPG from now on, so `start`
    /// does not filter.
    pub async fn list_programs(
        &self,
        channel_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> Result<Vec<Program>, CoreError> {
        info!(channel = channel_id, %start, %end, "listing programs");
        let result = async {
            self.session(cancel).await?;
            let events = self.inner.client.epg_for_service(channel_id, cancel).await?;
            let catalog = self.inner.catalog.snapshot();
            programs_in_window(&events, end, &catalog, rand::random::<u32>)
                .map_err(|e| parse_error("epgservice", &e))
        }
        .await;
        at_boundary("list_programs", result)
    }

    // ── Recordings ───────────────────────────────────────────────

    pub async fn list_recordings(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<Recording>, CoreError> {
        info!("listing recordings");
        let result = async {
            self.session(cancel).await?;
            let movies = self.inner.client.list_movies(cancel).await?;
            let catalog = self.inner.catalog.snapshot();
            let detection = self.dialect().radio_detection;
            let mut recordings = Vec::with_capacity(movies.len());
            for movie in &movies {
                let url = self.inner.client.file_url(&movie.filename)?;
                let recording = convert::recording_from_movie(movie, &catalog, detection, url)
                    .map_err(|e| parse_error("movielist", &e))?;
                recordings.push(recording);
            }
            Ok::<_, CoreError>(recordings)
        }
        .await;
        at_boundary("list_recordings", result)
    }

    /// Delete a recording by id (its service reference).
    pub async fn delete_recording(
        &self,
        recording_id: &str,
        cancel: &CancellationToken,
    ) -> Result<(), CoreError> {
        info!(recording = recording_id, "deleting recording");
        let result = async {
            self.session(cancel).await?;
            self.inner.client.delete_movie(recording_id, cancel).await?;
            Ok::<_, CoreError>(())
        }
        .await;
        at_boundary("delete_recording", result)
    }

    // ── Timers ───────────────────────────────────────────────────

    /// Waiting and running timers.
    pub async fn list_timers(&self, cancel: &CancellationToken) -> Result<Vec<Timer>, CoreError> {
        info!("listing timers");
        let result = async {
            self.session(cancel).await?;
            let entries = self.inner.client.list_timers(cancel).await?;
            convert::timers_from_entries(&entries).map_err(|e| parse_error("timerlist", &e))
        }
        .await;
        at_boundary("list_timers", result)
    }

    /// Record the EPG event named by `timer.program_id`.
    pub async fn create_timer(
        &self,
        timer: &NewTimer,
        cancel: &CancellationToken,
    ) -> Result<(), CoreError> {
        info!(channel = %timer.channel_id, program = %timer.program_id, "creating timer");
        let result = async {
            self.session(cancel).await?;
            let dirname = self
                .inner
                .config
                .recording_path
                .as_deref()
                .filter(|p| !p.is_empty());
            self.inner
                .client
                .add_timer_by_event_id(
                    &timer.channel_id,
                    &timer.program_id.event_id,
                    dirname,
                    cancel,
                )
                .await?;
            Ok::<_, CoreError>(())
        }
        .await;
        at_boundary("create_timer", result)
    }

    pub async fn cancel_timer(
        &self,
        timer_id: &TimerId,
        cancel: &CancellationToken,
    ) -> Result<(), CoreError> {
        info!(timer = %timer_id, "cancelling timer");
        let result = async {
            self.session(cancel).await?;
            self.inner
                .client
                .delete_timer(
                    &timer_id.service_ref,
                    &timer_id.begin.to_string(),
                    &timer_id.end.to_string(),
                    cancel,
                )
                .await?;
            Ok::<_, CoreError>(())
        }
        .await;
        at_boundary("cancel_timer", result)
    }

    // ── Live streams ─────────────────────────────────────────────

    /// Tune the receiver to a channel.
    pub async fn zap(&self, channel_id: &str, cancel: &CancellationToken) -> Result<(), CoreError> {
        info!(channel = channel_id, "zapping");
        let result = async {
            self.session(cancel).await?;
            self.inner.client.zap(channel_id, cancel).await?;
            Ok::<_, CoreError>(())
        }
        .await;
        at_boundary("zap", result)
    }

    /// Resolve the playback descriptor of a live channel, zapping first
    /// when configured to.
    pub async fn channel_stream(
        &self,
        channel_id: &str,
        cancel: &CancellationToken,
    ) -> Result<PlaybackDescriptor, CoreError> {
        info!(channel = channel_id, "resolving channel stream");
        let result = async {
            self.session(cancel).await?;
            if self.inner.config.zap_before_stream {
                self.inner.client.zap(channel_id, cancel).await?;
            }

            let url = stream::stream_url(&self.inner.config, self.dialect(), channel_id)?;
            let id = self.inner.live_streams.fetch_add(1, Ordering::Relaxed) + 1;
            debug!(stream = id, "stream URL built");

            Ok::<_, CoreError>(PlaybackDescriptor {
                id: id.to_string(),
                url,
                protocol: StreamProtocol::Http,
                transcoded: stream::is_transcoded(&self.inner.config, self.dialect()),
                media_streams: vec![
                    MediaStream {
                        kind: MediaStreamKind::Video,
                        index: None,
                        interlaced: true,
                    },
                    MediaStream {
                        kind: MediaStreamKind::Audio,
                        index: None,
                        interlaced: false,
                    },
                ],
            })
        }
        .await;
        at_boundary("channel_stream", result)
    }

    // ── Status ───────────────────────────────────────────────────

    pub async fn status(&self, cancel: &CancellationToken) -> Result<DeviceStatus, CoreError> {
        info!("reading device status");
        let result = async {
            self.session(cancel).await?;
            let frontends = self.inner.client.list_frontends(cancel).await?;
            Ok::<_, CoreError>(DeviceStatus {
                version: "Unknown".into(),
                update_available: false,
                tuners: frontends
                    .into_iter()
                    .map(|f| TunerStatus {
                        id: f.model,
                        name: f.name,
                    })
                    .collect(),
            })
        }
        .await;
        at_boundary("status", result)
    }

    // ── Unsupported host operations ──────────────────────────────

    pub fn list_series_timers(&self) -> Result<Vec<Timer>, CoreError> {
        self.unsupported("list series timers")
    }

    pub fn create_series_timer(&self, _timer: &NewTimer) -> Result<(), CoreError> {
        self.unsupported("create series timer")
    }

    pub fn update_series_timer(&self, _series_id: &str) -> Result<(), CoreError> {
        self.unsupported("update series timer")
    }

    pub fn cancel_series_timer(&self, _series_id: &str) -> Result<(), CoreError> {
        self.unsupported("cancel series timer")
    }

    pub fn update_timer(&self, _timer: &Timer) -> Result<(), CoreError> {
        self.unsupported("update timer")
    }

    pub fn recording_stream(&self, _recording_id: &str) -> Result<PlaybackDescriptor, CoreError> {
        self.unsupported("recording stream")
    }

    pub fn close_live_stream(&self, _stream_id: &str) -> Result<(), CoreError> {
        self.unsupported("close live stream")
    }

    pub fn reset_tuner(&self, _tuner_id: &str) -> Result<(), CoreError> {
        self.unsupported("reset tuner")
    }

    pub fn channel_image(&self, _channel_id: &str) -> Result<Vec<u8>, CoreError> {
        self.unsupported("channel image")
    }

    pub fn program_image(&self, _program_id: &str) -> Result<Vec<u8>, CoreError> {
        self.unsupported("program image")
    }

    pub fn recording_image(&self, _recording_id: &str) -> Result<Vec<u8>, CoreError> {
        self.unsupported("recording image")
    }

    fn unsupported<T>(&self, operation: &str) -> Result<T, CoreError> {
        warn!(host = %self.inner.config.host, operation, "unsupported operation requested");
        Err(CoreError::Unsupported {
            operation: operation.into(),
        })
    }
}

// ── Helpers ──────────────────────────────────────────────────────

fn tls_mode(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}

fn parse_error(endpoint: &str, err: &FieldError) -> CoreError {
    CoreError::Parse {
        endpoint: endpoint.into(),
        message: err.to_string(),
    }
}

/// Log a failed operation once, where it leaves the adapter.
fn at_boundary<T>(operation: &'static str, result: Result<T, CoreError>) -> Result<T, CoreError> {
    match &result {
        Err(CoreError::Cancelled) => debug!(operation, "operation cancelled"),
        Err(e) => error!(operation, error = %e, "operation failed"),
        Ok(_) => {}
    }
    result
}

//! Live TV adapter for Enigma2 receivers, built on `enigmatv-api`.
//!
//! This crate owns the domain model and the logic between a receiver's
//! OpenWebIf interface and a media server's Live TV subsystem:
//!
//! - **[`Adapter`]**: Facade for one receiver. Each operation validates
//!   the [`DeviceConfig`], probes the receiver, resolves the configured
//!   bouquet, then lists channels, programs, recordings or timers, mutates
//!   timers and recordings, or resolves a live [`PlaybackDescriptor`].
//!
//! - **[`CatalogStore`]**: The most recent channel catalog, swapped
//!   atomically on refresh and read without locking by EPG and recording
//!   correlation.
//!
//! - **Domain model** ([`model`]): `Channel`, `Program`, `Recording`,
//!   `Timer` and friends, with structured [`TimerId`] / [`ProgramId`]
//!   identifiers that round-trip through their `~`-joined string form.
//!
//! - **[`CoreError`]**: One error taxonomy for configuration,
//!   connectivity, parse, not-found, device-rejected and unsupported
//!   outcomes.

pub mod adapter;
pub mod config;
pub mod convert;
pub mod epg;
pub mod error;
pub mod model;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use adapter::Adapter;
pub use config::{
    BouquetScope, DeviceConfig, Login, PiconSource, TlsVerification, TranscodingConfig,
    VideoCodec,
};
pub use error::CoreError;
pub use store::CatalogStore;

pub use enigmatv_api::{DeviceFamily, RadioDetection};

pub use model::{
    Channel, ChannelType, DeviceStatus, MediaStream, MediaStreamKind, NewTimer, Picon,
    PlaybackDescriptor, Program, ProgramId, Recording, StreamProtocol, Timer, TimerId,
    TimerStatus, TunerStatus,
};

// ── API-to-domain type conversions ──
//
// Bridges raw `enigmatv_api` records into `enigmatv_core::model` types.
// Receiver values are plain text; every numeric field is parsed here and a
// value that does not parse is reported as a `FieldError` naming the field.

use std::path::PathBuf;

use chrono::{DateTime, TimeDelta, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use enigmatv_api::{E2Movie, E2Service, E2Timer, RadioDetection};

use crate::model::{Channel, ChannelType, Picon, Recording, Timer, TimerId, TimerStatus};

/// Service references with this prefix are bouquet labels, not channels.
pub const LABEL_PREFIX: &str = "1:64:";

pub(crate) const UNKNOWN_GENRE: &str = "Unknown";

/// A receiver value that could not be interpreted.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid {field}: {value:?}")]
pub struct FieldError {
    pub field: &'static str,
    pub value: String,
}

impl FieldError {
    fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_owned(),
        }
    }
}

// ── Helpers ────────────────────────────────────────────────────────

pub fn is_bouquet_label(reference: &str) -> bool {
    reference.starts_with(LABEL_PREFIX)
}

/// Picon file name for a service reference.
///
/// Drops the trailing character (the reference's final `:`), turns every
/// `:` into `_` and appends `.png`.
pub fn picon_file_name(reference: &str) -> String {
    let mut chars = reference.chars();
    chars.next_back();
    format!("{}.png", chars.as_str().replace(':', "_"))
}

/// Epoch seconds to UTC.
pub fn parse_epoch(field: &'static str, raw: &str) -> Result<DateTime<Utc>, FieldError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| FieldError::new(field, raw))
}

/// Parse a `minutes:seconds` length into seconds.
///
/// Returns `None` for the receiver's unknown-length marker (any value
/// containing `?`, usually `"?:??"`).
pub fn parse_length(raw: &str) -> Result<Option<i64>, FieldError> {
    if raw.contains('?') {
        return Ok(None);
    }
    let (minutes, seconds) = raw
        .trim()
        .split_once(':')
        .ok_or_else(|| FieldError::new("e2length", raw))?;
    let minutes: i64 = minutes
        .parse()
        .map_err(|_| FieldError::new("e2length", raw))?;
    let seconds: i64 = seconds
        .parse()
        .map_err(|_| FieldError::new("e2length", raw))?;
    minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .map(Some)
        .ok_or_else(|| FieldError::new("e2length", raw))
}

/// `start` plus `secs`, failing on values chrono cannot represent.
pub fn end_after(
    field: &'static str,
    raw: &str,
    start: DateTime<Utc>,
    secs: i64,
) -> Result<DateTime<Utc>, FieldError> {
    TimeDelta::try_seconds(secs)
        .and_then(|d| start.checked_add_signed(d))
        .ok_or_else(|| FieldError::new(field, raw))
}

pub fn parse_seconds(field: &'static str, raw: &str) -> Result<i64, FieldError> {
    raw.trim()
        .parse()
        .map_err(|_| FieldError::new(field, raw))
}

pub fn classify(reference: &str, detection: RadioDetection) -> ChannelType {
    if detection.is_radio(reference) {
        ChannelType::Radio
    } else {
        ChannelType::Tv
    }
}

// ── Picons ─────────────────────────────────────────────────────────

/// Where picon file names get resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PiconBase {
    /// URL prefix ending in `/picon/`.
    Url(String),
    Dir(PathBuf),
}

impl PiconBase {
    pub fn picon_for(&self, reference: &str) -> Picon {
        let name = picon_file_name(reference);
        match self {
            Self::Url(base) => Picon::Url(format!("{base}{name}")),
            Self::Dir(dir) => Picon::Path(dir.join(name)),
        }
    }
}

// ── Channels ───────────────────────────────────────────────────────

/// Build the channels of one bouquet listing.
///
/// Label entries are skipped without consuming a number.
pub fn channels_from_services(
    services: &[E2Service],
    picons: &PiconBase,
    detection: RadioDetection,
) -> Vec<Channel> {
    let mut number = 0u32;
    services
        .iter()
        .filter(|svc| {
            let label = is_bouquet_label(&svc.reference);
            if label {
                debug!(name = %svc.name, "skipping bouquet label");
            }
            !label
        })
        .map(|svc| {
            number += 1;
            Channel {
                id: svc.reference.clone(),
                name: svc.name.clone(),
                channel_type: classify(&svc.reference, detection),
                number,
                picon: picons.picon_for(&svc.reference),
            }
        })
        .collect()
}

// ── Recordings ─────────────────────────────────────────────────────

/// Map one movie entry, correlating it to the catalog by service name.
pub fn recording_from_movie(
    movie: &E2Movie,
    catalog: &[Channel],
    detection: RadioDetection,
    playback_url: String,
) -> Result<Recording, FieldError> {
    let start = parse_epoch("e2time", &movie.time)?;
    let length = parse_length(&movie.length)?.unwrap_or_else(|| {
        warn!(title = %movie.title, length = %movie.length, "recording length unknown");
        0
    });
    let end = end_after("e2length", &movie.length, start, length)?;

    let channel = catalog.iter().find(|c| c.name == movie.service_name);
    match channel {
        Some(c) => debug!(channel = %c.name, title = %movie.title, "recording matched channel"),
        None => debug!(
            service = %movie.service_name,
            title = %movie.title,
            "recording has no matching channel"
        ),
    }

    Ok(Recording {
        id: movie.reference.clone(),
        channel_id: channel.map(|c| c.id.clone()),
        channel_type: channel.map_or_else(
            || classify(&movie.reference, detection),
            |c| c.channel_type,
        ),
        service_name: movie.service_name.clone(),
        title: movie.title.clone(),
        overview: movie.description.clone(),
        start,
        end,
        genres: vec![UNKNOWN_GENRE.into()],
        picon: channel.map(|c| c.picon.clone()),
        playback_url,
    })
}

// ── Timers ─────────────────────────────────────────────────────────

/// Keep waiting and running timers, numbering the kept ones from 1.
pub fn timers_from_entries(entries: &[E2Timer]) -> Result<Vec<Timer>, FieldError> {
    let mut timers = Vec::new();
    let mut sequence = 0u32;

    for entry in entries {
        let Some(status) = TimerStatus::from_state_code(entry.state.trim()) else {
            continue;
        };
        sequence += 1;

        let begin = parse_seconds("e2timebegin", &entry.time_begin)?;
        let end = parse_seconds("e2timeend", &entry.time_end)?;
        let start_at = parse_epoch("e2timebegin", &entry.time_begin)?;
        let end_at = parse_epoch("e2timeend", &entry.time_end)?;

        timers.push(Timer {
            id: TimerId {
                service_ref: entry.reference.clone(),
                event_id: entry.eit.clone(),
                begin,
                end,
                sequence,
            },
            channel_id: entry.reference.clone(),
            name: entry.name.clone(),
            overview: entry.description.clone(),
            start: start_at,
            end: end_at,
            status,
        });
    }

    Ok(timers)
}

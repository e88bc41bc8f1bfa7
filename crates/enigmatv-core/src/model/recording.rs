use chrono::{DateTime, Utc};
use serde::Serialize;

use super::channel::{ChannelType, Picon};

/// A finished or running recording on the receiver's disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recording {
    /// The recording's service reference; doubles as the delete handle.
    pub id: String,
    /// Set only when the service name matched a catalog channel.
    pub channel_id: Option<String>,
    pub channel_type: ChannelType,
    pub service_name: String,
    pub title: String,
    pub overview: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub genres: Vec<String>,
    pub picon: Option<Picon>,
    pub playback_url: String,
}

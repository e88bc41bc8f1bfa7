use chrono::{DateTime, Utc};
use serde::Serialize;

use super::channel::Picon;
use super::ids::ProgramId;

/// One EPG entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Program {
    pub id: ProgramId,
    /// Service reference the event belongs to.
    pub channel_id: String,
    pub title: String,
    /// The extended description.
    pub overview: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub genres: Vec<String>,
    pub picon: Option<Picon>,
}

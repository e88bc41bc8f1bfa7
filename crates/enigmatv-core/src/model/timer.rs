use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::Display;

use super::ids::{ProgramId, TimerId};

/// Only these two receiver states surface; finished, failed and disabled
/// timers are dropped during listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum TimerStatus {
    /// Waiting (`e2state` 0).
    New,
    /// Recording right now (`e2state` 2).
    InProgress,
}

impl TimerStatus {
    pub fn from_state_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(Self::New),
            "2" => Some(Self::InProgress),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timer {
    pub id: TimerId,
    pub channel_id: String,
    pub name: String,
    pub overview: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: TimerStatus,
}

/// Request to record one EPG event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTimer {
    pub channel_id: String,
    pub program_id: ProgramId,
}

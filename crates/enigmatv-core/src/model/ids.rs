// ── Composite identifiers ──
//
// Programs and timers are identified by `~`-joined tuples the receiver
// needs back verbatim when acting on them. Parsing requires the exact
// number of parts; anything else is `CoreError::InvalidId`.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::CoreError;

const SEPARATOR: char = '~';

/// `{channel_ref}~{event_id}~{ordinal}~{nonce}`
///
/// `ordinal` and `nonce` only make ids unique across fetches; the receiver
/// reuses event ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProgramId {
    pub channel_ref: String,
    pub event_id: String,
    pub ordinal: u32,
    pub nonce: u32,
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{}",
            self.channel_ref, self.event_id, self.ordinal, self.nonce
        )
    }
}

impl FromStr for ProgramId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidId {
            kind: "program",
            value: s.to_owned(),
        };
        let parts: Vec<&str> = s.split(SEPARATOR).collect();
        let [channel_ref, event_id, ordinal, nonce] = parts.as_slice() else {
            return Err(invalid());
        };
        if channel_ref.is_empty() || event_id.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            channel_ref: (*channel_ref).to_owned(),
            event_id: (*event_id).to_owned(),
            ordinal: ordinal.parse().map_err(|_| invalid())?,
            nonce: nonce.parse().map_err(|_| invalid())?,
        })
    }
}

impl Serialize for ProgramId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// `{service_ref}~{event_id}~{begin}~{end}~{sequence}`
///
/// `begin`/`end` are the epoch seconds the receiver matches on when
/// deleting; `sequence` is a per-listing counter with no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimerId {
    pub service_ref: String,
    pub event_id: String,
    pub begin: i64,
    pub end: i64,
    pub sequence: u32,
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{}",
            self.service_ref, self.event_id, self.begin, self.end, self.sequence
        )
    }
}

impl FromStr for TimerId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidId {
            kind: "timer",
            value: s.to_owned(),
        };
        let parts: Vec<&str> = s.split(SEPARATOR).collect();
        let [service_ref, event_id, begin, end, sequence] = parts.as_slice() else {
            return Err(invalid());
        };
        if service_ref.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            service_ref: (*service_ref).to_owned(),
            event_id: (*event_id).to_owned(),
            begin: begin.parse().map_err(|_| invalid())?,
            end: end.parse().map_err(|_| invalid())?,
            sequence: sequence.parse().map_err(|_| invalid())?,
        })
    }
}

impl Serialize for TimerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn timer_id_splits_into_five_parts() {
        let id: TimerId = "1:0:1:X~123~1700000000~1700003600~4".parse().unwrap();
        assert_eq!(
            id,
            TimerId {
                service_ref: "1:0:1:X".into(),
                event_id: "123".into(),
                begin: 1_700_000_000,
                end: 1_700_003_600,
                sequence: 4,
            }
        );
        assert_eq!(id.to_string(), "1:0:1:X~123~1700000000~1700003600~4");
    }

    #[test]
    fn timer_id_rejects_wrong_shapes() {
        for bad in [
            "",
            "1:0:1:X~123~1700000000~1700003600",
            "1:0:1:X~123~1700000000~1700003600~4~9",
            "1:0:1:X~123~soon~1700003600~4",
            "~123~1~2~3",
        ] {
            let err = bad.parse::<TimerId>().unwrap_err();
            assert!(
                matches!(err, CoreError::InvalidId { kind: "timer", .. }),
                "{bad:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn program_id_carries_event_id() {
        let id: ProgramId = "1:0:19:283D:3FB:1:C00000:0:0:0:~4711~1~99".parse().unwrap();
        assert_eq!(id.channel_ref, "1:0:19:283D:3FB:1:C00000:0:0:0:");
        assert_eq!(id.event_id, "4711");
        assert_eq!(id.ordinal, 1);
        assert_eq!(id.nonce, 99);
    }

    #[test]
    fn program_id_rejects_timer_ids() {
        let err = "1:0:1:X~123~1700000000~1700003600~4"
            .parse::<ProgramId>()
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidId { kind: "program", .. }));
    }

    #[test]
    fn ids_serialize_as_strings() {
        let id = TimerId {
            service_ref: "1:0:1:X".into(),
            event_id: "7".into(),
            begin: 10,
            end: 20,
            sequence: 1,
        };
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"1:0:1:X~7~10~20~1\""
        );
    }
}

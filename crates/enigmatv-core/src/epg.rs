// ── EPG windowing ──
//
// Turns a service's event list into programs up to the end of the
// requested window. The receiver lists events oldest first, so the scan
// stops at the first event starting after the window end and never looks
// at the rest.

use chrono::{DateTime, Utc};
use tracing::debug;

use enigmatv_api::E2Event;

use crate::convert::{FieldError, UNKNOWN_GENRE, end_after, parse_epoch, parse_seconds};
use crate::model::{Channel, Picon, Program, ProgramId};

/// Map `events` to programs starting no later than `window_end`.
///
/// The picon is looked up once, by the first yielded event's service name,
/// and applied to every program of the batch. `nonce` supplies the random
/// part of each program id.
pub fn programs_in_window(
    events: &[E2Event],
    window_end: DateTime<Utc>,
    catalog: &[Channel],
    mut nonce: impl FnMut() -> u32,
) -> Result<Vec<Program>, FieldError> {
    let mut programs = Vec::new();
    let mut picon: Option<Picon> = None;

    for event in events {
        let start = parse_epoch("e2eventstart", &event.start)?;
        if start > window_end {
            debug!(
                channel = %event.service_name,
                title = %event.title,
                "event starts after window, stopping"
            );
            break;
        }

        let ordinal = u32::try_from(programs.len() + 1).unwrap_or(u32::MAX);
        if ordinal == 1 {
            picon = catalog
                .iter()
                .find(|c| c.name == event.service_name)
                .map(|c| c.picon.clone());
            if picon.is_some() {
                debug!(channel = %event.service_name, "EPG picon found");
            }
        }

        let duration = parse_seconds("e2eventduration", &event.duration)?;
        let end = end_after("e2eventduration", &event.duration, start, duration)?;
        programs.push(Program {
            id: ProgramId {
                channel_ref: event.service_reference.clone(),
                event_id: event.id.clone(),
                ordinal,
                nonce: nonce(),
            },
            channel_id: event.service_reference.clone(),
            title: event.title.clone(),
            overview: event.description_extended.clone(),
            start,
            end,
            genres: vec![UNKNOWN_GENRE.into()],
            picon: picon.clone(),
        });
    }

    Ok(programs)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::ChannelType;
    use pretty_assertions::assert_eq;

    const REF: &str = "1:0:19:283D:3FB:1:C00000:0:0:0:";

    fn event(id: &str, start: &str, service_name: &str) -> E2Event {
        E2Event {
            id: id.into(),
            start: start.into(),
            duration: "600".into(),
            title: format!("Show {id}"),
            description: "short".into(),
            description_extended: "long".into(),
            service_reference: REF.into(),
            service_name: service_name.into(),
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn catalog() -> Vec<Channel> {
        vec![Channel {
            id: REF.into(),
            name: "Das Erste HD".into(),
            channel_type: ChannelType::Tv,
            number: 1,
            picon: Picon::Url("http://box/picon/x.png".into()),
        }]
    }

    #[test]
    fn stops_at_first_event_past_window_end() {
        // The last event is malformed; reaching it would fail the batch.
        let events = vec![
            event("1", "10", "Das Erste HD"),
            event("2", "20", "Das Erste HD"),
            event("3", "30", "Das Erste HD"),
            event("4", "garbage", "Das Erste HD"),
        ];
        let programs = programs_in_window(&events, at(25), &catalog(), || 7).unwrap();

        let starts: Vec<i64> = programs.iter().map(|p| p.start.timestamp()).collect();
        assert_eq!(starts, vec![10, 20]);
    }

    #[test]
    fn window_end_is_inclusive() {
        let events = vec![event("1", "25", "Das Erste HD")];
        let programs = programs_in_window(&events, at(25), &[], || 7).unwrap();
        assert_eq!(programs.len(), 1);
    }

    #[test]
    fn ids_and_fields_are_synthesized() {
        let events = vec![event("4711", "100", "Das Erste HD"), event("4712", "700", "x")];
        let mut n = 0;
        let programs = programs_in_window(&events, at(1000), &[], || {
            n += 1;
            n
        })
        .unwrap();

        assert_eq!(programs[0].id.to_string(), format!("{REF}~4711~1~1"));
        assert_eq!(programs[1].id.to_string(), format!("{REF}~4712~2~2"));
        assert_eq!(programs[0].end.timestamp(), 700);
        assert_eq!(programs[0].overview, "long");
        assert_eq!(programs[0].channel_id, REF);
        assert_eq!(programs[0].genres, vec!["Unknown".to_string()]);
    }

    #[test]
    fn oversized_duration_is_an_error() {
        let mut long = event("1", "10", "Das Erste HD");
        long.duration = i64::MAX.to_string();
        let err = programs_in_window(&[long], at(100), &[], || 0).unwrap_err();
        assert_eq!(err.field, "e2eventduration");
    }

    #[test]
    fn first_event_picon_applies_to_batch() {
        let events = vec![
            event("1", "10", "Das Erste HD"),
            event("2", "20", "renamed"),
        ];
        let programs = programs_in_window(&events, at(100), &catalog(), || 0).unwrap();
        assert!(programs.iter().all(|p| p.picon == Some(catalog()[0].picon.clone())));
    }

    #[test]
    fn first_event_miss_leaves_batch_without_picon() {
        let events = vec![
            event("1", "10", "unknown"),
            event("2", "20", "Das Erste HD"),
        ];
        let programs = programs_in_window(&events, at(100), &catalog(), || 0).unwrap();
        assert!(programs.iter().all(|p| p.picon.is_none()));
    }

    #[test]
    fn empty_catalog_means_no_picon() {
        let events = vec![event("1", "10", "Das Erste HD")];
        let programs = programs_in_window(&events, at(100), &[], || 0).unwrap();
        assert_eq!(programs[0].picon, None);
    }
}

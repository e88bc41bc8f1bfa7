// Raw OpenWebIf record types
//
// Each struct is one XML record with its fields copied verbatim as text.
// Absent fields hold the `"?"` placeholder; interpreting values (epochs,
// durations, states) is left to `enigmatv-core`.

use crate::xml::XmlRecord;

/// One `<e2service>`: a bouquet or a channel, depending on the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct E2Service {
    pub reference: String,
    pub name: String,
}

impl From<&XmlRecord> for E2Service {
    fn from(r: &XmlRecord) -> Self {
        Self {
            reference: r.get("e2servicereference").to_owned(),
            name: r.get("e2servicename").to_owned(),
        }
    }
}

/// One `<e2movie>` from the recordings listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct E2Movie {
    pub reference: String,
    pub title: String,
    pub description: String,
    pub service_name: String,
    /// Start, epoch seconds.
    pub time: String,
    /// Length as `m:ss` (`"?:??"` when the receiver does not know it).
    pub length: String,
    pub filename: String,
}

impl From<&XmlRecord> for E2Movie {
    fn from(r: &XmlRecord) -> Self {
        Self {
            reference: r.get("e2servicereference").to_owned(),
            title: r.get("e2title").to_owned(),
            description: r.get("e2description").to_owned(),
            service_name: r.get("e2servicename").to_owned(),
            time: r.get("e2time").to_owned(),
            length: r.get("e2length").to_owned(),
            filename: r.get("e2filename").to_owned(),
        }
    }
}

/// One `<e2timer>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct E2Timer {
    pub reference: String,
    pub name: String,
    pub description: String,
    pub eit: String,
    pub time_begin: String,
    pub time_end: String,
    /// `0` waiting, `2` recording, `3` finished.
    pub state: String,
}

impl From<&XmlRecord> for E2Timer {
    fn from(r: &XmlRecord) -> Self {
        Self {
            reference: r.get("e2servicereference").to_owned(),
            name: r.get("e2name").to_owned(),
            description: r.get("e2description").to_owned(),
            eit: r.get("e2eit").to_owned(),
            time_begin: r.get("e2timebegin").to_owned(),
            time_end: r.get("e2timeend").to_owned(),
            state: r.get("e2state").to_owned(),
        }
    }
}

/// One `<e2event>` from a service's EPG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct E2Event {
    pub id: String,
    pub start: String,
    /// Seconds.
    pub duration: String,
    pub title: String,
    pub description: String,
    pub description_extended: String,
    pub service_reference: String,
    pub service_name: String,
}

impl From<&XmlRecord> for E2Event {
    fn from(r: &XmlRecord) -> Self {
        Self {
            id: r.get("e2eventid").to_owned(),
            start: r.get("e2eventstart").to_owned(),
            duration: r.get("e2eventduration").to_owned(),
            title: r.get("e2eventtitle").to_owned(),
            description: r.get("e2eventdescription").to_owned(),
            description_extended: r.get("e2eventdescriptionextended").to_owned(),
            service_reference: r.get("e2eventservicereference").to_owned(),
            service_name: r.get("e2eventservicename").to_owned(),
        }
    }
}

/// One `<e2frontend>` (tuner) from the device info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct E2Frontend {
    pub name: String,
    pub model: String,
}

impl From<&XmlRecord> for E2Frontend {
    fn from(r: &XmlRecord) -> Self {
        Self {
            name: r.get("e2name").to_owned(),
            model: r.get("e2model").to_owned(),
        }
    }
}

/// The `<e2simplexmlresult>` answer to an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct E2SimpleResult {
    pub state: String,
    pub state_text: String,
}

impl From<&XmlRecord> for E2SimpleResult {
    fn from(r: &XmlRecord) -> Self {
        Self {
            state: r.get("e2state").to_owned(),
            state_text: r.get("e2statetext").to_owned(),
        }
    }
}

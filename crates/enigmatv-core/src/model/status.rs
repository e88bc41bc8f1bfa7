use serde::Serialize;

/// One tuner (frontend) of the receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TunerStatus {
    /// Tuner model, e.g. `DVB-S2`.
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceStatus {
    /// Always `"Unknown"`; the web interface does not expose it reliably.
    pub version: String,
    pub update_available: bool,
    pub tuners: Vec<TunerStatus>,
}

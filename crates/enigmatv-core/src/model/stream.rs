use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StreamProtocol {
    Http,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MediaStreamKind {
    Video,
    Audio,
}

/// A hint about one elementary stream; the receiver does not say which
/// PIDs it will send, so the index is left unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaStream {
    pub kind: MediaStreamKind,
    pub index: Option<u32>,
    pub interlaced: bool,
}

/// Everything a host needs to open a live channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybackDescriptor {
    /// Unique per adapter instance.
    pub id: String,
    pub url: String,
    pub protocol: StreamProtocol,
    pub transcoded: bool,
    pub media_streams: Vec<MediaStream>,
}

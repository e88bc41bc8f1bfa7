// ── Domain model ──
//
// Canonical types the adapter hands to its host. Everything here is
// decoded and typed; raw receiver strings stay in `enigmatv_api`.

pub mod channel;
pub mod ids;
pub mod program;
pub mod recording;
pub mod status;
pub mod stream;
pub mod timer;

pub use channel::{Channel, ChannelType, Picon};
pub use ids::{ProgramId, TimerId};
pub use program::Program;
pub use recording::Recording;
pub use status::{DeviceStatus, TunerStatus};
pub use stream::{MediaStream, MediaStreamKind, PlaybackDescriptor, StreamProtocol};
pub use timer::{NewTimer, Timer, TimerStatus};

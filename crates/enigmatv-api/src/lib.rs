// enigmatv-api: Async Rust client for the OpenWebIf web interface (Enigma2 receivers)

pub mod dialect;
pub mod error;
pub mod openwebif;
pub mod transport;
pub mod xml;

pub use dialect::{DeviceFamily, Dialect, RadioDetection, RecordTags};
pub use error::Error;
pub use openwebif::client::{Credentials, OpenWebIfClient};
pub use openwebif::models::{E2Event, E2Frontend, E2Movie, E2Service, E2SimpleResult, E2Timer};
pub use transport::{TlsMode, TransportConfig};
pub use xml::{MISSING, XmlRecord};

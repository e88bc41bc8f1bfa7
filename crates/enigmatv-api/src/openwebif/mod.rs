// OpenWebIf `/web/*` endpoints
//
// `client` owns transport mechanics; the remaining modules add endpoint
// methods to `OpenWebIfClient` grouped by resource.

pub mod client;
pub mod device;
pub mod epg;
pub mod models;
pub mod movies;
pub mod services;
pub mod timers;

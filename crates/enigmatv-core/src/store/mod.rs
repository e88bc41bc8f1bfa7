// ── Shared adapter state ──
//
// The only state shared between operations is the channel catalog: one
// writer (a catalog refresh) replaces it wholesale, any number of readers
// (EPG and recording correlation) load it without blocking.

mod catalog;

pub use catalog::CatalogStore;

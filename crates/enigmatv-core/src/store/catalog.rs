// ── Channel catalog snapshot ──
//
// An `ArcSwap` holds the most recent complete catalog. Readers get an
// `Arc` to an immutable list and keep it for as long as they need; a
// refresh swaps in a new list without disturbing them. Before the first
// refresh the catalog is empty.

use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::model::Channel;

pub struct CatalogStore {
    channels: ArcSwap<Vec<Channel>>,
    last_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        let (last_refresh, _) = watch::channel(None);
        Self {
            channels: ArcSwap::from_pointee(Vec::new()),
            last_refresh,
        }
    }

    /// The current catalog.
    pub fn snapshot(&self) -> Arc<Vec<Channel>> {
        self.channels.load_full()
    }

    /// Replace the catalog and stamp the refresh time.
    pub(crate) fn replace(&self, channels: Vec<Channel>) {
        self.channels.store(Arc::new(channels));
        self.last_refresh.send_replace(Some(Utc::now()));
    }

    /// First channel with exactly this name.
    pub fn find_by_name(&self, name: &str) -> Option<Channel> {
        self.channels
            .load()
            .iter()
            .find(|c| c.name == name)
            .cloned()
    }

    pub fn find_by_id(&self, id: &str) -> Option<Channel> {
        self.channels.load().iter().find(|c| c.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.channels.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.load().is_empty()
    }

    /// When the catalog was last replaced; `None` if never.
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.borrow()
    }

    /// Subscribe to refresh timestamps.
    pub fn subscribe_refresh(&self) -> watch::Receiver<Option<DateTime<Utc>>> {
        self.last_refresh.subscribe()
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

//! Data update coordinator
//!
//! Holds the latest data snapshot for one device and notifies entities when
//! it changes. Fetching the data (polling, push subscriptions, reconnects)
//! belongs to whoever drives the coordinator; entities only read.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::entity::UpdateListener;

pub struct DataUpdateCoordinator<T> {
    name: String,
    data: RwLock<Option<T>>,
    last_update_success: AtomicBool,
    /// Bumped on every update, successful or not
    version: watch::Sender<u64>,
}

impl<T: Clone + Send + Sync> DataUpdateCoordinator<T> {
    /// Create a coordinator that has not received data yet
    pub fn new(name: impl Into<String>) -> Self {
        let (version, _) = watch::channel(0u64);
        Self {
            name: name.into(),
            data: RwLock::new(None),
            last_update_success: AtomicBool::new(true),
            version,
        }
    }

    /// Clone of the current snapshot, if any data arrived yet
    pub fn data(&self) -> Option<T> {
        self.data.read().map(|d| d.clone()).unwrap_or_default()
    }

    /// Apply `f` to the current snapshot without cloning it
    pub fn with_data<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.data.read().ok().and_then(|d| d.as_ref().map(f))
    }

    /// Replace the snapshot and notify listeners
    ///
    /// A poisoned snapshot lock counts as a failed update.
    pub fn set_updated_data(&self, data: T) {
        match self.data.write() {
            Ok(mut slot) => *slot = Some(data),
            Err(_) => return self.set_update_failed("snapshot lock poisoned"),
        }
        self.last_update_success.store(true, Ordering::SeqCst);
        debug!(coordinator = %self.name, "Coordinator data updated");
        self.notify();
    }

    /// Record a failed update; the previous snapshot is kept but entities
    /// report unavailable until the next successful update
    pub fn set_update_failed(&self, reason: &str) {
        self.last_update_success.store(false, Ordering::SeqCst);
        warn!(coordinator = %self.name, reason, "Coordinator update failed");
        self.notify();
    }

    pub fn last_update_success(&self) -> bool {
        self.last_update_success.load(Ordering::SeqCst)
    }

    /// Whether entities backed by this coordinator can report a value
    pub fn available(&self) -> bool {
        self.last_update_success() && self.data.read().map(|d| d.is_some()).unwrap_or(false)
    }

    /// Subscribe to update notifications
    pub fn subscribe(&self) -> UpdateListener {
        self.version.subscribe()
    }

    fn notify(&self) {
        // send_modify updates even when nobody listens
        self.version.send_modify(|v| *v += 1);
    }
}

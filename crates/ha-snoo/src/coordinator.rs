//! Per-device coordinator and the config entry that carries them

use std::sync::Arc;

use ha_entity::{DataUpdateCoordinator, UpdateListener};
use indexmap::IndexMap;
use tracing::debug;

use crate::client::SnooClient;
use crate::config::SnooConfig;
use crate::containers::{SnooData, SnooDevice};

/// Coordinators of a config entry keyed by serial number
pub type SnooCoordinators = IndexMap<String, Arc<SnooCoordinator>>;

/// Latest data of one bassinet plus the client used to command it
///
/// The client pushes status messages in through [`SnooCoordinator::update`];
/// entities read the snapshot and send commands through
/// [`SnooCoordinator::snoo`].
pub struct SnooCoordinator {
    snoo: Arc<dyn SnooClient>,
    device: SnooDevice,
    coordinator: DataUpdateCoordinator<SnooData>,
}

impl SnooCoordinator {
    pub fn new(snoo: Arc<dyn SnooClient>, device: SnooDevice) -> Self {
        let coordinator = DataUpdateCoordinator::new(device.name.clone());
        Self {
            snoo,
            device,
            coordinator,
        }
    }

    pub fn snoo(&self) -> &dyn SnooClient {
        self.snoo.as_ref()
    }

    pub fn device(&self) -> &SnooDevice {
        &self.device
    }

    /// Current snapshot, `None` until the first status message
    pub fn data(&self) -> Option<SnooData> {
        self.coordinator.data()
    }

    pub fn with_data<R>(&self, f: impl FnOnce(&SnooData) -> R) -> Option<R> {
        self.coordinator.with_data(f)
    }

    /// Store a status message and notify entities
    pub fn update(&self, data: SnooData) {
        debug!(
            serial_number = %self.device.serial_number,
            level = %data.state_machine.level,
            "Status update"
        );
        self.coordinator.set_updated_data(data);
    }

    /// Record that the device could not be reached
    pub fn update_failed(&self, reason: &str) {
        self.coordinator.set_update_failed(reason);
    }

    pub fn available(&self) -> bool {
        self.coordinator.available()
    }

    pub fn subscribe(&self) -> UpdateListener {
        self.coordinator.subscribe()
    }
}

/// A configured Snoo account
pub struct SnooConfigEntry {
    pub entry_id: String,
    pub title: String,
    pub options: SnooConfig,
    /// One coordinator per bassinet, filled in when the entry is loaded
    pub runtime_data: SnooCoordinators,
}

impl SnooConfigEntry {
    pub fn new(title: impl Into<String>, options: SnooConfig) -> Self {
        Self {
            entry_id: ulid::Ulid::new().to_string(),
            title: title.into(),
            options,
            runtime_data: IndexMap::new(),
        }
    }

    /// Add a coordinator for `device`, replacing one with the same serial
    pub fn add_device(
        &mut self,
        snoo: Arc<dyn SnooClient>,
        device: SnooDevice,
    ) -> Arc<SnooCoordinator> {
        let coordinator = Arc::new(SnooCoordinator::new(snoo, device));
        self.runtime_data.insert(
            coordinator.device().serial_number.clone(),
            coordinator.clone(),
        );
        coordinator
    }

    pub fn coordinator(&self, serial_number: &str) -> Option<&Arc<SnooCoordinator>> {
        self.runtime_data.get(serial_number)
    }
}

//! Base entity shared by every Snoo platform

use std::sync::Arc;

use ha_entity::{DeviceInfo, EntityDescription, Platform, UpdateListener};

use crate::coordinator::SnooCoordinator;
use crate::strings::entity_name;
use crate::{DOMAIN, MANUFACTURER, MODEL};

/// Coordinator-backed entity built from one description
///
/// Holds no state of its own: every value is read from the coordinator's
/// snapshot when asked for.
pub struct SnooDescriptionEntity {
    coordinator: Arc<SnooCoordinator>,
    description: &'static EntityDescription,
    platform: Platform,
    unique_id: String,
}

impl SnooDescriptionEntity {
    pub fn new(
        coordinator: Arc<SnooCoordinator>,
        platform: Platform,
        description: &'static EntityDescription,
    ) -> Self {
        let unique_id = format!(
            "{}_{}",
            coordinator.device().serial_number,
            description.key
        );
        Self {
            coordinator,
            description,
            platform,
            unique_id,
        }
    }

    pub fn coordinator(&self) -> &SnooCoordinator {
        &self.coordinator
    }

    pub fn description(&self) -> &'static EntityDescription {
        self.description
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn device_info(&self) -> DeviceInfo {
        let device = self.coordinator.device();
        let info = DeviceInfo::new(DOMAIN, &device.serial_number)
            .with_name(&device.name)
            .with_manufacturer(MANUFACTURER)
            .with_model(MODEL)
            .with_serial_number(&device.serial_number);
        if device.firmware_version.is_empty() {
            info
        } else {
            info.with_sw_version(&device.firmware_version)
        }
    }

    pub fn name(&self) -> Option<String> {
        self.description
            .translation_key
            .and_then(|key| entity_name(self.platform, key))
            .map(str::to_string)
    }

    pub fn available(&self) -> bool {
        self.coordinator.available()
    }

    pub fn update_listener(&self) -> UpdateListener {
        self.coordinator.subscribe()
    }
}

/// Implement [`ha_entity::Entity`] for a type with a `base:
/// SnooDescriptionEntity` field
macro_rules! impl_snoo_entity {
    ($ty:ty) => {
        impl ha_entity::Entity for $ty {
            fn description(&self) -> &ha_entity::EntityDescription {
                self.base.description()
            }

            fn unique_id(&self) -> Option<String> {
                Some(self.base.unique_id().to_string())
            }

            fn device_info(&self) -> Option<ha_entity::DeviceInfo> {
                Some(self.base.device_info())
            }

            fn has_entity_name(&self) -> bool {
                true
            }

            fn name(&self) -> Option<String> {
                self.base.name()
            }

            fn available(&self) -> bool {
                self.base.available()
            }

            fn update_listener(&self) -> Option<ha_entity::UpdateListener> {
                Some(self.base.update_listener())
            }
        }
    };
}

pub(crate) use impl_snoo_entity;

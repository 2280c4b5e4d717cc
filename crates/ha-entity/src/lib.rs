//! Entity platform helpers
//!
//! Integrations describe what they expose with static [`EntityDescription`]
//! tables and implement one of the per-platform entity traits
//! ([`BinarySensorEntity`], [`SelectEntity`], [`SwitchEntity`]). The
//! [`EntityComponent`] owns the resulting entities: it assigns entity IDs,
//! renders their state into the state machine, re-renders whenever their
//! [`DataUpdateCoordinator`] publishes new data, and routes the entity
//! services (`switch.turn_on`, `select.select_option`, ...) to them.

mod component;
mod coordinator;
mod description;
mod device;
mod entity;

pub use component::{EntityComponent, EntityPlatform};
pub use coordinator::DataUpdateCoordinator;
pub use description::{BinarySensorDeviceClass, EntityDescription, Platform, SwitchDeviceClass};
pub use device::DeviceInfo;
pub use entity::{
    AddEntities, BinarySensorEntity, Entity, EntityError, EntityResult, PlatformEntity,
    SelectEntity, SwitchEntity, UpdateListener,
};

/// Attribute holding the display name of an entity
pub const ATTR_FRIENDLY_NAME: &str = "friendly_name";
/// Attribute holding the device class of an entity
pub const ATTR_DEVICE_CLASS: &str = "device_class";
/// Attribute holding the icon of an entity
pub const ATTR_ICON: &str = "icon";
/// Attribute holding the allowed options of a select entity
pub const ATTR_OPTIONS: &str = "options";

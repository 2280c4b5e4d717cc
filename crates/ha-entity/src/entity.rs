//! Entity traits, one per platform, and the enum the component stores them in

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use ha_core::{STATE_OFF, STATE_ON, STATE_UNAVAILABLE, STATE_UNKNOWN};
use serde_json::json;
use thiserror::Error;
use tokio::sync::watch;

use crate::description::{BinarySensorDeviceClass, EntityDescription, Platform, SwitchDeviceClass};
use crate::device::DeviceInfo;
use crate::{ATTR_DEVICE_CLASS, ATTR_FRIENDLY_NAME, ATTR_ICON, ATTR_OPTIONS};

/// Result type for entity actions
pub type EntityResult<T> = Result<T, EntityError>;

/// Receiver that yields whenever the data behind an entity changed
pub type UpdateListener = watch::Receiver<u64>;

/// Errors raised by entity actions
#[derive(Debug, Error)]
pub enum EntityError {
    #[error("entity not found: {0}")]
    NotFound(String),

    #[error("option '{option}' is not valid for {entity_id}, expected one of {options:?}")]
    InvalidOption {
        entity_id: String,
        option: String,
        options: Vec<String>,
    },

    #[error("{action} is not supported by {entity_id}")]
    NotSupported { entity_id: String, action: String },

    /// The device call behind the action failed
    #[error("device call failed: {0}")]
    Device(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl EntityError {
    /// Wrap an error raised by the device client
    pub fn device(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Device(Box::new(err))
    }
}

/// Behavior shared by every entity
pub trait Entity: Send + Sync {
    fn description(&self) -> &EntityDescription;

    /// Identifier that is stable across restarts, unique per platform and
    /// integration
    fn unique_id(&self) -> Option<String> {
        None
    }

    fn device_info(&self) -> Option<DeviceInfo> {
        None
    }

    /// Whether the display name is composed from the device name
    fn has_entity_name(&self) -> bool {
        false
    }

    /// Name of the entity itself, without the device name
    fn name(&self) -> Option<String> {
        None
    }

    fn available(&self) -> bool {
        true
    }

    /// Listener that fires whenever the entity's state should be re-rendered
    fn update_listener(&self) -> Option<UpdateListener> {
        None
    }
}

pub trait BinarySensorEntity: Entity {
    fn device_class(&self) -> Option<BinarySensorDeviceClass> {
        None
    }

    fn is_on(&self) -> Option<bool>;
}

#[async_trait]
pub trait SelectEntity: Entity {
    fn options(&self) -> Vec<String>;

    fn current_option(&self) -> Option<String>;

    /// Change the selected option
    ///
    /// Callers validate `option` against [`SelectEntity::options`] first.
    async fn select_option(&self, option: &str) -> EntityResult<()>;
}

#[async_trait]
pub trait SwitchEntity: Entity {
    fn device_class(&self) -> Option<SwitchDeviceClass> {
        None
    }

    fn is_on(&self) -> Option<bool>;

    async fn turn_on(&self) -> EntityResult<()>;

    async fn turn_off(&self) -> EntityResult<()>;
}

/// An entity tagged with its platform
#[derive(Clone)]
pub enum PlatformEntity {
    BinarySensor(Arc<dyn BinarySensorEntity>),
    Select(Arc<dyn SelectEntity>),
    Switch(Arc<dyn SwitchEntity>),
}

macro_rules! delegate {
    ($self:ident, $entity:ident => $body:expr) => {
        match $self {
            PlatformEntity::BinarySensor($entity) => $body,
            PlatformEntity::Select($entity) => $body,
            PlatformEntity::Switch($entity) => $body,
        }
    };
}

impl PlatformEntity {
    pub fn platform(&self) -> Platform {
        match self {
            PlatformEntity::BinarySensor(_) => Platform::BinarySensor,
            PlatformEntity::Select(_) => Platform::Select,
            PlatformEntity::Switch(_) => Platform::Switch,
        }
    }

    pub fn description(&self) -> &EntityDescription {
        delegate!(self, e => e.description())
    }

    pub fn unique_id(&self) -> Option<String> {
        delegate!(self, e => e.unique_id())
    }

    pub fn device_info(&self) -> Option<DeviceInfo> {
        delegate!(self, e => e.device_info())
    }

    pub fn available(&self) -> bool {
        delegate!(self, e => e.available())
    }

    pub fn update_listener(&self) -> Option<UpdateListener> {
        delegate!(self, e => e.update_listener())
    }

    /// Display name: device name and entity name for `has_entity_name`
    /// entities, the entity name alone otherwise
    pub fn friendly_name(&self) -> Option<String> {
        let (has_entity_name, name) = delegate!(self, e => (e.has_entity_name(), e.name()));
        if !has_entity_name {
            return name;
        }

        let device_name = self.device_info().and_then(|info| info.name);
        match (device_name, name) {
            (Some(device), Some(name)) => Some(format!("{} {}", device, name)),
            (Some(device), None) => Some(device),
            (None, name) => name,
        }
    }

    /// Render the current state value and attributes
    pub fn render(&self) -> (String, HashMap<String, serde_json::Value>) {
        let mut attributes = HashMap::new();
        if let Some(name) = self.friendly_name() {
            attributes.insert(ATTR_FRIENDLY_NAME.to_string(), json!(name));
        }
        if let Some(icon) = self.description().icon {
            attributes.insert(ATTR_ICON.to_string(), json!(icon));
        }

        let device_class = match self {
            PlatformEntity::BinarySensor(e) => e.device_class().map(|c| c.as_str()),
            PlatformEntity::Switch(e) => e.device_class().map(|c| c.as_str()),
            PlatformEntity::Select(_) => None,
        };
        if let Some(device_class) = device_class {
            attributes.insert(ATTR_DEVICE_CLASS.to_string(), json!(device_class));
        }
        if let PlatformEntity::Select(e) = self {
            attributes.insert(ATTR_OPTIONS.to_string(), json!(e.options()));
        }

        if !self.available() {
            return (STATE_UNAVAILABLE.to_string(), attributes);
        }

        let state = match self {
            PlatformEntity::BinarySensor(e) => on_off(e.is_on()),
            PlatformEntity::Switch(e) => on_off(e.is_on()),
            PlatformEntity::Select(e) => e
                .current_option()
                .unwrap_or_else(|| STATE_UNKNOWN.to_string()),
        };
        (state, attributes)
    }
}

fn on_off(is_on: Option<bool>) -> String {
    let state = match is_on {
        Some(true) => STATE_ON,
        Some(false) => STATE_OFF,
        None => STATE_UNKNOWN,
    };
    state.to_string()
}

/// Callback handed to integration platforms during setup
pub trait AddEntities: Send + Sync {
    /// Returns how many of `entities` were actually added
    fn add_entities(&self, entities: Vec<PlatformEntity>) -> usize;
}

impl<F> AddEntities for F
where
    F: Fn(Vec<PlatformEntity>) -> usize + Send + Sync,
{
    fn add_entities(&self, entities: Vec<PlatformEntity>) -> usize {
        self(entities)
    }
}

//! Entity descriptions and the enumerations they reference

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity platform (the domain an entity's ID lives in)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    BinarySensor,
    Select,
    Switch,
}

impl Platform {
    /// Every platform, in setup order
    pub const ALL: [Platform; 3] = [Platform::BinarySensor, Platform::Select, Platform::Switch];

    /// Entity ID domain of this platform
    pub fn domain(&self) -> &'static str {
        match self {
            Platform::BinarySensor => "binary_sensor",
            Platform::Select => "select",
            Platform::Switch => "switch",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.domain())
    }
}

/// Device class of a binary sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinarySensorDeviceClass {
    Connectivity,
}

impl BinarySensorDeviceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connectivity => "connectivity",
        }
    }
}

/// Device class of a switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchDeviceClass {
    Outlet,
    Switch,
}

impl SwitchDeviceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Outlet => "outlet",
            Self::Switch => "switch",
        }
    }
}

/// Platform-independent part of an entity description
///
/// Integrations embed this in their own description records, next to the
/// platform specific fields and the functions that read or write the device.
/// All fields are `'static` so description tables can live in `static`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDescription {
    /// Stable key, unique per integration platform
    pub key: &'static str,
    /// Key into the integration's translated entity names
    pub translation_key: Option<&'static str>,
    pub icon: Option<&'static str>,
}

impl EntityDescription {
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            translation_key: None,
            icon: None,
        }
    }

    pub const fn with_translation_key(mut self, translation_key: &'static str) -> Self {
        self.translation_key = Some(translation_key);
        self
    }

    pub const fn with_icon(mut self, icon: &'static str) -> Self {
        self.icon = Some(icon);
        self
    }
}

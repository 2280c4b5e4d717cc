//! Data reported by the Snoo and the device records the client hands out

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::client::SnooError;

/// Soothing level of the bassinet
///
/// Serialized with the device's wire values; [`SnooLevels::option`] gives
/// the name used for the intensity select entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnooLevels {
    #[serde(rename = "BASELINE")]
    Baseline,
    #[serde(rename = "LEVEL1")]
    Level1,
    #[serde(rename = "LEVEL2")]
    Level2,
    #[serde(rename = "LEVEL3")]
    Level3,
    #[serde(rename = "LEVEL4")]
    Level4,
    /// Online but not soothing
    #[serde(rename = "ONLINE")]
    Stop,
    #[serde(rename = "PRETIMEOUT")]
    PreTimeout,
    #[serde(rename = "TIMEOUT")]
    Timeout,
}

impl SnooLevels {
    /// Levels a user can pick, in display order
    pub const OPTIONS: [SnooLevels; 6] = [
        SnooLevels::Baseline,
        SnooLevels::Level1,
        SnooLevels::Level2,
        SnooLevels::Level3,
        SnooLevels::Level4,
        SnooLevels::Stop,
    ];

    /// Option name of a selectable level; `None` for the timeout levels the
    /// device only passes through on its own
    pub const fn option(self) -> Option<&'static str> {
        match self {
            SnooLevels::Baseline => Some("baseline"),
            SnooLevels::Level1 => Some("level1"),
            SnooLevels::Level2 => Some("level2"),
            SnooLevels::Level3 => Some("level3"),
            SnooLevels::Level4 => Some("level4"),
            SnooLevels::Stop => Some("stop"),
            SnooLevels::PreTimeout | SnooLevels::Timeout => None,
        }
    }

    /// Value the device uses for this level
    pub fn wire_value(self) -> &'static str {
        match self {
            SnooLevels::Baseline => "BASELINE",
            SnooLevels::Level1 => "LEVEL1",
            SnooLevels::Level2 => "LEVEL2",
            SnooLevels::Level3 => "LEVEL3",
            SnooLevels::Level4 => "LEVEL4",
            SnooLevels::Stop => "ONLINE",
            SnooLevels::PreTimeout => "PRETIMEOUT",
            SnooLevels::Timeout => "TIMEOUT",
        }
    }
}

impl FromStr for SnooLevels {
    type Err = SnooError;

    /// Parse an option name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SnooLevels::OPTIONS
            .into_iter()
            .find(|level| level.option() == Some(s))
            .ok_or_else(|| SnooError::UnknownLevel(s.to_string()))
    }
}

impl fmt::Display for SnooLevels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.option().unwrap_or_else(|| self.wire_value()))
    }
}

/// Session state machine of the bassinet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnooStateMachine {
    /// Current soothing level
    #[serde(rename = "state")]
    pub level: SnooLevels,
    /// "on" or "off"
    #[serde(default = "default_off")]
    pub sticky_white_noise: String,
    #[serde(default = "default_off")]
    pub hold: String,
    #[serde(default = "default_off")]
    pub weaning: String,
    #[serde(default)]
    pub audio: String,
    /// Seconds left at the current level, -1 when not counting down
    #[serde(default = "default_unset")]
    pub time_left: i64,
    #[serde(default)]
    pub session_id: String,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub is_active_session: bool,
    #[serde(default = "default_unset")]
    pub since_session_start_ms: i64,
}

/// Last-known state of one bassinet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnooData {
    #[serde(deserialize_with = "flexible_bool")]
    pub left_safety_clip: bool,
    #[serde(deserialize_with = "flexible_bool")]
    pub right_safety_clip: bool,
    #[serde(default)]
    pub sw_version: String,
    #[serde(default)]
    pub event_time_ms: i64,
    pub state_machine: SnooStateMachine,
    #[serde(default)]
    pub system_state: String,
}

impl SnooData {
    /// Parse a status message as pushed by the device
    pub fn from_json(payload: &str) -> serde_json::Result<Self> {
        serde_json::from_str(payload)
    }
}

/// A bassinet registered to the account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnooDevice {
    pub serial_number: String,
    pub name: String,
    #[serde(default)]
    pub firmware_version: String,
    #[serde(default)]
    pub device_type: Option<u32>,
    #[serde(default)]
    pub baby_ids: Vec<String>,
}

impl SnooDevice {
    pub fn new(serial_number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            serial_number: serial_number.into(),
            name: name.into(),
            firmware_version: String::new(),
            device_type: None,
            baby_ids: Vec::new(),
        }
    }
}

fn default_off() -> String {
    "off".to_string()
}

fn default_unset() -> i64 {
    -1
}

/// The device reports flags as booleans, 0/1 or strings depending on the
/// message type
fn flexible_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Int(value) => Ok(value != 0),
        Flag::Text(text) => match text.to_ascii_lowercase().as_str() {
            "true" | "on" | "1" => Ok(true),
            "false" | "off" | "0" | "" => Ok(false),
            other => Err(D::Error::custom(format!("invalid flag value '{}'", other))),
        },
    }
}

//! Device client interface
//!
//! The client talks to the Snoo cloud (authentication, REST commands, the
//! push subscription). Entities only need the setters below.

use async_trait::async_trait;
use thiserror::Error;

use crate::containers::{SnooDevice, SnooLevels};

/// Errors raised by the device client
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SnooError {
    #[error("command for {serial_number} failed: {reason}")]
    Command {
        serial_number: String,
        reason: String,
    },

    #[error("not authorized with the Snoo cloud")]
    Unauthorized,

    #[error("device {0} is offline")]
    Offline(String),

    #[error("unknown intensity level '{0}'")]
    UnknownLevel(String),
}

/// Commands the integration sends to a bassinet
#[async_trait]
pub trait SnooClient: Send + Sync {
    /// Move the bassinet to a soothing level
    async fn set_level(&self, device: &SnooDevice, level: SnooLevels) -> Result<(), SnooError>;

    /// Keep white noise playing after the session ends
    async fn set_sticky_white_noise(&self, device: &SnooDevice, on: bool)
        -> Result<(), SnooError>;
}

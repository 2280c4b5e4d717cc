//! Recording Snoo client

use std::sync::Mutex;

use async_trait::async_trait;
use ha_snoo::{SnooClient, SnooDevice, SnooError, SnooLevels};

/// A command received by [`MockSnoo`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnooCommand {
    SetLevel { serial_number: String, level: SnooLevels },
    SetStickyWhiteNoise { serial_number: String, on: bool },
}

/// Client that records commands instead of sending them
#[derive(Default)]
pub struct MockSnoo {
    commands: Mutex<Vec<SnooCommand>>,
    failure: Mutex<Option<SnooError>>,
}

impl MockSnoo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following command fail with `error`
    pub fn fail_with(&self, error: SnooError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn commands(&self) -> Vec<SnooCommand> {
        self.commands.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.commands.lock().unwrap().clear();
    }

    fn record(&self, command: SnooCommand) -> Result<(), SnooError> {
        self.commands.lock().unwrap().push(command);
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SnooClient for MockSnoo {
    async fn set_level(&self, device: &SnooDevice, level: SnooLevels) -> Result<(), SnooError> {
        self.record(SnooCommand::SetLevel {
            serial_number: device.serial_number.clone(),
            level,
        })
    }

    async fn set_sticky_white_noise(
        &self,
        device: &SnooDevice,
        on: bool,
    ) -> Result<(), SnooError> {
        self.record(SnooCommand::SetStickyWhiteNoise {
            serial_number: device.serial_number.clone(),
            on,
        })
    }
}

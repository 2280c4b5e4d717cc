use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::client::{SnooClient, SnooError};
use crate::containers::{SnooData, SnooDevice, SnooLevels, SnooStateMachine};
use crate::coordinator::SnooCoordinator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SetLevel(String, SnooLevels),
    SetStickyWhiteNoise(String, bool),
}

/// Client that records every command and optionally fails it
#[derive(Default)]
pub struct RecordingSnoo {
    calls: Mutex<Vec<Call>>,
    failure: Option<SnooError>,
}

impl RecordingSnoo {
    pub fn failing(error: SnooError) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failure: Some(error),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), SnooError> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SnooClient for RecordingSnoo {
    async fn set_level(&self, device: &SnooDevice, level: SnooLevels) -> Result<(), SnooError> {
        self.record(Call::SetLevel(device.serial_number.clone(), level))
    }

    async fn set_sticky_white_noise(
        &self,
        device: &SnooDevice,
        on: bool,
    ) -> Result<(), SnooError> {
        self.record(Call::SetStickyWhiteNoise(device.serial_number.clone(), on))
    }
}

pub fn coordinator(serial_number: &str, name: &str) -> Arc<SnooCoordinator> {
    Arc::new(SnooCoordinator::new(
        Arc::new(RecordingSnoo::default()),
        SnooDevice::new(serial_number, name),
    ))
}

pub fn snapshot() -> SnooData {
    SnooData {
        left_safety_clip: false,
        right_safety_clip: false,
        sw_version: "v1.14.27".to_string(),
        event_time_ms: 0,
        state_machine: SnooStateMachine {
            level: SnooLevels::Baseline,
            sticky_white_noise: "off".to_string(),
            hold: "off".to_string(),
            weaning: "off".to_string(),
            audio: "on".to_string(),
            time_left: -1,
            session_id: "0".to_string(),
            is_active_session: false,
            since_session_start_ms: -1,
        },
        system_state: "normal".to_string(),
    }
}

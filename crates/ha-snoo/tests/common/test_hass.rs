//! Test host with a state machine, service registry and entity component

use std::sync::Arc;

use ha_core::Context;
use ha_entity::EntityComponent;
use ha_service_registry::{ServiceRegistry, ServiceResult};
use ha_snoo::{SnooConfig, SnooConfigEntry, DOMAIN};
use ha_state_machine::StateMachine;
use serde_json::Value;

use super::{devices_fixture, MockSnoo};

pub struct TestHomeAssistant {
    pub states: Arc<StateMachine>,
    pub services: Arc<ServiceRegistry>,
    pub component: Arc<EntityComponent>,
    pub snoo: Arc<MockSnoo>,
    pub entry: SnooConfigEntry,
}

impl TestHomeAssistant {
    /// Host with one coordinator per fixture device and no data yet
    pub fn new(options: SnooConfig) -> Self {
        let states = Arc::new(StateMachine::new());
        let services = Arc::new(ServiceRegistry::new());
        let component = EntityComponent::new(states.clone(), services.clone());
        let snoo = Arc::new(MockSnoo::new());

        let mut entry = SnooConfigEntry::new("parent@example.com", options);
        for device in devices_fixture() {
            entry.add_device(snoo.clone(), device);
        }

        Self {
            states,
            services,
            component,
            snoo,
            entry,
        }
    }

    /// Run the integration's setup against the entity component
    pub fn setup(&self) -> usize {
        ha_snoo::setup_entry(&self.entry, &self.component.platform(DOMAIN))
    }

    pub async fn call_service(&self, domain: &str, service: &str, data: Value) -> ServiceResult {
        self.services.call(domain, service, data, Context::new()).await
    }

    pub fn assert_state(&self, entity_id: &str, expected: &str) {
        let state = self.states.get_state(entity_id);
        assert_eq!(
            state.as_deref(),
            Some(expected),
            "Expected entity {} to be in state '{}', but was {:?}",
            entity_id,
            expected,
            state
        );
    }
}

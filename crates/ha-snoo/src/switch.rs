//! Sticky white noise switch

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use ha_core::STATE_ON;
use ha_entity::{
    AddEntities, EntityDescription, EntityError, EntityResult, Platform, PlatformEntity,
    SwitchDeviceClass, SwitchEntity,
};

use crate::client::{SnooClient, SnooError};
use crate::containers::{SnooData, SnooDevice};
use crate::coordinator::{SnooConfigEntry, SnooCoordinator};
use crate::entity::{impl_snoo_entity, SnooDescriptionEntity};

/// Sends the requested switch state to the device
pub type SetSwitchFn =
    for<'a> fn(&'a dyn SnooClient, &'a SnooDevice, bool) -> BoxFuture<'a, Result<(), SnooError>>;

/// Describes a Snoo switch
pub struct SnooSwitchEntityDescription {
    pub base: EntityDescription,
    pub device_class: Option<SwitchDeviceClass>,
    pub value_fn: fn(&SnooData) -> bool,
    pub set_value_fn: SetSwitchFn,
}

pub static SWITCH_DESCRIPTIONS: [SnooSwitchEntityDescription; 1] = [SnooSwitchEntityDescription {
    base: EntityDescription::new("sticky_white_noise").with_translation_key("sticky_white_noise"),
    device_class: None,
    value_fn: sticky_white_noise,
    set_value_fn: set_sticky_white_noise,
}];

fn sticky_white_noise(data: &SnooData) -> bool {
    data.state_machine.sticky_white_noise == STATE_ON
}

fn set_sticky_white_noise<'a>(
    snoo: &'a dyn SnooClient,
    device: &'a SnooDevice,
    on: bool,
) -> BoxFuture<'a, Result<(), SnooError>> {
    snoo.set_sticky_white_noise(device, on)
}

/// Add one switch per coordinator and description
pub fn setup_entry(entry: &SnooConfigEntry, add_entities: &dyn AddEntities) -> usize {
    let entities: Vec<PlatformEntity> = entry
        .runtime_data
        .values()
        .flat_map(|coordinator| {
            SWITCH_DESCRIPTIONS.iter().map(move |description| {
                PlatformEntity::Switch(Arc::new(SnooSwitch::new(coordinator.clone(), description)))
            })
        })
        .collect();

    add_entities.add_entities(entities)
}

pub struct SnooSwitch {
    base: SnooDescriptionEntity,
    description: &'static SnooSwitchEntityDescription,
}

impl SnooSwitch {
    pub fn new(
        coordinator: Arc<SnooCoordinator>,
        description: &'static SnooSwitchEntityDescription,
    ) -> Self {
        Self {
            base: SnooDescriptionEntity::new(coordinator, Platform::Switch, &description.base),
            description,
        }
    }

    async fn set(&self, on: bool) -> EntityResult<()> {
        let coordinator = self.base.coordinator();
        (self.description.set_value_fn)(coordinator.snoo(), coordinator.device(), on)
            .await
            .map_err(EntityError::device)
    }
}

impl_snoo_entity!(SnooSwitch);

#[async_trait]
impl SwitchEntity for SnooSwitch {
    fn device_class(&self) -> Option<SwitchDeviceClass> {
        self.description.device_class
    }

    fn is_on(&self) -> Option<bool> {
        self.base.coordinator().with_data(self.description.value_fn)
    }

    async fn turn_on(&self) -> EntityResult<()> {
        self.set(true).await
    }

    async fn turn_off(&self) -> EntityResult<()> {
        self.set(false).await
    }
}

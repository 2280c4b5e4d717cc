//! Intensity select

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{self, BoxFuture, FutureExt};
use ha_entity::{
    AddEntities, EntityDescription, EntityError, EntityResult, Platform, PlatformEntity,
    SelectEntity,
};

use crate::client::{SnooClient, SnooError};
use crate::containers::{SnooData, SnooDevice, SnooLevels};
use crate::coordinator::{SnooConfigEntry, SnooCoordinator};
use crate::entity::{impl_snoo_entity, SnooDescriptionEntity};

/// Sends a selected option to the device
pub type SetOptionFn = for<'a> fn(
    &'a dyn SnooClient,
    &'a SnooDevice,
    &'a str,
) -> BoxFuture<'a, Result<(), SnooError>>;

/// Describes a Snoo select
pub struct SnooSelectEntityDescription {
    pub base: EntityDescription,
    pub options: &'static [&'static str],
    pub value_fn: fn(&SnooData) -> Option<&'static str>,
    pub set_value_fn: SetOptionFn,
}

pub static SELECT_DESCRIPTIONS: [SnooSelectEntityDescription; 1] = [SnooSelectEntityDescription {
    base: EntityDescription::new("intensity").with_translation_key("intensity"),
    options: &["baseline", "level1", "level2", "level3", "level4", "stop"],
    value_fn: current_level,
    set_value_fn: set_intensity,
}];

/// Option of the current level; transient timeout levels have none
fn current_level(data: &SnooData) -> Option<&'static str> {
    data.state_machine.level.option()
}

fn set_intensity<'a>(
    snoo: &'a dyn SnooClient,
    device: &'a SnooDevice,
    option: &'a str,
) -> BoxFuture<'a, Result<(), SnooError>> {
    match option.parse::<SnooLevels>() {
        Ok(level) => snoo.set_level(device, level),
        Err(err) => future::ready(Err(err)).boxed(),
    }
}

/// Add one select per coordinator and description
pub fn setup_entry(entry: &SnooConfigEntry, add_entities: &dyn AddEntities) -> usize {
    let entities: Vec<PlatformEntity> = entry
        .runtime_data
        .values()
        .flat_map(|coordinator| {
            SELECT_DESCRIPTIONS.iter().map(move |description| {
                PlatformEntity::Select(Arc::new(SnooSelect::new(coordinator.clone(), description)))
            })
        })
        .collect();

    add_entities.add_entities(entities)
}

pub struct SnooSelect {
    base: SnooDescriptionEntity,
    description: &'static SnooSelectEntityDescription,
}

impl SnooSelect {
    pub fn new(
        coordinator: Arc<SnooCoordinator>,
        description: &'static SnooSelectEntityDescription,
    ) -> Self {
        Self {
            base: SnooDescriptionEntity::new(coordinator, Platform::Select, &description.base),
            description,
        }
    }
}

impl_snoo_entity!(SnooSelect);

#[async_trait]
impl SelectEntity for SnooSelect {
    fn options(&self) -> Vec<String> {
        self.description
            .options
            .iter()
            .map(|option| option.to_string())
            .collect()
    }

    fn current_option(&self) -> Option<String> {
        self.base
            .coordinator()
            .with_data(self.description.value_fn)
            .flatten()
            .map(str::to_string)
    }

    async fn select_option(&self, option: &str) -> EntityResult<()> {
        let coordinator = self.base.coordinator();
        (self.description.set_value_fn)(coordinator.snoo(), coordinator.device(), option)
            .await
            .map_err(EntityError::device)
    }
}

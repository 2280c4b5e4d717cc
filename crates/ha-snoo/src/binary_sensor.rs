//! Safety clip sensors

use std::sync::Arc;

use ha_entity::{
    AddEntities, BinarySensorDeviceClass, BinarySensorEntity, EntityDescription, Platform,
    PlatformEntity,
};

use crate::containers::SnooData;
use crate::coordinator::{SnooConfigEntry, SnooCoordinator};
use crate::entity::{impl_snoo_entity, SnooDescriptionEntity};

/// Describes a Snoo binary sensor
pub struct SnooBinarySensorEntityDescription {
    pub base: EntityDescription,
    pub device_class: Option<BinarySensorDeviceClass>,
    pub value_fn: fn(&SnooData) -> bool,
}

pub static BINARY_SENSOR_DESCRIPTIONS: [SnooBinarySensorEntityDescription; 2] = [
    SnooBinarySensorEntityDescription {
        base: EntityDescription::new("left_clip").with_translation_key("left_clip"),
        device_class: Some(BinarySensorDeviceClass::Connectivity),
        value_fn: left_clip,
    },
    // Reads the left clip as well; the right clip flag is not wired up
    SnooBinarySensorEntityDescription {
        base: EntityDescription::new("right_clip").with_translation_key("right_clip"),
        device_class: Some(BinarySensorDeviceClass::Connectivity),
        value_fn: left_clip,
    },
];

fn left_clip(data: &SnooData) -> bool {
    data.left_safety_clip
}

/// Add one binary sensor per coordinator and description
pub fn setup_entry(entry: &SnooConfigEntry, add_entities: &dyn AddEntities) -> usize {
    let entities: Vec<PlatformEntity> = entry
        .runtime_data
        .values()
        .flat_map(|coordinator| {
            BINARY_SENSOR_DESCRIPTIONS.iter().map(move |description| {
                PlatformEntity::BinarySensor(Arc::new(SnooBinarySensor::new(
                    coordinator.clone(),
                    description,
                )))
            })
        })
        .collect();

    add_entities.add_entities(entities)
}

pub struct SnooBinarySensor {
    base: SnooDescriptionEntity,
    description: &'static SnooBinarySensorEntityDescription,
}

impl SnooBinarySensor {
    pub fn new(
        coordinator: Arc<SnooCoordinator>,
        description: &'static SnooBinarySensorEntityDescription,
    ) -> Self {
        Self {
            base: SnooDescriptionEntity::new(
                coordinator,
                Platform::BinarySensor,
                &description.base,
            ),
            description,
        }
    }
}

impl_snoo_entity!(SnooBinarySensor);

impl BinarySensorEntity for SnooBinarySensor {
    fn device_class(&self) -> Option<BinarySensorDeviceClass> {
        self.description.device_class
    }

    fn is_on(&self) -> Option<bool> {
        self.base.coordinator().with_data(self.description.value_fn)
    }
}

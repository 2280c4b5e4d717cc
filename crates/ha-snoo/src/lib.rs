//! Snoo smart bassinet integration
//!
//! Exposes each bassinet of an account as
//! - two binary sensors for the safety clips,
//! - an intensity select that moves the bassinet between soothing levels,
//! - a sticky white noise switch.
//!
//! Entities read from the device's [`SnooCoordinator`] and send commands
//! through its [`SnooClient`]. The host adds them with
//! [`EntityComponent::platform`](ha_entity::EntityComponent::platform) and
//! [`setup_entry`].

pub mod binary_sensor;
pub mod client;
pub mod config;
pub mod containers;
pub mod coordinator;
mod entity;
pub mod select;
mod strings;
pub mod switch;

#[cfg(test)]
mod test_util;

use ha_entity::{AddEntities, EntityComponent, Platform};
use tracing::info;

pub use client::{SnooClient, SnooError};
pub use config::{ConfigError, ConfigResult, SnooConfig};
pub use containers::{SnooData, SnooDevice, SnooLevels, SnooStateMachine};
pub use coordinator::{SnooConfigEntry, SnooCoordinator, SnooCoordinators};
pub use entity::SnooDescriptionEntity;

/// Integration domain
pub const DOMAIN: &str = "snoo";
pub const MANUFACTURER: &str = "Happiest Baby";
pub const MODEL: &str = "Snoo";

/// Set up every enabled platform for a loaded entry
///
/// Returns the number of entities actually added; entities already
/// registered from an earlier setup are not counted.
pub fn setup_entry(entry: &SnooConfigEntry, add_entities: &dyn AddEntities) -> usize {
    let mut total = 0;
    for platform in &entry.options.platforms {
        let added = match platform {
            Platform::BinarySensor => binary_sensor::setup_entry(entry, add_entities),
            Platform::Select => select::setup_entry(entry, add_entities),
            Platform::Switch => switch::setup_entry(entry, add_entities),
        };
        info!(
            entry_id = %entry.entry_id,
            %platform,
            devices = entry.runtime_data.len(),
            entities = added,
            "Set up Snoo platform"
        );
        total += added;
    }
    total
}

/// Remove every Snoo entity from the component
pub fn unload_entry(component: &EntityComponent) -> usize {
    let removed = component.remove_platform(DOMAIN);
    info!(removed, "Unloaded Snoo entities");
    removed
}

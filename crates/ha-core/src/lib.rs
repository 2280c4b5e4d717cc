//! Core types for the entity platform
//!
//! This crate provides the fundamental types shared by the state machine,
//! the service registry and entity integrations: EntityId, State and Context.

mod context;
mod entity_id;
mod state;

pub use context::Context;
pub use entity_id::{slugify, EntityId, EntityIdError};
pub use state::State;

/// Maximum length for a state value
pub const MAX_STATE_LENGTH: usize = 255;

/// State of a binary entity that is on
pub const STATE_ON: &str = "on";

/// State of a binary entity that is off
pub const STATE_OFF: &str = "off";

/// State value used when the integration cannot tell the current value
pub const STATE_UNKNOWN: &str = "unknown";

/// State value used when the entity's device cannot be reached
pub const STATE_UNAVAILABLE: &str = "unavailable";

//! Entity component
//!
//! Owns every entity added by integration platforms: assigns entity IDs,
//! writes their rendered state to the state machine, keeps that state in
//! sync with coordinator updates, and exposes the platform services that act
//! on entities.

use std::sync::{Arc, Weak};

use dashmap::DashMap;
use ha_core::{Context, EntityId, State};
use ha_service_registry::{ServiceCall, ServiceDescription, ServiceError, ServiceRegistry};
use ha_state_machine::StateMachine;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::description::Platform;
use crate::entity::{AddEntities, EntityError, EntityResult, PlatformEntity, UpdateListener};

struct RegisteredEntity {
    entity: PlatformEntity,
    integration: String,
    entity_id: EntityId,
    unique_key: Option<String>,
    listener: Option<JoinHandle<()>>,
}

#[derive(Debug, Clone, Copy)]
enum SwitchAction {
    TurnOn,
    TurnOff,
    Toggle,
}

impl SwitchAction {
    fn service(&self) -> &'static str {
        match self {
            SwitchAction::TurnOn => "turn_on",
            SwitchAction::TurnOff => "turn_off",
            SwitchAction::Toggle => "toggle",
        }
    }
}

/// Registry of live entities and the services that drive them
pub struct EntityComponent {
    states: Arc<StateMachine>,
    services: Arc<ServiceRegistry>,
    /// Entities keyed by entity_id string
    entities: DashMap<String, RegisteredEntity>,
    /// "platform.integration.unique_id" -> entity_id
    unique_ids: DashMap<String, String>,
}

impl EntityComponent {
    /// Create the component and register the entity services
    pub fn new(states: Arc<StateMachine>, services: Arc<ServiceRegistry>) -> Arc<Self> {
        let component = Arc::new(Self {
            states,
            services,
            entities: DashMap::new(),
            unique_ids: DashMap::new(),
        });
        component.register_services();
        component
    }

    /// Handle through which an integration adds its entities
    pub fn platform(self: &Arc<Self>, integration: impl Into<String>) -> EntityPlatform {
        EntityPlatform {
            component: self.clone(),
            integration: integration.into(),
        }
    }

    /// Add entities on behalf of `integration`
    ///
    /// Entities whose unique ID is already registered for the same platform
    /// and integration are skipped. Returns the IDs of the added entities.
    pub fn add_entities(
        self: &Arc<Self>,
        integration: &str,
        entities: Vec<PlatformEntity>,
    ) -> Vec<EntityId> {
        let added: Vec<EntityId> = entities
            .into_iter()
            .filter_map(|entity| self.add_entity(integration, entity))
            .collect();

        info!(integration, count = added.len(), "Added entities");
        added
    }

    fn add_entity(self: &Arc<Self>, integration: &str, entity: PlatformEntity) -> Option<EntityId> {
        let platform = entity.platform();

        let unique_key = entity
            .unique_id()
            .map(|unique_id| format!("{}.{}.{}", platform, integration, unique_id));
        if let Some(key) = &unique_key {
            if let Some(existing) = self.unique_ids.get(key) {
                warn!(
                    integration,
                    unique_key = %key,
                    existing = %existing.value(),
                    "Entity with this unique ID already exists - ignoring"
                );
                return None;
            }
        }

        let name = entity
            .friendly_name()
            .unwrap_or_else(|| entity.description().key.to_string());
        let entity_id = match EntityId::generate(platform.domain(), &name, |candidate| {
            self.entities.contains_key(candidate) || self.states.get(candidate).is_some()
        }) {
            Ok(id) => id,
            Err(e) => {
                warn!(integration, name = %name, "Cannot generate entity ID: {}", e);
                return None;
            }
        };
        let key = entity_id.to_string();

        let listener = entity
            .update_listener()
            .and_then(|rx| self.spawn_listener(key.clone(), rx));

        if let Some(unique_key) = &unique_key {
            self.unique_ids.insert(unique_key.clone(), key.clone());
        }
        self.entities.insert(
            key.clone(),
            RegisteredEntity {
                entity,
                integration: integration.to_string(),
                entity_id: entity_id.clone(),
                unique_key,
                listener,
            },
        );

        debug!(entity_id = %key, "Registered entity");
        self.write_state(&key);
        Some(entity_id)
    }

    fn spawn_listener(self: &Arc<Self>, entity_id: String, mut rx: UpdateListener) -> Option<JoinHandle<()>> {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                warn!(entity_id = %entity_id, "No async runtime, entity will not follow updates");
                return None;
            }
        };

        let component: Weak<Self> = Arc::downgrade(self);
        Some(runtime.spawn(async move {
            while rx.changed().await.is_ok() {
                let Some(component) = component.upgrade() else {
                    break;
                };
                component.write_state(&entity_id);
            }
        }))
    }

    /// Render an entity and write the result to the state machine
    ///
    /// Returns `None` once the entity has been removed.
    pub fn write_state(&self, entity_id: &str) -> Option<State> {
        // The entry stays borrowed until the write lands, so remove_platform
        // cannot delete the state in between
        let registered = self.entities.get(entity_id)?;
        let (state, attributes) = registered.entity.render();
        Some(self.states.set(
            registered.entity_id.clone(),
            state,
            attributes,
            Context::new(),
        ))
    }

    /// Look up a registered entity
    pub fn entity(&self, entity_id: &str) -> Option<PlatformEntity> {
        self.entities.get(entity_id).map(|r| r.entity.clone())
    }

    /// Entity ID registered for a unique ID
    pub fn entity_id_for(&self, platform: Platform, integration: &str, unique_id: &str) -> Option<String> {
        self.unique_ids
            .get(&format!("{}.{}.{}", platform, integration, unique_id))
            .map(|id| id.clone())
    }

    /// Entity IDs added by an integration, sorted
    pub fn entity_ids(&self, integration: &str) -> Vec<String> {
        let mut ids: Vec<String> = self
            .entities
            .iter()
            .filter(|r| r.integration == integration)
            .map(|r| r.key().clone())
            .collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Select an option on a select entity
    ///
    /// The option is checked against the entity's option list before the
    /// entity sees it.
    pub async fn select_option(&self, entity_id: &str, option: &str) -> EntityResult<()> {
        let entity = match self.entity(entity_id) {
            Some(PlatformEntity::Select(entity)) => entity,
            Some(_) => {
                return Err(EntityError::NotSupported {
                    entity_id: entity_id.to_string(),
                    action: "select_option".to_string(),
                })
            }
            None => return Err(EntityError::NotFound(entity_id.to_string())),
        };

        let options = entity.options();
        if !options.iter().any(|o| o == option) {
            return Err(EntityError::InvalidOption {
                entity_id: entity_id.to_string(),
                option: option.to_string(),
                options,
            });
        }

        debug!(entity_id, option, "Selecting option");
        entity.select_option(option).await
    }

    pub async fn turn_on(&self, entity_id: &str) -> EntityResult<()> {
        self.switch_action(entity_id, SwitchAction::TurnOn).await
    }

    pub async fn turn_off(&self, entity_id: &str) -> EntityResult<()> {
        self.switch_action(entity_id, SwitchAction::TurnOff).await
    }

    /// Turn a switch off if it is on, on otherwise
    pub async fn toggle(&self, entity_id: &str) -> EntityResult<()> {
        self.switch_action(entity_id, SwitchAction::Toggle).await
    }

    async fn switch_action(&self, entity_id: &str, action: SwitchAction) -> EntityResult<()> {
        let entity = match self.entity(entity_id) {
            Some(PlatformEntity::Switch(entity)) => entity,
            Some(_) => {
                return Err(EntityError::NotSupported {
                    entity_id: entity_id.to_string(),
                    action: action.service().to_string(),
                })
            }
            None => return Err(EntityError::NotFound(entity_id.to_string())),
        };

        debug!(entity_id, action = action.service(), "Switch action");
        match action {
            SwitchAction::TurnOn => entity.turn_on().await,
            SwitchAction::TurnOff => entity.turn_off().await,
            SwitchAction::Toggle if entity.is_on() == Some(true) => entity.turn_off().await,
            SwitchAction::Toggle => entity.turn_on().await,
        }
    }

    /// Remove every entity added by `integration`, including its state
    pub fn remove_platform(&self, integration: &str) -> usize {
        let ids: Vec<String> = self
            .entities
            .iter()
            .filter(|r| r.integration == integration)
            .map(|r| r.key().clone())
            .collect();

        for id in &ids {
            // Waits for any write_state still holding this entity
            let Some((_, registered)) = self.entities.remove(id) else {
                continue;
            };
            self.states.remove(&registered.entity_id, Context::new());
            if let Some(listener) = registered.listener {
                listener.abort();
            }
            if let Some(unique_key) = registered.unique_key {
                self.unique_ids.remove(&unique_key);
            }
        }

        info!(integration, count = ids.len(), "Removed entities");
        ids.len()
    }

    fn register_services(self: &Arc<Self>) {
        let component = Arc::downgrade(self);
        self.services.register(
            ServiceDescription {
                name: Some("Select".to_string()),
                description: Some("Select an option of a select entity".to_string()),
                fields: vec!["option".to_string()],
                ..ServiceDescription::new(Platform::Select.domain(), "select_option")
            },
            move |call: ServiceCall| {
                let component = component.clone();
                async move {
                    let component = upgrade(&component)?;
                    let option: String = call
                        .get("option")
                        .ok_or_else(|| ServiceError::InvalidData("option is required".to_string()))?;
                    for entity_id in target_entities(&call)? {
                        component.select_option(&entity_id, &option).await?;
                    }
                    Ok::<(), ServiceError>(())
                }
            },
        );

        for action in [SwitchAction::TurnOn, SwitchAction::TurnOff, SwitchAction::Toggle] {
            let component = Arc::downgrade(self);
            self.services.register(
                ServiceDescription::new(Platform::Switch.domain(), action.service()),
                move |call: ServiceCall| {
                    let component = component.clone();
                    async move {
                        let component = upgrade(&component)?;
                        for entity_id in target_entities(&call)? {
                            component.switch_action(&entity_id, action).await?;
                        }
                        Ok::<(), ServiceError>(())
                    }
                },
            );
        }
    }
}

impl Drop for EntityComponent {
    fn drop(&mut self) {
        for registered in self.entities.iter() {
            if let Some(listener) = &registered.listener {
                listener.abort();
            }
        }
    }
}

fn upgrade(component: &Weak<EntityComponent>) -> Result<Arc<EntityComponent>, ServiceError> {
    component
        .upgrade()
        .ok_or_else(|| ServiceError::CallFailed("entity component was dropped".to_string()))
}

fn target_entities(call: &ServiceCall) -> Result<Vec<String>, ServiceError> {
    let ids = call.entity_ids();
    if ids.is_empty() {
        return Err(ServiceError::InvalidData("entity_id is required".to_string()));
    }
    Ok(ids)
}

impl From<EntityError> for ServiceError {
    fn from(err: EntityError) -> Self {
        match err {
            EntityError::Device(_) => ServiceError::CallFailed(err.to_string()),
            _ => ServiceError::InvalidData(err.to_string()),
        }
    }
}

/// An integration's handle for adding entities to the component
#[derive(Clone)]
pub struct EntityPlatform {
    component: Arc<EntityComponent>,
    integration: String,
}

impl EntityPlatform {
    pub fn integration(&self) -> &str {
        &self.integration
    }
}

impl AddEntities for EntityPlatform {
    fn add_entities(&self, entities: Vec<PlatformEntity>) -> usize {
        self.component.add_entities(&self.integration, entities).len()
    }
}

//! Snoo integration against the entity component

mod common;

use std::time::Duration;

use common::{init_tracing, load_fixture, status_fixture, SnooCommand, TestHomeAssistant};
use ha_entity::Platform;
use ha_service_registry::ServiceError;
use ha_snoo::binary_sensor::BINARY_SENSOR_DESCRIPTIONS;
use ha_snoo::select::SELECT_DESCRIPTIONS;
use ha_snoo::switch::SWITCH_DESCRIPTIONS;
use ha_snoo::{SnooConfig, SnooError, SnooLevels, DOMAIN};
use serde_json::json;

fn setup_all() -> TestHomeAssistant {
    init_tracing();
    let hass = TestHomeAssistant::new(SnooConfig::default());
    hass.setup();
    hass
}

fn push_status(hass: &TestHomeAssistant) {
    for coordinator in hass.entry.runtime_data.values() {
        coordinator.update(status_fixture());
    }
}

#[tokio::test]
async fn test_setup_adds_one_entity_per_device_and_description() {
    init_tracing();
    let hass = TestHomeAssistant::new(SnooConfig::default());

    let added = hass.setup();

    let devices = hass.entry.runtime_data.len();
    let descriptions =
        BINARY_SENSOR_DESCRIPTIONS.len() + SELECT_DESCRIPTIONS.len() + SWITCH_DESCRIPTIONS.len();
    assert_eq!(devices, 2);
    assert_eq!(added, devices * descriptions);
    assert_eq!(hass.component.len(), devices * descriptions);

    assert_eq!(
        hass.component.entity_ids(DOMAIN),
        vec![
            "binary_sensor.guest_room_left_safety_clip",
            "binary_sensor.guest_room_right_safety_clip",
            "binary_sensor.nursery_left_safety_clip",
            "binary_sensor.nursery_right_safety_clip",
            "select.guest_room_intensity",
            "select.nursery_intensity",
            "switch.guest_room_sticky_white_noise",
            "switch.nursery_sticky_white_noise",
        ]
    );
}

#[tokio::test]
async fn test_setup_twice_adds_no_duplicates() {
    let hass = setup_all();

    assert_eq!(hass.setup(), 0);

    assert_eq!(hass.component.len(), 8);
    assert_eq!(
        hass.component
            .entity_id_for(Platform::Select, DOMAIN, "SN0001_intensity")
            .as_deref(),
        Some("select.nursery_intensity")
    );
}

#[tokio::test]
async fn test_setup_only_enabled_platforms() {
    init_tracing();
    let options = SnooConfig::from_yaml_str(&load_fixture("configuration.yaml")).unwrap();
    let hass = TestHomeAssistant::new(options);

    assert_eq!(hass.setup(), 4);
    assert!(hass.states.entity_ids("binary_sensor").is_empty());
    assert_eq!(hass.states.entity_ids("select").len(), 2);
    assert_eq!(hass.states.entity_ids("switch").len(), 2);
}

#[tokio::test]
async fn test_states_before_and_after_first_status() {
    let hass = setup_all();
    for entity_id in hass.component.entity_ids(DOMAIN) {
        assert!(hass.states.get(&entity_id).unwrap().is_unavailable(), "{}", entity_id);
    }

    push_status(&hass);
    for entity_id in hass.component.entity_ids(DOMAIN) {
        hass.component.write_state(&entity_id);
    }

    hass.assert_state("binary_sensor.nursery_left_safety_clip", "on");
    hass.assert_state("binary_sensor.nursery_right_safety_clip", "on");
    hass.assert_state("select.nursery_intensity", "level1");
    hass.assert_state("switch.nursery_sticky_white_noise", "off");

    let select = hass.states.get("select.nursery_intensity").unwrap();
    assert_eq!(select.attributes["friendly_name"], "Nursery Intensity");
    assert_eq!(
        select.attributes["options"],
        json!(["baseline", "level1", "level2", "level3", "level4", "stop"])
    );
    let clip = hass.states.get("binary_sensor.guest_room_left_safety_clip").unwrap();
    assert_eq!(clip.attributes["device_class"], "connectivity");
}

#[tokio::test]
async fn test_coordinator_update_rewrites_state() {
    let hass = setup_all();
    let mut changes = hass.states.subscribe();

    let coordinator = hass.entry.coordinator("SN0002").unwrap();
    let mut status = status_fixture();
    status.state_machine.level = SnooLevels::Level3;
    status.state_machine.sticky_white_noise = "on".to_string();
    coordinator.update(status);

    tokio::time::timeout(Duration::from_secs(2), async {
        let mut pending = vec![
            "select.guest_room_intensity",
            "switch.guest_room_sticky_white_noise",
        ];
        while !pending.is_empty() {
            let change = changes.recv().await.unwrap();
            let entity_id = change.entity_id.to_string();
            pending.retain(|id| *id != entity_id);
        }
    })
    .await
    .unwrap();

    hass.assert_state("select.guest_room_intensity", "level3");
    hass.assert_state("switch.guest_room_sticky_white_noise", "on");
    hass.assert_state("select.nursery_intensity", "unavailable");
}

#[tokio::test]
async fn test_failed_update_marks_device_unavailable() {
    let hass = setup_all();
    push_status(&hass);

    let coordinator = hass.entry.coordinator("SN0001").unwrap();
    coordinator.update_failed("subscription dropped");
    hass.component.write_state("switch.nursery_sticky_white_noise");
    hass.component.write_state("switch.guest_room_sticky_white_noise");

    let nursery = hass.states.get("switch.nursery_sticky_white_noise").unwrap();
    assert!(nursery.is_unavailable());
    hass.assert_state("switch.guest_room_sticky_white_noise", "off");
}

#[tokio::test]
async fn test_select_each_option_sets_level_once() {
    let hass = setup_all();

    for level in SnooLevels::OPTIONS {
        hass.snoo.clear();
        let option = level.option().unwrap();

        hass.call_service(
            "select",
            "select_option",
            json!({"entity_id": "select.guest_room_intensity", "option": option}),
        )
        .await
        .unwrap();

        assert_eq!(
            hass.snoo.commands(),
            vec![SnooCommand::SetLevel {
                serial_number: "SN0002".to_string(),
                level,
            }]
        );
    }
}

#[tokio::test]
async fn test_select_level2() {
    let hass = setup_all();

    hass.call_service(
        "select",
        "select_option",
        json!({"entity_id": "select.nursery_intensity", "option": "level2"}),
    )
    .await
    .unwrap();

    assert_eq!(
        hass.snoo.commands(),
        vec![SnooCommand::SetLevel {
            serial_number: "SN0001".to_string(),
            level: SnooLevels::Level2,
        }]
    );
}

#[tokio::test]
async fn test_invalid_option_is_rejected_before_the_device() {
    let hass = setup_all();

    for option in ["LEVEL2", "timeout", "turbo"] {
        let result = hass
            .call_service(
                "select",
                "select_option",
                json!({"entity_id": "select.nursery_intensity", "option": option}),
            )
            .await;
        assert!(matches!(result, Err(ServiceError::InvalidData(_))), "{}", option);
    }

    assert!(hass.snoo.commands().is_empty());
}

#[tokio::test]
async fn test_switch_turn_on_and_off() {
    let hass = setup_all();

    hass.call_service(
        "switch",
        "turn_on",
        json!({"entity_id": "switch.nursery_sticky_white_noise"}),
    )
    .await
    .unwrap();
    assert_eq!(
        hass.snoo.commands(),
        vec![SnooCommand::SetStickyWhiteNoise {
            serial_number: "SN0001".to_string(),
            on: true,
        }]
    );

    hass.snoo.clear();
    hass.call_service(
        "switch",
        "turn_off",
        json!({"entity_id": "switch.nursery_sticky_white_noise"}),
    )
    .await
    .unwrap();
    assert_eq!(
        hass.snoo.commands(),
        vec![SnooCommand::SetStickyWhiteNoise {
            serial_number: "SN0001".to_string(),
            on: false,
        }]
    );
}

#[tokio::test]
async fn test_switch_toggle_follows_reported_state() {
    let hass = setup_all();
    let mut status = status_fixture();
    status.state_machine.sticky_white_noise = "on".to_string();
    hass.entry.coordinator("SN0002").unwrap().update(status);

    hass.call_service(
        "switch",
        "toggle",
        json!({"entity_id": "switch.guest_room_sticky_white_noise"}),
    )
    .await
    .unwrap();

    assert_eq!(
        hass.snoo.commands(),
        vec![SnooCommand::SetStickyWhiteNoise {
            serial_number: "SN0002".to_string(),
            on: false,
        }]
    );
}

#[tokio::test]
async fn test_device_error_fails_the_service_call() {
    let hass = setup_all();
    hass.snoo.fail_with(SnooError::Command {
        serial_number: "SN0001".to_string(),
        reason: "rate limited".to_string(),
    });

    let result = hass
        .call_service(
            "select",
            "select_option",
            json!({"entity_id": "select.nursery_intensity", "option": "stop"}),
        )
        .await;

    assert_eq!(
        result,
        Err(ServiceError::CallFailed(
            "device call failed: command for SN0001 failed: rate limited".to_string()
        ))
    );
    assert_eq!(hass.snoo.commands().len(), 1);
}

#[tokio::test]
async fn test_unload_removes_entities_and_states() {
    let hass = setup_all();
    push_status(&hass);

    assert_eq!(ha_snoo::unload_entry(&hass.component), 8);

    assert!(hass.component.is_empty());
    assert!(hass.states.get("select.nursery_intensity").is_none());
    let result = hass
        .call_service(
            "switch",
            "turn_on",
            json!({"entity_id": "switch.nursery_sticky_white_noise"}),
        )
        .await;
    assert!(matches!(result, Err(ServiceError::InvalidData(_))));
    assert!(hass.snoo.commands().is_empty());

    // Setting up again reuses the same entity IDs
    assert_eq!(hass.setup(), 8);
    hass.assert_state("select.nursery_intensity", "level1");
}

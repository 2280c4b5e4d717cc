//! Fixture loading

use std::path::Path;

use ha_snoo::{SnooData, SnooDevice};

/// Load a file from `tests/fixtures/`
pub fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);

    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load fixture '{}' from {:?}: {}", name, path, e))
}

/// Status message reported by a soothing bassinet
pub fn status_fixture() -> SnooData {
    SnooData::from_json(&load_fixture("status.json"))
        .unwrap_or_else(|e| panic!("Failed to parse status fixture: {}", e))
}

/// The two bassinets registered to the test account
pub fn devices_fixture() -> Vec<SnooDevice> {
    serde_json::from_str(&load_fixture("devices.json"))
        .unwrap_or_else(|e| panic!("Failed to parse devices fixture: {}", e))
}

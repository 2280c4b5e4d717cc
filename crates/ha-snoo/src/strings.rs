//! English entity names keyed by platform and translation key

use ha_entity::Platform;

/// Display name for an entity, `None` if the key has no entry
pub fn entity_name(platform: Platform, translation_key: &str) -> Option<&'static str> {
    let name = match (platform, translation_key) {
        (Platform::BinarySensor, "left_clip") => "Left safety clip",
        (Platform::BinarySensor, "right_clip") => "Right safety clip",
        (Platform::Select, "intensity") => "Intensity",
        (Platform::Switch, "sticky_white_noise") => "Sticky white noise",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_scoped_by_platform() {
        assert_eq!(
            entity_name(Platform::Select, "intensity"),
            Some("Intensity")
        );
        assert_eq!(entity_name(Platform::Switch, "intensity"), None);
        assert_eq!(entity_name(Platform::BinarySensor, "hold"), None);
    }
}

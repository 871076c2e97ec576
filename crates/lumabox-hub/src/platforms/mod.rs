// Per-platform entity builders
//
// Each module turns one capability slice of an identified device into
// host-facing entities. The host's platform forwarder calls these during
// entry setup; nothing here talks to the registry.

pub mod binary_sensor;
pub mod button;
pub mod climate;
pub mod cover;
pub mod light;
pub mod sensor;
pub mod switch;

use thiserror::Error;

use lumabox_api::Device;

use crate::platform::Platform;

/// Errors surfaced by entity operations.
#[derive(Debug, Error)]
pub enum EntityError {
    #[error("unknown effect '{effect}' for {entity_id}")]
    UnknownEffect { entity_id: String, effect: String },

    #[error(transparent)]
    Api(#[from] lumabox_api::Error),
}

/// Entity ids of everything a device contributes to one platform.
pub fn entity_ids(platform: Platform, device: &Device) -> Vec<String> {
    match platform {
        Platform::BinarySensor => binary_sensor::entities(device)
            .iter()
            .map(|e| e.entity_id().to_owned())
            .collect(),
        Platform::Button => button::entities(device)
            .iter()
            .map(|e| e.entity_id().to_owned())
            .collect(),
        Platform::Climate => climate::entities(device)
            .iter()
            .map(|e| e.entity_id().to_owned())
            .collect(),
        Platform::Cover => cover::entities(device)
            .iter()
            .map(|e| e.entity_id().to_owned())
            .collect(),
        Platform::Light => light::entities(device)
            .iter()
            .map(|e| e.entity_id().to_owned())
            .collect(),
        Platform::Sensor => sensor::entities(device)
            .iter()
            .map(|e| e.entity_id().to_owned())
            .collect(),
        Platform::Switch => switch::entities(device)
            .iter()
            .map(|e| e.entity_id().to_owned())
            .collect(),
    }
}

/// `{platform}.{device slug}_{alias slug}`
pub(crate) fn entity_id(platform: Platform, device_name: &str, alias: &str) -> String {
    format!("{platform}.{}_{}", slugify(device_name), slugify(alias))
}

/// Lowercase, non-alphanumerics collapsed to single underscores.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_was_sep = true;

    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_sep = false;
        } else if !last_was_sep {
            slug.push('_');
            last_was_sep = true;
        }
    }

    if slug.ends_with('_') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("My lightBox"), "my_lightbox");
        assert_eq!(slugify("Garage -- door!"), "garage_door");
        assert_eq!(slugify("  spaced  "), "spaced");
        assert_eq!(slugify("relay0"), "relay0");
    }

    #[test]
    fn entity_id_format() {
        assert_eq!(
            entity_id(Platform::Light, "My lightBox", "color"),
            "light.my_lightbox_color"
        );
    }
}

// Dashboard resources
//
// Pure data: everything here builds serializable dashboard definitions;
// storage belongs to the host's DashboardHost implementation. Covers the
// fixed-template energy dashboard created by the registered action and
// the automatic per-meter dashboards for multiSensor power meters.

use serde::Serialize;

use lumabox_api::features::SensorClass;
use lumabox_api::{Device, DeviceFamily};

use crate::entry::{ConfigEntry, DOMAIN, EntryId};

/// Entity badge referenced by the fixed energy-dashboard template.
pub const FIXED_BADGE_ENTITY: &str = "light.my_lightbox_ct_v20210413_lightbox_color_cct";

/// A named dashboard plus its view tree, ready for the host to store.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Dashboard {
    pub url_path: String,
    pub title: String,
    pub allow_single_word: bool,
    pub views: Vec<View>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct View {
    pub title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub badges: Vec<Badge>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Badge {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub entity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_content: Option<Vec<&'static str>>,
}

impl Badge {
    pub fn entity(entity: impl Into<String>) -> Self {
        Self {
            kind: "entity",
            entity: entity.into(),
            name: None,
            state_content: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Card {
    Glance {
        title: String,
        columns: u8,
        show_name: bool,
        show_icon: bool,
        show_state: bool,
        entities: Vec<GlanceEntity>,
    },
    Sensor {
        name: String,
        entity: String,
        graph: &'static str,
        detail: u8,
    },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GlanceEntity {
    pub entity: String,
    pub name: String,
}

// ── Fixed-template action dashboard ─────────────────────────────────

/// The dashboard the registered `dashboard` action creates per stored
/// device. Deliberately a verbatim template: fixed url path and a fixed
/// badge entity, with only the title carrying the entry id.
pub fn energy_dashboard(entry_id: &EntryId) -> Dashboard {
    Dashboard {
        url_path: "url_path".to_owned(),
        title: format!("Energy ({entry_id})"),
        allow_single_word: true,
        views: vec![View {
            title: "ALL PHASES(1 + 2 + 3)".to_owned(),
            badges: vec![Badge::entity(FIXED_BADGE_ENTITY)],
            cards: Vec::new(),
        }],
    }
}

// ── Automatic smart-meter dashboards ────────────────────────────────

/// Description of one sensor entity for dashboard building; a plain
/// value so view construction stays free of device handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeterEntity {
    pub entity_id: String,
    pub alias: String,
    pub probe_id: u32,
    pub device_class: SensorClass,
}

/// Heuristic: a multiSensor that meters power is a smart meter.
pub fn is_smart_meter(device: &Device) -> bool {
    device.family() == DeviceFamily::MultiSensor
        && device
            .capabilities()
            .sensors
            .iter()
            .any(|s| s.device_class().is_power())
}

/// Build the per-meter dashboard: one combined view with a glance card
/// per phase, then one detail view per phase.
pub fn smart_meter_dashboard(entry: &ConfigEntry, entities: &[MeterEntity]) -> Dashboard {
    let mut phases: Vec<u32> = entities.iter().map(|e| e.probe_id + 1).collect();
    phases.sort_unstable();
    phases.dedup();

    let phase_entities = |phase: u32| -> Vec<&MeterEntity> {
        entities.iter().filter(|e| e.probe_id + 1 == phase).collect()
    };

    let phase_labels: Vec<String> = phases.iter().map(ToString::to_string).collect();
    let mut views = vec![View {
        title: format!("All phases ({})", phase_labels.join(" / ")),
        badges: Vec::new(),
        cards: phases
            .iter()
            .map(|&phase| phase_card(phase, &phase_entities(phase)))
            .collect(),
    }];

    for &phase in &phases {
        views.push(phase_view(phase, &phase_entities(phase)));
    }

    Dashboard {
        url_path: format!("{DOMAIN}.energy-dashboard.{}", entry.id),
        title: entry.title.clone(),
        allow_single_word: true,
        views,
    }
}

/// Glance card for one phase, shown on the combined view.
fn phase_card(phase: u32, entities: &[&MeterEntity]) -> Card {
    Card::Glance {
        title: format!("Phase {phase}"),
        columns: 1,
        show_name: true,
        show_icon: true,
        show_state: true,
        entities: entities
            .iter()
            .map(|e| GlanceEntity {
                entity: e.entity_id.clone(),
                name: humanize_alias(&e.alias),
            })
            .collect(),
    }
}

/// Detail view for one phase: energy badges up top, a line graph per
/// sensor below.
fn phase_view(phase: u32, entities: &[&MeterEntity]) -> View {
    View {
        title: format!("Phase {phase}"),
        badges: entities
            .iter()
            .filter(|e| e.device_class.is_energy())
            .map(|e| Badge {
                kind: "entity",
                entity: e.entity_id.clone(),
                name: Some(humanize_alias(&e.alias)),
                state_content: Some(vec!["name", "state"]),
            })
            .collect(),
        cards: entities
            .iter()
            .map(|e| Card::Sensor {
                name: humanize_alias(&e.alias),
                entity: e.entity_id.clone(),
                graph: "line",
                detail: 1,
            })
            .collect(),
    }
}

/// Turn a probe alias into a human label: digits at the edges go, camel
/// humps become spaces, the first letter is capitalized.
/// `"apparentPower1"` becomes `"Apparent power"`.
pub fn humanize_alias(alias: &str) -> String {
    let trimmed = alias.trim_matches(|c: char| c.is_ascii_digit());

    let mut words = String::with_capacity(trimmed.len() + 4);
    for (i, ch) in trimmed.chars().enumerate() {
        if ch.is_uppercase() && i > 0 {
            words.push(' ');
        }
        words.extend(ch.to_lowercase());
    }

    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => words,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entry::ConfigEntry;
    use pretty_assertions::assert_eq;

    #[test]
    fn humanize_alias_strips_digits_and_splits_humps() {
        assert_eq!(humanize_alias("apparentPower1"), "Apparent power");
        assert_eq!(humanize_alias("temperature0"), "Temperature");
        assert_eq!(humanize_alias("forwardEnergy2"), "Forward energy");
        assert_eq!(humanize_alias("humidity"), "Humidity");
        assert_eq!(humanize_alias(""), "");
    }

    #[test]
    fn energy_dashboard_is_the_fixed_template() {
        let dashboard = energy_dashboard(&EntryId::from("entry-1"));

        assert_eq!(dashboard.url_path, "url_path");
        assert_eq!(dashboard.title, "Energy (entry-1)");
        assert!(dashboard.allow_single_word);
        assert_eq!(dashboard.views.len(), 1);

        let view = &dashboard.views[0];
        assert_eq!(view.title, "ALL PHASES(1 + 2 + 3)");
        assert_eq!(view.badges.len(), 1);
        assert_eq!(view.badges[0].entity, FIXED_BADGE_ENTITY);
        assert!(view.cards.is_empty());
    }

    #[test]
    fn smart_meter_dashboard_groups_by_phase() {
        let entry = ConfigEntry::new("entry-7", "Garage meter", "10.0.0.9");

        let entities = vec![
            MeterEntity {
                entity_id: "sensor.meter_apparent_power0".into(),
                alias: "apparentPower0".into(),
                probe_id: 0,
                device_class: SensorClass::ApparentPower,
            },
            MeterEntity {
                entity_id: "sensor.meter_forward_energy0".into(),
                alias: "forwardEnergy0".into(),
                probe_id: 0,
                device_class: SensorClass::ForwardEnergy,
            },
            MeterEntity {
                entity_id: "sensor.meter_apparent_power1".into(),
                alias: "apparentPower1".into(),
                probe_id: 1,
                device_class: SensorClass::ApparentPower,
            },
        ];

        let dashboard = smart_meter_dashboard(&entry, &entities);

        assert_eq!(dashboard.url_path, "lumabox.energy-dashboard.entry-7");
        assert_eq!(dashboard.title, "Garage meter");
        // combined view + one view per phase
        assert_eq!(dashboard.views.len(), 3);
        assert_eq!(dashboard.views[0].title, "All phases (1 / 2)");
        assert_eq!(dashboard.views[0].cards.len(), 2);

        let phase1 = &dashboard.views[1];
        assert_eq!(phase1.title, "Phase 1");
        // only the energy sensor gets a badge; every sensor gets a graph
        assert_eq!(phase1.badges.len(), 1);
        assert_eq!(phase1.cards.len(), 2);

        let phase2 = &dashboard.views[2];
        assert_eq!(phase2.title, "Phase 2");
        assert!(phase2.badges.is_empty());
        assert_eq!(phase2.cards.len(), 1);
    }

    #[test]
    fn dashboard_serializes_with_wire_field_names() {
        let dashboard = energy_dashboard(&EntryId::from("e"));
        let json = serde_json::to_value(&dashboard).unwrap();

        assert_eq!(json["views"][0]["badges"][0]["type"], "entity");
        assert!(json["views"][0].get("cards").is_none());
    }
}

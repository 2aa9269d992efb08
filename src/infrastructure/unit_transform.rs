// Output unit transform - Adds imperial fields next to metric ones
use crate::domain::units::{kpa_to_inhg, UnitSystem};
use serde_json::{Map, Value};

type Converter = fn(f64) -> f64;

/// metric field -> (imperial field, converter)
const CONVERSIONS: &[(&str, &str, Converter)] = &[
    ("milkingVacuumMaxKpa", "milkingVacuumMaxInHg", kpa_to_inhg),
    ("pfVacuumKpa", "pfVacuumInHg", kpa_to_inhg),
    ("omVacuumKpa", "omVacuumInHg", kpa_to_inhg),
    ("tppKpa", "tppInHg", kpa_to_inhg),
    ("intensityPfKpa", "intensityPfInHg", kpa_to_inhg),
    ("intensityOmKpa", "intensityOmInHg", kpa_to_inhg),
    ("deltaKpa", "deltaInHg", kpa_to_inhg),
    ("yKpa", "yInHg", kpa_to_inhg),
];

/// Enrich an already-serialized response for the requested unit system.
///
/// Metric fields are never modified or removed, so metric clients keep working.
pub fn apply_unit_system(value: &mut Value, unit_system: UnitSystem) {
    if unit_system != UnitSystem::Imperial {
        return;
    }

    convert_value(value);

    if let Value::Object(map) = value {
        map.insert("unitSystem".to_string(), Value::from("imperial"));
    }
}

fn convert_value(value: &mut Value) {
    match value {
        Value::Object(map) => {
            convert_object(map);
            for child in map.values_mut() {
                convert_value(child);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(convert_value),
        _ => {}
    }
}

fn convert_object(map: &mut Map<String, Value>) {
    for (metric_field, imperial_field, converter) in CONVERSIONS {
        if let Some(metric) = map.get(*metric_field).and_then(Value::as_f64) {
            map.insert(imperial_field.to_string(), Value::from(converter(metric)));
        }
    }
}

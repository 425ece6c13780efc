//! Plausible random values for device parameters.

use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::Value;

use crate::model::{Parameter, ValueType};

const WORDS: &[&str] = &[
    "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel", "india", "juliet",
    "kilo", "lima", "nominal", "offline", "standby", "fault", "idle", "ready",
];

fn float_in<R: Rng>(rng: &mut R, min: f64, max: f64) -> Value {
    let raw: f64 = rng.gen_range(min..=max);
    Value::from((raw * 100.0).round() / 100.0)
}

fn int_in<R: Rng>(rng: &mut R, min: i64, max: i64) -> Value {
    Value::from(rng.gen_range(min..=max))
}

fn by_unit<R: Rng>(p: &Parameter, rng: &mut R) -> Option<Value> {
    let value = match p.display.unit.as_str() {
        "ohm" | "resistance" => float_in(rng, 0.0, 60.0),
        "volt-ampere" | "volt-ampere-reactive" => float_in(rng, 0.0, 3000.0),
        "watt-hour" => float_in(rng, 1000.0, 50_000_000.0),
        "watt" if p.display_name.contains("DC") => float_in(rng, 1.0, 90.0),
        "watt" => float_in(rng, 1.0, 1500.0),
        "amp" | "amps" | "ampere" => float_in(rng, 1.0, 100.0),
        "volt" | "volts" | "voltage" => float_in(rng, 200.0, 300.0),
        "percent" | "percentage" => float_in(rng, 1.0, 100.0),
        "hertz" | "frequency" => float_in(rng, 1.0, 60.0),
        "degrees-celsius" => float_in(rng, 20.0, 100.0),
        _ => return None,
    };
    Some(value)
}

fn by_name<R: Rng>(p: &Parameter, rng: &mut R) -> Option<Value> {
    let name = p.display_name.to_lowercase();
    let value = if name.contains("running") {
        Value::Bool(true)
    } else if name.contains("voltage") {
        float_in(rng, 200.0, 300.0)
    } else if name.contains("setting") {
        int_in(rng, 0, 5)
    } else if name.contains("factor") {
        float_in(rng, 0.10, 0.99)
    } else if name.contains("test-report") {
        Value::Null
    } else if name.contains("status") {
        Value::Bool(rng.gen_bool(0.5))
    } else if name.contains("date") {
        Value::Null
    } else if name.contains("speed") {
        int_in(rng, 0, 10)
    } else if name.contains("frequency") {
        float_in(rng, 1.0, 60.0)
    } else if name.contains("power") {
        float_in(rng, 0.0, 30.0)
    } else {
        return None;
    };
    Some(value)
}

/// Generates a value for `p`.
///
/// The display unit decides first, then keywords in the display name, then
/// the declared value type. Parameters matching none of them yield null.
pub fn random_value<R: Rng>(p: &Parameter, rng: &mut R) -> Value {
    if let Some(v) = by_unit(p, rng) {
        return v;
    }
    if let Some(v) = by_name(p, rng) {
        return v;
    }
    match p.value_type {
        ValueType::Float => float_in(rng, 0.0, 100.0),
        ValueType::Bool => Value::Bool(rng.gen_bool(0.5)),
        ValueType::String => WORDS
            .choose(rng)
            .map_or(Value::Null, |w| Value::from(*w)),
        ValueType::Object | ValueType::Waveform | ValueType::Spectrum => Value::Null,
    }
}

/// Table cell text for a generated value. Null renders empty.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

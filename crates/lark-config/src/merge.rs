//! Deep merge over generic JSON values.
//!
//! Mapping-typed values merge recursively; arrays and scalars from the
//! higher-precedence side replace the lower. The typed helpers round-trip
//! `BuilderConfig` through `serde_json::Value` so layering stays independent
//! of any particular configuration schema.

use serde_json::Value;

use crate::builder::BuilderConfig;
use crate::error::{ConfigError, Result};

/// Merge `update` into `target`, `update` winning on conflicts.
pub fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}

/// Merge two typed configuration layers, `update` taking precedence.
pub fn merge_config(base: &BuilderConfig, update: &BuilderConfig) -> Result<BuilderConfig> {
    let update = to_value(update)?;
    merge_config_value(base, &update)
}

/// Merge raw override values over a typed base layer.
pub fn merge_config_value(base: &BuilderConfig, update: &Value) -> Result<BuilderConfig> {
    let mut merged = to_value(base)?;
    merge_values(&mut merged, update);
    serde_json::from_value(merged).map_err(|err| ConfigError::InvalidValue(err.to_string()))
}

fn to_value(config: &BuilderConfig) -> Result<Value> {
    serde_json::to_value(config).map_err(|err| ConfigError::InvalidValue(err.to_string()))
}

// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! `key=value` overrides given on the command line.
//!
//! Values are read as YAML scalars or flow collections, so `--set
//! config.probes=true` stores a bool and `--set
//! kubernetes.volumes.elasticsearch-data={emptyDir: {}}` stores a mapping.
//! `null` removes the key, like an explicit `null` in an options file.

use crate::domain::option::OptionValue;
use crate::shared::error::{EfkError, Result};

pub fn parse_key_value(config: &str) -> Result<(String, String)> {
    let parts: Vec<&str> = config.splitn(2, '=').collect();
    if parts.len() != 2 {
        return Err(EfkError::config_error(format!(
            "Invalid config format: '{}'. Expected 'key=value'",
            config
        )));
    }

    let key = parts[0].trim();
    let value = parts[1].trim();

    if key.is_empty() {
        return Err(EfkError::config_error(format!(
            "Empty key in config: '{}'",
            config
        )));
    }

    Ok((key.to_string(), value.to_string()))
}

pub fn parse_scalar(key: &str, raw: &str) -> Result<OptionValue> {
    match serde_yaml::from_str::<serde_yaml::Value>(raw) {
        Ok(value) => OptionValue::from_yaml(value, key),
        Err(_) => Ok(OptionValue::String(raw.to_string())),
    }
}

/// Applies `--set key=value` properties on top of `values`.
pub fn apply_properties(properties: &[String], values: &mut OptionValue) -> Result<()> {
    for property in properties {
        let (key, raw) = parse_key_value(property)?;
        let value = parse_scalar(&key, &raw)?;
        set_path(values, &key, value)?;
    }
    Ok(())
}

/// Applies `--ref key=global.path` properties, storing deferred references.
pub fn apply_references(references: &[String], values: &mut OptionValue) -> Result<()> {
    for reference in references {
        let (key, target) = parse_key_value(reference)?;
        if target.is_empty() {
            return Err(EfkError::config_error(format!(
                "Empty reference target in: '{}'",
                reference
            )));
        }
        set_path(values, &key, OptionValue::root(target))?;
    }
    Ok(())
}

fn set_path(values: &mut OptionValue, key: &str, value: OptionValue) -> Result<()> {
    if values.insert_path(key, value) {
        Ok(())
    } else {
        Err(EfkError::config_error(format!(
            "Cannot set '{}': a parent key already holds a non-mapping value",
            key
        )))
    }
}

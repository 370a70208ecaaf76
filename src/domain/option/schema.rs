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

use crate::domain::option::value::OptionValue;
use crate::shared::error::{EfkError, Result};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    String,
    Bool,
    Integer,
    Mapping,
    List,
    Any,
}

impl OptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::String => "string",
            OptionType::Bool => "bool",
            OptionType::Integer => "integer",
            OptionType::Mapping => "mapping",
            OptionType::List => "list",
            OptionType::Any => "any",
        }
    }

    /// References are accepted for every type; they are checked once resolved.
    pub fn accepts(&self, value: &OptionValue) -> bool {
        match (self, value) {
            (_, OptionValue::Reference(_)) => true,
            (OptionType::Any, _) => true,
            (OptionType::String, OptionValue::String(_)) => true,
            (OptionType::Bool, OptionValue::Bool(_)) => true,
            (OptionType::Integer, OptionValue::Integer(_)) => true,
            (OptionType::Mapping, OptionValue::Mapping(_)) => true,
            (OptionType::List, OptionValue::List(_)) => true,
            _ => false,
        }
    }

    fn allows_children(&self) -> bool {
        matches!(self, OptionType::Mapping | OptionType::Any)
    }
}

#[derive(Debug, Clone)]
pub struct SchemaEntry {
    pub path: String,
    pub option_type: OptionType,
    pub default: Option<OptionValue>,
    pub required: bool,
}

impl SchemaEntry {
    pub fn new(path: impl Into<String>, option_type: OptionType) -> Self {
        Self {
            path: path.into(),
            option_type,
            default: None,
            required: false,
        }
    }

    pub fn with_default(mut self, default: impl Into<OptionValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// A validated set of option entries and the default tree they describe.
#[derive(Debug, Clone)]
pub struct Schema {
    entries: Vec<SchemaEntry>,
    defaults: OptionValue,
}

impl Schema {
    pub fn new(entries: Vec<SchemaEntry>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut defaults = OptionValue::empty_mapping();

        for entry in &entries {
            if entry.path.is_empty() || entry.path.split('.').any(str::is_empty) {
                return Err(EfkError::schema(&entry.path, "empty path segment"));
            }

            if !seen.insert(entry.path.as_str()) {
                return Err(EfkError::schema(&entry.path, "duplicate path"));
            }

            if let Some(default) = &entry.default {
                if default.as_reference().is_some() {
                    return Err(EfkError::schema(
                        &entry.path,
                        "default must be a literal value",
                    ));
                }
                if default.is_null() || !entry.option_type.accepts(default) {
                    return Err(EfkError::schema(
                        &entry.path,
                        format!(
                            "default of type {} does not match declared type {}",
                            default.type_name(),
                            entry.option_type.as_str()
                        ),
                    ));
                }
            }
        }

        for entry in &entries {
            if let Some(parent) = Self::find_parent(&entries, &entry.path) {
                if !parent.option_type.allows_children() {
                    return Err(EfkError::schema(
                        &entry.path,
                        format!(
                            "nested under '{}', which is declared as {}",
                            parent.path,
                            parent.option_type.as_str()
                        ),
                    ));
                }
            }

            if let Some(default) = &entry.default {
                if defaults.lookup(&entry.path).is_some() {
                    return Err(EfkError::schema(
                        &entry.path,
                        "default overlaps the default of a parent path",
                    ));
                }
                if !defaults.insert_path(&entry.path, default.clone()) {
                    return Err(EfkError::schema(
                        &entry.path,
                        "default conflicts with the default of a parent path",
                    ));
                }
            }
        }

        Ok(Self { entries, defaults })
    }

    fn find_parent<'a>(entries: &'a [SchemaEntry], path: &str) -> Option<&'a SchemaEntry> {
        entries.iter().find(|candidate| {
            path.len() > candidate.path.len()
                && path.starts_with(candidate.path.as_str())
                && path.as_bytes()[candidate.path.len()] == b'.'
        })
    }

    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    pub fn entry(&self, path: &str) -> Option<&SchemaEntry> {
        self.entries.iter().find(|e| e.path == path)
    }

    pub fn defaults(&self) -> &OptionValue {
        &self.defaults
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_tree() {
        let schema = Schema::new(vec![
            SchemaEntry::new("basename", OptionType::String)
                .with_default("efk")
                .required(),
            SchemaEntry::new("config.probes", OptionType::Bool).with_default(false),
            SchemaEntry::new("kubernetes.volumes.data", OptionType::Mapping),
        ])
        .unwrap();

        assert_eq!(
            schema.defaults().lookup("basename"),
            Some(&OptionValue::from("efk"))
        );
        assert_eq!(
            schema.defaults().lookup("config.probes"),
            Some(&OptionValue::Bool(false))
        );
        assert!(schema.defaults().lookup("kubernetes").is_none());
        assert!(schema.entry("kubernetes.volumes.data").is_some());
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let err = Schema::new(vec![
            SchemaEntry::new("basename", OptionType::String),
            SchemaEntry::new("basename", OptionType::String),
        ])
        .unwrap_err();

        assert!(matches!(err, EfkError::Schema { ref path, .. } if path == "basename"));
    }

    #[test]
    fn test_default_type_mismatch_rejected() {
        let err = Schema::new(vec![
            SchemaEntry::new("config.replicas", OptionType::Integer).with_default("three")
        ])
        .unwrap_err();

        assert!(matches!(err, EfkError::Schema { ref path, .. } if path == "config.replicas"));
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn test_reference_default_rejected() {
        let err = Schema::new(vec![SchemaEntry::new("namespace", OptionType::String)
            .with_default(OptionValue::root("namespaces.mon"))])
        .unwrap_err();

        assert!(err.to_string().contains("literal"));
    }

    #[test]
    fn test_child_of_scalar_rejected() {
        let err = Schema::new(vec![
            SchemaEntry::new("config", OptionType::String),
            SchemaEntry::new("config.probes", OptionType::Bool),
        ])
        .unwrap_err();

        assert!(matches!(err, EfkError::Schema { ref path, .. } if path == "config.probes"));
    }

    #[test]
    fn test_empty_segment_rejected() {
        assert!(Schema::new(vec![SchemaEntry::new("config..probes", OptionType::Bool)]).is_err());
        assert!(Schema::new(vec![SchemaEntry::new("", OptionType::Bool)]).is_err());
    }
}

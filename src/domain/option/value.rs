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

//! Tree-structured option values.
//!
//! Option trees are addressed with dotted paths (`kubernetes.volumes.data`).
//! A path segment cannot contain a dot; keys that need one can only be set
//! through a whole mapping value.

use crate::shared::error::{EfkError, Result};
use std::collections::BTreeMap;
use std::fmt;

pub type OptionMap = BTreeMap<String, OptionValue>;

/// A reference to a value in the project-wide context, resolved at build time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptionRef {
    path: String,
}

impl OptionRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for OptionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "!root {}", self.path)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// Only meaningful in user input: removes the key during a merge.
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<OptionValue>),
    Mapping(OptionMap),
    Reference(OptionRef),
}

impl OptionValue {
    pub fn root(path: impl Into<String>) -> Self {
        OptionValue::Reference(OptionRef::new(path))
    }

    pub fn empty_mapping() -> Self {
        OptionValue::Mapping(OptionMap::new())
    }

    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, OptionValue)>,
    {
        OptionValue::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            OptionValue::Null => "null",
            OptionValue::Bool(_) => "bool",
            OptionValue::Integer(_) => "integer",
            OptionValue::Float(_) => "float",
            OptionValue::String(_) => "string",
            OptionValue::List(_) => "list",
            OptionValue::Mapping(_) => "mapping",
            OptionValue::Reference(_) => "reference",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, OptionValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            OptionValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&OptionMap> {
        match self {
            OptionValue::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[OptionValue]> {
        match self {
            OptionValue::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&OptionRef> {
        match self {
            OptionValue::Reference(r) => Some(r),
            _ => None,
        }
    }

    /// Follows a dotted path through nested mappings.
    pub fn lookup(&self, path: &str) -> Option<&OptionValue> {
        path.split('.').try_fold(self, |current, segment| {
            current.as_mapping().and_then(|m| m.get(segment))
        })
    }

    /// Inserts `value` at a dotted path, creating intermediate mappings.
    ///
    /// Returns false when an intermediate segment already holds a non-mapping.
    pub fn insert_path(&mut self, path: &str, value: OptionValue) -> bool {
        let mut current = self;
        let mut segments = path.split('.').peekable();

        while let Some(segment) = segments.next() {
            let map = match current {
                OptionValue::Mapping(map) => map,
                _ => return false,
            };

            if segments.peek().is_none() {
                map.insert(segment.to_string(), value);
                return true;
            }

            current = map
                .entry(segment.to_string())
                .or_insert_with(OptionValue::empty_mapping);
        }

        false
    }

    /// Deep-merges `overlay` into `self`.
    ///
    /// Mappings merge key by key; every other value replaces what was there.
    /// A `Null` in the overlay removes the key.
    pub fn merge(&mut self, overlay: OptionValue) {
        match (self, overlay) {
            (OptionValue::Mapping(base), OptionValue::Mapping(over)) => {
                for (key, value) in over {
                    if value.is_null() {
                        base.remove(&key);
                        continue;
                    }

                    let merge_in_place = matches!(
                        (base.get(&key), &value),
                        (Some(OptionValue::Mapping(_)), OptionValue::Mapping(_))
                    );

                    if merge_in_place {
                        if let Some(existing) = base.get_mut(&key) {
                            existing.merge(value);
                        }
                    } else {
                        base.insert(key, value.prune_nulls());
                    }
                }
            }
            (base, overlay) => *base = overlay.prune_nulls(),
        }
    }

    /// Drops `Null` entries from every nested mapping.
    pub fn prune_nulls(self) -> Self {
        match self {
            OptionValue::Mapping(map) => OptionValue::Mapping(
                map.into_iter()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(k, v)| (k, v.prune_nulls()))
                    .collect(),
            ),
            OptionValue::List(items) => {
                OptionValue::List(items.into_iter().map(OptionValue::prune_nulls).collect())
            }
            other => other,
        }
    }

    /// Converts to a JSON document. `path` names this value in error messages;
    /// a nested reference cannot be converted and fails.
    pub fn to_json(&self, path: &str) -> Result<serde_json::Value> {
        Ok(match self {
            OptionValue::Null => serde_json::Value::Null,
            OptionValue::Bool(b) => serde_json::Value::Bool(*b),
            OptionValue::Integer(i) => serde_json::Value::from(*i),
            OptionValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            OptionValue::String(s) => serde_json::Value::String(s.clone()),
            OptionValue::List(items) => serde_json::Value::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| v.to_json(&format!("{}.{}", path, i)))
                    .collect::<Result<Vec<_>>>()?,
            ),
            OptionValue::Mapping(map) => {
                let mut object = serde_json::Map::new();
                for (k, v) in map {
                    object.insert(k.clone(), v.to_json(&format!("{}.{}", path, k))?);
                }
                serde_json::Value::Object(object)
            }
            OptionValue::Reference(r) => return Err(EfkError::unresolved(path, r.path())),
        })
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::String(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Integer(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Integer(value.into())
    }
}

impl From<OptionMap> for OptionValue {
    fn from(value: OptionMap) -> Self {
        OptionValue::Mapping(value)
    }
}

impl From<OptionRef> for OptionValue {
    fn from(value: OptionRef) -> Self {
        OptionValue::Reference(value)
    }
}

impl<T: Into<OptionValue>> From<Vec<T>> for OptionValue {
    fn from(value: Vec<T>) -> Self {
        OptionValue::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for OptionValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => OptionValue::Null,
            serde_json::Value::Bool(b) => OptionValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => OptionValue::Integer(i),
                None => OptionValue::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => OptionValue::String(s),
            serde_json::Value::Array(items) => {
                OptionValue::List(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(map) => {
                OptionValue::Mapping(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

/// YAML values map one to one; a string tagged `!root` becomes a reference.
/// `!root` on anything but a string is rejected.
impl TryFrom<serde_yaml::Value> for OptionValue {
    type Error = EfkError;

    fn try_from(value: serde_yaml::Value) -> Result<Self> {
        OptionValue::from_yaml(value, "")
    }
}

impl OptionValue {
    /// Converts a YAML value found at `path`; errors name the nested path.
    pub fn from_yaml(value: serde_yaml::Value, path: &str) -> Result<Self> {
        use serde_yaml::Value;

        Ok(match value {
            Value::Null => OptionValue::Null,
            Value::Bool(b) => OptionValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => OptionValue::Integer(i),
                None => OptionValue::Float(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => OptionValue::String(s),
            Value::Sequence(items) => OptionValue::List(
                items
                    .into_iter()
                    .map(|item| OptionValue::from_yaml(item, path))
                    .collect::<Result<_>>()?,
            ),
            Value::Mapping(map) => {
                let mut entries = OptionMap::new();
                for (k, v) in map {
                    if let Some(key) = yaml_key(k) {
                        let child = join_path(path, &key);
                        entries.insert(key, OptionValue::from_yaml(v, &child)?);
                    }
                }
                OptionValue::Mapping(entries)
            }
            Value::Tagged(tagged) => {
                let tag = tagged.tag.to_string();
                match (tag.trim_start_matches('!'), tagged.value) {
                    ("root", Value::String(path)) => OptionValue::root(path),
                    ("root", other) => {
                        return Err(EfkError::option_type(
                            if path.is_empty() { "<root>" } else { path },
                            "!root string path",
                            yaml_type_name(&other),
                        ))
                    }
                    (_, inner) => OptionValue::from_yaml(inner, path)?,
                }
            }
        })
    }
}

fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

fn yaml_type_name(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "bool",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "list",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(_) => "tagged value",
    }
}

fn yaml_key(key: serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl From<toml::Value> for OptionValue {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => OptionValue::String(s),
            toml::Value::Integer(i) => OptionValue::Integer(i),
            toml::Value::Float(f) => OptionValue::Float(f),
            toml::Value::Boolean(b) => OptionValue::Bool(b),
            toml::Value::Datetime(d) => OptionValue::String(d.to_string()),
            toml::Value::Array(items) => {
                OptionValue::List(items.into_iter().map(Into::into).collect())
            }
            toml::Value::Table(table) => {
                OptionValue::Mapping(table.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OptionValue {
        OptionValue::mapping([
            ("basename", OptionValue::from("efk")),
            (
                "config",
                OptionValue::mapping([
                    ("probes", OptionValue::from(false)),
                    ("tags", OptionValue::from(vec!["a", "b"])),
                ]),
            ),
        ])
    }

    #[test]
    fn test_lookup_nested_path() {
        let value = sample();
        assert_eq!(value.lookup("basename"), Some(&OptionValue::from("efk")));
        assert_eq!(
            value.lookup("config.probes"),
            Some(&OptionValue::Bool(false))
        );
        assert!(value.lookup("config.missing").is_none());
        assert!(value.lookup("basename.deeper").is_none());
    }

    #[test]
    fn test_insert_path_creates_mappings() {
        let mut value = OptionValue::empty_mapping();
        assert!(value.insert_path("kubernetes.volumes.data", OptionValue::empty_mapping()));
        assert_eq!(
            value.lookup("kubernetes.volumes.data"),
            Some(&OptionValue::empty_mapping())
        );

        let mut scalar_parent = sample();
        assert!(!scalar_parent.insert_path("basename.child", OptionValue::from(1)));
    }

    #[test]
    fn test_merge_mappings_recursively() {
        let mut base = sample();
        base.merge(OptionValue::mapping([(
            "config",
            OptionValue::mapping([("probes", OptionValue::from(true))]),
        )]));

        assert_eq!(base.lookup("config.probes"), Some(&OptionValue::Bool(true)));
        assert_eq!(base.lookup("config.tags"), Some(&OptionValue::from(vec!["a", "b"])));
        assert_eq!(base.lookup("basename"), Some(&OptionValue::from("efk")));
    }

    #[test]
    fn test_merge_replaces_lists_wholesale() {
        let mut base = sample();
        base.merge(OptionValue::mapping([(
            "config",
            OptionValue::mapping([("tags", OptionValue::from(vec!["c"]))]),
        )]));

        assert_eq!(base.lookup("config.tags"), Some(&OptionValue::from(vec!["c"])));
    }

    #[test]
    fn test_merge_null_removes_key() {
        let mut base = sample();
        base.merge(OptionValue::mapping([(
            "config",
            OptionValue::mapping([("probes", OptionValue::Null)]),
        )]));

        assert!(base.lookup("config.probes").is_none());
        assert!(base.lookup("config.tags").is_some());
    }

    #[test]
    fn test_merge_new_subtree_drops_nulls() {
        let mut base = sample();
        base.merge(OptionValue::mapping([(
            "extra",
            OptionValue::mapping([
                ("kept", OptionValue::from("x")),
                ("dropped", OptionValue::Null),
            ]),
        )]));

        assert!(base.lookup("extra.kept").is_some());
        assert!(base.lookup("extra.dropped").is_none());
    }

    #[test]
    fn test_to_json_rejects_nested_reference() {
        let value = OptionValue::mapping([("ns", OptionValue::root("namespaces.mon"))]);
        let err = value.to_json("volume").unwrap_err();
        assert!(err.to_string().contains("volume.ns"));
    }

    #[test]
    fn test_yaml_root_tag_becomes_reference() {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str("namespace: !root namespaces.mon\nreplicas: 3\n").unwrap();
        let value = OptionValue::try_from(yaml).unwrap();

        assert_eq!(
            value.lookup("namespace"),
            Some(&OptionValue::root("namespaces.mon"))
        );
        assert_eq!(value.lookup("replicas"), Some(&OptionValue::Integer(3)));
    }

    #[test]
    fn test_yaml_root_tag_requires_string_path() {
        for source in ["config:\n  ns: !root 5\n", "config:\n  ns: !root {a: b}\n"] {
            let yaml: serde_yaml::Value = serde_yaml::from_str(source).unwrap();
            let err = OptionValue::try_from(yaml).unwrap_err();
            assert!(matches!(
                err,
                EfkError::OptionType { ref path, .. } if path == "config.ns"
            ));
        }
    }
}

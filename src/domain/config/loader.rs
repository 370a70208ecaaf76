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

use crate::domain::option::OptionValue;
use crate::shared::error::{EfkError, Result};
use std::fs::read_to_string;
use std::path::Path;

/// Reads an options file. `.toml` files are parsed as TOML, anything else as
/// YAML; only YAML can express `!root` references.
pub fn load_options_file<P: AsRef<Path>>(path: P) -> Result<OptionValue> {
    let path = path.as_ref();
    let content = read_to_string(path).map_err(|e| {
        EfkError::config_error(format!(
            "Failed to read options file {}: {}",
            path.display(),
            e
        ))
    })?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        parse_toml_options(&content)
    } else {
        parse_yaml_options(&content)
    }
}

pub fn parse_yaml_options(content: &str) -> Result<OptionValue> {
    let value: serde_yaml::Value = serde_yaml::from_str(content)?;
    expect_mapping(OptionValue::try_from(value)?)
}

pub fn parse_toml_options(content: &str) -> Result<OptionValue> {
    let table: toml::Table = toml::from_str(content)?;
    expect_mapping(OptionValue::from(toml::Value::Table(table)))
}

fn expect_mapping(value: OptionValue) -> Result<OptionValue> {
    match value {
        OptionValue::Null => Ok(OptionValue::empty_mapping()),
        OptionValue::Mapping(_) => Ok(value),
        other => Err(EfkError::option_type("<root>", "mapping", other.type_name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_options() {
        let value = parse_yaml_options(
            "basename: myefk\nnamespace: !root namespaces.mon\nkubernetes:\n  volumes:\n    elasticsearch-data:\n      emptyDir: {}\n",
        )
        .unwrap();

        assert_eq!(value.lookup("basename"), Some(&OptionValue::from("myefk")));
        assert_eq!(
            value.lookup("namespace"),
            Some(&OptionValue::root("namespaces.mon"))
        );
        assert_eq!(
            value.lookup("kubernetes.volumes.elasticsearch-data.emptyDir"),
            Some(&OptionValue::empty_mapping())
        );
    }

    #[test]
    fn test_parse_toml_options() {
        let value = parse_toml_options(
            "basename = \"myefk\"\n[config.elasticsearch]\nreplicas = 3\n",
        )
        .unwrap();

        assert_eq!(
            value.lookup("config.elasticsearch.replicas"),
            Some(&OptionValue::Integer(3))
        );
    }

    #[test]
    fn test_empty_yaml_is_empty_mapping() {
        assert_eq!(parse_yaml_options("").unwrap(), OptionValue::empty_mapping());
    }

    #[test]
    fn test_non_mapping_rejected() {
        assert!(parse_yaml_options("- a\n- b\n").is_err());
    }
}

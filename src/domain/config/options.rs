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

//! Option schema of the EFK stack

use crate::domain::option::{OptionType, OptionValue, Options, Schema, SchemaEntry};
use crate::infrastructure::constants::{DEFAULT_ACCESS_MODE, DEFAULT_STORAGE_SIZE};
use crate::shared::error::Result;

pub const OPT_BASENAME: &str = "basename";
pub const OPT_NAMESPACE: &str = "namespace";

pub const OPT_ENABLE_KIBANA: &str = "enable.kibana";
pub const OPT_ENABLE_FLUENTD: &str = "enable.fluentd";

pub const OPT_PROBES: &str = "config.probes";
pub const OPT_ES_REPLICAS: &str = "config.elasticsearch.replicas";
pub const OPT_ES_CLUSTER_NAME: &str = "config.elasticsearch.cluster_name";
pub const OPT_ES_JAVA_OPTS: &str = "config.elasticsearch.java_opts";
pub const OPT_KIBANA_SERVICE_TYPE: &str = "config.kibana.service_type";

pub const OPT_SA_CREATE: &str = "config.authorization.serviceaccount_create";
pub const OPT_SA_USE: &str = "config.authorization.serviceaccount_use";
pub const OPT_ROLES_CREATE: &str = "config.authorization.roles_create";
pub const OPT_ROLES_BIND: &str = "config.authorization.roles_bind";

pub const OPT_ES_DATA_SIZE: &str = "config.storage.elasticsearch-data.size";
pub const OPT_ES_DATA_STORAGE_CLASS: &str = "config.storage.elasticsearch-data.storage_class";
pub const OPT_ES_DATA_ACCESS_MODE: &str = "config.storage.elasticsearch-data.access_mode";

pub const OPT_CONTAINER_ELASTICSEARCH: &str = "container.elasticsearch";
pub const OPT_CONTAINER_KIBANA: &str = "container.kibana";
pub const OPT_CONTAINER_FLUENTD: &str = "container.fluentd";
pub const OPT_CONTAINER_INIT: &str = "container.init";

pub const OPT_VOLUME_ES_DATA: &str = "kubernetes.volumes.elasticsearch-data";
pub const OPT_RESOURCES_ELASTICSEARCH: &str = "kubernetes.resources.elasticsearch-statefulset";
pub const OPT_RESOURCES_KIBANA: &str = "kubernetes.resources.kibana-deployment";
pub const OPT_RESOURCES_FLUENTD: &str = "kubernetes.resources.fluentd-daemonset";

pub const DEFAULT_BASENAME: &str = "efk";
pub const DEFAULT_NAMESPACE: &str = "default";

pub fn efk_schema() -> Result<Schema> {
    use OptionType::*;

    Schema::new(vec![
        SchemaEntry::new(OPT_BASENAME, String)
            .with_default(DEFAULT_BASENAME)
            .required(),
        SchemaEntry::new(OPT_NAMESPACE, String)
            .with_default(DEFAULT_NAMESPACE)
            .required(),
        SchemaEntry::new(OPT_ENABLE_KIBANA, Bool).with_default(true),
        SchemaEntry::new(OPT_ENABLE_FLUENTD, Bool).with_default(true),
        SchemaEntry::new(OPT_PROBES, Bool).with_default(false),
        SchemaEntry::new(OPT_ES_REPLICAS, Integer).with_default(1),
        SchemaEntry::new(OPT_ES_CLUSTER_NAME, String).with_default("efk-logging"),
        SchemaEntry::new(OPT_ES_JAVA_OPTS, String).with_default("-Xms512m -Xmx512m"),
        SchemaEntry::new(OPT_KIBANA_SERVICE_TYPE, String).with_default("ClusterIP"),
        SchemaEntry::new(OPT_SA_CREATE, Bool).with_default(true),
        SchemaEntry::new(OPT_SA_USE, String),
        SchemaEntry::new(OPT_ROLES_CREATE, Bool).with_default(true),
        SchemaEntry::new(OPT_ROLES_BIND, Bool).with_default(true),
        SchemaEntry::new(OPT_ES_DATA_SIZE, String).with_default(DEFAULT_STORAGE_SIZE),
        SchemaEntry::new(OPT_ES_DATA_STORAGE_CLASS, String),
        SchemaEntry::new(OPT_ES_DATA_ACCESS_MODE, String).with_default(DEFAULT_ACCESS_MODE),
        SchemaEntry::new(OPT_CONTAINER_ELASTICSEARCH, String)
            .with_default("docker.elastic.co/elasticsearch/elasticsearch:7.9.3"),
        SchemaEntry::new(OPT_CONTAINER_KIBANA, String)
            .with_default("docker.elastic.co/kibana/kibana:7.9.3"),
        SchemaEntry::new(OPT_CONTAINER_FLUENTD, String)
            .with_default("fluent/fluentd-kubernetes-daemonset:v1.11.5-debian-elasticsearch7-1.0"),
        SchemaEntry::new(OPT_CONTAINER_INIT, String).with_default("busybox:1.32"),
        SchemaEntry::new(OPT_VOLUME_ES_DATA, Mapping),
        SchemaEntry::new(OPT_RESOURCES_ELASTICSEARCH, Mapping),
        SchemaEntry::new(OPT_RESOURCES_KIBANA, Mapping),
        SchemaEntry::new(OPT_RESOURCES_FLUENTD, Mapping),
    ])
}

/// User options for the EFK stack, merged over [`efk_schema`] defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct EfkOptions {
    options: Options,
}

impl EfkOptions {
    pub fn new(user: OptionValue) -> Result<Self> {
        let options = Options::construct(&efk_schema()?, user)?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_valid_and_stable() {
        let first = efk_schema().unwrap();
        let second = efk_schema().unwrap();
        assert_eq!(first.defaults(), second.defaults());
        assert_eq!(first.entries().len(), second.entries().len());
    }

    #[test]
    fn test_defaults_equal_schema_defaults() {
        let schema = efk_schema().unwrap();
        let options = EfkOptions::new(OptionValue::empty_mapping()).unwrap();
        assert_eq!(options.options().values(), schema.defaults());

        for entry in schema.entries() {
            assert_eq!(
                options.options().values().lookup(&entry.path),
                entry.default.as_ref(),
                "default mismatch at {}",
                entry.path
            );
        }
    }

    #[test]
    fn test_volume_override_has_no_default() {
        let options = EfkOptions::new(OptionValue::empty_mapping()).unwrap();
        assert!(!options.options().contains(OPT_VOLUME_ES_DATA));
        assert!(!options.options().contains(OPT_SA_USE));
    }

    #[test]
    fn test_wrong_type_rejected() {
        let err = EfkOptions::new(OptionValue::mapping([(
            "kubernetes",
            OptionValue::mapping([(
                "volumes",
                OptionValue::mapping([("elasticsearch-data", OptionValue::from("emptyDir"))]),
            )]),
        )]))
        .unwrap_err();

        assert!(err.to_string().contains(OPT_VOLUME_ES_DATA));
    }
}

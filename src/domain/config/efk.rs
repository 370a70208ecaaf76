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

use crate::domain::config::options::*;
use crate::domain::option::{ContextLookup, Options};
use crate::infrastructure::constants::{
    MAX_ELASTICSEARCH_REPLICAS, SUFFIX_ELASTICSEARCH, SUFFIX_ELASTICSEARCH_DATA, SUFFIX_FLUENTD,
    SUFFIX_KIBANA, VOLUME_NAME_ELASTICSEARCH_DATA,
};
use crate::shared::error::{EfkError, Result};
use k8s_openapi::api::core::v1::{ResourceRequirements, Volume};
use regex::Regex;
use std::sync::LazyLock;

static K8S_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").unwrap());

/// The EFK options with every reference resolved, read once per build.
#[derive(Debug, Clone)]
pub struct EfkConfig {
    pub basename: String,
    pub namespace: String,
    pub probes: bool,
    pub elasticsearch: ElasticsearchConfig,
    pub kibana: Option<KibanaConfig>,
    pub fluentd: Option<FluentdConfig>,
    pub authorization: AuthorizationConfig,
}

#[derive(Debug, Clone)]
pub struct ElasticsearchConfig {
    pub image: String,
    pub init_image: String,
    pub replicas: i32,
    pub cluster_name: String,
    pub java_opts: String,
    pub resources: Option<ResourceRequirements>,
    pub data_volume: DataVolume,
}

#[derive(Debug, Clone)]
pub enum DataVolume {
    /// Synthesize a PersistentVolumeClaim and mount it by name.
    Claim(VolumeClaimConfig),
    /// Use the caller's volume spec as-is.
    Custom(Volume),
}

#[derive(Debug, Clone)]
pub struct VolumeClaimConfig {
    pub claim_name: String,
    pub size: String,
    pub storage_class: Option<String>,
    pub access_mode: String,
}

#[derive(Debug, Clone)]
pub struct KibanaConfig {
    pub image: String,
    pub service_type: ServiceType,
    pub resources: Option<ResourceRequirements>,
}

#[derive(Debug, Clone)]
pub struct FluentdConfig {
    pub image: String,
    pub resources: Option<ResourceRequirements>,
}

#[derive(Debug, Clone)]
pub struct AuthorizationConfig {
    pub create_service_account: bool,
    pub service_account_name: String,
    pub create_role: bool,
    pub bind_role: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    ClusterIP,
    NodePort,
    LoadBalancer,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::ClusterIP => "ClusterIP",
            ServiceType::NodePort => "NodePort",
            ServiceType::LoadBalancer => "LoadBalancer",
        }
    }
}

impl std::str::FromStr for ServiceType {
    type Err = EfkError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ClusterIP" => Ok(ServiceType::ClusterIP),
            "NodePort" => Ok(ServiceType::NodePort),
            "LoadBalancer" => Ok(ServiceType::LoadBalancer),
            _ => Err(EfkError::ConfigError(format!(
                "Invalid service type: {}",
                s
            ))),
        }
    }
}

impl EfkConfig {
    pub fn resolve<C>(options: &EfkOptions, context: &C) -> Result<Self>
    where
        C: ContextLookup + ?Sized,
    {
        let opts = options.options();
        let basename = opts.get_str(context, OPT_BASENAME)?;
        let namespace = opts.get_str(context, OPT_NAMESPACE)?;

        let replicas = opts.get_i64(context, OPT_ES_REPLICAS)?;
        let replicas = i32::try_from(replicas).map_err(|_| {
            EfkError::ConfigError(format!(
                "{} out of range, got {}",
                OPT_ES_REPLICAS, replicas
            ))
        })?;

        let data_volume = match opts.get_value_opt(context, OPT_VOLUME_ES_DATA)? {
            Some(spec) => DataVolume::Custom(volume_from_spec(
                VOLUME_NAME_ELASTICSEARCH_DATA,
                &spec.to_json(OPT_VOLUME_ES_DATA)?,
            )?),
            None => DataVolume::Claim(VolumeClaimConfig {
                claim_name: format!("{}{}", basename, SUFFIX_ELASTICSEARCH_DATA),
                size: opts.get_str(context, OPT_ES_DATA_SIZE)?,
                storage_class: opts.get_str_opt(context, OPT_ES_DATA_STORAGE_CLASS)?,
                access_mode: opts.get_str(context, OPT_ES_DATA_ACCESS_MODE)?,
            }),
        };

        let elasticsearch = ElasticsearchConfig {
            image: opts.get_str(context, OPT_CONTAINER_ELASTICSEARCH)?,
            init_image: opts.get_str(context, OPT_CONTAINER_INIT)?,
            replicas,
            cluster_name: opts.get_str(context, OPT_ES_CLUSTER_NAME)?,
            java_opts: opts.get_str(context, OPT_ES_JAVA_OPTS)?,
            resources: resources_option(opts, context, OPT_RESOURCES_ELASTICSEARCH)?,
            data_volume,
        };

        let kibana = if opts.get_bool(context, OPT_ENABLE_KIBANA)? {
            Some(KibanaConfig {
                image: opts.get_str(context, OPT_CONTAINER_KIBANA)?,
                service_type: opts
                    .get_str(context, OPT_KIBANA_SERVICE_TYPE)?
                    .parse::<ServiceType>()?,
                resources: resources_option(opts, context, OPT_RESOURCES_KIBANA)?,
            })
        } else {
            None
        };

        let fluentd = if opts.get_bool(context, OPT_ENABLE_FLUENTD)? {
            Some(FluentdConfig {
                image: opts.get_str(context, OPT_CONTAINER_FLUENTD)?,
                resources: resources_option(opts, context, OPT_RESOURCES_FLUENTD)?,
            })
        } else {
            None
        };

        let authorization = match opts.get_str_opt(context, OPT_SA_USE)? {
            Some(existing) => AuthorizationConfig {
                create_service_account: false,
                service_account_name: existing,
                create_role: opts.get_bool(context, OPT_ROLES_CREATE)?,
                bind_role: opts.get_bool(context, OPT_ROLES_BIND)?,
            },
            None => AuthorizationConfig {
                create_service_account: opts.get_bool(context, OPT_SA_CREATE)?,
                service_account_name: format!("{}{}", basename, SUFFIX_FLUENTD),
                create_role: opts.get_bool(context, OPT_ROLES_CREATE)?,
                bind_role: opts.get_bool(context, OPT_ROLES_BIND)?,
            },
        };

        let config = EfkConfig {
            basename,
            namespace,
            probes: opts.get_bool(context, OPT_PROBES)?,
            elasticsearch,
            kibana,
            fluentd,
            authorization,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !is_valid_k8s_name(&self.basename) {
            return Err(EfkError::ConfigError(format!(
                "Invalid basename: {}",
                self.basename
            )));
        }

        if self.basename.len() > 40 {
            return Err(EfkError::ConfigError(format!(
                "basename too long (max 40 chars): {}",
                self.basename
            )));
        }

        if !is_valid_k8s_name(&self.namespace) || self.namespace.len() > 63 {
            return Err(EfkError::ConfigError(format!(
                "Invalid namespace: {}",
                self.namespace
            )));
        }

        if !(1..=MAX_ELASTICSEARCH_REPLICAS).contains(&self.elasticsearch.replicas) {
            return Err(EfkError::ConfigError(format!(
                "{} must be between 1 and {}, got {}",
                OPT_ES_REPLICAS, MAX_ELASTICSEARCH_REPLICAS, self.elasticsearch.replicas
            )));
        }

        Ok(())
    }

    pub fn elasticsearch_name(&self) -> String {
        format!("{}{}", self.basename, SUFFIX_ELASTICSEARCH)
    }

    pub fn kibana_name(&self) -> String {
        format!("{}{}", self.basename, SUFFIX_KIBANA)
    }

    pub fn fluentd_name(&self) -> String {
        format!("{}{}", self.basename, SUFFIX_FLUENTD)
    }
}

fn resources_option<C>(
    opts: &Options,
    context: &C,
    path: &str,
) -> Result<Option<ResourceRequirements>>
where
    C: ContextLookup + ?Sized,
{
    match opts.get_value_opt(context, path)? {
        Some(spec) => serde_json::from_value(spec.to_json(path)?)
            .map(Some)
            .map_err(|e| {
                EfkError::ConfigError(format!("Invalid resources at '{}': {}", path, e))
            }),
        None => Ok(None),
    }
}

fn volume_from_spec(name: &str, spec: &serde_json::Value) -> Result<Volume> {
    let mut object = match spec {
        serde_json::Value::Object(object) => object.clone(),
        other => {
            return Err(EfkError::option_type(
                OPT_VOLUME_ES_DATA,
                "mapping",
                json_type_name(other),
            ))
        }
    };
    object.insert(
        "name".to_string(),
        serde_json::Value::String(name.to_string()),
    );

    serde_json::from_value(serde_json::Value::Object(object)).map_err(|e| {
        EfkError::ConfigError(format!(
            "Invalid volume spec at '{}': {}",
            OPT_VOLUME_ES_DATA, e
        ))
    })
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "mapping",
    }
}

pub(crate) fn is_valid_k8s_name(name: &str) -> bool {
    name.len() <= 253 && K8S_NAME.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::option::{GlobalOptions, OptionValue};

    fn globals() -> GlobalOptions {
        GlobalOptions::new(OptionValue::mapping([(
            "namespaces",
            OptionValue::mapping([("mon", OptionValue::from("app-monitoring"))]),
        )]))
        .unwrap()
    }

    fn resolve(user: OptionValue) -> Result<EfkConfig> {
        EfkConfig::resolve(&EfkOptions::new(user)?, &globals())
    }

    #[test]
    fn test_resolve_defaults() {
        let config = resolve(OptionValue::empty_mapping()).unwrap();

        assert_eq!(config.basename, "efk");
        assert_eq!(config.namespace, "default");
        assert_eq!(config.elasticsearch.replicas, 1);
        assert!(config.kibana.is_some());
        assert!(config.fluentd.is_some());
        assert!(config.authorization.create_service_account);
        assert_eq!(config.authorization.service_account_name, "efk-fluentd");

        match &config.elasticsearch.data_volume {
            DataVolume::Claim(claim) => {
                assert_eq!(claim.claim_name, "efk-elasticsearch-data");
                assert_eq!(claim.size, "10Gi");
                assert_eq!(claim.access_mode, "ReadWriteOnce");
                assert!(claim.storage_class.is_none());
            }
            DataVolume::Custom(_) => panic!("expected a synthesized claim"),
        }
    }

    #[test]
    fn test_resolve_namespace_reference() {
        let config = resolve(OptionValue::mapping([(
            "namespace",
            OptionValue::root("namespaces.mon"),
        )]))
        .unwrap();

        assert_eq!(config.namespace, "app-monitoring");
    }

    #[test]
    fn test_resolve_custom_volume() {
        let config = resolve(OptionValue::mapping([(
            "kubernetes",
            OptionValue::mapping([(
                "volumes",
                OptionValue::mapping([(
                    "elasticsearch-data",
                    OptionValue::mapping([("emptyDir", OptionValue::empty_mapping())]),
                )]),
            )]),
        )]))
        .unwrap();

        match config.elasticsearch.data_volume {
            DataVolume::Custom(volume) => {
                assert_eq!(volume.name, "elasticsearch-data");
                assert!(volume.empty_dir.is_some());
            }
            DataVolume::Claim(_) => panic!("expected the caller's volume"),
        }
    }

    #[test]
    fn test_serviceaccount_use_suppresses_creation() {
        let config = resolve(OptionValue::mapping([(
            "config",
            OptionValue::mapping([(
                "authorization",
                OptionValue::mapping([("serviceaccount_use", OptionValue::from("logging-sa"))]),
            )]),
        )]))
        .unwrap();

        assert!(!config.authorization.create_service_account);
        assert_eq!(config.authorization.service_account_name, "logging-sa");
    }

    #[test]
    fn test_resources_passthrough() {
        let config = resolve(OptionValue::mapping([(
            "kubernetes",
            OptionValue::mapping([(
                "resources",
                OptionValue::mapping([(
                    "kibana-deployment",
                    OptionValue::mapping([(
                        "limits",
                        OptionValue::mapping([("memory", OptionValue::from("1Gi"))]),
                    )]),
                )]),
            )]),
        )]))
        .unwrap();

        let resources = config.kibana.unwrap().resources.unwrap();
        assert_eq!(resources.limits.unwrap()["memory"].0, "1Gi");
        assert!(config.elasticsearch.resources.is_none());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(resolve(OptionValue::mapping([("basename", OptionValue::from("My_EFK"))])).is_err());
        assert!(resolve(OptionValue::mapping([(
            "config",
            OptionValue::mapping([(
                "kibana",
                OptionValue::mapping([("service_type", OptionValue::from("Ingress"))]),
            )]),
        )]))
        .is_err());
        assert!(resolve(OptionValue::mapping([(
            "config",
            OptionValue::mapping([(
                "elasticsearch",
                OptionValue::mapping([("replicas", OptionValue::from(0))]),
            )]),
        )]))
        .is_err());
    }

    #[test]
    fn test_replicas_out_of_range_rejected() {
        let too_many = i64::from(MAX_ELASTICSEARCH_REPLICAS) + 1;
        for replicas in [i64::from(i32::MAX) + 1, too_many, -1] {
            let err = resolve(OptionValue::mapping([(
                "config",
                OptionValue::mapping([(
                    "elasticsearch",
                    OptionValue::mapping([("replicas", OptionValue::Integer(replicas))]),
                )]),
            )]))
            .unwrap_err();

            assert!(matches!(
                err,
                EfkError::ConfigError(ref msg) if msg.contains(OPT_ES_REPLICAS)
            ));
        }
    }

    #[test]
    fn test_unresolved_namespace_reference() {
        let err = resolve(OptionValue::mapping([(
            "namespace",
            OptionValue::root("namespaces.missing"),
        )]))
        .unwrap_err();

        assert!(err.is_option_error());
    }

    #[test]
    fn test_is_valid_k8s_name() {
        assert!(is_valid_k8s_name("myefk"));
        assert!(is_valid_k8s_name("app-monitoring"));
        assert!(!is_valid_k8s_name("-efk"));
        assert!(!is_valid_k8s_name("efk-"));
        assert!(!is_valid_k8s_name("EFK"));
        assert!(!is_valid_k8s_name(""));
    }
}

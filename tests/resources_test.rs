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

//! Resource shapes and options-file loading

use efk_kube::domain::config::{apply_properties, apply_references, DataVolume};
use efk_kube::*;
use std::io::Write;

mod test_utils {
    use super::*;

    pub fn create_test_config(user: OptionValue) -> EfkConfig {
        let globals = GlobalOptions::new(OptionValue::empty_mapping()).unwrap();
        EfkConfig::resolve(&EfkOptions::new(user).unwrap(), &globals).unwrap()
    }

    pub fn write_options(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }
}

// ============================================================================
// Tests for resource builders
// ============================================================================

#[test]
fn test_headless_service_ports() {
    let config = test_utils::create_test_config(OptionValue::empty_mapping());
    let service = HeadlessServiceBuilder::new(&config).build();

    let spec = service.spec.unwrap();
    assert_eq!(spec.cluster_ip.as_deref(), Some("None"));

    let ports: Vec<(&str, i32)> = spec
        .ports
        .as_ref()
        .unwrap()
        .iter()
        .map(|p| (p.name.as_deref().unwrap(), p.port))
        .collect();
    assert_eq!(ports, vec![("rest", 9200), ("inter-node", 9300)]);

    let selector = spec.selector.unwrap();
    assert_eq!(selector["app"], "efk");
    assert_eq!(selector["component"], "elasticsearch");
}

#[test]
fn test_kibana_service_type() {
    let config = test_utils::create_test_config(OptionValue::mapping([(
        "config",
        OptionValue::mapping([(
            "kibana",
            OptionValue::mapping([("service_type", OptionValue::from("NodePort"))]),
        )]),
    )]));
    let kibana = config.kibana.as_ref().unwrap();
    let service = ServiceBuilder::new(&config, kibana).build();

    assert_eq!(service.metadata.name.as_deref(), Some("efk-kibana"));
    let spec = service.spec.unwrap();
    assert_eq!(spec.type_.as_deref(), Some("NodePort"));
    assert_eq!(spec.ports.unwrap()[0].port, 5601);
}

#[test]
fn test_elasticsearch_discovery_env() {
    let config = test_utils::create_test_config(OptionValue::mapping([(
        "config",
        OptionValue::mapping([(
            "elasticsearch",
            OptionValue::mapping([("replicas", OptionValue::from(3))]),
        )]),
    )]));
    let statefulset = ElasticsearchBuilder::new(&config).build();

    let spec = statefulset.spec.unwrap();
    assert_eq!(spec.replicas, Some(3));
    assert_eq!(spec.service_name, "efk-elasticsearch");

    let pod = spec.template.spec.unwrap();
    assert_eq!(pod.init_containers.as_ref().unwrap().len(), 3);

    let env = pod.containers[0].env.as_ref().unwrap();
    let value = |name: &str| {
        env.iter()
            .find(|e| e.name == name)
            .and_then(|e| e.value.clone())
    };
    assert_eq!(
        value("discovery.seed_hosts").as_deref(),
        Some("efk-elasticsearch-0.efk-elasticsearch,efk-elasticsearch-1.efk-elasticsearch,efk-elasticsearch-2.efk-elasticsearch")
    );
    assert_eq!(
        value("cluster.initial_master_nodes").as_deref(),
        Some("efk-elasticsearch-0,efk-elasticsearch-1,efk-elasticsearch-2")
    );
    assert_eq!(value("cluster.name").as_deref(), Some("efk-logging"));
}

#[test]
fn test_probes_toggle() {
    let config = test_utils::create_test_config(OptionValue::empty_mapping());
    let pod = ElasticsearchBuilder::new(&config)
        .build()
        .spec
        .unwrap()
        .template
        .spec
        .unwrap();
    assert!(pod.containers[0].readiness_probe.is_none());

    let config = test_utils::create_test_config(OptionValue::mapping([(
        "config",
        OptionValue::mapping([("probes", OptionValue::Bool(true))]),
    )]));
    let kibana = config.kibana.as_ref().unwrap();
    let pod = KibanaBuilder::new(&config, kibana)
        .build()
        .spec
        .unwrap()
        .template
        .spec
        .unwrap();
    let probe = pod.containers[0].readiness_probe.as_ref().unwrap();
    assert_eq!(
        probe.http_get.as_ref().unwrap().path.as_deref(),
        Some("/api/status")
    );
}

#[test]
fn test_fluentd_daemonset() {
    let config = test_utils::create_test_config(OptionValue::mapping([(
        "namespace",
        OptionValue::from("logging"),
    )]));
    let fluentd = config.fluentd.as_ref().unwrap();
    let pod = FluentdBuilder::new(&config, fluentd)
        .build()
        .spec
        .unwrap()
        .template
        .spec
        .unwrap();

    assert_eq!(pod.service_account_name.as_deref(), Some("efk-fluentd"));
    assert_eq!(pod.tolerations.as_ref().unwrap().len(), 2);
    assert_eq!(pod.volumes.as_ref().unwrap().len(), 2);

    let host = pod.containers[0]
        .env
        .as_ref()
        .unwrap()
        .iter()
        .find(|e| e.name == "FLUENT_ELASTICSEARCH_HOST")
        .and_then(|e| e.value.clone());
    assert_eq!(
        host.as_deref(),
        Some("efk-elasticsearch.logging.svc.cluster.local")
    );
}

#[test]
fn test_cluster_role_binding_subject() {
    let config = test_utils::create_test_config(OptionValue::mapping([(
        "basename",
        OptionValue::from("myefk"),
    )]));
    let binding = AccessControlBuilder::new(&config).build_cluster_role_binding();

    assert_eq!(binding.role_ref.name, "myefk-fluentd");
    assert_eq!(binding.role_ref.kind, "ClusterRole");
    let subject = &binding.subjects.unwrap()[0];
    assert_eq!(subject.name, "myefk-fluentd");
    assert_eq!(subject.namespace.as_deref(), Some("default"));

    let role = AccessControlBuilder::new(&config).build_cluster_role();
    assert!(role.metadata.namespace.is_none());
    assert_eq!(
        role.rules.unwrap()[0].verbs,
        vec!["get".to_string(), "list".to_string(), "watch".to_string()]
    );
}

#[test]
fn test_storage_class_on_claim() {
    let config = test_utils::create_test_config(OptionValue::mapping([(
        "config",
        OptionValue::mapping([(
            "storage",
            OptionValue::mapping([(
                "elasticsearch-data",
                OptionValue::mapping([
                    ("storage_class", OptionValue::from("fast-ssd")),
                    ("size", OptionValue::from("50Gi")),
                ]),
            )]),
        )]),
    )]));

    let claim = match &config.elasticsearch.data_volume {
        DataVolume::Claim(claim) => claim,
        DataVolume::Custom(_) => panic!("expected a synthesized claim"),
    };
    let pvc = VolumeClaimBuilder::new(&config, claim).build();
    let spec = pvc.spec.unwrap();
    assert_eq!(spec.storage_class_name.as_deref(), Some("fast-ssd"));
    assert_eq!(spec.resources.unwrap().requests.unwrap()["storage"].0, "50Gi");
}

// ============================================================================
// Tests for options files and command-line overrides
// ============================================================================

#[test]
fn test_yaml_options_file_with_reference() {
    let file = test_utils::write_options(
        ".yaml",
        "basename: myefk\nnamespace: !root namespaces.mon\nconfig:\n  elasticsearch:\n    replicas: 2\n",
    );
    let user = load_options_file(file.path()).unwrap();

    let globals = GlobalOptions::new(OptionValue::empty_mapping()).unwrap();
    let config = EfkConfig::resolve(&EfkOptions::new(user).unwrap(), &globals).unwrap();

    assert_eq!(config.basename, "myefk");
    assert_eq!(config.namespace, "monitoring");
    assert_eq!(config.elasticsearch.replicas, 2);
}

#[test]
fn test_toml_options_file() {
    let file = test_utils::write_options(
        ".toml",
        "basename = \"tomlefk\"\n\n[enable]\nkibana = false\n",
    );
    let user = load_options_file(file.path()).unwrap();
    let config = test_utils::create_test_config(user);

    assert_eq!(config.basename, "tomlefk");
    assert!(config.kibana.is_none());
}

#[test]
fn test_missing_options_file() {
    let err = load_options_file("/nonexistent/efk.yaml").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/efk.yaml"));
}

#[test]
fn test_properties_override_file() {
    let file = test_utils::write_options(".yaml", "basename: fromfile\n");
    let mut user = load_options_file(file.path()).unwrap();

    apply_properties(
        &[
            "basename=fromcli".to_string(),
            "kubernetes.volumes.elasticsearch-data={emptyDir: {}}".to_string(),
        ],
        &mut user,
    )
    .unwrap();
    apply_references(&["namespace=namespaces.default".to_string()], &mut user).unwrap();

    let config = test_utils::create_test_config(user);
    assert_eq!(config.basename, "fromcli");
    assert_eq!(config.namespace, "default");
    assert!(matches!(
        config.elasticsearch.data_volume,
        DataVolume::Custom(ref volume) if volume.empty_dir.is_some()
    ));
}

#[test]
fn test_wrong_option_type_rejected() {
    let file = test_utils::write_options(".yaml", "enable:\n  kibana: \"yes please\"\n");
    let user = load_options_file(file.path()).unwrap();

    let err = EfkOptions::new(user).unwrap_err();
    assert!(matches!(err, EfkError::OptionType { ref path, .. } if path == "enable.kibana"));
}

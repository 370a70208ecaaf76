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

//! Environment variable builder for EFK components
//!
//! Each component finds its peers through the service names derived from the
//! basename, so the variables are computed here from the resolved config.

use crate::domain::config::EfkConfig;
use crate::infrastructure::constants::{
    COMPONENT_ELASTICSEARCH, COMPONENT_FLUENTD, COMPONENT_KIBANA, ELASTICSEARCH_REST_PORT,
    POD_CLUSTER_DOMAIN,
};
use k8s_openapi::api::core::v1::{EnvVar, EnvVarSource, ObjectFieldSelector};

pub struct EnvironmentBuilder<'a> {
    component: &'static str,
    config: &'a EfkConfig,
}

impl<'a> EnvironmentBuilder<'a> {
    pub fn new(component: &'static str, config: &'a EfkConfig) -> Self {
        Self { component, config }
    }

    pub fn build(self) -> Vec<EnvVar> {
        match self.component {
            COMPONENT_ELASTICSEARCH => self.build_elasticsearch_env_vars(),
            COMPONENT_KIBANA => self.build_kibana_env_vars(),
            COMPONENT_FLUENTD => self.build_fluentd_env_vars(),
            _ => Vec::new(),
        }
    }

    fn build_elasticsearch_env_vars(&self) -> Vec<EnvVar> {
        let es = &self.config.elasticsearch;
        let service = self.config.elasticsearch_name();

        let seed_hosts: Vec<String> = (0..es.replicas)
            .map(|i| format!("{}-{}.{}", service, i, service))
            .collect();
        let master_nodes: Vec<String> = (0..es.replicas)
            .map(|i| format!("{}-{}", service, i))
            .collect();

        vec![
            plain("cluster.name", &es.cluster_name),
            field_ref("node.name", "metadata.name"),
            plain("discovery.seed_hosts", &seed_hosts.join(",")),
            plain("cluster.initial_master_nodes", &master_nodes.join(",")),
            plain("ES_JAVA_OPTS", &es.java_opts),
        ]
    }

    fn build_kibana_env_vars(&self) -> Vec<EnvVar> {
        vec![plain(
            "ELASTICSEARCH_HOSTS",
            &format!(
                "http://{}:{}",
                self.config.elasticsearch_name(),
                ELASTICSEARCH_REST_PORT
            ),
        )]
    }

    fn build_fluentd_env_vars(&self) -> Vec<EnvVar> {
        // Fluentd runs on every node, so it addresses Elasticsearch by FQDN.
        let host = format!(
            "{}.{}.svc.{}",
            self.config.elasticsearch_name(),
            self.config.namespace,
            POD_CLUSTER_DOMAIN
        );

        vec![
            plain("FLUENT_ELASTICSEARCH_HOST", &host),
            plain(
                "FLUENT_ELASTICSEARCH_PORT",
                &ELASTICSEARCH_REST_PORT.to_string(),
            ),
            plain("FLUENT_ELASTICSEARCH_SCHEME", "http"),
            plain("FLUENTD_SYSTEMD_CONF", "disable"),
            field_ref("K8S_NODE_NAME", "spec.nodeName"),
        ]
    }
}

fn plain(name: &str, value: &str) -> EnvVar {
    EnvVar {
        name: name.to_string(),
        value: Some(value.to_string()),
        ..Default::default()
    }
}

fn field_ref(name: &str, field_path: &str) -> EnvVar {
    EnvVar {
        name: name.to_string(),
        value_from: Some(EnvVarSource {
            field_ref: Some(ObjectFieldSelector {
                field_path: field_path.to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

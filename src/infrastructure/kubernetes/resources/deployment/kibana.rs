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

use crate::domain::config::{EfkConfig, KibanaConfig};
use crate::infrastructure::constants::*;
use crate::infrastructure::kubernetes::resources::pod::{
    ComponentBuilder, EnvironmentBuilder, ProbeBuilder,
};
use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{Container, ContainerPort, PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};

pub struct KibanaBuilder<'a> {
    config: &'a EfkConfig,
    kibana: &'a KibanaConfig,
}

impl ComponentBuilder for KibanaBuilder<'_> {
    fn component_name(&self) -> &'static str {
        COMPONENT_KIBANA
    }

    fn basename(&self) -> &str {
        &self.config.basename
    }
}

impl<'a> KibanaBuilder<'a> {
    pub fn new(config: &'a EfkConfig, kibana: &'a KibanaConfig) -> Self {
        Self { config, kibana }
    }

    pub fn build(&self) -> Deployment {
        let container = Container {
            name: CONTAINER_NAME_KIBANA.to_string(),
            image: Some(self.kibana.image.clone()),
            env: Some(EnvironmentBuilder::new(COMPONENT_KIBANA, self.config).build()),
            ports: Some(vec![ContainerPort {
                container_port: KIBANA_PORT,
                name: Some(PORT_NAME_KIBANA.to_string()),
                protocol: Some("TCP".to_string()),
                ..Default::default()
            }]),
            readiness_probe: ProbeBuilder::build_http_readiness(
                self.config.probes,
                KIBANA_STATUS_PATH,
                KIBANA_PORT,
            ),
            resources: self.kibana.resources.clone(),
            ..Default::default()
        };

        Deployment {
            metadata: ObjectMeta {
                name: Some(self.config.kibana_name()),
                namespace: Some(self.config.namespace.clone()),
                labels: Some(self.get_labels()),
                ..Default::default()
            },
            spec: Some(DeploymentSpec {
                replicas: Some(1),
                selector: LabelSelector {
                    match_labels: Some(self.get_selector_labels()),
                    ..Default::default()
                },
                template: PodTemplateSpec {
                    metadata: Some(ObjectMeta {
                        labels: Some(self.get_labels()),
                        ..Default::default()
                    }),
                    spec: Some(PodSpec {
                        containers: vec![container],
                        restart_policy: Some(RESTART_POLICY_ALWAYS.to_string()),
                        ..Default::default()
                    }),
                },
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

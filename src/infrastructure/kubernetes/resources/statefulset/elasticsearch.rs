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

use crate::domain::config::{DataVolume, EfkConfig};
use crate::infrastructure::constants::*;
use crate::infrastructure::kubernetes::resources::pod::{
    ComponentBuilder, EnvironmentBuilder, ProbeBuilder,
};
use k8s_openapi::api::apps::v1::{StatefulSet, StatefulSetSpec};
use k8s_openapi::api::core::v1::{
    Container, ContainerPort, PersistentVolumeClaimVolumeSource, PodSpec, PodTemplateSpec,
    SecurityContext, Volume, VolumeMount,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};

pub struct ElasticsearchBuilder<'a> {
    config: &'a EfkConfig,
}

impl ComponentBuilder for ElasticsearchBuilder<'_> {
    fn component_name(&self) -> &'static str {
        COMPONENT_ELASTICSEARCH
    }

    fn basename(&self) -> &str {
        &self.config.basename
    }
}

impl<'a> ElasticsearchBuilder<'a> {
    pub fn new(config: &'a EfkConfig) -> Self {
        Self { config }
    }

    pub fn build(&self) -> StatefulSet {
        let es = &self.config.elasticsearch;

        StatefulSet {
            metadata: ObjectMeta {
                name: Some(self.config.elasticsearch_name()),
                namespace: Some(self.config.namespace.clone()),
                labels: Some(self.get_labels()),
                ..Default::default()
            },
            spec: Some(StatefulSetSpec {
                replicas: Some(es.replicas),
                service_name: self.config.elasticsearch_name(),
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
                        init_containers: Some(self.build_init_containers()),
                        containers: vec![self.build_main_container()],
                        volumes: Some(vec![self.build_data_volume()]),
                        restart_policy: Some(RESTART_POLICY_ALWAYS.to_string()),
                        ..Default::default()
                    }),
                },
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn build_main_container(&self) -> Container {
        let es = &self.config.elasticsearch;

        Container {
            name: CONTAINER_NAME_ELASTICSEARCH.to_string(),
            image: Some(es.image.clone()),
            env: Some(EnvironmentBuilder::new(COMPONENT_ELASTICSEARCH, self.config).build()),
            ports: Some(vec![
                ContainerPort {
                    container_port: ELASTICSEARCH_REST_PORT,
                    name: Some(PORT_NAME_REST.to_string()),
                    protocol: Some("TCP".to_string()),
                    ..Default::default()
                },
                ContainerPort {
                    container_port: ELASTICSEARCH_INTER_NODE_PORT,
                    name: Some(PORT_NAME_INTER_NODE.to_string()),
                    protocol: Some("TCP".to_string()),
                    ..Default::default()
                },
            ]),
            volume_mounts: Some(vec![data_mount()]),
            readiness_probe: ProbeBuilder::build_http_readiness(
                self.config.probes,
                ELASTICSEARCH_HEALTH_PATH,
                ELASTICSEARCH_REST_PORT,
            ),
            resources: es.resources.clone(),
            ..Default::default()
        }
    }

    /// Elasticsearch needs a writable data dir and raised kernel limits
    /// before it starts.
    fn build_init_containers(&self) -> Vec<Container> {
        let image = &self.config.elasticsearch.init_image;

        vec![
            Container {
                name: INIT_CONTAINER_FIX_PERMISSIONS.to_string(),
                image: Some(image.clone()),
                command: Some(shell(&format!(
                    "chown -R {} {}",
                    ELASTICSEARCH_UID_GID, ELASTICSEARCH_DATA_PATH
                ))),
                security_context: Some(privileged()),
                volume_mounts: Some(vec![data_mount()]),
                ..Default::default()
            },
            Container {
                name: INIT_CONTAINER_VM_MAX_MAP.to_string(),
                image: Some(image.clone()),
                command: Some(vec![
                    "sysctl".to_string(),
                    "-w".to_string(),
                    format!("vm.max_map_count={}", VM_MAX_MAP_COUNT),
                ]),
                security_context: Some(privileged()),
                ..Default::default()
            },
            Container {
                name: INIT_CONTAINER_FD_ULIMIT.to_string(),
                image: Some(image.clone()),
                command: Some(shell(&format!("ulimit -n {}", FD_ULIMIT))),
                security_context: Some(privileged()),
                ..Default::default()
            },
        ]
    }

    fn build_data_volume(&self) -> Volume {
        match &self.config.elasticsearch.data_volume {
            DataVolume::Claim(claim) => Volume {
                name: VOLUME_NAME_ELASTICSEARCH_DATA.to_string(),
                persistent_volume_claim: Some(PersistentVolumeClaimVolumeSource {
                    claim_name: claim.claim_name.clone(),
                    ..Default::default()
                }),
                ..Default::default()
            },
            DataVolume::Custom(volume) => volume.clone(),
        }
    }
}

fn data_mount() -> VolumeMount {
    VolumeMount {
        name: VOLUME_NAME_ELASTICSEARCH_DATA.to_string(),
        mount_path: ELASTICSEARCH_DATA_PATH.to_string(),
        ..Default::default()
    }
}

fn privileged() -> SecurityContext {
    SecurityContext {
        privileged: Some(true),
        ..Default::default()
    }
}

fn shell(script: &str) -> Vec<String> {
    vec!["sh".to_string(), "-c".to_string(), script.to_string()]
}

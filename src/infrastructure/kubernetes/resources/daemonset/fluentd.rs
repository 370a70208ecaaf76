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

use crate::domain::config::{EfkConfig, FluentdConfig};
use crate::infrastructure::constants::*;
use crate::infrastructure::kubernetes::resources::pod::{ComponentBuilder, EnvironmentBuilder};
use k8s_openapi::api::apps::v1::{DaemonSet, DaemonSetSpec};
use k8s_openapi::api::core::v1::{
    Container, HostPathVolumeSource, PodSpec, PodTemplateSpec, Toleration, Volume, VolumeMount,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};

const HOST_LOG_VOLUMES: &[(&str, &str)] = &[
    (VOLUME_NAME_VARLOG, HOST_PATH_VARLOG),
    (VOLUME_NAME_DOCKER_CONTAINERS, HOST_PATH_DOCKER_CONTAINERS),
];

/// One Fluentd pod per node, tailing container logs from the host.
pub struct FluentdBuilder<'a> {
    config: &'a EfkConfig,
    fluentd: &'a FluentdConfig,
}

impl ComponentBuilder for FluentdBuilder<'_> {
    fn component_name(&self) -> &'static str {
        COMPONENT_FLUENTD
    }

    fn basename(&self) -> &str {
        &self.config.basename
    }
}

impl<'a> FluentdBuilder<'a> {
    pub fn new(config: &'a EfkConfig, fluentd: &'a FluentdConfig) -> Self {
        Self { config, fluentd }
    }

    pub fn build(&self) -> DaemonSet {
        let volumes = HOST_LOG_VOLUMES
            .iter()
            .map(|(name, path)| Volume {
                name: name.to_string(),
                host_path: Some(HostPathVolumeSource {
                    path: path.to_string(),
                    ..Default::default()
                }),
                ..Default::default()
            })
            .collect();

        let mounts = HOST_LOG_VOLUMES
            .iter()
            .map(|(name, path)| VolumeMount {
                name: name.to_string(),
                mount_path: path.to_string(),
                read_only: Some(*name == VOLUME_NAME_DOCKER_CONTAINERS),
                ..Default::default()
            })
            .collect();

        let container = Container {
            name: CONTAINER_NAME_FLUENTD.to_string(),
            image: Some(self.fluentd.image.clone()),
            env: Some(EnvironmentBuilder::new(COMPONENT_FLUENTD, self.config).build()),
            volume_mounts: Some(mounts),
            resources: self.fluentd.resources.clone(),
            ..Default::default()
        };

        DaemonSet {
            metadata: ObjectMeta {
                name: Some(self.config.fluentd_name()),
                namespace: Some(self.config.namespace.clone()),
                labels: Some(self.get_labels()),
                ..Default::default()
            },
            spec: Some(DaemonSetSpec {
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
                        service_account_name: Some(
                            self.config.authorization.service_account_name.clone(),
                        ),
                        tolerations: Some(self.build_tolerations()),
                        containers: vec![container],
                        volumes: Some(volumes),
                        termination_grace_period_seconds: Some(FLUENTD_TERMINATION_GRACE_PERIOD),
                        restart_policy: Some(RESTART_POLICY_ALWAYS.to_string()),
                        ..Default::default()
                    }),
                },
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    // Control-plane nodes produce logs too.
    fn build_tolerations(&self) -> Vec<Toleration> {
        [TAINT_MASTER, TAINT_CONTROL_PLANE]
            .iter()
            .map(|key| Toleration {
                key: Some(key.to_string()),
                effect: Some(TAINT_EFFECT_NO_SCHEDULE.to_string()),
                operator: Some("Exists".to_string()),
                ..Default::default()
            })
            .collect()
    }
}

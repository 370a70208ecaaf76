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

use crate::domain::config::EfkConfig;
use crate::infrastructure::constants::{
    COMPONENT_ELASTICSEARCH, ELASTICSEARCH_INTER_NODE_PORT, ELASTICSEARCH_REST_PORT,
    PORT_NAME_INTER_NODE, PORT_NAME_REST,
};
use crate::infrastructure::kubernetes::resources::pod::ComponentBuilder;
use k8s_openapi::api::core::v1::Service;
use k8s_openapi::api::core::v1::ServicePort;
use k8s_openapi::api::core::v1::ServiceSpec;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

const ELASTICSEARCH_SERVICE_PORTS: &[(&str, i32)] = &[
    (PORT_NAME_REST, ELASTICSEARCH_REST_PORT),
    (PORT_NAME_INTER_NODE, ELASTICSEARCH_INTER_NODE_PORT),
];

/// Governing service of the Elasticsearch StatefulSet. Gives each node the
/// stable DNS name used for discovery.
pub struct HeadlessServiceBuilder<'a> {
    config: &'a EfkConfig,
}

impl ComponentBuilder for HeadlessServiceBuilder<'_> {
    fn component_name(&self) -> &'static str {
        COMPONENT_ELASTICSEARCH
    }

    fn basename(&self) -> &str {
        &self.config.basename
    }
}

impl<'a> HeadlessServiceBuilder<'a> {
    pub fn new(config: &'a EfkConfig) -> Self {
        Self { config }
    }

    pub fn build(&self) -> Service {
        let ports = ELASTICSEARCH_SERVICE_PORTS
            .iter()
            .map(|(name, port)| create_service_port(name, *port))
            .collect();

        Service {
            metadata: ObjectMeta {
                name: Some(self.config.elasticsearch_name()),
                namespace: Some(self.config.namespace.clone()),
                labels: Some(self.get_labels()),
                ..Default::default()
            },
            spec: Some(ServiceSpec {
                cluster_ip: Some("None".to_string()),
                ports: Some(ports),
                selector: Some(self.get_selector_labels()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

pub(crate) fn create_service_port(name: &str, port: i32) -> ServicePort {
    ServicePort {
        name: Some(name.to_string()),
        port,
        target_port: Some(IntOrString::Int(port)),
        protocol: Some("TCP".to_string()),
        ..Default::default()
    }
}

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

use super::headless_service::create_service_port;
use crate::domain::config::{EfkConfig, KibanaConfig};
use crate::infrastructure::constants::{COMPONENT_KIBANA, KIBANA_PORT, PORT_NAME_KIBANA};
use crate::infrastructure::kubernetes::resources::pod::ComponentBuilder;
use k8s_openapi::api::core::v1::Service;
use k8s_openapi::api::core::v1::ServiceSpec;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

pub struct ServiceBuilder<'a> {
    config: &'a EfkConfig,
    kibana: &'a KibanaConfig,
}

impl ComponentBuilder for ServiceBuilder<'_> {
    fn component_name(&self) -> &'static str {
        COMPONENT_KIBANA
    }

    fn basename(&self) -> &str {
        &self.config.basename
    }
}

impl<'a> ServiceBuilder<'a> {
    pub fn new(config: &'a EfkConfig, kibana: &'a KibanaConfig) -> Self {
        Self { config, kibana }
    }

    pub fn build(&self) -> Service {
        Service {
            metadata: ObjectMeta {
                name: Some(self.config.kibana_name()),
                namespace: Some(self.config.namespace.clone()),
                labels: Some(self.get_labels()),
                ..Default::default()
            },
            spec: Some(ServiceSpec {
                type_: Some(self.kibana.service_type.as_str().to_string()),
                ports: Some(vec![create_service_port(PORT_NAME_KIBANA, KIBANA_PORT)]),
                selector: Some(self.get_selector_labels()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

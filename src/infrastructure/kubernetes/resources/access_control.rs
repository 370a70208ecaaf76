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

//! Fluentd RBAC: ServiceAccount, ClusterRole and ClusterRoleBinding

use crate::domain::config::EfkConfig;
use crate::infrastructure::constants::{
    COMPONENT_FLUENTD, KIND_CLUSTER_ROLE, KIND_SERVICE_ACCOUNT, RBAC_API_GROUP,
};
use crate::infrastructure::kubernetes::resources::pod::ComponentBuilder;
use k8s_openapi::api::core::v1::ServiceAccount;
use k8s_openapi::api::rbac::v1::{ClusterRole, ClusterRoleBinding, PolicyRule, RoleRef, Subject};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

const FLUENTD_RULE_RESOURCES: &[&str] = &["pods", "namespaces"];
const FLUENTD_RULE_VERBS: &[&str] = &["get", "list", "watch"];

pub struct AccessControlBuilder<'a> {
    config: &'a EfkConfig,
}

impl ComponentBuilder for AccessControlBuilder<'_> {
    fn component_name(&self) -> &'static str {
        COMPONENT_FLUENTD
    }

    fn basename(&self) -> &str {
        &self.config.basename
    }
}

impl<'a> AccessControlBuilder<'a> {
    pub fn new(config: &'a EfkConfig) -> Self {
        Self { config }
    }

    pub fn build_service_account(&self) -> ServiceAccount {
        ServiceAccount {
            metadata: ObjectMeta {
                name: Some(self.config.authorization.service_account_name.clone()),
                namespace: Some(self.config.namespace.clone()),
                labels: Some(self.get_labels()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Cluster scoped, so no namespace.
    pub fn build_cluster_role(&self) -> ClusterRole {
        ClusterRole {
            metadata: ObjectMeta {
                name: Some(self.config.fluentd_name()),
                labels: Some(self.get_labels()),
                ..Default::default()
            },
            rules: Some(vec![PolicyRule {
                api_groups: Some(vec![String::new()]),
                resources: Some(to_strings(FLUENTD_RULE_RESOURCES)),
                verbs: to_strings(FLUENTD_RULE_VERBS),
                ..Default::default()
            }]),
            ..Default::default()
        }
    }

    pub fn build_cluster_role_binding(&self) -> ClusterRoleBinding {
        ClusterRoleBinding {
            metadata: ObjectMeta {
                name: Some(self.config.fluentd_name()),
                labels: Some(self.get_labels()),
                ..Default::default()
            },
            role_ref: RoleRef {
                api_group: RBAC_API_GROUP.to_string(),
                kind: KIND_CLUSTER_ROLE.to_string(),
                name: self.config.fluentd_name(),
            },
            subjects: Some(vec![Subject {
                kind: KIND_SERVICE_ACCOUNT.to_string(),
                name: self.config.authorization.service_account_name.clone(),
                namespace: Some(self.config.namespace.clone()),
                ..Default::default()
            }]),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

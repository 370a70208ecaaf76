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

use crate::domain::config::{EfkConfig, VolumeClaimConfig};
use crate::infrastructure::constants::COMPONENT_ELASTICSEARCH;
use crate::infrastructure::kubernetes::resources::pod::ComponentBuilder;
use k8s_openapi::api::core::v1::{
    PersistentVolumeClaim, PersistentVolumeClaimSpec, VolumeResourceRequirements,
};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::BTreeMap;

/// Claim backing the Elasticsearch data volume when no volume override is
/// given. Every replica mounts the same claim.
pub struct VolumeClaimBuilder<'a> {
    config: &'a EfkConfig,
    claim: &'a VolumeClaimConfig,
}

impl ComponentBuilder for VolumeClaimBuilder<'_> {
    fn component_name(&self) -> &'static str {
        COMPONENT_ELASTICSEARCH
    }

    fn basename(&self) -> &str {
        &self.config.basename
    }
}

impl<'a> VolumeClaimBuilder<'a> {
    pub fn new(config: &'a EfkConfig, claim: &'a VolumeClaimConfig) -> Self {
        Self { config, claim }
    }

    pub fn build(&self) -> PersistentVolumeClaim {
        let mut requests = BTreeMap::new();
        requests.insert("storage".to_string(), Quantity(self.claim.size.clone()));

        PersistentVolumeClaim {
            metadata: ObjectMeta {
                name: Some(self.claim.claim_name.clone()),
                namespace: Some(self.config.namespace.clone()),
                labels: Some(self.get_labels()),
                ..Default::default()
            },
            spec: Some(PersistentVolumeClaimSpec {
                access_modes: Some(vec![self.claim.access_mode.clone()]),
                storage_class_name: self.claim.storage_class.clone(),
                resources: Some(VolumeResourceRequirements {
                    requests: Some(requests),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

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

//! Assembles the EFK manifests for each build target.

use super::target::{parse_targets, BuildTarget};
use crate::domain::config::{DataVolume, EfkConfig, EfkOptions};
use crate::domain::option::{ContextLookup, GlobalOptions};
use crate::infrastructure::constants::*;
use crate::infrastructure::kubernetes::resources::{
    AccessControlBuilder, ElasticsearchBuilder, FluentdBuilder, HeadlessServiceBuilder,
    KibanaBuilder, ServiceBuilder, VolumeClaimBuilder,
};
use crate::infrastructure::kubernetes::KubeObject;
use crate::shared::error::Result;
use tracing::debug;

pub const BUILD_ACCESSCONTROL: BuildTarget = BuildTarget::AccessControl;
pub const BUILD_SERVICE: BuildTarget = BuildTarget::Service;

/// Builds EFK objects from resolved options. References in the options are
/// answered by `context` at build time.
pub struct EfkBuilder<C: ContextLookup = GlobalOptions> {
    options: EfkOptions,
    context: C,
}

impl<C: ContextLookup> EfkBuilder<C> {
    pub fn new(context: C, options: EfkOptions) -> Self {
        Self { options, context }
    }

    pub fn options(&self) -> &EfkOptions {
        &self.options
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn build_names(&self) -> Vec<BuildTarget> {
        BuildTarget::INDIVIDUAL.to_vec()
    }

    pub fn build_names_required(&self) -> Vec<BuildTarget> {
        BuildTarget::INDIVIDUAL.to_vec()
    }

    /// Declared targets not yet in `done`.
    pub fn remaining_build_names(&self, done: &[BuildTarget]) -> Vec<BuildTarget> {
        self.build_names()
            .into_iter()
            .filter(|target| !done.contains(target))
            .collect()
    }

    pub fn ensure_build_names(&self, names: &[&str]) -> Result<Vec<BuildTarget>> {
        parse_targets(names)
    }

    pub fn resolve_config(&self) -> Result<EfkConfig> {
        EfkConfig::resolve(&self.options, &self.context)
    }

    pub fn build_by_name(&self, name: &str) -> Result<Vec<KubeObject>> {
        self.build(name.parse()?)
    }

    /// Builds every object of `target`. Fails as a whole if any option cannot
    /// be resolved.
    pub fn build(&self, target: BuildTarget) -> Result<Vec<KubeObject>> {
        let config = self.resolve_config()?;

        let objects = match target {
            BuildTarget::AccessControl => self.build_access_control(&config)?,
            BuildTarget::Service => self.build_service(&config)?,
            BuildTarget::All => {
                let mut objects = self.build_access_control(&config)?;
                objects.extend(self.build_service(&config)?);
                objects
            }
        };

        for object in &objects {
            debug!(
                build_target = %target,
                kind = object.kind().unwrap_or_default(),
                name = object.metadata_name().unwrap_or_default(),
                "Built object"
            );
        }

        Ok(objects)
    }

    fn build_access_control(&self, config: &EfkConfig) -> Result<Vec<KubeObject>> {
        let mut objects = Vec::new();
        if config.fluentd.is_none() {
            return Ok(objects);
        }

        let auth = &config.authorization;
        let builder = AccessControlBuilder::new(config);

        if auth.create_service_account {
            objects.push(decorate(
                config,
                &builder.build_service_account(),
                OBJECT_SERVICE_ACCOUNT,
            )?);
        }
        if auth.create_role {
            objects.push(decorate(
                config,
                &builder.build_cluster_role(),
                OBJECT_CLUSTER_ROLE,
            )?);
        }
        if auth.bind_role {
            objects.push(decorate(
                config,
                &builder.build_cluster_role_binding(),
                OBJECT_CLUSTER_ROLE_BINDING,
            )?);
        }

        Ok(objects)
    }

    fn build_service(&self, config: &EfkConfig) -> Result<Vec<KubeObject>> {
        let mut objects = vec![decorate(
            config,
            &HeadlessServiceBuilder::new(config).build(),
            OBJECT_ELASTICSEARCH_SERVICE,
        )?];

        if let DataVolume::Claim(claim) = &config.elasticsearch.data_volume {
            objects.push(decorate(
                config,
                &VolumeClaimBuilder::new(config, claim).build(),
                OBJECT_ELASTICSEARCH_PVC,
            )?);
        }

        objects.push(decorate(
            config,
            &ElasticsearchBuilder::new(config).build(),
            OBJECT_ELASTICSEARCH_STATEFULSET,
        )?);

        if let Some(kibana) = &config.kibana {
            objects.push(decorate(
                config,
                &KibanaBuilder::new(config, kibana).build(),
                OBJECT_KIBANA_DEPLOYMENT,
            )?);
            objects.push(decorate(
                config,
                &ServiceBuilder::new(config, kibana).build(),
                OBJECT_KIBANA_SERVICE,
            )?);
        }

        if let Some(fluentd) = &config.fluentd {
            objects.push(decorate(
                config,
                &FluentdBuilder::new(config, fluentd).build(),
                OBJECT_FLUENTD_DAEMONSET,
            )?);
        }

        Ok(objects)
    }
}

fn decorate<T: serde::Serialize>(
    config: &EfkConfig,
    resource: &T,
    name: &str,
) -> Result<KubeObject> {
    KubeObject::from_resource(resource, name, SOURCE_NAME, config.basename.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::option::OptionValue;

    fn builder(user: OptionValue) -> EfkBuilder {
        EfkBuilder::new(
            GlobalOptions::new(OptionValue::empty_mapping()).unwrap(),
            EfkOptions::new(user).unwrap(),
        )
    }

    fn kinds(objects: &[KubeObject]) -> Vec<&str> {
        objects.iter().map(|o| o.kind().unwrap()).collect()
    }

    #[test]
    fn test_default_service_objects() {
        let objects = builder(OptionValue::empty_mapping())
            .build(BUILD_SERVICE)
            .unwrap();

        assert_eq!(
            kinds(&objects),
            vec![
                "Service",
                "PersistentVolumeClaim",
                "StatefulSet",
                "Deployment",
                "Service",
                "DaemonSet"
            ]
        );
        assert_eq!(objects[1].metadata_name(), Some("efk-elasticsearch-data"));
        assert_eq!(objects[1].name(), OBJECT_ELASTICSEARCH_PVC);
        assert!(objects.iter().all(|o| o.source() == SOURCE_NAME));
        assert!(objects.iter().all(|o| o.instance() == "efk"));
    }

    #[test]
    fn test_default_access_control_objects() {
        let objects = builder(OptionValue::empty_mapping())
            .build(BUILD_ACCESSCONTROL)
            .unwrap();

        assert_eq!(
            kinds(&objects),
            vec!["ServiceAccount", "ClusterRole", "ClusterRoleBinding"]
        );
        assert!(objects
            .iter()
            .all(|o| o.metadata_name() == Some("efk-fluentd")));
    }

    #[test]
    fn test_all_concatenates_in_order() {
        let builder = builder(OptionValue::empty_mapping());
        let mut expected = builder.build(BUILD_ACCESSCONTROL).unwrap();
        expected.extend(builder.build(BUILD_SERVICE).unwrap());

        assert_eq!(builder.build(BuildTarget::All).unwrap(), expected);
    }

    #[test]
    fn test_fluentd_disabled_drops_access_control() {
        let builder = builder(OptionValue::mapping([(
            "enable",
            OptionValue::mapping([("fluentd", OptionValue::Bool(false))]),
        )]));

        assert!(builder.build(BUILD_ACCESSCONTROL).unwrap().is_empty());
        assert!(!kinds(&builder.build(BUILD_SERVICE).unwrap()).contains(&"DaemonSet"));
    }

    #[test]
    fn test_remaining_build_names() {
        let builder = builder(OptionValue::empty_mapping());
        assert_eq!(
            builder.remaining_build_names(&[BUILD_ACCESSCONTROL]),
            vec![BUILD_SERVICE]
        );
        assert!(builder
            .remaining_build_names(&[BUILD_ACCESSCONTROL, BUILD_SERVICE])
            .is_empty());
    }

    #[test]
    fn test_build_by_name() {
        let builder = builder(OptionValue::empty_mapping());
        assert_eq!(builder.build_by_name("accesscontrol").unwrap().len(), 3);
        assert!(builder.build_by_name("bogus").is_err());
    }

    #[test]
    fn test_closure_context() {
        let builder = EfkBuilder::new(
            |path: &str| (path == "ns.logging").then(|| OptionValue::from("logging")),
            EfkOptions::new(OptionValue::mapping([(
                "namespace",
                OptionValue::root("ns.logging"),
            )]))
            .unwrap(),
        );

        let objects = builder.build(BUILD_SERVICE).unwrap();
        assert!(objects.iter().all(|o| o.namespace() == Some("logging")));
    }
}

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

//! Generic Kubernetes documents with provenance metadata

use crate::shared::error::Result;
use serde::{Serialize, Serializer};

/// A Kubernetes resource as a plain document, tagged with the logical name,
/// source stack and instance that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct KubeObject {
    name: String,
    source: String,
    instance: String,
    body: serde_json::Value,
}

impl KubeObject {
    pub fn new(
        body: serde_json::Value,
        name: impl Into<String>,
        source: impl Into<String>,
        instance: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            instance: instance.into(),
            body,
        }
    }

    pub fn from_resource<T: Serialize>(
        resource: &T,
        name: impl Into<String>,
        source: impl Into<String>,
        instance: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self::new(
            serde_json::to_value(resource)?,
            name,
            source,
            instance,
        ))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }

    pub fn body(&self) -> &serde_json::Value {
        &self.body
    }

    pub fn into_body(self) -> serde_json::Value {
        self.body
    }

    pub fn api_version(&self) -> Option<&str> {
        self.body.get("apiVersion").and_then(|v| v.as_str())
    }

    pub fn kind(&self) -> Option<&str> {
        self.body.get("kind").and_then(|v| v.as_str())
    }

    pub fn metadata_name(&self) -> Option<&str> {
        self.body.pointer("/metadata/name").and_then(|v| v.as_str())
    }

    pub fn namespace(&self) -> Option<&str> {
        self.body
            .pointer("/metadata/namespace")
            .and_then(|v| v.as_str())
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.body)?)
    }
}

impl Serialize for KubeObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.body.serialize(serializer)
    }
}

/// Joins objects into one multi-document YAML stream.
pub fn to_yaml_documents(objects: &[KubeObject]) -> Result<String> {
    let mut output = String::new();
    for object in objects {
        output.push_str("---\n");
        output.push_str(&object.to_yaml()?);
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::ServiceAccount;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    fn service_account() -> KubeObject {
        let sa = ServiceAccount {
            metadata: ObjectMeta {
                name: Some("efk-fluentd".to_string()),
                namespace: Some("logging".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        KubeObject::from_resource(&sa, "service-account", "efk", "efk").unwrap()
    }

    #[test]
    fn test_from_resource_keeps_type_meta() {
        let object = service_account();
        assert_eq!(object.api_version(), Some("v1"));
        assert_eq!(object.kind(), Some("ServiceAccount"));
        assert_eq!(object.metadata_name(), Some("efk-fluentd"));
        assert_eq!(object.namespace(), Some("logging"));
        assert_eq!(object.name(), "service-account");
        assert_eq!(object.source(), "efk");
        assert_eq!(object.instance(), "efk");
    }

    #[test]
    fn test_yaml_documents() {
        let objects = vec![service_account(), service_account()];
        let yaml = to_yaml_documents(&objects).unwrap();
        assert_eq!(yaml.matches("---\n").count(), 2);
        assert!(yaml.contains("kind: ServiceAccount"));
    }
}

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

//! Renders the EFK stack on ephemeral storage next to an http-echo service
//! whose request logs Fluentd ships to Elasticsearch.

use efk_kube::{
    to_yaml_documents, EfkBuilder, EfkOptions, GlobalOptions, KubeObject, OptionValue,
    BUILD_ACCESSCONTROL, BUILD_SERVICE,
};
use serde_json::json;

fn http_echo() -> Vec<KubeObject> {
    let deployment = json!({
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "metadata": { "name": "echo-deployment", "labels": { "app": "echo" } },
        "spec": {
            "replicas": 1,
            "selector": { "matchLabels": { "app": "echo" } },
            "template": {
                "metadata": { "labels": { "app": "echo" } },
                "spec": {
                    "containers": [{
                        "name": "echo",
                        "image": "mendhak/http-https-echo",
                        "ports": [{ "containerPort": 80 }, { "containerPort": 443 }],
                    }],
                },
            },
        },
    });
    let service = json!({
        "apiVersion": "v1",
        "kind": "Service",
        "metadata": { "name": "echo-service" },
        "spec": {
            "selector": { "app": "echo" },
            "ports": [{ "name": "http", "port": 80, "targetPort": 80, "protocol": "TCP" }],
        },
    });

    vec![
        KubeObject::new(deployment, "echo-deployment", "app", "echo"),
        KubeObject::new(service, "echo-service", "app", "echo"),
    ]
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let efk = EfkBuilder::new(
        GlobalOptions::new(OptionValue::empty_mapping())?,
        EfkOptions::new(OptionValue::mapping([(
            "kubernetes",
            OptionValue::mapping([(
                "volumes",
                OptionValue::mapping([(
                    "elasticsearch-data",
                    OptionValue::mapping([("emptyDir", OptionValue::empty_mapping())]),
                )]),
            )]),
        )]))?,
    );
    efk.ensure_build_names(&[BUILD_ACCESSCONTROL.as_str(), BUILD_SERVICE.as_str()])?;

    for (file, objects) in [
        ("efk-config.yaml", efk.build(BUILD_ACCESSCONTROL)?),
        ("efk.yaml", efk.build(BUILD_SERVICE)?),
        ("http-echo.yaml", http_echo()),
    ] {
        println!(
            "****** BEGIN FILE: {} ********\n{}",
            file,
            to_yaml_documents(&objects)?
        );
    }

    Ok(())
}

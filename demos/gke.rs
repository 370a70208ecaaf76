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

//! Renders a GKE project: the monitoring namespace, then the EFK stack in it.

use efk_kube::{
    to_yaml_documents, EfkBuilder, EfkOptions, GlobalOptions, KubeObject, OptionValue,
    BUILD_ACCESSCONTROL, BUILD_SERVICE,
};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let globals = GlobalOptions::new(OptionValue::mapping([(
        "namespaces",
        OptionValue::mapping([("mon", OptionValue::from("app-monitoring"))]),
    )]))?;

    let namespace = KubeObject::new(
        json!({
            "apiVersion": "v1",
            "kind": "Namespace",
            "metadata": { "name": "app-monitoring" },
        }),
        "ns-monitoring",
        "app",
        "app",
    );

    let options = EfkOptions::new(OptionValue::mapping([
        ("namespace", OptionValue::root("namespaces.mon")),
        ("basename", OptionValue::from("myefk")),
        (
            "kubernetes",
            OptionValue::mapping([(
                "volumes",
                OptionValue::mapping([(
                    "elasticsearch-data",
                    OptionValue::mapping([(
                        "persistentVolumeClaim",
                        OptionValue::mapping([("claimName", OptionValue::from("efk-storage-claim"))]),
                    )]),
                )]),
            )]),
        ),
    ]))?;

    let efk = EfkBuilder::new(globals, options);
    efk.ensure_build_names(&[BUILD_ACCESSCONTROL.as_str(), BUILD_SERVICE.as_str()])?;

    let files = vec![
        ("app-namespace.yaml", to_yaml_documents(&[namespace])?),
        ("efk-config.yaml", to_yaml_documents(&efk.build(BUILD_ACCESSCONTROL)?)?),
        ("efk.yaml", to_yaml_documents(&efk.build(BUILD_SERVICE)?)?),
    ];

    for (file, content) in &files {
        println!("****** BEGIN FILE: {} ********\n{}", file, content);
    }

    Ok(())
}

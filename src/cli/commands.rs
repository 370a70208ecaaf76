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

// CLI command definitions

use super::efk::{PlanCommand, RenderCommand, TargetsCommand};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "efk-kube",
    version,
    about = "Kubernetes manifest builder for an EFK logging stack",
    long_about = "Builds Elasticsearch, Fluentd and Kibana manifests from layered options files and command-line overrides"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Render manifests for the given build targets as YAML
    Render(RenderCommand),

    /// Show the objects each build target would produce
    Plan(PlanCommand),

    /// List the declared build targets
    Targets(TargetsCommand),
}

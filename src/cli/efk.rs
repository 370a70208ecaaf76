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

//! EFK manifest commands

use crate::cli::display::{PlanRow, TableRenderer};
use crate::domain::config::{apply_properties, apply_references, load_options_file, EfkOptions};
use crate::domain::option::{GlobalOptions, OptionValue};
use crate::domain::stack::{BuildTarget, EfkBuilder};
use crate::infrastructure::kubernetes::{to_yaml_documents, KubeObject};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Options shared by every command that builds objects
#[derive(Parser, Debug, Clone)]
pub struct StackArgs {
    /// EFK options file (YAML, or TOML when the extension is .toml)
    /// YAML files may defer values to the global options with `!root <path>`
    #[arg(long, short = 'f', value_name = "PATH")]
    pub options: Option<PathBuf>,

    /// Global options file answering `!root` references
    #[arg(long, value_name = "PATH")]
    pub global: Option<PathBuf>,

    /// Override an EFK option
    /// Values are parsed as YAML; `null` removes the key
    ///
    /// Example: -Dbasename=myefk -Dconfig.elasticsearch.replicas=3
    #[arg(short = 'D', long = "set", value_name = "KEY=VALUE")]
    pub properties: Vec<String>,

    /// Defer an EFK option to a global option path
    ///
    /// Example: --ref namespace=namespaces.mon
    #[arg(long = "ref", value_name = "KEY=PATH")]
    pub references: Vec<String>,

    /// Override a global option
    ///
    /// Example: -Gnamespaces.mon=app-monitoring
    #[arg(short = 'G', long = "global-set", value_name = "KEY=VALUE")]
    pub global_properties: Vec<String>,

    /// Build targets (accesscontrol, service, all); defaults to every declared target
    pub targets: Vec<String>,
}

impl StackArgs {
    pub fn load_builder(&self) -> anyhow::Result<EfkBuilder> {
        let mut global = read_options(self.global.as_ref())?;
        apply_properties(&self.global_properties, &mut global)
            .context("Failed to apply global overrides")?;

        let mut user = read_options(self.options.as_ref())?;
        apply_properties(&self.properties, &mut user).context("Failed to apply --set overrides")?;
        apply_references(&self.references, &mut user).context("Failed to apply --ref overrides")?;

        let context = GlobalOptions::new(global).context("Invalid global options")?;
        let options = EfkOptions::new(user).context("Invalid EFK options")?;
        Ok(EfkBuilder::new(context, options))
    }

    /// Validates every requested name before anything is built.
    pub fn resolve_targets(&self, builder: &EfkBuilder) -> anyhow::Result<Vec<BuildTarget>> {
        if self.targets.is_empty() {
            return Ok(builder.build_names());
        }
        let names: Vec<&str> = self.targets.iter().map(String::as_str).collect();
        Ok(builder.ensure_build_names(&names)?)
    }

    pub fn build(&self) -> anyhow::Result<(EfkBuilder, Vec<(BuildTarget, Vec<KubeObject>)>)> {
        let builder = self.load_builder()?;
        let targets = self.resolve_targets(&builder)?;

        let mut built = Vec::with_capacity(targets.len());
        for target in targets {
            let objects = builder
                .build(target)
                .with_context(|| format!("Failed to build target '{}'", target))?;
            info!(build_target = %target, objects = objects.len(), "Built target");
            built.push((target, objects));
        }
        Ok((builder, built))
    }
}

fn read_options(path: Option<&PathBuf>) -> anyhow::Result<OptionValue> {
    match path {
        Some(path) => Ok(load_options_file(path)?),
        None => Ok(OptionValue::empty_mapping()),
    }
}

#[derive(Parser, Debug, Clone)]
pub struct RenderCommand {
    #[command(flatten)]
    pub stack: StackArgs,
}

impl RenderCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let (_, built) = self.stack.build()?;
        let objects: Vec<KubeObject> = built
            .into_iter()
            .flat_map(|(_, objects)| objects)
            .collect();

        print!("{}", to_yaml_documents(&objects)?);
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct PlanCommand {
    #[command(flatten)]
    pub stack: StackArgs,
}

impl PlanCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let (builder, built) = self.stack.build()?;
        let config = builder.resolve_config()?;

        let rows: Vec<PlanRow> = built
            .iter()
            .flat_map(|(target, objects)| {
                objects
                    .iter()
                    .map(move |object| PlanRow::from_object(*target, object))
            })
            .collect();

        println!(
            "{}",
            TableRenderer::new().render_plan(&config.basename, &rows)
        );
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct TargetsCommand {
    #[command(flatten)]
    pub stack: StackArgs,
}

impl TargetsCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let builder = self.stack.load_builder()?;
        let required = builder.build_names_required();

        for target in builder.build_names() {
            let marker = if required.contains(&target) {
                "required"
            } else {
                "optional"
            };
            println!("{}\t{}", target, marker);
        }
        Ok(())
    }
}

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

use super::ColorTheme;
use crate::domain::stack::BuildTarget;
use crate::infrastructure::kubernetes::KubeObject;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};

/// One object in a build plan.
#[derive(Debug, Clone)]
pub struct PlanRow {
    pub target: BuildTarget,
    pub kind: String,
    pub name: String,
    pub namespace: Option<String>,
    pub object: String,
}

impl PlanRow {
    pub fn from_object(target: BuildTarget, object: &KubeObject) -> Self {
        Self {
            target,
            kind: object.kind().unwrap_or_default().to_string(),
            name: object.metadata_name().unwrap_or_default().to_string(),
            namespace: object.namespace().map(str::to_string),
            object: object.name().to_string(),
        }
    }
}

pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    /// Render a build plan as a formatted table
    pub fn render_plan(&self, instance: &str, rows: &[PlanRow]) -> String {
        if rows.is_empty() {
            return format!("No objects to build for '{}'", instance);
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("TARGET").set_alignment(CellAlignment::Left),
                Cell::new("KIND").set_alignment(CellAlignment::Left),
                Cell::new("NAME").set_alignment(CellAlignment::Left),
                Cell::new("NAMESPACE").set_alignment(CellAlignment::Left),
                Cell::new("OBJECT").set_alignment(CellAlignment::Left),
            ]);

        for row in rows {
            // Cluster-scoped objects have no namespace.
            let namespace = match &row.namespace {
                Some(ns) => Cell::new(ns),
                None => Cell::new("-").fg(self.theme.muted),
            };

            table.add_row(vec![
                Cell::new(row.target.as_str()),
                Cell::new(&row.kind).fg(self.theme.get_kind_color(&row.kind)),
                Cell::new(&row.name),
                namespace,
                Cell::new(&row.object).fg(self.theme.muted),
            ]);
        }

        let mut output = String::new();
        output.push_str(&format!(
            "╭─ EFK plan: {} {} ─╮\n",
            instance.bold(),
            format!("[{} objects]", rows.len()).bright_black()
        ));
        output.push_str(&table.to_string());
        output.push('\n');
        output
    }
}

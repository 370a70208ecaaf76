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

use comfy_table::Color as TableColor;

#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub workload: TableColor,
    pub network: TableColor,
    pub storage: TableColor,
    pub access: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            workload: TableColor::Green,
            network: TableColor::Cyan,
            storage: TableColor::Yellow,
            access: TableColor::Magenta,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    /// Get color based on object kind
    pub fn get_kind_color(&self, kind: &str) -> TableColor {
        match kind {
            "StatefulSet" | "Deployment" | "DaemonSet" => self.workload,
            "Service" => self.network,
            "PersistentVolumeClaim" => self.storage,
            "ServiceAccount" | "ClusterRole" | "ClusterRoleBinding" => self.access,
            _ => self.muted,
        }
    }
}

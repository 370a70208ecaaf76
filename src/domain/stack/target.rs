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

use crate::shared::error::{EfkError, Result};
use std::fmt;
use std::str::FromStr;

/// A named group of manifests the builder can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildTarget {
    /// Fluentd ServiceAccount and cluster RBAC.
    AccessControl,
    /// Elasticsearch, Kibana and Fluentd workloads with their services.
    Service,
    /// Every individual target, in declared order.
    All,
}

impl BuildTarget {
    /// Individual targets in the order a deployment applies them.
    pub const INDIVIDUAL: [BuildTarget; 2] = [BuildTarget::AccessControl, BuildTarget::Service];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildTarget::AccessControl => "accesscontrol",
            BuildTarget::Service => "service",
            BuildTarget::All => "all",
        }
    }

    pub fn expand(&self) -> Vec<BuildTarget> {
        match self {
            BuildTarget::All => Self::INDIVIDUAL.to_vec(),
            target => vec![*target],
        }
    }
}

impl FromStr for BuildTarget {
    type Err = EfkError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "accesscontrol" => Ok(BuildTarget::AccessControl),
            "service" => Ok(BuildTarget::Service),
            "all" => Ok(BuildTarget::All),
            _ => Err(EfkError::UnknownTarget(s.to_string())),
        }
    }
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn parse_targets(names: &[&str]) -> Result<Vec<BuildTarget>> {
    names.iter().map(|name| name.parse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target() {
        assert_eq!(
            "accesscontrol".parse::<BuildTarget>().unwrap(),
            BuildTarget::AccessControl
        );
        assert_eq!("SERVICE".parse::<BuildTarget>().unwrap(), BuildTarget::Service);
        assert_eq!("all".parse::<BuildTarget>().unwrap(), BuildTarget::All);
        assert!(matches!(
            "bogus".parse::<BuildTarget>(),
            Err(EfkError::UnknownTarget(name)) if name == "bogus"
        ));
    }

    #[test]
    fn test_expand_all() {
        assert_eq!(
            BuildTarget::All.expand(),
            vec![BuildTarget::AccessControl, BuildTarget::Service]
        );
        assert_eq!(BuildTarget::Service.expand(), vec![BuildTarget::Service]);
    }

    #[test]
    fn test_parse_targets_rejects_any_unknown() {
        assert!(parse_targets(&["service", "bogus"]).is_err());
        assert_eq!(parse_targets(&["service"]).unwrap(), vec![BuildTarget::Service]);
    }
}

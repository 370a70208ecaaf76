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

//! Project-wide configuration lookups used to resolve `!root` references.

use crate::domain::option::resolver::Options;
use crate::domain::option::schema::{OptionType, Schema, SchemaEntry};
use crate::domain::option::value::OptionValue;
use crate::shared::error::Result;

pub const GLOBAL_NAMESPACE_DEFAULT: &str = "namespaces.default";
pub const GLOBAL_NAMESPACE_MON: &str = "namespaces.mon";

pub trait ContextLookup {
    fn lookup(&self, path: &str) -> Option<OptionValue>;
}

impl<F> ContextLookup for F
where
    F: Fn(&str) -> Option<OptionValue>,
{
    fn lookup(&self, path: &str) -> Option<OptionValue> {
        self(path)
    }
}

pub fn global_schema() -> Result<Schema> {
    Schema::new(vec![
        SchemaEntry::new(GLOBAL_NAMESPACE_DEFAULT, OptionType::String).with_default("default"),
        SchemaEntry::new(GLOBAL_NAMESPACE_MON, OptionType::String).with_default("monitoring"),
    ])
}

/// Options shared by every stack of a project, such as the namespace registry.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalOptions {
    options: Options,
}

impl GlobalOptions {
    pub fn new(user: OptionValue) -> Result<Self> {
        let options = Options::construct(&global_schema()?, user)?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }
}

impl ContextLookup for GlobalOptions {
    fn lookup(&self, path: &str) -> Option<OptionValue> {
        self.options.get(path).ok().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_defaults() {
        let globals = GlobalOptions::new(OptionValue::empty_mapping()).unwrap();
        assert_eq!(
            globals.lookup(GLOBAL_NAMESPACE_MON),
            Some(OptionValue::from("monitoring"))
        );
        assert_eq!(
            globals.lookup(GLOBAL_NAMESPACE_DEFAULT),
            Some(OptionValue::from("default"))
        );
        assert!(globals.lookup("namespaces.unknown").is_none());
    }

    #[test]
    fn test_global_overrides() {
        let globals = GlobalOptions::new(OptionValue::mapping([(
            "namespaces",
            OptionValue::mapping([
                ("mon", OptionValue::from("app-monitoring")),
                ("apps", OptionValue::from("app-default")),
            ]),
        )]))
        .unwrap();

        assert_eq!(
            globals.lookup("namespaces.mon"),
            Some(OptionValue::from("app-monitoring"))
        );
        assert_eq!(
            globals.lookup("namespaces.apps"),
            Some(OptionValue::from("app-default"))
        );
    }

    #[test]
    fn test_closure_lookup() {
        let lookup = |path: &str| (path == "a.b").then(|| OptionValue::from(1));
        assert_eq!(lookup.lookup("a.b"), Some(OptionValue::Integer(1)));
        assert_eq!(lookup.lookup("a.c"), None);
    }
}

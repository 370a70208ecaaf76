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

use crate::domain::option::context::ContextLookup;
use crate::domain::option::schema::Schema;
use crate::domain::option::value::{OptionMap, OptionValue};
use crate::shared::error::{EfkError, Result};

/// Resolved options: schema defaults with the user's values merged on top.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    values: OptionValue,
}

impl Options {
    pub fn construct(schema: &Schema, user: OptionValue) -> Result<Self> {
        let user = match user {
            OptionValue::Null => OptionValue::empty_mapping(),
            OptionValue::Mapping(_) => user,
            other => {
                return Err(EfkError::option_type("<root>", "mapping", other.type_name()));
            }
        };

        let mut values = schema.defaults().clone();
        values.merge(user);

        for entry in schema.entries() {
            check_ancestors(&values, &entry.path)?;
            match values.lookup(&entry.path) {
                Some(value) if !entry.option_type.accepts(value) => {
                    return Err(EfkError::option_type(
                        &entry.path,
                        entry.option_type.as_str(),
                        value.type_name(),
                    ));
                }
                Some(_) => {}
                None if entry.required => return Err(EfkError::missing(&entry.path)),
                None => {}
            }
        }

        Ok(Self { values })
    }

    pub fn values(&self) -> &OptionValue {
        &self.values
    }

    pub fn contains(&self, path: &str) -> bool {
        self.values.lookup(path).is_some()
    }

    /// Returns the stored value; references come back unresolved.
    pub fn get(&self, path: &str) -> Result<&OptionValue> {
        self.values
            .lookup(path)
            .ok_or_else(|| EfkError::missing(path))
    }

    pub fn get_or(&self, path: &str, default: OptionValue) -> OptionValue {
        self.values.lookup(path).cloned().unwrap_or(default)
    }

    /// Like [`Options::get`], but resolves a stored reference through `lookup`.
    pub fn get_value<C>(&self, lookup: &C, path: &str) -> Result<OptionValue>
    where
        C: ContextLookup + ?Sized,
    {
        let value = self.get(path)?;
        Self::resolve(lookup, path, value)
    }

    /// Resolved value at `path`, or `None` when the path is absent.
    pub fn get_value_opt<C>(&self, lookup: &C, path: &str) -> Result<Option<OptionValue>>
    where
        C: ContextLookup + ?Sized,
    {
        match self.values.lookup(path) {
            Some(value) => Self::resolve(lookup, path, value).map(Some),
            None => Ok(None),
        }
    }

    fn resolve<C>(lookup: &C, path: &str, value: &OptionValue) -> Result<OptionValue>
    where
        C: ContextLookup + ?Sized,
    {
        match value {
            OptionValue::Reference(reference) => lookup
                .lookup(reference.path())
                .ok_or_else(|| EfkError::unresolved(path, reference.path())),
            literal => Ok(literal.clone()),
        }
    }

    pub fn get_str<C>(&self, lookup: &C, path: &str) -> Result<String>
    where
        C: ContextLookup + ?Sized,
    {
        match self.get_value(lookup, path)? {
            OptionValue::String(s) => Ok(s),
            other => Err(EfkError::option_type(path, "string", other.type_name())),
        }
    }

    pub fn get_str_opt<C>(&self, lookup: &C, path: &str) -> Result<Option<String>>
    where
        C: ContextLookup + ?Sized,
    {
        match self.get_value_opt(lookup, path)? {
            Some(OptionValue::String(s)) => Ok(Some(s)),
            Some(other) => Err(EfkError::option_type(path, "string", other.type_name())),
            None => Ok(None),
        }
    }

    pub fn get_bool<C>(&self, lookup: &C, path: &str) -> Result<bool>
    where
        C: ContextLookup + ?Sized,
    {
        match self.get_value(lookup, path)? {
            OptionValue::Bool(b) => Ok(b),
            other => Err(EfkError::option_type(path, "bool", other.type_name())),
        }
    }

    pub fn get_i64<C>(&self, lookup: &C, path: &str) -> Result<i64>
    where
        C: ContextLookup + ?Sized,
    {
        match self.get_value(lookup, path)? {
            OptionValue::Integer(i) => Ok(i),
            other => Err(EfkError::option_type(path, "integer", other.type_name())),
        }
    }

    pub fn get_mapping<C>(&self, lookup: &C, path: &str) -> Result<OptionMap>
    where
        C: ContextLookup + ?Sized,
    {
        match self.get_value(lookup, path)? {
            OptionValue::Mapping(m) => Ok(m),
            other => Err(EfkError::option_type(path, "mapping", other.type_name())),
        }
    }
}

/// A user scalar in place of a schema parent would hide every path below it.
fn check_ancestors(values: &OptionValue, path: &str) -> Result<()> {
    let mut ancestor = String::new();
    let segments: Vec<&str> = path.split('.').collect();
    for segment in &segments[..segments.len().saturating_sub(1)] {
        if !ancestor.is_empty() {
            ancestor.push('.');
        }
        ancestor.push_str(segment);

        match values.lookup(&ancestor) {
            None => return Ok(()),
            Some(OptionValue::Mapping(_)) => {}
            Some(OptionValue::Reference(_)) => return Ok(()),
            Some(other) => {
                return Err(EfkError::option_type(
                    &ancestor,
                    "mapping",
                    other.type_name(),
                ))
            }
        }
    }
    Ok(())
}

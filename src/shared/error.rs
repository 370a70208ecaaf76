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

use thiserror::Error;
pub type Result<T> = std::result::Result<T, EfkError>;

#[derive(Error, Debug)]
pub enum EfkError {
    #[error("Schema error at '{path}': {reason}")]
    Schema { path: String, reason: String },

    #[error("Missing option: '{0}'")]
    MissingOption(String),

    #[error("Option '{path}' has wrong type: expected {expected}, found {found}")]
    OptionType {
        path: String,
        expected: String,
        found: String,
    },

    #[error("Option '{path}' references '{reference}', which the context cannot resolve")]
    UnresolvedReference { path: String, reference: String },

    #[error("Unknown build target: '{0}'")]
    UnknownTarget(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl EfkError {
    pub fn config_error(context: impl Into<String>) -> Self {
        Self::ConfigError(context.into())
    }

    pub fn schema(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Schema {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn missing(path: impl Into<String>) -> Self {
        Self::MissingOption(path.into())
    }

    pub fn option_type(
        path: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::OptionType {
            path: path.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn unresolved(path: impl Into<String>, reference: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            path: path.into(),
            reference: reference.into(),
        }
    }

    /// True for errors raised while resolving or reading options.
    pub fn is_option_error(&self) -> bool {
        matches!(
            self,
            Self::MissingOption(_) | Self::OptionType { .. } | Self::UnresolvedReference { .. }
        )
    }
}

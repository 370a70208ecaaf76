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

//! Typed Kubernetes resource builders for the EFK stack

pub mod access_control;
pub mod daemonset;
pub mod deployment;
pub mod headless_service;
pub mod pod;
pub mod service;
pub mod statefulset;
pub mod volume_claim;

pub use self::access_control::AccessControlBuilder;
pub use self::daemonset::FluentdBuilder;
pub use self::deployment::KibanaBuilder;
pub use self::headless_service::HeadlessServiceBuilder;
pub use self::service::ServiceBuilder;
pub use self::statefulset::ElasticsearchBuilder;
pub use self::volume_claim::VolumeClaimBuilder;

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

/// Provenance source stamped on every generated object
pub const SOURCE_NAME: &str = "efk";

/// Network configuration
pub const POD_CLUSTER_DOMAIN: &str = "cluster.local";

/// Elasticsearch ports
pub const ELASTICSEARCH_REST_PORT: i32 = 9200;
pub const ELASTICSEARCH_INTER_NODE_PORT: i32 = 9300;

/// Upper bound on Elasticsearch nodes; each one is listed in discovery env
pub const MAX_ELASTICSEARCH_REPLICAS: i32 = 100;

/// Kibana ports
pub const KIBANA_PORT: i32 = 5601;

/// Readiness probe configuration
pub const READINESS_INITIAL_DELAY: i32 = 20;
pub const READINESS_PERIOD: i32 = 10;
pub const READINESS_TIMEOUT: i32 = 5;
pub const ELASTICSEARCH_HEALTH_PATH: &str = "/_cluster/health?local=true";
pub const KIBANA_STATUS_PATH: &str = "/api/status";

/// Default storage settings
pub const DEFAULT_STORAGE_SIZE: &str = "10Gi";
pub const DEFAULT_ACCESS_MODE: &str = "ReadWriteOnce";

/// Elasticsearch node tuning applied by init containers
pub const ELASTICSEARCH_UID_GID: &str = "1000:1000";
pub const VM_MAX_MAP_COUNT: u32 = 262144;
pub const FD_ULIMIT: u32 = 65536;

/// Resource labels
pub const LABEL_APP: &str = "app";
pub const LABEL_COMPONENT: &str = "component";
pub const LABEL_TYPE: &str = "type";
pub const LABEL_TYPE_VALUE: &str = "efk-logging";

/// Components
pub const COMPONENT_ELASTICSEARCH: &str = "elasticsearch";
pub const COMPONENT_KIBANA: &str = "kibana";
pub const COMPONENT_FLUENTD: &str = "fluentd";

/// Container names
pub const CONTAINER_NAME_ELASTICSEARCH: &str = "elasticsearch";
pub const CONTAINER_NAME_KIBANA: &str = "kibana";
pub const CONTAINER_NAME_FLUENTD: &str = "fluentd";
pub const INIT_CONTAINER_FIX_PERMISSIONS: &str = "fix-permissions";
pub const INIT_CONTAINER_VM_MAX_MAP: &str = "increase-vm-max-map";
pub const INIT_CONTAINER_FD_ULIMIT: &str = "increase-fd-ulimit";

/// Restart policy
pub const RESTART_POLICY_ALWAYS: &str = "Always";

/// Object name suffixes, appended to the basename
pub const SUFFIX_ELASTICSEARCH: &str = "-elasticsearch";
pub const SUFFIX_ELASTICSEARCH_DATA: &str = "-elasticsearch-data";
pub const SUFFIX_KIBANA: &str = "-kibana";
pub const SUFFIX_FLUENTD: &str = "-fluentd";

/// Logical object names used for provenance
pub const OBJECT_SERVICE_ACCOUNT: &str = "service-account";
pub const OBJECT_CLUSTER_ROLE: &str = "cluster-role";
pub const OBJECT_CLUSTER_ROLE_BINDING: &str = "cluster-role-binding";
pub const OBJECT_ELASTICSEARCH_SERVICE: &str = "elasticsearch-service";
pub const OBJECT_ELASTICSEARCH_PVC: &str = "elasticsearch-pvc";
pub const OBJECT_ELASTICSEARCH_STATEFULSET: &str = "elasticsearch-statefulset";
pub const OBJECT_KIBANA_DEPLOYMENT: &str = "kibana-deployment";
pub const OBJECT_KIBANA_SERVICE: &str = "kibana-service";
pub const OBJECT_FLUENTD_DAEMONSET: &str = "fluentd-daemonset";

/// Volume and VolumeMount names
pub const VOLUME_NAME_ELASTICSEARCH_DATA: &str = "elasticsearch-data";
pub const VOLUME_NAME_VARLOG: &str = "varlog";
pub const VOLUME_NAME_DOCKER_CONTAINERS: &str = "varlibdockercontainers";

/// Mount paths
pub const ELASTICSEARCH_DATA_PATH: &str = "/usr/share/elasticsearch/data";
pub const HOST_PATH_VARLOG: &str = "/var/log";
pub const HOST_PATH_DOCKER_CONTAINERS: &str = "/var/lib/docker/containers";

/// RBAC
pub const RBAC_API_GROUP: &str = "rbac.authorization.k8s.io";
pub const KIND_CLUSTER_ROLE: &str = "ClusterRole";
pub const KIND_SERVICE_ACCOUNT: &str = "ServiceAccount";

/// Fluentd scheduling
pub const TAINT_MASTER: &str = "node-role.kubernetes.io/master";
pub const TAINT_CONTROL_PLANE: &str = "node-role.kubernetes.io/control-plane";
pub const TAINT_EFFECT_NO_SCHEDULE: &str = "NoSchedule";
pub const FLUENTD_TERMINATION_GRACE_PERIOD: i64 = 30;

/// Port names
pub const PORT_NAME_REST: &str = "rest";
pub const PORT_NAME_INTER_NODE: &str = "inter-node";
pub const PORT_NAME_KIBANA: &str = "http";

//! Unit tests for MysqlCluster spec defaulting
//!
//! Tests `ClusterSpec::update_defaults()` and the option-derived getters.

#[cfg(test)]
mod cluster_spec_defaulting {
    use std::collections::BTreeMap;

    use k8s_openapi::api::core::v1::{ResourceRequirements, VolumeResourceRequirements};
    use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

    use crate::crd::{ClusterSpec, MysqlCluster, VolumeSpec, INNODB_BUFFER_POOL_SIZE};
    use crate::options::Options;

    fn test_options() -> Options {
        Options {
            mysql_image: "percona".to_string(),
            mysql_image_tag: "5.7.21".to_string(),
            image_pull_policy: "IfNotPresent".to_string(),
            orchestrator_uri: "http://orchestrator:3000/api".to_string(),
            orchestrator_topology_secret_name: "orc-topology".to_string(),
            ..Options::default()
        }
    }

    fn requests(pairs: &[(&str, &str)]) -> ResourceRequirements {
        ResourceRequirements {
            requests: Some(
                pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), Quantity(v.to_string())))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    fn request<'a>(spec: &'a ClusterSpec, name: &str) -> Option<&'a str> {
        spec.pod_spec
            .resources
            .requests
            .as_ref()
            .and_then(|r| r.get(name))
            .map(|q| q.0.as_str())
    }

    #[test]
    fn test_empty_spec_gets_every_default() {
        let opt = test_options();
        let mut spec = ClusterSpec::default();
        spec.update_defaults(&opt).unwrap();

        assert_eq!(spec.mysql_version, "5.7.21");
        assert_eq!(spec.pod_spec.image_pull_policy, "IfNotPresent");
        assert_eq!(request(&spec, "cpu"), Some("200m"));
        assert_eq!(request(&spec, "memory"), Some("1Gi"));
        assert_eq!(spec.volume_spec.access_modes, vec!["ReadWriteOnce"]);
        assert_eq!(
            spec.volume_spec.resources.requests.as_ref().unwrap()["storage"],
            Quantity("8Gi".to_string())
        );
        assert!(spec.mysql_conf.contains_key(INNODB_BUFFER_POOL_SIZE));
    }

    #[test]
    fn test_buffer_pool_is_eighty_percent_truncated() {
        let mut spec = ClusterSpec::default();
        spec.update_defaults(&test_options()).unwrap();

        let expected = (80i64 * 1_073_741_824) / 100;
        assert_eq!(expected, 858_993_459);
        assert_eq!(
            spec.mysql_conf[INNODB_BUFFER_POOL_SIZE],
            expected.to_string()
        );
    }

    #[test]
    fn test_buffer_pool_uses_declared_memory() {
        let mut spec = ClusterSpec::default();
        spec.pod_spec.resources = requests(&[("memory", "1G")]);
        spec.update_defaults(&test_options()).unwrap();

        assert_eq!(spec.mysql_conf[INNODB_BUFFER_POOL_SIZE], "800M");
    }

    #[test]
    fn test_explicit_buffer_pool_is_kept() {
        let mut spec = ClusterSpec::default();
        spec.mysql_conf
            .insert(INNODB_BUFFER_POOL_SIZE.to_string(), "2G".to_string());
        spec.mysql_conf
            .insert("max-connections".to_string(), "500".to_string());
        spec.update_defaults(&test_options()).unwrap();

        assert_eq!(spec.mysql_conf[INNODB_BUFFER_POOL_SIZE], "2G");
        assert_eq!(spec.mysql_conf.len(), 2);
    }

    #[test]
    fn test_any_request_suppresses_request_defaults() {
        let mut spec = ClusterSpec::default();
        spec.pod_spec.resources = requests(&[("cpu", "1")]);
        spec.update_defaults(&test_options()).unwrap();

        assert_eq!(request(&spec, "cpu"), Some("1"));
        assert_eq!(request(&spec, "memory"), None);
        // No memory request, so no buffer pool size can be derived.
        assert!(!spec.mysql_conf.contains_key(INNODB_BUFFER_POOL_SIZE));
    }

    #[test]
    fn test_limits_only_still_get_request_defaults() {
        let mut spec = ClusterSpec::default();
        spec.pod_spec.resources = ResourceRequirements {
            limits: Some(BTreeMap::from([(
                "memory".to_string(),
                Quantity("4Gi".to_string()),
            )])),
            requests: Some(BTreeMap::new()),
            ..Default::default()
        };
        spec.update_defaults(&test_options()).unwrap();

        assert_eq!(request(&spec, "cpu"), Some("200m"));
        assert_eq!(request(&spec, "memory"), Some("1Gi"));
        assert!(spec.pod_spec.resources.limits.is_none());
    }

    #[test]
    fn test_unparseable_memory_is_validation_error() {
        let mut spec = ClusterSpec::default();
        spec.pod_spec.resources = requests(&[("memory", "lots")]);
        let err = spec.update_defaults(&test_options()).unwrap_err();

        assert!(matches!(err, crate::Error::ValidationError(_)));
    }

    #[test]
    fn test_rejected_spec_is_left_untouched() {
        let mut spec = ClusterSpec::default();
        spec.pod_spec.resources = requests(&[("memory", "lots")]);
        let before = spec.clone();

        assert!(spec.update_defaults(&test_options()).is_err());
        assert_eq!(spec, before);
        assert!(spec.mysql_version.is_empty());
        assert!(spec.pod_spec.image_pull_policy.is_empty());
        assert!(spec.volume_spec.access_modes.is_empty());
    }

    #[test]
    fn test_defaulting_is_idempotent() {
        let opt = test_options();
        let mut once = ClusterSpec::default();
        once.update_defaults(&opt).unwrap();

        let mut twice = once.clone();
        twice.update_defaults(&opt).unwrap();
        assert_eq!(once, twice);

        let mut partial = ClusterSpec {
            mysql_version: "8.0".to_string(),
            ..Default::default()
        };
        partial.pod_spec.resources = requests(&[("memory", "2Gi"), ("cpu", "500m")]);
        partial.update_defaults(&opt).unwrap();
        let snapshot = partial.clone();
        partial.update_defaults(&opt).unwrap();
        assert_eq!(partial, snapshot);
    }

    #[test]
    fn test_existing_version_and_pull_policy_are_kept() {
        let mut spec = ClusterSpec {
            mysql_version: "8.0.33".to_string(),
            ..Default::default()
        };
        spec.pod_spec.image_pull_policy = "Always".to_string();
        spec.update_defaults(&test_options()).unwrap();

        assert_eq!(spec.mysql_version, "8.0.33");
        assert_eq!(spec.pod_spec.image_pull_policy, "Always");
    }

    #[test]
    fn test_empty_volume_spec_defaults() {
        let mut volume = VolumeSpec::default();
        volume.update_defaults().unwrap();

        assert_eq!(volume.access_modes.len(), 1);
        assert_eq!(volume.access_modes[0], "ReadWriteOnce");
        let storage = volume.resources.requests.as_ref().unwrap();
        assert_eq!(storage.len(), 1);
        assert_eq!(storage["storage"], Quantity("8Gi".to_string()));
    }

    #[test]
    fn test_declared_volume_is_kept() {
        let mut volume = VolumeSpec {
            access_modes: vec!["ReadWriteMany".to_string()],
            resources: VolumeResourceRequirements {
                requests: Some(BTreeMap::from([(
                    "storage".to_string(),
                    Quantity("100Gi".to_string()),
                )])),
                ..Default::default()
            },
        };
        volume.update_defaults().unwrap();

        assert_eq!(volume.access_modes, vec!["ReadWriteMany"]);
        assert_eq!(
            volume.resources.requests.as_ref().unwrap()["storage"],
            Quantity("100Gi".to_string())
        );
    }

    #[test]
    fn test_cluster_update_defaults_delegates_to_spec() {
        let mut cluster = MysqlCluster::new("blog", ClusterSpec::default());
        cluster.update_defaults(&test_options()).unwrap();

        assert_eq!(cluster.spec.mysql_version, "5.7.21");
        assert_eq!(cluster.spec.mysql_image(&test_options()), "percona:5.7.21");
    }

    #[test]
    fn test_orchestrator_settings_prefer_cluster_values() {
        let opt = test_options();
        let mut spec = ClusterSpec::default();
        assert_eq!(spec.orchestrator_uri(&opt), "http://orchestrator:3000/api");
        assert_eq!(spec.orchestrator_topology_secret(&opt), "orc-topology");

        spec.orchestrator_uri = Some(String::new());
        assert_eq!(spec.orchestrator_uri(&opt), "http://orchestrator:3000/api");

        spec.orchestrator_uri = Some("http://orc.blog:3000".to_string());
        spec.orchestrator_topology_secret_name = Some("blog-orc".to_string());
        assert_eq!(spec.orchestrator_uri(&opt), "http://orc.blog:3000");
        assert_eq!(spec.orchestrator_topology_secret(&opt), "blog-orc");
        assert_eq!(
            spec.metrics_exporter_image(&opt),
            opt.metrics_exporter_image
        );
        assert_eq!(spec.titanium_image(&opt), opt.titanium_image);
    }
}

#[cfg(test)]
mod mysql_cluster_resource {
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use kube::CustomResourceExt;

    use crate::crd::{ClusterSpec, ClusterStatus, MysqlCluster};

    #[test]
    fn test_owner_reference_points_at_cluster() {
        let cluster = MysqlCluster {
            metadata: ObjectMeta {
                name: Some("blog".to_string()),
                namespace: Some("default".to_string()),
                uid: Some("1234-abcd".to_string()),
                ..Default::default()
            },
            spec: ClusterSpec::default(),
            status: None,
        };
        let owner = cluster.as_owner_reference();

        assert_eq!(owner.api_version, "titanium.presslabs.net/v1alpha1");
        assert_eq!(owner.kind, "MysqlCluster");
        assert_eq!(owner.name, "blog");
        assert_eq!(owner.uid, "1234-abcd");
        assert_eq!(owner.controller, Some(true));
    }

    #[test]
    fn test_ready_nodes_defaults_to_zero() {
        let mut cluster = MysqlCluster::new("blog", ClusterSpec::default());
        assert_eq!(cluster.ready_nodes(), 0);

        cluster.status = Some(ClusterStatus { ready_nodes: 3 });
        assert_eq!(cluster.ready_nodes(), 3);
    }

    #[test]
    fn test_spec_deserializes_with_defaults() {
        let spec: ClusterSpec = serde_json::from_value(serde_json::json!({
            "mysqlConf": { "max-connections": "100" },
            "podSpec": { "resources": { "requests": { "memory": "2Gi" } } }
        }))
        .unwrap();

        assert_eq!(spec.replicas, 1);
        assert!(spec.mysql_version.is_empty());
        assert_eq!(spec.mysql_conf["max-connections"], "100");
        assert!(spec.orchestrator_uri.is_none());
        assert_eq!(spec.pod_spec.memory_request().unwrap(), Some(2_147_483_648));
    }

    #[test]
    fn test_crd_metadata() {
        let crd = MysqlCluster::crd();
        assert_eq!(
            crd.metadata.name.as_deref(),
            Some("mysqlclusters.titanium.presslabs.net")
        );
        assert_eq!(crd.spec.names.kind, "MysqlCluster");
        assert_eq!(
            crd.spec.names.short_names,
            Some(vec!["mysql".to_string()])
        );
    }
}

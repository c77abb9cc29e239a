//! End-to-end tests for topology resolution against an HTTP orchestrator
//!
//! A wiremock server stands in for orchestrator so the real HTTP client,
//! response decoding and fallback mapping are exercised together.

#[cfg(test)]
mod tests {
    use titanium::crd::{ClusterSpec, ClusterStatus, MysqlCluster};
    use titanium::{instance_hostname, Options, TopologyResolver};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn instance(host: &str, lag: Option<i64>) -> serde_json::Value {
        serde_json::json!({
            "Key": {"Hostname": host, "Port": 3306},
            "SecondsBehindMaster": {"Int64": lag.unwrap_or(0), "Valid": lag.is_some()}
        })
    }

    #[tokio::test]
    async fn test_resolves_master_and_replica_over_http() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/master/shop"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(instance("shop-mysql-1.shop-mysql", None)),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/cluster-osc-slaves/shop"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                instance("shop-mysql-0.shop-mysql", Some(10)),
                instance("shop-mysql-2.shop-mysql", Some(3)),
                instance("shop-mysql-3.shop-mysql", None),
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let resolver = TopologyResolver::new();
        let uri = server.uri();

        assert_eq!(
            resolver.resolve_master("shop", &uri).await,
            "shop-mysql-1.shop-mysql"
        );
        assert_eq!(
            resolver.resolve_healthy_replica("shop", &uri, 4).await,
            "shop-mysql-2.shop-mysql"
        );
    }

    #[tokio::test]
    async fn test_orchestrator_errors_fall_back_to_structure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "Code": "ERROR",
                "Message": "Unable to determine cluster name"
            })))
            .mount(&server)
            .await;

        let resolver = TopologyResolver::new();
        let uri = format!("{}/api", server.uri());

        assert_eq!(
            resolver.resolve_master("shop", &uri).await,
            instance_hostname("shop", 0)
        );
        assert_eq!(
            resolver.resolve_healthy_replica("shop", &uri, 3).await,
            instance_hostname("shop", 2)
        );
    }

    #[tokio::test]
    async fn test_unreachable_orchestrator_falls_back() {
        // Nothing listens on the discard port.
        let uri = "http://127.0.0.1:9";
        let resolver = TopologyResolver::new();

        assert_eq!(
            resolver.resolve_master("shop", uri).await,
            "shop-mysql-0.shop-mysql"
        );
        assert_eq!(
            resolver.resolve_healthy_replica("shop", uri, 1).await,
            "shop-mysql-0.shop-mysql"
        );
    }

    #[tokio::test]
    async fn test_defaulted_cluster_routes_through_options() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/master/blog"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(instance("blog-mysql-0.blog-mysql", None)),
            )
            .mount(&server)
            .await;

        let opt = Options {
            orchestrator_uri: server.uri(),
            ..Options::default()
        };
        let mut cluster = MysqlCluster::new("blog", ClusterSpec::default());
        cluster.status = Some(ClusterStatus { ready_nodes: 2 });
        cluster.update_defaults(&opt).unwrap();

        assert_eq!(
            cluster.spec.mysql_image(&opt),
            format!("{}:{}", opt.mysql_image, opt.mysql_image_tag)
        );
        assert_eq!(
            cluster.master_host(&TopologyResolver::new(), &opt).await,
            "blog-mysql-0.blog-mysql"
        );
        // No replicas endpoint is mocked, so wiremock answers 404.
        assert_eq!(
            cluster
                .healthy_replica_host(&TopologyResolver::new(), &opt)
                .await,
            "blog-mysql-1.blog-mysql"
        );
    }
}

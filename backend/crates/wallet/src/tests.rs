//! Scenario tests for the wallet crate
//! Upstream API calls run against a wiremock server.

#[cfg(test)]
mod support {
    use std::sync::Arc;

    use auth::{AuthConfig, CookieCredentialStore, CredentialStore, UserProfile};
    use wiremock::MockServer;

    use crate::application::config::ApiConfig;
    use crate::infra::http_client::DashboardApi;

    pub fn store(signed_in: bool) -> Arc<CookieCredentialStore> {
        let store = CookieCredentialStore::in_memory(&AuthConfig::default());
        if signed_in {
            let user: UserProfile = serde_json::from_value(serde_json::json!({
                "id": "u-1",
                "email": "ops@example.com"
            }))
            .unwrap();
            store.save("tok-1", &user).unwrap();
        }
        Arc::new(store)
    }

    pub fn api(
        server: &MockServer,
        store: Arc<CookieCredentialStore>,
    ) -> DashboardApi<CookieCredentialStore> {
        DashboardApi::new(
            Arc::new(ApiConfig::default().with_base_url(server.uri())),
            store,
        )
    }
}

#[cfg(test)]
mod api_tests {
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path, query_param},
    };

    use super::support::{api, store};
    use crate::domain::value_object::params::{AnalyticsPeriod, EvacuationFilter, WalletListParams};
    use query::QueryError;

    #[tokio::test]
    async fn test_wallets_sends_bearer_and_paging() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wallets"))
            .and(header("authorization", "Bearer tok-1"))
            .and(query_param("page", "2"))
            .and(query_param("page_size", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": 1, "balance": "12.00", "status": "active"}],
                "page": 2,
                "pageSize": 10,
                "total": 11
            })))
            .mount(&server)
            .await;

        let params = WalletListParams {
            page: 2,
            page_size: 10,
            ..Default::default()
        };
        let page = api(&server, store(true)).wallets(&params).await.unwrap();

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.total, 11);
        assert!(!page.has_next());
    }

    #[tokio::test]
    async fn test_missing_token_skips_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let result = api(&server, store(false)).wallet_summary().await;

        assert_eq!(result, Err(QueryError::MissingToken));
    }

    #[tokio::test]
    async fn test_rejected_token_is_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wallets/summary"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "Token expired"})),
            )
            .mount(&server)
            .await;

        let result = api(&server, store(true)).wallet_summary().await;

        assert_eq!(result, Err(QueryError::Unauthorized("Token expired".into())));
    }

    #[tokio::test]
    async fn test_server_error_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wallets/analytics"))
            .and(query_param("period", "7d"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = api(&server, store(true))
            .analytics(&AnalyticsPeriod::Week)
            .await
            .unwrap_err();

        assert!(matches!(err, QueryError::Api { status: 502, .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_history_accepts_bare_and_wrapped_lists() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/funds/history"))
            .and(query_param("transferred_from", "w-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"total_amount_moved": "100.00", "total_accounts_processed": 10, "total_failures": 2}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/funds/history"))
            .and(query_param("transferred_from", "w-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"total_amount_moved": 50}, {"total_amount_moved": "25.5"}]
            })))
            .mount(&server)
            .await;

        let client = api(&server, store(true));
        let bare = client
            .evacuation_history(&EvacuationFilter {
                transferred_from: Some("w-1".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        let wrapped = client
            .evacuation_history(&EvacuationFilter {
                transferred_from: Some("w-2".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(bare.len(), 1);
        assert_eq!(bare[0].total_accounts_processed, 10);
        assert_eq!(wrapped.len(), 2);
        assert_eq!(wrapped[1].total_amount_moved, 25.5);
    }

    #[tokio::test]
    async fn test_undecodable_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wallets"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = api(&server, store(true))
            .wallets(&WalletListParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, QueryError::Decode(_)));
    }
}

#[cfg(test)]
mod queries_tests {
    use std::sync::Arc;

    use query::QueryClient;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    use super::support::{api, store};
    use crate::application::queries::DashboardQueries;
    use crate::domain::value_object::params::{EvacuationFilter, WalletListParams};

    #[tokio::test]
    async fn test_repeat_reads_are_served_from_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wallets/summary"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalWallets": 3,
                "activeWallets": 2,
                "totalBalance": "75.00"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let queries = DashboardQueries::new(api(&server, store(true)), QueryClient::new());
        let first = queries.wallet_summary().await.unwrap();
        let second = queries.wallet_summary().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.total_wallets, 3);
    }

    #[tokio::test]
    async fn test_refresh_forces_refetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wallets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(2)
            .mount(&server)
            .await;

        let queries = DashboardQueries::new(api(&server, store(true)), QueryClient::new());
        let params = WalletListParams::default();
        queries.wallets(&params).await.unwrap();

        assert_eq!(queries.refresh(), 1);
        assert_eq!(queries.refresh(), 0);
        queries.wallets(&params).await.unwrap();
    }

    #[tokio::test]
    async fn test_evacuation_analytics_folds_cached_history() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/funds/history"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"total_amount_moved": "100.00", "total_accounts_processed": 10, "total_failures": 2},
                {"total_amount_moved": "50.00", "total_accounts_processed": 5, "total_failures": 0}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let queries = Arc::new(DashboardQueries::new(
            api(&server, store(true)),
            QueryClient::new(),
        ));
        let filter = EvacuationFilter::default();

        let analytics = queries.evacuation_analytics(&filter).await.unwrap();
        let records = queries.evacuation_history(&filter).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(analytics.total_accounts_processed, 15);
        assert!((analytics.success_rate - 86.67).abs() < 0.01);
        assert!((analytics.average_amount_per_evacuation - 75.0).abs() < 0.01);
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use query::QueryClient;
    use serde_json::json;
    use tower::ServiceExt;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    use super::support::{api, store};
    use crate::application::queries::DashboardQueries;
    use crate::presentation::router::dashboard_router;

    async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or_default())
    }

    #[tokio::test]
    async fn test_wallets_route_includes_totals() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wallets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {"id": 1, "balance": "30.00", "status": "active"},
                    {"id": 2, "balance": "10.00", "status": "closed"}
                ],
                "total": 2
            })))
            .mount(&server)
            .await;

        let queries = DashboardQueries::new(api(&server, store(true)), QueryClient::new());
        let app = dashboard_router(Arc::new(queries));

        let (status, body) = get(app, "/dashboard/wallets?page=1&page_size=20").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totals"]["walletCount"], 2);
        assert_eq!(body["totals"]["activeWallets"], 1);
        assert_eq!(body["totals"]["averageBalance"], 20.0);
        assert_eq!(body["totalPages"], 1);
        assert_eq!(body["hasNext"], false);
    }

    #[tokio::test]
    async fn test_refresh_route_evicts_cached_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wallets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(2)
            .mount(&server)
            .await;

        let queries = DashboardQueries::new(api(&server, store(true)), QueryClient::new());
        let app = dashboard_router(Arc::new(queries));

        get(app.clone(), "/dashboard/wallets").await;
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/dashboard/refresh")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["evicted"], 1);

        let (status, _) = get(app, "/dashboard/wallets").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_token_maps_to_unauthorized() {
        let server = MockServer::start().await;
        let queries = DashboardQueries::new(api(&server, store(false)), QueryClient::new());
        let app = dashboard_router(Arc::new(queries));

        let (status, _) = get(app, "/dashboard").await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_evacuations_route_reports_analytics() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/funds/history"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let queries = DashboardQueries::new(api(&server, store(true)), QueryClient::new());
        let app = dashboard_router(Arc::new(queries));

        let (status, body) = get(app, "/dashboard/evacuations?from=2024-01-01").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["records"], json!([]));
        assert_eq!(body["analytics"]["successRate"], 0.0);
        assert_eq!(body["analytics"]["evacuationCount"], 0);
    }
}

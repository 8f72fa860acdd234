//! API server — router construction and HTTP/metrics bootstrap.

use crate::rest::AppState;
use crate::{engagement_rest, pricing_rest, rest, swagger};
use axum::routing::get;
use axum::Router;
use lobby_core::config::AppConfig;
use lobby_store::{PlatformStore, SessionStore};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the application router. Split out of [`ApiServer`] so tests can
/// drive it without binding a socket.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Creator-facing reports
        .route(
            "/v1/campaigns/:campaign_ref/engagement",
            get(engagement_rest::handle_engagement),
        )
        .route(
            "/v1/campaigns/:campaign_ref/pricing",
            get(pricing_rest::handle_pricing),
        )
        // Operational endpoints
        .route("/health", get(rest::health_check))
        .route("/ready", get(rest::readiness))
        .route("/live", get(rest::liveness))
        .route("/api-docs/openapi.json", get(swagger::openapi_json))
        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Main API server.
pub struct ApiServer {
    config: AppConfig,
    store: Arc<PlatformStore>,
    sessions: Arc<SessionStore>,
}

impl ApiServer {
    pub fn new(config: AppConfig, store: Arc<PlatformStore>, sessions: Arc<SessionStore>) -> Self {
        Self {
            config,
            store,
            sessions,
        }
    }

    /// Start the HTTP server. Blocks until shutdown.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let state = AppState {
            store: self.store.clone(),
            sessions: self.sessions.clone(),
            instance_id: self.config.instance_id.clone(),
            start_time: Instant::now(),
        };

        let app = build_router(state);

        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);

        info!(addr = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Start the Prometheus exporter on the metrics port.
    pub async fn start_metrics(&self) -> anyhow::Result<()> {
        let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
        let handle = builder
            .with_http_listener(SocketAddr::new(
                self.config.api.host.parse()?,
                self.config.metrics.port,
            ))
            .install_recorder()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");

        // Keep the handle alive
        std::mem::forget(handle);
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{Duration, Utc};
    use lobby_core::types::{
        ActivityType, Campaign, CampaignStatus, PriceIntensity, PricingResponse, UserAccount,
    };
    use tower::ServiceExt;
    use uuid::Uuid;

    struct Fixture {
        app: Router,
        creator_token: String,
        stranger_token: String,
        slug: String,
        empty_slug: String,
    }

    fn user(store: &PlatformStore, name: &str) -> UserAccount {
        let account = UserAccount {
            id: Uuid::new_v4(),
            display_name: name.to_string(),
            handle: Some(format!("@{}", name.to_lowercase())),
            avatar: None,
            email: format!("{}@example.com", name.to_lowercase()),
            created_at: Utc::now(),
        };
        store.upsert_user(account.clone());
        account
    }

    fn fixture() -> Fixture {
        let store = Arc::new(PlatformStore::new());
        let sessions = Arc::new(SessionStore::new());

        let creator = user(&store, "Maya");
        let stranger = user(&store, "Zed");
        let supporter = user(&store, "Ren");

        let campaign = Campaign {
            id: Uuid::new_v4(),
            slug: "solar-kettle".to_string(),
            title: "Solar Camping Kettle".to_string(),
            creator_id: creator.id,
            status: CampaignStatus::Active,
            signal_score: 72.5,
            created_at: Utc::now(),
        };
        store.create_campaign(campaign.clone()).unwrap();

        let quiet = Campaign {
            id: Uuid::new_v4(),
            slug: "quiet-campaign".to_string(),
            title: "Quiet Campaign".to_string(),
            creator_id: creator.id,
            status: CampaignStatus::Active,
            signal_score: 0.0,
            created_at: Utc::now(),
        };
        store.create_campaign(quiet.clone()).unwrap();

        for kind in [ActivityType::Lobby, ActivityType::Pledge, ActivityType::Comment] {
            store
                .record_activity(campaign.id, supporter.id, kind, Utc::now())
                .unwrap();
        }
        store
            .record_pricing_response(PricingResponse {
                id: Uuid::new_v4(),
                campaign_id: campaign.id,
                user_id: supporter.id,
                price: 29.0,
                intensity: PriceIntensity::ProbablyBuy,
                submitted_at: Utc::now(),
            })
            .unwrap();

        let creator_token = sessions.issue(creator.id, Duration::hours(1));
        let stranger_token = sessions.issue(stranger.id, Duration::hours(1));

        let state = AppState {
            store,
            sessions,
            instance_id: "test".to_string(),
            start_time: Instant::now(),
        };

        Fixture {
            app: build_router(state),
            creator_token,
            stranger_token,
            slug: campaign.slug,
            empty_slug: quiet.slug,
        }
    }

    async fn get_json(
        app: Router,
        uri: &str,
        token: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let response = app
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_engagement_requires_authentication() {
        let f = fixture();
        let uri = format!("/v1/campaigns/{}/engagement", f.slug);
        let (status, body) = get_json(f.app, &uri, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
        assert!(!body["error"].as_str().unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_engagement_rejects_non_owner() {
        let f = fixture();
        let uri = format!("/v1/campaigns/{}/engagement", f.slug);
        let (status, body) = get_json(f.app, &uri, Some(&f.stranger_token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_engagement_unknown_campaign() {
        let f = fixture();
        let (status, body) =
            get_json(f.app, "/v1/campaigns/no-such-thing/engagement", Some(&f.creator_token)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_engagement_report_for_owner() {
        let f = fixture();
        let uri = format!("/v1/campaigns/{}/engagement", f.slug);
        let (status, body) = get_json(f.app, &uri, Some(&f.creator_token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let data = &body["data"];
        assert_eq!(data["totalSupporters"], 1);
        assert_eq!(data["topSupporters"].as_array().unwrap().len(), 1);
        assert_eq!(data["topSupporters"][0]["handle"], "@ren");
        assert!(data["distribution"]["highEngagement"].is_object());
        assert!(data["averageEngagementScore"].is_number());
        assert!(data["platformAverageScore"].is_number());
    }

    #[tokio::test]
    async fn test_pricing_report_for_owner() {
        let f = fixture();
        let uri = format!("/v1/campaigns/{}/pricing", f.slug);
        let (status, body) = get_json(f.app, &uri, Some(&f.creator_token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["totalResponses"], 1);
        assert_eq!(body["data"]["intensityBreakdown"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_pricing_empty_state() {
        let f = fixture();
        let uri = format!("/v1/campaigns/{}/pricing", f.empty_slug);
        let (status, body) = get_json(f.app, &uri, Some(&f.creator_token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["totalResponses"], 0);
        assert!(body["data"]["optimalPrice"].is_null());
    }

    #[tokio::test]
    async fn test_health_probe() {
        let f = fixture();
        let (status, body) = get_json(f.app, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }
}

//! OpenAPI specification for the ProductLobby REST API.

use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ProductLobby API",
        version = "0.1.0",
        description = "Backend for ProductLobby, the platform connecting consumers who want products to exist with the brands that might make them.\n\nServes creator-facing supporter engagement and willingness-to-pay reports.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Engagement", description = "Supporter engagement scoring"),
        (name = "Pricing", description = "Willingness-to-pay analysis"),
        (name = "Operations", description = "Health, readiness, and liveness probes"),
    ),
    paths(
        // Reports
        crate::engagement_rest::handle_engagement,
        crate::pricing_rest::handle_pricing,
        // Operations
        crate::rest::health_check,
        crate::rest::readiness,
        crate::rest::liveness,
    ),
    components(schemas(
        // Engagement types
        lobby_engagement::EngagementReport,
        lobby_engagement::EngagementDistribution,
        lobby_engagement::EngagementTier,
        lobby_engagement::TopSupporter,
        // Pricing types
        lobby_pricing::PricingAnalysis,
        lobby_pricing::analysis::PriceBracket,
        lobby_pricing::analysis::SuggestedPrices,
        lobby_pricing::analysis::IntensityGroup,
        lobby_pricing::curve::DemandPoint,
        lobby_pricing::curve::OptimalPrice,
        lobby_core::types::PriceIntensity,
        // REST error/health types
        crate::rest::ErrorBody,
        crate::rest::HealthResponse,
    ))
)]
pub struct ApiDoc;

/// GET /api-docs/openapi.json — the generated OpenAPI document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

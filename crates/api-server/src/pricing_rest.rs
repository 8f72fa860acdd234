//! Willingness-to-pay pricing REST endpoint.

use crate::auth;
use crate::rest::{ApiEnvelope, ApiError, AppState};
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use lobby_pricing::{analyze, PricingAnalysis};

/// GET /v1/campaigns/{campaign_ref}/pricing — Pricing analysis for one
/// campaign, creator-only. Zero responses return an explicit empty
/// analysis with `totalResponses: 0`, not an error.
#[utoipa::path(
    get,
    path = "/v1/campaigns/{campaign_ref}/pricing",
    tag = "Pricing",
    params(
        ("campaign_ref" = String, Path, description = "Campaign UUID or slug"),
    ),
    responses(
        (status = 200, description = "Pricing analysis", body = PricingAnalysis),
        (status = 401, description = "Not authenticated", body = crate::rest::ErrorBody),
        (status = 403, description = "Caller is not the campaign creator", body = crate::rest::ErrorBody),
        (status = 404, description = "Unknown campaign", body = crate::rest::ErrorBody),
    )
)]
pub async fn handle_pricing(
    State(state): State<AppState>,
    Path(campaign_ref): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ApiEnvelope<PricingAnalysis>>, ApiError> {
    let campaign = auth::authorize_campaign(&state, &headers, &campaign_ref)?;

    let responses = state.store.pricing_responses(&campaign.id);
    let analysis = analyze(&responses);

    metrics::counter!("api.pricing_reports").increment(1);
    Ok(ApiEnvelope::ok(analysis))
}

//! Supporter engagement REST endpoint.

use crate::auth;
use crate::rest::{ApiEnvelope, ApiError, AppState};
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use lobby_engagement::{build_report, EngagementReport};

/// GET /v1/campaigns/{campaign_ref}/engagement — Supporter engagement
/// report for one campaign, creator-only.
#[utoipa::path(
    get,
    path = "/v1/campaigns/{campaign_ref}/engagement",
    tag = "Engagement",
    params(
        ("campaign_ref" = String, Path, description = "Campaign UUID or slug"),
    ),
    responses(
        (status = 200, description = "Engagement report", body = EngagementReport),
        (status = 401, description = "Not authenticated", body = crate::rest::ErrorBody),
        (status = 403, description = "Caller is not the campaign creator", body = crate::rest::ErrorBody),
        (status = 404, description = "Unknown campaign", body = crate::rest::ErrorBody),
    )
)]
pub async fn handle_engagement(
    State(state): State<AppState>,
    Path(campaign_ref): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ApiEnvelope<EngagementReport>>, ApiError> {
    let campaign = auth::authorize_campaign(&state, &headers, &campaign_ref)?;

    let records = state.store.campaign_activity(&campaign.id);
    let report = build_report(
        &records,
        state.store.platform_activity_count(),
        state.store.user_count(),
    );

    metrics::counter!("api.engagement_reports").increment(1);
    Ok(ApiEnvelope::ok(report))
}

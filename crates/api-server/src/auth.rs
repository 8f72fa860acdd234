//! Bearer-token authentication and campaign ownership checks.

use crate::rest::{ApiError, AppState};
use axum::http::{header, HeaderMap};
use lobby_core::types::Campaign;
use uuid::Uuid;

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Resolve the caller's session. Missing, malformed, expired, or unknown
/// tokens are all a 401.
pub fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Uuid, ApiError> {
    let token = bearer_token(headers).ok_or(ApiError::Unauthorized)?;
    state.sessions.resolve(token).ok_or(ApiError::Unauthorized)
}

/// Full guard chain for creator-only campaign resources:
/// 401 (unauthenticated) before 404 (unknown campaign) before 403
/// (authenticated non-owner). Non-owners get a rejection, never partial
/// data.
pub fn authorize_campaign(
    state: &AppState,
    headers: &HeaderMap,
    campaign_ref: &str,
) -> Result<Campaign, ApiError> {
    let caller = authenticate(state, headers)?;
    let campaign = state
        .store
        .campaign_by_ref(campaign_ref)
        .ok_or_else(|| ApiError::NotFound(format!("campaign '{campaign_ref}'")))?;
    if campaign.creator_id != caller {
        return Err(ApiError::Forbidden);
    }
    Ok(campaign)
}

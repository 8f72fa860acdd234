//! Engagement report assembly — top supporters, campaign average, and the
//! platform-wide baseline.

use crate::aggregate::aggregate;
use crate::distribution::{bucketize, EngagementDistribution};
use crate::score::{round1, score_all, ScoredSupporter};
use chrono::{DateTime, Utc};
use lobby_core::types::CampaignActivity;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// How many supporters the report surfaces.
pub const TOP_SUPPORTER_LIMIT: usize = 5;

/// Public-safe projection of one scored supporter.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopSupporter {
    pub id: Uuid,
    pub name: String,
    /// Supporters without a handle surface as "anonymous".
    pub handle: String,
    pub avatar: Option<String>,
    pub engagement_score: f64,
    pub last_active: Option<DateTime<Utc>>,
    pub activity_types: Vec<String>,
}

/// The engagement endpoint's response body.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EngagementReport {
    pub distribution: EngagementDistribution,
    pub top_supporters: Vec<TopSupporter>,
    pub average_engagement_score: f64,
    pub platform_average_score: f64,
    pub total_supporters: u64,
}

/// Project the first `min(5, n)` entries of the sorted, scored list.
pub fn top_supporters(scored: &[ScoredSupporter]) -> Vec<TopSupporter> {
    scored
        .iter()
        .take(TOP_SUPPORTER_LIMIT)
        .map(|s| TopSupporter {
            id: s.supporter.user_id,
            name: s.supporter.display_name.clone(),
            handle: s
                .supporter
                .handle
                .clone()
                .unwrap_or_else(|| "anonymous".to_string()),
            avatar: s.supporter.avatar.clone(),
            engagement_score: s.engagement_score,
            last_active: s.supporter.last_activity,
            activity_types: s
                .supporter
                .active_types()
                .iter()
                .map(|t| t.display_name().to_string())
                .collect(),
        })
        .collect()
}

/// Platform-wide baseline: all activity across all campaigns divided by
/// registered users, scaled onto the same 0-10-ish range as individual
/// scores. Zero users yield 0 rather than a division error. Recomputed in
/// full on every request.
pub fn platform_average_score(total_activity: u64, total_users: u64) -> f64 {
    if total_users == 0 {
        return 0.0;
    }
    round1(total_activity as f64 / total_users as f64 / 10.0)
}

/// Run the whole pipeline over one campaign's activity records.
pub fn build_report(
    records: &[CampaignActivity],
    platform_activity: u64,
    platform_users: u64,
) -> EngagementReport {
    let scored = score_all(aggregate(records));
    let distribution = bucketize(&scored);
    let total_supporters = scored.len() as u64;

    let average_engagement_score = if scored.is_empty() {
        0.0
    } else {
        round1(scored.iter().map(|s| s.engagement_score).sum::<f64>() / scored.len() as f64)
    };

    EngagementReport {
        top_supporters: top_supporters(&scored),
        distribution,
        average_engagement_score,
        platform_average_score: platform_average_score(platform_activity, platform_users),
        total_supporters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lobby_core::types::ActivityType;

    fn record(user_id: Uuid, handle: Option<&str>, activity: ActivityType) -> CampaignActivity {
        CampaignActivity {
            user_id,
            display_name: "Ren Ito".to_string(),
            handle: handle.map(|h| h.to_string()),
            avatar: None,
            activity,
            campaign_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
        }
    }

    fn many_supporters(n: usize) -> Vec<CampaignActivity> {
        (0..n)
            .flat_map(|i| {
                let user = Uuid::new_v4();
                // Vary depth so scores differ.
                ActivityType::ALL
                    .iter()
                    .take(1 + i % ActivityType::ALL.len())
                    .map(move |t| record(user, Some("@ren"), *t))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    #[test]
    fn test_empty_campaign_report() {
        let report = build_report(&[], 0, 0);
        assert_eq!(report.total_supporters, 0);
        assert!(report.top_supporters.is_empty());
        assert_eq!(report.average_engagement_score, 0.0);
        assert_eq!(report.platform_average_score, 0.0);
        assert_eq!(report.distribution.total_supporters, 0);
    }

    #[test]
    fn test_top_supporters_capped_at_five_and_sorted() {
        let records = many_supporters(8);
        let report = build_report(&records, 100, 10);
        assert_eq!(report.total_supporters, 8);
        assert_eq!(report.top_supporters.len(), 5);
        for pair in report.top_supporters.windows(2) {
            assert!(pair[0].engagement_score >= pair[1].engagement_score);
        }
    }

    #[test]
    fn test_top_supporters_below_limit() {
        let records = many_supporters(3);
        let report = build_report(&records, 10, 10);
        assert_eq!(report.top_supporters.len(), 3);
    }

    #[test]
    fn test_missing_handle_defaults_to_anonymous() {
        let user = Uuid::new_v4();
        let records = vec![record(user, None, ActivityType::Lobby)];
        let report = build_report(&records, 1, 1);
        assert_eq!(report.top_supporters[0].handle, "anonymous");
        assert_eq!(report.top_supporters[0].activity_types, vec!["Lobby"]);
    }

    #[test]
    fn test_platform_average_zero_users() {
        assert_eq!(platform_average_score(500, 0), 0.0);
    }

    #[test]
    fn test_platform_average_scaling() {
        // 300 activities over 10 users -> 30 per user -> 3.0 on the scale.
        assert_eq!(platform_average_score(300, 10), 3.0);
    }
}

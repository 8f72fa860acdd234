//! Engagement tier distribution.

use crate::score::ScoredSupporter;
use serde::Serialize;
use utoipa::ToSchema;

/// Scores at or above this are "high engagement".
pub const HIGH_THRESHOLD: f64 = 6.0;
/// Scores at or above this (and below high) are "moderate engagement".
pub const MODERATE_THRESHOLD: f64 = 3.0;

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EngagementTier {
    pub count: u64,
    /// `round(count / total * 100)`; 0 when there are no supporters.
    pub percentage: u32,
}

/// The three fixed tiers. All three are always present, even when empty.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EngagementDistribution {
    pub high_engagement: EngagementTier,
    pub moderate_engagement: EngagementTier,
    pub low_engagement: EngagementTier,
    pub total_supporters: u64,
}

/// Partition scored supporters into high / moderate / low tiers.
pub fn bucketize(scored: &[ScoredSupporter]) -> EngagementDistribution {
    let total = scored.len() as u64;
    let mut high = 0u64;
    let mut moderate = 0u64;
    let mut low = 0u64;

    for s in scored {
        if s.engagement_score >= HIGH_THRESHOLD {
            high += 1;
        } else if s.engagement_score >= MODERATE_THRESHOLD {
            moderate += 1;
        } else {
            low += 1;
        }
    }

    EngagementDistribution {
        high_engagement: tier(high, total),
        moderate_engagement: tier(moderate, total),
        low_engagement: tier(low, total),
        total_supporters: total,
    }
}

fn tier(count: u64, total: u64) -> EngagementTier {
    let percentage = if total == 0 {
        0
    } else {
        (count as f64 / total as f64 * 100.0).round() as u32
    };
    EngagementTier { count, percentage }
}

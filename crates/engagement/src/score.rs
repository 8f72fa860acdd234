//! Engagement score computation.
//!
//! `score = (frequency + variety) / 10`, where frequency saturates at ten
//! total activities (worth 60 points) and variety scales with how many of
//! the eight activity types the supporter has used (worth 40 points).
//! Bounded to [0, 10].

use crate::aggregate::SupporterEngagement;
use lobby_core::types::ActivityType;
use serde::Serialize;

/// Total activities at which the frequency component saturates.
pub const FREQUENCY_SATURATION: f64 = 10.0;
pub const FREQUENCY_WEIGHT: f64 = 60.0;
pub const VARIETY_WEIGHT: f64 = 40.0;

/// Frequency component: `min(total / 10, 1) * 60`.
pub fn frequency_score(supporter: &SupporterEngagement) -> f64 {
    (supporter.total_activity() as f64 / FREQUENCY_SATURATION).min(1.0) * FREQUENCY_WEIGHT
}

/// Variety component: `(distinct types / 8) * 40`.
pub fn variety_score(supporter: &SupporterEngagement) -> f64 {
    supporter.distinct_type_count() as f64 / ActivityType::ALL.len() as f64 * VARIETY_WEIGHT
}

/// The 0-10 engagement score, rounded to one decimal. Pure in the
/// supporter's counters: identical counters always score identically.
pub fn engagement_score(supporter: &SupporterEngagement) -> f64 {
    round1((frequency_score(supporter) + variety_score(supporter)) / 10.0)
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// A supporter paired with their computed score.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredSupporter {
    #[serde(flatten)]
    pub supporter: SupporterEngagement,
    pub engagement_score: f64,
}

/// Score every supporter and sort descending. The sort is stable, so
/// equal scores keep their aggregation (first-seen) order and the output
/// is deterministic across runs.
pub fn score_all(supporters: Vec<SupporterEngagement>) -> Vec<ScoredSupporter> {
    let mut scored: Vec<ScoredSupporter> = supporters
        .into_iter()
        .map(|supporter| {
            let engagement_score = engagement_score(&supporter);
            ScoredSupporter {
                supporter,
                engagement_score,
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.engagement_score
            .partial_cmp(&a.engagement_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use chrono::Utc;
    use lobby_core::types::CampaignActivity;
    use uuid::Uuid;

    fn supporter_with(kinds: &[ActivityType]) -> SupporterEngagement {
        let user = Uuid::new_v4();
        let records: Vec<CampaignActivity> = kinds
            .iter()
            .map(|k| CampaignActivity {
                user_id: user,
                display_name: "Ren Ito".to_string(),
                handle: None,
                avatar: None,
                activity: *k,
                campaign_id: Uuid::new_v4(),
                occurred_at: Utc::now(),
            })
            .collect();
        aggregate(&records).remove(0)
    }

    #[test]
    fn test_single_lobby_scores_1_1() {
        let s = supporter_with(&[ActivityType::Lobby]);
        // frequency min(1/10, 1) * 60 = 6, variety 1/8 * 40 = 5 -> 1.1
        assert_eq!(engagement_score(&s), 1.1);
        assert_eq!(s.active_types(), vec![ActivityType::Lobby]);
    }

    #[test]
    fn test_one_of_each_type_scores_8_8() {
        let s = supporter_with(&ActivityType::ALL);
        assert_eq!(frequency_score(&s), 48.0);
        assert_eq!(variety_score(&s), 40.0);
        assert_eq!(engagement_score(&s), 8.8);
    }

    #[test]
    fn test_score_bounded_zero_to_ten() {
        // Saturate frequency well past ten activities.
        let mut kinds = Vec::new();
        for _ in 0..10 {
            kinds.extend_from_slice(&ActivityType::ALL);
        }
        let heavy = supporter_with(&kinds);
        assert_eq!(engagement_score(&heavy), 10.0);

        for n in 1..=20 {
            let s = supporter_with(&vec![ActivityType::Comment; n]);
            let score = engagement_score(&s);
            assert!((0.0..=10.0).contains(&score), "score {score} out of range");
        }
    }

    #[test]
    fn test_identical_counters_score_identically() {
        let a = supporter_with(&[ActivityType::Pledge, ActivityType::Share]);
        let b = supporter_with(&[ActivityType::Pledge, ActivityType::Share]);
        assert_eq!(engagement_score(&a), engagement_score(&b));
    }

    #[test]
    fn test_score_all_sorted_descending() {
        let supporters = vec![
            supporter_with(&[ActivityType::Lobby]),
            supporter_with(&ActivityType::ALL),
            supporter_with(&[ActivityType::Lobby, ActivityType::Comment]),
        ];
        let scored = score_all(supporters);
        assert_eq!(scored.len(), 3);
        assert!(scored[0].engagement_score >= scored[1].engagement_score);
        assert!(scored[1].engagement_score >= scored[2].engagement_score);
        assert_eq!(scored[0].engagement_score, 8.8);
    }
}

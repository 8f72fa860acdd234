//! Per-campaign weekly activity summary.

use lobby_core::types::{ActivityType, Campaign, CampaignActivity};
use serde::Serialize;
use std::collections::HashSet;
use uuid::Uuid;

/// One campaign's digest line: what happened in the window.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignWeeklySummary {
    pub campaign_id: Uuid,
    pub title: String,
    pub slug: String,
    pub signal_score: f64,
    pub lobbies: u64,
    pub pledges: u64,
    pub comments: u64,
    pub other_activity: u64,
    pub total_activity: u64,
    pub distinct_supporters: u64,
}

/// Fold a window of activity records into the digest summary. The digest
/// calls out lobbies, pledges, and comments; the remaining five types are
/// reported in bulk.
pub fn summarize_campaign(campaign: &Campaign, records: &[CampaignActivity]) -> CampaignWeeklySummary {
    let mut lobbies = 0u64;
    let mut pledges = 0u64;
    let mut comments = 0u64;
    let mut other = 0u64;
    let mut supporters: HashSet<Uuid> = HashSet::new();

    for record in records {
        supporters.insert(record.user_id);
        match record.activity {
            ActivityType::Lobby => lobbies += 1,
            ActivityType::Pledge => pledges += 1,
            ActivityType::Comment => comments += 1,
            ActivityType::PollVote
            | ActivityType::Share
            | ActivityType::Bookmark
            | ActivityType::Reaction
            | ActivityType::Follow => other += 1,
        }
    }

    CampaignWeeklySummary {
        campaign_id: campaign.id,
        title: campaign.title.clone(),
        slug: campaign.slug.clone(),
        signal_score: campaign.signal_score,
        lobbies,
        pledges,
        comments,
        other_activity: other,
        total_activity: records.len() as u64,
        distinct_supporters: supporters.len() as u64,
    }
}

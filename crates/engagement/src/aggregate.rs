//! Per-supporter activity aggregation.

use chrono::{DateTime, Utc};
use lobby_core::types::{ActivityType, CampaignActivity};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// One supporter's folded activity for a single campaign. Built lazily on
/// the first record seen for the user and discarded with the request.
#[derive(Debug, Clone, Serialize)]
pub struct SupporterEngagement {
    pub user_id: Uuid,
    pub display_name: String,
    pub handle: Option<String>,
    pub avatar: Option<String>,
    pub lobbies: u32,
    pub pledges: u32,
    pub poll_votes: u32,
    pub comments: u32,
    pub shares: u32,
    pub bookmarks: u32,
    pub reactions: u32,
    pub follows: u32,
    /// Maximum timestamp across all folded records, not the last processed.
    pub last_activity: Option<DateTime<Utc>>,
}

impl SupporterEngagement {
    fn seed(record: &CampaignActivity) -> Self {
        Self {
            user_id: record.user_id,
            display_name: record.display_name.clone(),
            handle: record.handle.clone(),
            avatar: record.avatar.clone(),
            lobbies: 0,
            pledges: 0,
            poll_votes: 0,
            comments: 0,
            shares: 0,
            bookmarks: 0,
            reactions: 0,
            follows: 0,
            last_activity: None,
        }
    }

    /// Fold one record in: bump the matching counter and advance the
    /// running-maximum activity time.
    pub fn record(&mut self, activity: ActivityType, occurred_at: DateTime<Utc>) {
        match activity {
            ActivityType::Lobby => self.lobbies += 1,
            ActivityType::Pledge => self.pledges += 1,
            ActivityType::PollVote => self.poll_votes += 1,
            ActivityType::Comment => self.comments += 1,
            ActivityType::Share => self.shares += 1,
            ActivityType::Bookmark => self.bookmarks += 1,
            ActivityType::Reaction => self.reactions += 1,
            ActivityType::Follow => self.follows += 1,
        }
        self.last_activity = Some(match self.last_activity {
            Some(seen) => seen.max(occurred_at),
            None => occurred_at,
        });
    }

    pub fn count(&self, activity: ActivityType) -> u32 {
        match activity {
            ActivityType::Lobby => self.lobbies,
            ActivityType::Pledge => self.pledges,
            ActivityType::PollVote => self.poll_votes,
            ActivityType::Comment => self.comments,
            ActivityType::Share => self.shares,
            ActivityType::Bookmark => self.bookmarks,
            ActivityType::Reaction => self.reactions,
            ActivityType::Follow => self.follows,
        }
    }

    pub fn total_activity(&self) -> u32 {
        ActivityType::ALL.iter().map(|t| self.count(*t)).sum()
    }

    /// Activity types this supporter has used at least once, in canonical
    /// order.
    pub fn active_types(&self) -> Vec<ActivityType> {
        ActivityType::ALL
            .iter()
            .copied()
            .filter(|t| self.count(*t) > 0)
            .collect()
    }

    pub fn distinct_type_count(&self) -> usize {
        self.active_types().len()
    }
}

/// Fold activity records into one `SupporterEngagement` per distinct
/// supporter, in first-seen order. Zero records yield an empty list.
pub fn aggregate(records: &[CampaignActivity]) -> Vec<SupporterEngagement> {
    let mut index: HashMap<Uuid, usize> = HashMap::new();
    let mut supporters: Vec<SupporterEngagement> = Vec::new();

    for record in records {
        let i = *index.entry(record.user_id).or_insert_with(|| {
            supporters.push(SupporterEngagement::seed(record));
            supporters.len() - 1
        });
        supporters[i].record(record.activity, record.occurred_at);
    }

    supporters
}

//! In-memory platform store backed by `DashMap` collections.
//!
//! Holds users, campaigns, per-campaign activity (with the acting user's
//! projection captured at record time), pricing responses, and digest
//! bookkeeping. Every read the scoring pipeline needs reduces to
//! "all activity records with user projections for campaign X".

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use lobby_core::error::{LobbyError, LobbyResult};
use lobby_core::types::{
    ActivityType, Campaign, CampaignActivity, CampaignStatus, PricingResponse, UserAccount,
};
use tracing::debug;
use uuid::Uuid;

/// Concurrent platform store. All derived aggregates (engagement scores,
/// pricing analysis) are recomputed from these collections per request;
/// nothing derived is written back.
pub struct PlatformStore {
    users: DashMap<Uuid, UserAccount>,
    campaigns: DashMap<Uuid, Campaign>,
    /// slug -> campaign id
    slugs: DashMap<String, Uuid>,
    /// campaign id -> activity records, append order
    activity: DashMap<Uuid, Vec<CampaignActivity>>,
    /// campaign id -> pricing responses, append order
    pricing: DashMap<Uuid, Vec<PricingResponse>>,
    /// creator id -> last digest send time
    digest_log: DashMap<Uuid, DateTime<Utc>>,
}

impl PlatformStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            campaigns: DashMap::new(),
            slugs: DashMap::new(),
            activity: DashMap::new(),
            pricing: DashMap::new(),
            digest_log: DashMap::new(),
        }
    }

    // ─── Users ──────────────────────────────────────────────────────────

    pub fn upsert_user(&self, user: UserAccount) {
        self.users.insert(user.id, user);
    }

    pub fn user(&self, id: &Uuid) -> Option<UserAccount> {
        self.users.get(id).map(|u| u.clone())
    }

    /// Total registered users on the platform.
    pub fn user_count(&self) -> u64 {
        self.users.len() as u64
    }

    // ─── Campaigns ──────────────────────────────────────────────────────

    pub fn create_campaign(&self, campaign: Campaign) -> LobbyResult<()> {
        if self.slugs.contains_key(&campaign.slug) {
            return Err(LobbyError::Validation(format!(
                "campaign slug '{}' already exists",
                campaign.slug
            )));
        }
        self.slugs.insert(campaign.slug.clone(), campaign.id);
        self.campaigns.insert(campaign.id, campaign);
        Ok(())
    }

    pub fn campaign(&self, id: &Uuid) -> Option<Campaign> {
        self.campaigns.get(id).map(|c| c.clone())
    }

    /// Resolve a campaign by UUID or slug.
    pub fn campaign_by_ref(&self, campaign_ref: &str) -> Option<Campaign> {
        if let Ok(id) = Uuid::parse_str(campaign_ref) {
            if let Some(campaign) = self.campaign(&id) {
                return Some(campaign);
            }
        }
        let id = *self.slugs.get(campaign_ref)?;
        self.campaign(&id)
    }

    pub fn campaigns_by_creator(&self, creator_id: &Uuid) -> Vec<Campaign> {
        self.campaigns
            .iter()
            .filter(|c| c.value().creator_id == *creator_id)
            .map(|c| c.value().clone())
            .collect()
    }

    /// Distinct creators owning at least one active campaign, sorted by
    /// display name so batch runs process them in a stable order.
    pub fn creators_with_active_campaigns(&self) -> Vec<UserAccount> {
        let mut creator_ids: Vec<Uuid> = self
            .campaigns
            .iter()
            .filter(|c| c.value().status == CampaignStatus::Active)
            .map(|c| c.value().creator_id)
            .collect();
        creator_ids.sort();
        creator_ids.dedup();

        let mut creators: Vec<UserAccount> = creator_ids
            .iter()
            .filter_map(|id| self.user(id))
            .collect();
        creators.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        creators
    }

    // ─── Activity ───────────────────────────────────────────────────────

    /// Record one supporter activity, capturing the user's projection at
    /// record time.
    pub fn record_activity(
        &self,
        campaign_id: Uuid,
        user_id: Uuid,
        activity: ActivityType,
        occurred_at: DateTime<Utc>,
    ) -> LobbyResult<()> {
        let user = self
            .user(&user_id)
            .ok_or_else(|| LobbyError::NotFound(format!("user {user_id}")))?;
        if !self.campaigns.contains_key(&campaign_id) {
            return Err(LobbyError::NotFound(format!("campaign {campaign_id}")));
        }

        debug!(
            campaign_id = %campaign_id,
            user_id = %user_id,
            kind = activity.display_name(),
            "Recording supporter activity"
        );

        self.activity
            .entry(campaign_id)
            .or_default()
            .push(CampaignActivity {
                user_id,
                display_name: user.display_name,
                handle: user.handle,
                avatar: user.avatar,
                activity,
                campaign_id,
                occurred_at,
            });
        Ok(())
    }

    /// All activity records for one campaign, with user projections.
    pub fn campaign_activity(&self, campaign_id: &Uuid) -> Vec<CampaignActivity> {
        self.activity
            .get(campaign_id)
            .map(|a| a.clone())
            .unwrap_or_default()
    }

    /// Activity for one campaign at or after `cutoff`.
    pub fn activity_since(&self, campaign_id: &Uuid, cutoff: DateTime<Utc>) -> Vec<CampaignActivity> {
        self.campaign_activity(campaign_id)
            .into_iter()
            .filter(|a| a.occurred_at >= cutoff)
            .collect()
    }

    /// Total activity records across every campaign and type.
    pub fn platform_activity_count(&self) -> u64 {
        self.activity.iter().map(|a| a.value().len() as u64).sum()
    }

    // ─── Pricing ────────────────────────────────────────────────────────

    pub fn record_pricing_response(&self, response: PricingResponse) -> LobbyResult<()> {
        if !self.campaigns.contains_key(&response.campaign_id) {
            return Err(LobbyError::NotFound(format!(
                "campaign {}",
                response.campaign_id
            )));
        }
        if response.price < 0.0 || !response.price.is_finite() {
            return Err(LobbyError::Validation(
                "pricing response price must be a non-negative number".to_string(),
            ));
        }
        self.pricing
            .entry(response.campaign_id)
            .or_default()
            .push(response);
        Ok(())
    }

    pub fn pricing_responses(&self, campaign_id: &Uuid) -> Vec<PricingResponse> {
        self.pricing
            .get(campaign_id)
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    // ─── Digest bookkeeping ─────────────────────────────────────────────

    pub fn mark_digest_sent(&self, creator_id: Uuid, at: DateTime<Utc>) -> LobbyResult<()> {
        self.digest_log.insert(creator_id, at);
        Ok(())
    }

    pub fn last_digest_sent(&self, creator_id: &Uuid) -> Option<DateTime<Utc>> {
        self.digest_log.get(creator_id).map(|t| *t)
    }
}

impl Default for PlatformStore {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user(name: &str) -> UserAccount {
        UserAccount {
            id: Uuid::new_v4(),
            display_name: name.to_string(),
            handle: Some(format!("@{}", name.to_lowercase())),
            avatar: None,
            email: format!("{}@example.com", name.to_lowercase()),
            created_at: Utc::now(),
        }
    }

    fn campaign(creator: &UserAccount, slug: &str, status: CampaignStatus) -> Campaign {
        Campaign {
            id: Uuid::new_v4(),
            slug: slug.to_string(),
            title: slug.replace('-', " "),
            creator_id: creator.id,
            status,
            signal_score: 0.0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let store = PlatformStore::new();
        let creator = user("Maya");
        store.upsert_user(creator.clone());

        store
            .create_campaign(campaign(&creator, "solar-kettle", CampaignStatus::Active))
            .unwrap();
        let err = store
            .create_campaign(campaign(&creator, "solar-kettle", CampaignStatus::Draft))
            .unwrap_err();
        assert!(matches!(err, LobbyError::Validation(_)));
    }

    #[test]
    fn test_campaign_by_ref_uuid_and_slug() {
        let store = PlatformStore::new();
        let creator = user("Maya");
        store.upsert_user(creator.clone());
        let c = campaign(&creator, "solar-kettle", CampaignStatus::Active);
        store.create_campaign(c.clone()).unwrap();

        assert_eq!(store.campaign_by_ref(&c.id.to_string()).unwrap().id, c.id);
        assert_eq!(store.campaign_by_ref("solar-kettle").unwrap().id, c.id);
        assert!(store.campaign_by_ref("no-such-campaign").is_none());
    }

    #[test]
    fn test_activity_captures_user_projection() {
        let store = PlatformStore::new();
        let creator = user("Maya");
        let supporter = user("Ren");
        store.upsert_user(creator.clone());
        store.upsert_user(supporter.clone());
        let c = campaign(&creator, "solar-kettle", CampaignStatus::Active);
        store.create_campaign(c.clone()).unwrap();

        store
            .record_activity(c.id, supporter.id, ActivityType::Lobby, Utc::now())
            .unwrap();

        let records = store.campaign_activity(&c.id);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user_id, supporter.id);
        assert_eq!(records[0].display_name, "Ren");
        assert_eq!(records[0].handle.as_deref(), Some("@ren"));
        assert_eq!(records[0].activity, ActivityType::Lobby);
    }

    #[test]
    fn test_activity_unknown_user_or_campaign() {
        let store = PlatformStore::new();
        let creator = user("Maya");
        store.upsert_user(creator.clone());
        let c = campaign(&creator, "solar-kettle", CampaignStatus::Active);
        store.create_campaign(c.clone()).unwrap();

        let err = store
            .record_activity(c.id, Uuid::new_v4(), ActivityType::Pledge, Utc::now())
            .unwrap_err();
        assert!(matches!(err, LobbyError::NotFound(_)));

        let err = store
            .record_activity(Uuid::new_v4(), creator.id, ActivityType::Pledge, Utc::now())
            .unwrap_err();
        assert!(matches!(err, LobbyError::NotFound(_)));
    }

    #[test]
    fn test_activity_since_filters_by_cutoff() {
        let store = PlatformStore::new();
        let creator = user("Maya");
        let supporter = user("Ren");
        store.upsert_user(creator.clone());
        store.upsert_user(supporter.clone());
        let c = campaign(&creator, "solar-kettle", CampaignStatus::Active);
        store.create_campaign(c.clone()).unwrap();

        let now = Utc::now();
        store
            .record_activity(c.id, supporter.id, ActivityType::Lobby, now - Duration::days(10))
            .unwrap();
        store
            .record_activity(c.id, supporter.id, ActivityType::Comment, now - Duration::days(2))
            .unwrap();

        let recent = store.activity_since(&c.id, now - Duration::days(7));
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].activity, ActivityType::Comment);
    }

    #[test]
    fn test_creators_with_active_campaigns_dedupes() {
        let store = PlatformStore::new();
        let maya = user("Maya");
        let noor = user("Noor");
        let idle = user("Idle");
        store.upsert_user(maya.clone());
        store.upsert_user(noor.clone());
        store.upsert_user(idle.clone());

        store
            .create_campaign(campaign(&maya, "solar-kettle", CampaignStatus::Active))
            .unwrap();
        store
            .create_campaign(campaign(&maya, "modular-desk", CampaignStatus::Active))
            .unwrap();
        store
            .create_campaign(campaign(&noor, "quiet-fan", CampaignStatus::Active))
            .unwrap();
        store
            .create_campaign(campaign(&idle, "parked-idea", CampaignStatus::Draft))
            .unwrap();

        let creators = store.creators_with_active_campaigns();
        assert_eq!(creators.len(), 2);
        assert_eq!(creators[0].display_name, "Maya");
        assert_eq!(creators[1].display_name, "Noor");
    }

    #[test]
    fn test_platform_counts() {
        let store = PlatformStore::new();
        assert_eq!(store.user_count(), 0);
        assert_eq!(store.platform_activity_count(), 0);

        let creator = user("Maya");
        let supporter = user("Ren");
        store.upsert_user(creator.clone());
        store.upsert_user(supporter.clone());
        let c = campaign(&creator, "solar-kettle", CampaignStatus::Active);
        store.create_campaign(c.clone()).unwrap();
        store
            .record_activity(c.id, supporter.id, ActivityType::Lobby, Utc::now())
            .unwrap();
        store
            .record_activity(c.id, supporter.id, ActivityType::Share, Utc::now())
            .unwrap();

        assert_eq!(store.user_count(), 2);
        assert_eq!(store.platform_activity_count(), 2);
    }

    #[test]
    fn test_pricing_response_validation() {
        let store = PlatformStore::new();
        let creator = user("Maya");
        store.upsert_user(creator.clone());
        let c = campaign(&creator, "solar-kettle", CampaignStatus::Active);
        store.create_campaign(c.clone()).unwrap();

        let mut response = PricingResponse {
            id: Uuid::new_v4(),
            campaign_id: c.id,
            user_id: creator.id,
            price: 25.0,
            intensity: lobby_core::types::PriceIntensity::ProbablyBuy,
            submitted_at: Utc::now(),
        };
        store.record_pricing_response(response.clone()).unwrap();

        response.price = -1.0;
        let err = store.record_pricing_response(response).unwrap_err();
        assert!(matches!(err, LobbyError::Validation(_)));

        assert_eq!(store.pricing_responses(&c.id).len(), 1);
    }
}

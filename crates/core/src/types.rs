use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ─── Supporter Activity ─────────────────────────────────────────────────

/// The eight kinds of supporter activity a campaign can receive.
///
/// Every switch over activity kinds in the codebase is an exhaustive
/// `match`, so adding a ninth variant fails compilation at each site
/// that must handle it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Lobby,
    Pledge,
    PollVote,
    Comment,
    Share,
    Bookmark,
    Reaction,
    Follow,
}

impl ActivityType {
    /// All eight variants in canonical order.
    pub const ALL: [ActivityType; 8] = [
        ActivityType::Lobby,
        ActivityType::Pledge,
        ActivityType::PollVote,
        ActivityType::Comment,
        ActivityType::Share,
        ActivityType::Bookmark,
        ActivityType::Reaction,
        ActivityType::Follow,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            ActivityType::Lobby => "Lobby",
            ActivityType::Pledge => "Pledge",
            ActivityType::PollVote => "Poll Vote",
            ActivityType::Comment => "Comment",
            ActivityType::Share => "Share",
            ActivityType::Bookmark => "Bookmark",
            ActivityType::Reaction => "Reaction",
            ActivityType::Follow => "Follow",
        }
    }
}

/// One activity record joined with the acting user's public projection.
/// This is the single shape the scoring pipeline consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignActivity {
    pub user_id: Uuid,
    pub display_name: String,
    pub handle: Option<String>,
    pub avatar: Option<String>,
    pub activity: ActivityType,
    pub campaign_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

// ─── Users and Campaigns ────────────────────────────────────────────────

/// A registered platform user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: Uuid,
    pub display_name: String,
    pub handle: Option<String>,
    pub avatar: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A product campaign created by a user who wants a product to exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub creator_id: Uuid,
    pub status: CampaignStatus,
    /// Campaign-level demand metric, computed elsewhere in the platform.
    pub signal_score: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    Active,
    Funded,
    Closed,
}

// ─── Pricing ────────────────────────────────────────────────────────────

/// Self-reported purchase-interest tier on a pricing response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum PriceIntensity {
    NeatIdea,
    ProbablyBuy,
    TakeMyMoney,
}

impl PriceIntensity {
    pub const ALL: [PriceIntensity; 3] = [
        PriceIntensity::NeatIdea,
        PriceIntensity::ProbablyBuy,
        PriceIntensity::TakeMyMoney,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            PriceIntensity::NeatIdea => "Neat Idea",
            PriceIntensity::ProbablyBuy => "Probably Buy",
            PriceIntensity::TakeMyMoney => "Take My Money",
        }
    }
}

/// A supporter's price-ceiling submission for one campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingResponse {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub user_id: Uuid,
    pub price: f64,
    pub intensity: PriceIntensity,
    pub submitted_at: DateTime<Utc>,
}

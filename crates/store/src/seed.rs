//! Demo data seeding for local development.

use chrono::{Duration, Utc};
use lobby_core::error::LobbyResult;
use lobby_core::types::{
    ActivityType, Campaign, CampaignStatus, PriceIntensity, PricingResponse, UserAccount,
};
use tracing::info;
use uuid::Uuid;

use crate::{PlatformStore, SessionStore};

/// Handles returned by [`seed_demo`] so a developer can exercise the API
/// without creating accounts by hand.
#[derive(Debug, Clone)]
pub struct DemoSeed {
    pub creator_id: Uuid,
    pub creator_token: String,
    pub campaign_id: Uuid,
    pub campaign_slug: String,
}

/// Populate the store with two creators, three campaigns, a handful of
/// supporters, a week of activity, and pricing responses.
pub fn seed_demo(store: &PlatformStore, sessions: &SessionStore) -> LobbyResult<DemoSeed> {
    let now = Utc::now();

    let creators = vec![
        ("Maya Okafor", "@maya", "maya.okafor@productlobby.example"),
        ("Noor Haddad", "@noor", "noor.haddad@productlobby.example"),
    ];
    let mut creator_accounts = Vec::new();
    for (name, handle, email) in creators {
        let account = UserAccount {
            id: Uuid::new_v4(),
            display_name: name.to_string(),
            handle: Some(handle.to_string()),
            avatar: None,
            email: email.to_string(),
            created_at: now - Duration::days(120),
        };
        store.upsert_user(account.clone());
        creator_accounts.push(account);
    }

    let supporters = vec![
        ("Ren Ito", Some("@ren")),
        ("Avery Lane", Some("@avery")),
        ("Sam Kline", None),
        ("Priya Nair", Some("@priya")),
        ("Jo Meyer", Some("@jo")),
        ("Luca Bruno", Some("@luca")),
    ];
    let mut supporter_accounts = Vec::new();
    for (name, handle) in supporters {
        let account = UserAccount {
            id: Uuid::new_v4(),
            display_name: name.to_string(),
            handle: handle.map(|h| h.to_string()),
            avatar: None,
            email: format!(
                "{}@example.com",
                name.to_lowercase().replace(' ', ".")
            ),
            created_at: now - Duration::days(60),
        };
        store.upsert_user(account.clone());
        supporter_accounts.push(account);
    }

    let kettle = Campaign {
        id: Uuid::new_v4(),
        slug: "solar-kettle".to_string(),
        title: "Solar Camping Kettle".to_string(),
        creator_id: creator_accounts[0].id,
        status: CampaignStatus::Active,
        signal_score: 72.5,
        created_at: now - Duration::days(45),
    };
    let desk = Campaign {
        id: Uuid::new_v4(),
        slug: "modular-desk".to_string(),
        title: "Modular Standing Desk".to_string(),
        creator_id: creator_accounts[1].id,
        status: CampaignStatus::Active,
        signal_score: 58.0,
        created_at: now - Duration::days(30),
    };
    let parked = Campaign {
        id: Uuid::new_v4(),
        slug: "parked-idea".to_string(),
        title: "Parked Idea".to_string(),
        creator_id: creator_accounts[1].id,
        status: CampaignStatus::Draft,
        signal_score: 0.0,
        created_at: now - Duration::days(5),
    };
    store.create_campaign(kettle.clone())?;
    store.create_campaign(desk.clone())?;
    store.create_campaign(parked.clone())?;

    // Spread activity so the demo distribution has all three tiers:
    // supporter 0 touches every type, the tail barely engages.
    for (i, supporter) in supporter_accounts.iter().enumerate() {
        let kinds: &[ActivityType] = match i {
            0 => &ActivityType::ALL,
            1 => &[
                ActivityType::Lobby,
                ActivityType::Pledge,
                ActivityType::Comment,
                ActivityType::Share,
            ],
            2 => &[ActivityType::Lobby, ActivityType::Bookmark],
            _ => &[ActivityType::Lobby],
        };
        for (j, kind) in kinds.iter().enumerate() {
            store.record_activity(
                kettle.id,
                supporter.id,
                *kind,
                now - Duration::days((j as i64 % 7) + 1),
            )?;
        }
    }
    for supporter in supporter_accounts.iter().take(3) {
        store.record_activity(desk.id, supporter.id, ActivityType::Lobby, now - Duration::days(2))?;
    }

    let prices = [
        (24.0, PriceIntensity::NeatIdea),
        (29.0, PriceIntensity::ProbablyBuy),
        (29.0, PriceIntensity::ProbablyBuy),
        (35.0, PriceIntensity::TakeMyMoney),
        (49.0, PriceIntensity::TakeMyMoney),
    ];
    for (supporter, (price, intensity)) in supporter_accounts.iter().zip(prices) {
        store.record_pricing_response(PricingResponse {
            id: Uuid::new_v4(),
            campaign_id: kettle.id,
            user_id: supporter.id,
            price,
            intensity,
            submitted_at: now - Duration::days(3),
        })?;
    }

    let creator_token = sessions.issue(creator_accounts[0].id, Duration::days(7));

    info!(
        campaign = %kettle.slug,
        creator = %creator_accounts[0].display_name,
        "Demo data seeded"
    );

    Ok(DemoSeed {
        creator_id: creator_accounts[0].id,
        creator_token,
        campaign_id: kettle.id,
        campaign_slug: kettle.slug.clone(),
    })
}

//! Digest batch job with per-creator failure isolation.

use crate::mailer::{DigestEmail, DigestMailer};
use crate::summary::{summarize_campaign, CampaignWeeklySummary};
use chrono::{Duration, Utc};
use lobby_core::config::DigestConfig;
use lobby_core::error::{LobbyError, LobbyResult};
use lobby_core::types::{CampaignStatus, UserAccount};
use lobby_store::PlatformStore;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DigestStatus {
    Sent,
    Failed,
}

/// The result for one creator in a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct DigestOutcome {
    pub creator_id: Uuid,
    pub email: String,
    pub campaigns_included: usize,
    pub status: DigestStatus,
    /// Human-readable failure reason; always present when status is Failed.
    pub reason: Option<String>,
}

/// Aggregate result of one batch run. A fatal setup failure produces a
/// zero-progress report with `error` set rather than a panic or an Err.
#[derive(Debug, Clone, Serialize)]
pub struct DigestRunReport {
    pub attempted: u64,
    pub sent: u64,
    pub failed: u64,
    pub outcomes: Vec<DigestOutcome>,
    pub error: Option<String>,
}

impl DigestRunReport {
    fn aborted(reason: String) -> Self {
        Self {
            attempted: 0,
            sent: 0,
            failed: 0,
            outcomes: Vec::new(),
            error: Some(reason),
        }
    }
}

/// Weekly digest job. Generic over the mailer so tests can inject
/// failures; production wires in [`crate::SendGridMailer`].
pub struct DigestJob<M: DigestMailer> {
    store: Arc<PlatformStore>,
    mailer: M,
    config: DigestConfig,
}

impl<M: DigestMailer> DigestJob<M> {
    pub fn new(store: Arc<PlatformStore>, mailer: M, config: DigestConfig) -> Self {
        Self {
            store,
            mailer,
            config,
        }
    }

    /// Run one batch over every creator with an active campaign. Each
    /// creator's send is independently wrapped; resending is safe
    /// (at-least-once semantics, no derived state mutated).
    pub async fn run(&self) -> DigestRunReport {
        let creators = match self.eligible_creators() {
            Ok(creators) => creators,
            Err(e) => {
                error!(error = %e, "Digest batch aborted before processing");
                metrics::counter!("digest.batch_aborted").increment(1);
                return DigestRunReport::aborted(e.to_string());
            }
        };

        let mut outcomes: Vec<DigestOutcome> = Vec::with_capacity(creators.len());
        for creator in &creators {
            outcomes.push(self.process_creator(creator).await);
        }

        let sent = outcomes
            .iter()
            .filter(|o| o.status == DigestStatus::Sent)
            .count() as u64;
        let failed = outcomes.len() as u64 - sent;

        info!(attempted = outcomes.len(), sent, failed, "Digest batch complete");
        metrics::counter!("digest.batch_runs").increment(1);

        DigestRunReport {
            attempted: outcomes.len() as u64,
            sent,
            failed,
            outcomes,
            error: None,
        }
    }

    /// Manually run the digest for a single creator.
    pub async fn run_for_creator(&self, creator_id: &Uuid) -> LobbyResult<DigestOutcome> {
        let creator = self
            .store
            .user(creator_id)
            .ok_or_else(|| LobbyError::NotFound(format!("creator {creator_id}")))?;
        Ok(self.process_creator(&creator).await)
    }

    fn eligible_creators(&self) -> LobbyResult<Vec<UserAccount>> {
        if self.config.from_email.is_empty() {
            return Err(LobbyError::Config(
                "digest sender address is not configured".to_string(),
            ));
        }
        Ok(self.store.creators_with_active_campaigns())
    }

    async fn process_creator(&self, creator: &UserAccount) -> DigestOutcome {
        match self.compose_and_send(creator).await {
            Ok(campaigns_included) => {
                // Recording the send time is best-effort: a bookkeeping
                // failure must not fail a digest that was delivered.
                if let Err(e) = self.store.mark_digest_sent(creator.id, Utc::now()) {
                    warn!(creator_id = %creator.id, error = %e, "Failed to record digest send time");
                }
                DigestOutcome {
                    creator_id: creator.id,
                    email: creator.email.clone(),
                    campaigns_included,
                    status: DigestStatus::Sent,
                    reason: None,
                }
            }
            Err(e) => {
                warn!(creator_id = %creator.id, error = %e, "Digest send failed");
                metrics::counter!("digest.send_failures").increment(1);
                DigestOutcome {
                    creator_id: creator.id,
                    email: creator.email.clone(),
                    campaigns_included: 0,
                    status: DigestStatus::Failed,
                    reason: Some(e.to_string()),
                }
            }
        }
    }

    async fn compose_and_send(&self, creator: &UserAccount) -> LobbyResult<usize> {
        let mut campaigns: Vec<_> = self
            .store
            .campaigns_by_creator(&creator.id)
            .into_iter()
            .filter(|c| c.status == CampaignStatus::Active)
            .collect();
        if campaigns.is_empty() {
            return Err(LobbyError::Validation(format!(
                "creator {} has no active campaigns",
                creator.id
            )));
        }
        campaigns.sort_by(|a, b| a.slug.cmp(&b.slug));

        let cutoff = Utc::now() - Duration::days(self.config.window_days);
        let summaries: Vec<CampaignWeeklySummary> = campaigns
            .iter()
            .map(|c| summarize_campaign(c, &self.store.activity_since(&c.id, cutoff)))
            .collect();

        let email = compose_email(creator, &summaries);
        self.mailer.send(&email).await?;
        Ok(summaries.len())
    }
}

fn compose_email(creator: &UserAccount, summaries: &[CampaignWeeklySummary]) -> DigestEmail {
    let total_activity: u64 = summaries.iter().map(|s| s.total_activity).sum();
    let subject = format!(
        "Your ProductLobby week: {} supporter actions across {} campaign{}",
        total_activity,
        summaries.len(),
        if summaries.len() == 1 { "" } else { "s" }
    );

    let mut body = String::new();
    body.push_str(&format!("<p>Hi {},</p>", creator.display_name));
    body.push_str("<p>Here is what your supporters did this week:</p><ul>");
    for s in summaries {
        body.push_str(&format!(
            "<li><strong>{}</strong>: {} lobbies, {} pledges, {} comments, {} other actions from {} supporters (signal score {:.1})</li>",
            s.title, s.lobbies, s.pledges, s.comments, s.other_activity, s.distinct_supporters, s.signal_score
        ));
    }
    body.push_str("</ul>");

    DigestEmail {
        creator_id: creator.id,
        to: creator.email.clone(),
        subject,
        html_body: body,
    }
}

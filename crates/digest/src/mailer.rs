//! Digest email delivery via SendGrid.

use async_trait::async_trait;
use lobby_core::config::DigestConfig;
use lobby_core::error::{LobbyError, LobbyResult};
use tracing::debug;
use uuid::Uuid;

/// A composed digest email ready for delivery.
#[derive(Debug, Clone)]
pub struct DigestEmail {
    pub creator_id: Uuid,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Delivery seam for the digest job. The job only needs "send this and
/// tell me if it worked", so tests can substitute a failing mailer.
#[async_trait]
pub trait DigestMailer: Send + Sync {
    async fn send(&self, email: &DigestEmail) -> LobbyResult<()>;
}

/// SendGrid delivery provider.
/// In production: POST to https://api.sendgrid.com/v3/mail/send
pub struct SendGridMailer {
    from_email: String,
    from_name: String,
}

impl SendGridMailer {
    pub fn new(config: &DigestConfig) -> Self {
        Self {
            from_email: config.from_email.clone(),
            from_name: config.from_name.clone(),
        }
    }
}

#[async_trait]
impl DigestMailer for SendGridMailer {
    async fn send(&self, email: &DigestEmail) -> LobbyResult<()> {
        if email.to.is_empty() {
            return Err(LobbyError::Mail("recipient address is empty".to_string()));
        }

        debug!(
            creator_id = %email.creator_id,
            to = %email.to,
            subject = %email.subject,
            "Sending digest via SendGrid"
        );

        // Build SendGrid API payload (stub — in production, HTTP POST to SendGrid)
        let _payload = serde_json::json!({
            "personalizations": [{
                "to": [{"email": email.to}],
                "custom_args": {
                    "creator_id": email.creator_id,
                    "mail_type": "weekly_digest"
                }
            }],
            "from": {
                "email": self.from_email,
                "name": self.from_name
            },
            "subject": email.subject,
            "content": [{
                "type": "text/html",
                "value": email.html_body
            }]
        });

        metrics::counter!("digest.emails_sent").increment(1);
        Ok(())
    }
}

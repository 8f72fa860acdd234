//! Weekly creator digest.
//!
//! Batch job that walks every creator with an active campaign, summarizes
//! the trailing week of supporter activity per campaign, and emails each
//! creator. One creator's failure never aborts the batch: every creator
//! gets an outcome entry, and a fatal setup failure yields a well-formed
//! zero-progress report.

pub mod job;
pub mod mailer;
pub mod summary;

pub use job::{DigestJob, DigestOutcome, DigestRunReport, DigestStatus};
pub use mailer::{DigestEmail, DigestMailer, SendGridMailer};
pub use summary::{summarize_campaign, CampaignWeeklySummary};

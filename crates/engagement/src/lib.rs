//! Supporter engagement scoring pipeline.
//!
//! Folds a campaign's activity records into per-supporter counters,
//! scores each supporter on activity frequency and variety, buckets the
//! scored list into engagement tiers, and assembles the report served by
//! the engagement endpoint. Everything here is pure over its inputs and
//! recomputed per request.

pub mod aggregate;
pub mod distribution;
pub mod report;
pub mod score;

pub use aggregate::{aggregate, SupporterEngagement};
pub use distribution::{bucketize, EngagementDistribution, EngagementTier};
pub use report::{build_report, platform_average_score, top_supporters, EngagementReport, TopSupporter};
pub use score::{engagement_score, score_all, ScoredSupporter};

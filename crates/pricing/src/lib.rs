//! Willingness-to-pay pricing analysis.
//!
//! Turns a campaign's price-ceiling responses into descriptive statistics,
//! a bracketed distribution, suggested price tiers, per-intensity
//! breakdowns, and a discrete demand curve with a revenue-maximizing
//! price. Pure computation; an empty response list produces an explicit
//! empty result, never an error.

pub mod analysis;
pub mod curve;

pub use analysis::{
    analyze, IntensityGroup, PriceBracket, PricingAnalysis, SuggestedPrices,
};
pub use curve::{demand_curve, optimal_price, DemandPoint, OptimalPrice};

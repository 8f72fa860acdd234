//! Descriptive statistics and price suggestions over pricing responses.

use crate::curve::{demand_curve, optimal_price, DemandPoint, OptimalPrice};
use lobby_core::types::{PriceIntensity, PricingResponse};
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Number of equal-width brackets in the price distribution.
pub const BRACKET_COUNT: usize = 5;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceBracket {
    pub low: f64,
    /// Inclusive only for the final bracket.
    pub high: f64,
    pub label: String,
    pub count: u64,
    pub percentage: u32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedPrices {
    pub economy: f64,
    pub standard: f64,
    pub premium: f64,
}

/// Response count and average price for one purchase-interest tier. All
/// three tiers are always reported, empty ones with zero values.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntensityGroup {
    pub intensity: PriceIntensity,
    pub label: String,
    pub count: u64,
    pub average_price: f64,
}

/// The pricing endpoint's response body.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingAnalysis {
    pub total_responses: u64,
    pub average: f64,
    pub median: f64,
    /// Most frequent price; ties resolve to the lowest.
    pub mode: f64,
    pub min: f64,
    pub max: f64,
    pub brackets: Vec<PriceBracket>,
    pub suggested_prices: Option<SuggestedPrices>,
    pub intensity_breakdown: Vec<IntensityGroup>,
    pub demand_curve: Vec<DemandPoint>,
    pub optimal_price: Option<OptimalPrice>,
}

impl PricingAnalysis {
    /// The explicit no-data result the UI renders as an empty state.
    pub fn empty() -> Self {
        Self {
            total_responses: 0,
            average: 0.0,
            median: 0.0,
            mode: 0.0,
            min: 0.0,
            max: 0.0,
            brackets: Vec::new(),
            suggested_prices: None,
            intensity_breakdown: PriceIntensity::ALL
                .iter()
                .map(|i| IntensityGroup {
                    intensity: *i,
                    label: i.display_name().to_string(),
                    count: 0,
                    average_price: 0.0,
                })
                .collect(),
            demand_curve: Vec::new(),
            optimal_price: None,
        }
    }
}

/// Analyze one campaign's pricing responses.
pub fn analyze(responses: &[PricingResponse]) -> PricingAnalysis {
    if responses.is_empty() {
        return PricingAnalysis::empty();
    }

    let mut prices: Vec<f64> = responses.iter().map(|r| r.price).collect();
    prices.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = prices.len();

    let average = round2(prices.iter().sum::<f64>() / n as f64);
    let median = median_of(&prices);
    let mode = mode_of(&prices);
    let min = prices[0];
    let max = prices[n - 1];

    let curve = demand_curve(&prices);
    let optimal = optimal_price(&curve);

    PricingAnalysis {
        total_responses: n as u64,
        average,
        median,
        mode,
        min,
        max,
        brackets: bracketize(&prices, min, max),
        suggested_prices: Some(SuggestedPrices {
            economy: percentile(&prices, 25.0),
            standard: median,
            premium: percentile(&prices, 75.0).max(median),
        }),
        intensity_breakdown: intensity_breakdown(responses),
        demand_curve: curve,
        optimal_price: optimal,
    }
}

/// Middle value, or the mean of the two middle values for even counts.
fn median_of(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        round2((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

/// Most frequent price at cent precision; ties resolve to the lowest
/// price because the map iterates ascending.
fn mode_of(sorted: &[f64]) -> f64 {
    let mut counts: BTreeMap<i64, u64> = BTreeMap::new();
    for price in sorted {
        *counts.entry(cents(*price)).or_insert(0) += 1;
    }
    let mut best_key = cents(sorted[0]);
    let mut best_count = 0u64;
    for (key, count) in counts {
        if count > best_count {
            best_key = key;
            best_count = count;
        }
    }
    best_key as f64 / 100.0
}

/// Nearest-rank percentile over a sorted list.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    let rank = ((p / 100.0 * n as f64).ceil() as usize).clamp(1, n);
    sorted[rank - 1]
}

fn bracketize(sorted: &[f64], min: f64, max: f64) -> Vec<PriceBracket> {
    let total = sorted.len() as u64;

    if cents(max) == cents(min) {
        return vec![PriceBracket {
            low: min,
            high: max,
            label: format!("{min:.2}"),
            count: total,
            percentage: 100,
        }];
    }

    let width = (max - min) / BRACKET_COUNT as f64;
    let mut counts = [0u64; BRACKET_COUNT];
    for price in sorted {
        let i = (((price - min) / width).floor() as usize).min(BRACKET_COUNT - 1);
        counts[i] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(i, count)| {
            let low = min + width * i as f64;
            let high = min + width * (i + 1) as f64;
            PriceBracket {
                low: round2(low),
                high: round2(high),
                label: format!("{:.2} to {:.2}", low, high),
                count: *count,
                percentage: ((*count as f64 / total as f64) * 100.0).round() as u32,
            }
        })
        .collect()
}

fn intensity_breakdown(responses: &[PricingResponse]) -> Vec<IntensityGroup> {
    PriceIntensity::ALL
        .iter()
        .map(|intensity| {
            let group: Vec<f64> = responses
                .iter()
                .filter(|r| r.intensity == *intensity)
                .map(|r| r.price)
                .collect();
            let average_price = if group.is_empty() {
                0.0
            } else {
                round2(group.iter().sum::<f64>() / group.len() as f64)
            };
            IntensityGroup {
                intensity: *intensity,
                label: intensity.display_name().to_string(),
                count: group.len() as u64,
                average_price,
            }
        })
        .collect()
}

pub(crate) fn cents(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

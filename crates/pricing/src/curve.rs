//! Discrete demand curve over observed price points.

use crate::analysis::{cents, round2};
use serde::Serialize;
use utoipa::ToSchema;

/// One point on the demand curve: how many respondents would still buy at
/// this price (their stated ceiling is at or above it).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DemandPoint {
    pub price: f64,
    pub estimated_buyers: u64,
    pub projected_revenue: f64,
}

/// The revenue-maximizing point on the curve.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptimalPrice {
    pub price: f64,
    pub estimated_buyers: u64,
    pub max_revenue: f64,
}

/// Build the demand curve from a sorted (ascending) price list: one point
/// per distinct price, `estimated_buyers` = responses with a ceiling at or
/// above it. Buyers are non-increasing as the price rises by construction.
pub fn demand_curve(sorted_prices: &[f64]) -> Vec<DemandPoint> {
    let n = sorted_prices.len();
    let mut points: Vec<DemandPoint> = Vec::new();

    for (i, price) in sorted_prices.iter().enumerate() {
        if i > 0 && cents(*price) == cents(sorted_prices[i - 1]) {
            continue;
        }
        // Everything from the first occurrence onward can afford this price.
        let buyers = (n - i) as u64;
        points.push(DemandPoint {
            price: *price,
            estimated_buyers: buyers,
            projected_revenue: round2(price * buyers as f64),
        });
    }

    points
}

/// Pick the curve point maximizing `price * estimated_buyers`. Ties go to
/// the lowest price so sparse data never overstates revenue.
pub fn optimal_price(curve: &[DemandPoint]) -> Option<OptimalPrice> {
    let mut best: Option<&DemandPoint> = None;
    for point in curve {
        let better = match best {
            Some(b) => point.projected_revenue > b.projected_revenue,
            None => true,
        };
        if better {
            best = Some(point);
        }
    }
    best.map(|p| OptimalPrice {
        price: p.price,
        estimated_buyers: p.estimated_buyers,
        max_revenue: p.projected_revenue,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve_for(mut prices: Vec<f64>) -> Vec<DemandPoint> {
        prices.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        demand_curve(&prices)
    }

    #[test]
    fn test_curve_empty() {
        assert!(demand_curve(&[]).is_empty());
    }

    #[test]
    fn test_curve_counts_buyers_at_or_above() {
        let curve = curve_for(vec![10.0, 20.0, 20.0, 30.0]);
        assert_eq!(curve.len(), 3);
        assert_eq!(curve[0].price, 10.0);
        assert_eq!(curve[0].estimated_buyers, 4);
        assert_eq!(curve[1].price, 20.0);
        assert_eq!(curve[1].estimated_buyers, 3);
        assert_eq!(curve[2].price, 30.0);
        assert_eq!(curve[2].estimated_buyers, 1);
    }

    #[test]
    fn test_curve_monotonically_non_increasing() {
        let samples = vec![
            vec![5.0],
            vec![5.0, 5.0, 5.0],
            vec![1.0, 2.5, 2.5, 7.0, 19.99, 19.99, 50.0],
            vec![12.0, 3.0, 45.0, 3.0, 12.0, 99.0, 0.5],
        ];
        for prices in samples {
            let curve = curve_for(prices);
            for pair in curve.windows(2) {
                assert!(pair[0].estimated_buyers >= pair[1].estimated_buyers);
            }
        }
    }

    #[test]
    fn test_optimal_maximizes_revenue() {
        // 10 -> 3 buyers (30), 20 -> 2 (40), 30 -> 1 (30).
        let curve = curve_for(vec![10.0, 20.0, 30.0]);
        let optimal = optimal_price(&curve).unwrap();
        assert_eq!(optimal.price, 20.0);
        assert_eq!(optimal.estimated_buyers, 2);
        assert_eq!(optimal.max_revenue, 40.0);
    }

    #[test]
    fn test_optimal_tie_breaks_to_lowest_price() {
        // 1 -> 2 buyers (2), 2 -> 1 buyer (2): tied revenue, keep 1.
        let curve = curve_for(vec![1.0, 2.0]);
        let optimal = optimal_price(&curve).unwrap();
        assert_eq!(optimal.price, 1.0);
        assert_eq!(optimal.max_revenue, 2.0);
    }

    #[test]
    fn test_optimal_none_on_empty() {
        assert!(optimal_price(&[]).is_none());
    }
}

// Batch rating of a vault's markets for the curator dashboard
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::info;

use crate::models::{CuratorConfig, MarketMetrics, MarketState};
use crate::risk::MarketRiskCalculator;

/// Display band for a rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatingBand {
    Strong,   // 80-100
    Moderate, // 60-79
    Weak,     // 40-59
    Poor,     // 0-39
    Unrated,
}

impl RatingBand {
    pub fn from_rating(rating: Option<u8>) -> Self {
        match rating {
            Some(r) if r >= 80 => RatingBand::Strong,
            Some(r) if r >= 60 => RatingBand::Moderate,
            Some(r) if r >= 40 => RatingBand::Weak,
            Some(_) => RatingBand::Poor,
            None => RatingBand::Unrated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedMarket {
    pub band: RatingBand,
    #[serde(flatten)]
    pub metrics: MarketMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub total: usize,
    pub rated: usize,
    pub below_threshold: usize,
    pub average_rating: Option<f64>,
    pub tvl_weighted_rating: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingReport {
    pub generated_at: DateTime<Utc>,
    pub config_version: String,
    pub benchmark_supply_rate: f64,
    pub summary: RatingSummary,
    pub markets: Vec<RatedMarket>,
}

pub struct MarketRatingService {
    calculator: MarketRiskCalculator,
}

impl MarketRatingService {
    pub fn new(config: CuratorConfig) -> Self {
        Self {
            calculator: MarketRiskCalculator::new(config),
        }
    }

    pub fn config(&self) -> &CuratorConfig {
        self.calculator.config()
    }

    /// Score every market independently and rank them, best rating first.
    /// Unrated markets go last; ties are broken by TVL, larger first.
    pub fn rate_markets(&self, markets: &[MarketState], benchmark_override: Option<f64>) -> RatingReport {
        let mut rated: Vec<RatedMarket> = markets
            .iter()
            .map(|market| {
                let metrics = self.calculator.calculate_market_risk(market, benchmark_override);
                RatedMarket {
                    band: RatingBand::from_rating(metrics.rating),
                    metrics,
                }
            })
            .collect();

        rated.sort_by(|a, b| compare_ranked(&a.metrics, &b.metrics));

        let summary = summarize(&rated);
        info!(
            total = summary.total,
            rated = summary.rated,
            below_threshold = summary.below_threshold,
            average_rating = ?summary.average_rating,
            "Rated curator markets"
        );

        RatingReport {
            generated_at: Utc::now(),
            config_version: self.config().version.clone(),
            benchmark_supply_rate: benchmark_override
                .filter(|rate| rate.is_finite())
                .unwrap_or(self.config().fallback_benchmark_rate),
            summary,
            markets: rated,
        }
    }
}

fn compare_ranked(a: &MarketMetrics, b: &MarketMetrics) -> Ordering {
    // Option<u8> orders None first, so reversing puts unrated markets last
    b.rating
        .cmp(&a.rating)
        .then_with(|| b.tvl_usd.partial_cmp(&a.tvl_usd).unwrap_or(Ordering::Equal))
}

fn summarize(markets: &[RatedMarket]) -> RatingSummary {
    let rated: Vec<(f64, f64)> = markets
        .iter()
        .filter_map(|m| m.metrics.rating.map(|r| (f64::from(r), m.metrics.tvl_usd)))
        .collect();

    let average_rating = if rated.is_empty() {
        None
    } else {
        Some(rated.iter().map(|(r, _)| r).sum::<f64>() / rated.len() as f64)
    };

    let total_tvl: f64 = rated.iter().map(|(_, tvl)| tvl).sum();
    let tvl_weighted_rating = if total_tvl > 0.0 {
        Some(rated.iter().map(|(r, tvl)| r * tvl).sum::<f64>() / total_tvl)
    } else {
        None
    };

    RatingSummary {
        total: markets.len(),
        rated: rated.len(),
        below_threshold: markets.iter().filter(|m| m.metrics.insufficient_tvl).count(),
        average_rating,
        tvl_weighted_rating,
    }
}

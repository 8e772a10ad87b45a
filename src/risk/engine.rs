// Market risk rating: five weighted sub-scores folded into a 0-100 rating
use tracing::debug;

use crate::models::{CuratorConfig, MarketMetrics, MarketState};
use crate::risk::MAX_RATING;
use crate::risk::scores::{
    liquidation_capacity_score, rate_alignment_score, resolve_tvl, resolve_utilization,
    simulate_price_stress, stress_exposure_score, utilization_score, withdrawal_liquidity_score,
};
use crate::utils::math::{non_negative, normalize01};

/// Compute the risk metrics of one market.
///
/// Total and pure: missing, negative or non-finite inputs degrade to safe
/// defaults. Markets below `min_tvl_usd` still get all five sub-scores but
/// their rating is `None`.
pub fn compute_metrics_for_market(
    market: &MarketState,
    config: &CuratorConfig,
    benchmark_supply_rate_override: Option<f64>,
) -> MarketMetrics {
    let snapshot = &market.state;

    let tvl_usd = resolve_tvl(snapshot);
    let insufficient_tvl = tvl_usd < config.min_tvl_usd;
    if insufficient_tvl {
        debug!(
            market = %market.unique_key,
            tvl_usd,
            min_tvl_usd = config.min_tvl_usd,
            "Market below minimum TVL, rating withheld"
        );
    }

    let benchmark_rate = benchmark_supply_rate_override
        .filter(|rate| rate.is_finite())
        .unwrap_or(config.fallback_benchmark_rate);
    let liquidity_usd = non_negative(snapshot.liquidity_assets_usd);
    let stress = simulate_price_stress(snapshot, tvl_usd, config);

    let utilization_score = normalize01(utilization_score(resolve_utilization(snapshot), config));
    let rate_alignment_score = normalize01(rate_alignment_score(snapshot.supply_apy, benchmark_rate, config));
    let stress_exposure_score = normalize01(stress_exposure_score(&stress));
    let withdrawal_liquidity_score = normalize01(withdrawal_liquidity_score(liquidity_usd, tvl_usd, config));
    let liquidation_capacity_score =
        normalize01(liquidation_capacity_score(liquidity_usd, &stress, tvl_usd, config));

    let mut metrics = MarketMetrics {
        id: market.unique_key.clone(),
        symbol: market.loan_symbol().to_string(),
        collateral_symbol: market.collateral_symbol().to_string(),
        tvl_usd,
        utilization_score,
        rate_alignment_score,
        stress_exposure_score,
        withdrawal_liquidity_score,
        liquidation_capacity_score,
        effective_weights: config.weights,
        rating: None,
        insufficient_tvl,
        min_tvl_threshold_hit: insufficient_tvl,
        raw: market.clone(),
        config_version: config.version.clone(),
    };

    if !insufficient_tvl {
        metrics.rating = Some(to_rating(metrics.weighted_score()));
    }

    metrics
}

/// Scale a `[0, 1]` score to an integer rating
pub fn to_rating(weighted_score: f64) -> u8 {
    (normalize01(weighted_score) * f64::from(MAX_RATING)).round() as u8
}

/// Rates markets against a fixed curator configuration
#[derive(Debug, Clone, Default)]
pub struct MarketRiskCalculator {
    config: CuratorConfig,
}

impl MarketRiskCalculator {
    pub fn new(config: CuratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CuratorConfig {
        &self.config
    }

    pub fn calculate_market_risk(&self, market: &MarketState, benchmark_rate: Option<f64>) -> MarketMetrics {
        compute_metrics_for_market(market, &self.config, benchmark_rate)
    }
}

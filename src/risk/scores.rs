// The five market sub-scores. Each returns a value in [0, 1], higher is safer.
use tracing::debug;

use crate::models::{CuratorConfig, MarketSnapshot};
use crate::risk::curves::{coverage_curve, is_large_market, scaled_insolvency_tolerance, soft_exposure_curve};
use crate::utils::math::{finite_or_zero, non_negative, normalize01};

const REQUIRED_LIQUIDITY_FLOOR: f64 = 1e-9;

/// TVL from `size_usd` when positive, otherwise supply + borrow
pub fn resolve_tvl(snapshot: &MarketSnapshot) -> f64 {
    match snapshot.size_usd {
        Some(size) if size.is_finite() && size > 0.0 => size,
        size => {
            if size.is_some() {
                debug!(size_usd = ?size, "Unusable sizeUsd, falling back to supply + borrow");
            }
            non_negative(snapshot.supply_assets_usd) + non_negative(snapshot.borrow_assets_usd)
        }
    }
}

/// Reported utilization, or borrow / supply with supply floored at 1
pub fn resolve_utilization(snapshot: &MarketSnapshot) -> f64 {
    match snapshot.utilization {
        Some(u) if u.is_finite() => {
            if u < 0.0 {
                debug!(utilization = u, "Negative utilization reported");
            }
            u
        }
        reported => {
            if reported.is_some() {
                debug!(utilization = ?reported, "Non-finite utilization, deriving from borrow / supply");
            }
            non_negative(snapshot.borrow_assets_usd) / non_negative(snapshot.supply_assets_usd).max(1.0)
        }
    }
}

/// Outcome of the collateral price shock scenario
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceStress {
    pub collateral_after_shock_usd: f64,
    pub potential_insolvency_usd: f64,
    pub insolvency_pct_of_tvl: f64,
    /// Tolerated insolvency share after scale adjustment
    pub tolerance_pct_of_tvl: f64,
}

pub fn simulate_price_stress(snapshot: &MarketSnapshot, tvl_usd: f64, config: &CuratorConfig) -> PriceStress {
    let supply = non_negative(snapshot.supply_assets_usd);
    let borrow = non_negative(snapshot.borrow_assets_usd);

    let collateral_after_shock_usd = (supply * (1.0 - config.price_stress_pct)).max(0.0);
    let potential_insolvency_usd = (borrow - collateral_after_shock_usd).max(0.0);

    PriceStress {
        collateral_after_shock_usd,
        potential_insolvency_usd,
        insolvency_pct_of_tvl: potential_insolvency_usd / tvl_usd.max(1.0),
        tolerance_pct_of_tvl: scaled_insolvency_tolerance(tvl_usd, config.insolvency_tolerance_pct_tvl),
    }
}

pub fn utilization_score(utilization: f64, config: &CuratorConfig) -> f64 {
    let ceiling = config.utilization_ceiling;
    let beyond = config.max_utilization_beyond;

    if utilization <= ceiling {
        return 1.0;
    }
    if utilization > beyond {
        return 0.0;
    }

    // max_utilization_beyond is not clamped at merge time
    let span = beyond - ceiling;
    if !(span > 0.0) {
        return 0.0;
    }

    normalize01(1.0 - (utilization - ceiling) / span)
}

/// Distance of the supply APY from the benchmark, with an extra penalty for
/// yields well above it
pub fn rate_alignment_score(supply_apy: Option<f64>, benchmark_rate: f64, config: &CuratorConfig) -> f64 {
    let apy = finite_or_zero(supply_apy);
    let eps = config.rate_alignment_eps;
    let deviation = (apy - benchmark_rate).abs();

    let base = if eps > 0.0 {
        1.0 - deviation / eps
    } else if deviation == 0.0 {
        1.0
    } else {
        0.0
    };

    let mut score = normalize01(base);

    if apy > benchmark_rate + config.rate_alignment_high_yield_buffer {
        let penalty_start =
            benchmark_rate + config.rate_alignment_high_yield_buffer + config.rate_alignment_high_yield_eps;
        let excess = (apy - penalty_start).max(0.0);
        let penalty = if eps > 0.0 { excess / eps } else if excess > 0.0 { 1.0 } else { 0.0 };
        score -= penalty;
    }

    normalize01(score)
}

pub fn stress_exposure_score(stress: &PriceStress) -> f64 {
    if stress.potential_insolvency_usd <= 0.0 {
        return 1.0;
    }
    if !(stress.tolerance_pct_of_tvl > 0.0) {
        return 0.0;
    }

    soft_exposure_curve(stress.insolvency_pct_of_tvl / stress.tolerance_pct_of_tvl)
}

/// Available liquidity relative to `tvl * withdrawal_liquidity_min_pct`, capped at 1
pub fn withdrawal_liquidity_score(liquidity_usd: f64, tvl_usd: f64, config: &CuratorConfig) -> f64 {
    let required = tvl_usd * config.withdrawal_liquidity_min_pct;
    normalize01((liquidity_usd / required.max(REQUIRED_LIQUIDITY_FLOOR)).min(1.0))
}

/// Whether stressed liquidity can absorb the stressed insolvency
pub fn liquidation_capacity_score(
    liquidity_usd: f64,
    stress: &PriceStress,
    tvl_usd: f64,
    config: &CuratorConfig,
) -> f64 {
    let capacity = liquidity_usd * (1.0 - config.liquidity_stress_pct);
    let debt = stress.potential_insolvency_usd;

    if debt <= 0.0 || capacity >= debt {
        return 1.0;
    }

    coverage_curve(capacity / debt, is_large_market(tvl_usd))
}

// Environment variable overrides for the curator configuration
use std::env;
use tracing::{debug, warn};

use crate::models::{CuratorConfigOverrides, WeightOverrides};

pub const CONFIG_VERSION_VAR: &str = "CURATOR_CONFIG_VERSION";

/// Configuration field an environment variable maps onto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    UtilizationCeiling,
    MaxUtilizationBeyond,
    PriceStressPct,
    LiquidityStressPct,
    WithdrawalLiquidityMinPct,
    InsolvencyTolerancePctTvl,
    MinTvlUsd,
    FallbackBenchmarkRate,
    RateAlignmentEps,
    RateAlignmentHighYieldBuffer,
    RateAlignmentHighYieldEps,
    WeightUtilization,
    WeightRateAlignment,
    WeightStressExposure,
    WeightWithdrawalLiquidity,
    WeightLiquidationCapacity,
}

impl ConfigField {
    fn assign(self, overrides: &mut CuratorConfigOverrides, value: f64) {
        let slot = match self {
            ConfigField::UtilizationCeiling => &mut overrides.utilization_ceiling,
            ConfigField::MaxUtilizationBeyond => &mut overrides.max_utilization_beyond,
            ConfigField::PriceStressPct => &mut overrides.price_stress_pct,
            ConfigField::LiquidityStressPct => &mut overrides.liquidity_stress_pct,
            ConfigField::WithdrawalLiquidityMinPct => &mut overrides.withdrawal_liquidity_min_pct,
            ConfigField::InsolvencyTolerancePctTvl => &mut overrides.insolvency_tolerance_pct_tvl,
            ConfigField::MinTvlUsd => &mut overrides.min_tvl_usd,
            ConfigField::FallbackBenchmarkRate => &mut overrides.fallback_benchmark_rate,
            ConfigField::RateAlignmentEps => &mut overrides.rate_alignment_eps,
            ConfigField::RateAlignmentHighYieldBuffer => &mut overrides.rate_alignment_high_yield_buffer,
            ConfigField::RateAlignmentHighYieldEps => &mut overrides.rate_alignment_high_yield_eps,
            weight => {
                let weights = overrides.weights.get_or_insert_with(WeightOverrides::default);
                match weight {
                    ConfigField::WeightUtilization => &mut weights.utilization,
                    ConfigField::WeightRateAlignment => &mut weights.rate_alignment,
                    ConfigField::WeightStressExposure => &mut weights.stress_exposure,
                    ConfigField::WeightWithdrawalLiquidity => &mut weights.withdrawal_liquidity,
                    _ => &mut weights.liquidation_capacity,
                }
            }
        };
        *slot = Some(value);
    }
}

/// One row of the environment contract
#[derive(Debug, Clone, Copy)]
pub struct EnvVarSpec {
    pub name: &'static str,
    pub field: ConfigField,
    /// Expected as a decimal fraction; values above 1 are probably percents
    pub percentage_like: bool,
}

const fn env_var(name: &'static str, field: ConfigField, percentage_like: bool) -> EnvVarSpec {
    EnvVarSpec { name, field, percentage_like }
}

pub const ENV_VARS: &[EnvVarSpec] = &[
    env_var("CURATOR_UTILIZATION_CEILING", ConfigField::UtilizationCeiling, true),
    env_var("CURATOR_MAX_UTILIZATION_BEYOND", ConfigField::MaxUtilizationBeyond, false),
    env_var("CURATOR_PRICE_STRESS_PCT", ConfigField::PriceStressPct, true),
    env_var("CURATOR_LIQUIDITY_STRESS_PCT", ConfigField::LiquidityStressPct, true),
    env_var("CURATOR_WITHDRAWAL_LIQUIDITY_MIN_PCT", ConfigField::WithdrawalLiquidityMinPct, true),
    env_var("CURATOR_INSOLVENCY_TOLERANCE_PCT_TVL", ConfigField::InsolvencyTolerancePctTvl, true),
    env_var("CURATOR_MIN_TVL_USD", ConfigField::MinTvlUsd, false),
    env_var("CURATOR_FALLBACK_BENCHMARK_RATE", ConfigField::FallbackBenchmarkRate, false),
    env_var("CURATOR_RATE_ALIGNMENT_EPS", ConfigField::RateAlignmentEps, false),
    env_var("CURATOR_RATE_ALIGNMENT_HIGH_YIELD_BUFFER", ConfigField::RateAlignmentHighYieldBuffer, false),
    env_var("CURATOR_RATE_ALIGNMENT_HIGH_YIELD_EPS", ConfigField::RateAlignmentHighYieldEps, false),
    // Weight names are the uppercased key without an inserted underscore
    env_var("CURATOR_WEIGHT_UTILIZATION", ConfigField::WeightUtilization, false),
    env_var("CURATOR_WEIGHT_RATEALIGNMENT", ConfigField::WeightRateAlignment, false),
    env_var("CURATOR_WEIGHT_STRESSEXPOSURE", ConfigField::WeightStressExposure, false),
    env_var("CURATOR_WEIGHT_WITHDRAWALLIQUIDITY", ConfigField::WeightWithdrawalLiquidity, false),
    env_var("CURATOR_WEIGHT_LIQUIDATIONCAPACITY", ConfigField::WeightLiquidationCapacity, false),
];

/// Read configuration overrides from the process environment.
///
/// Absent or unparsable variables leave the field absent. Never fails.
pub fn load_config_from_env() -> CuratorConfigOverrides {
    load_config_from_lookup(|name| env::var(name).ok())
}

/// Same as [`load_config_from_env`] with an arbitrary variable source
pub fn load_config_from_lookup<F>(lookup: F) -> CuratorConfigOverrides
where
    F: Fn(&str) -> Option<String>,
{
    let mut overrides = CuratorConfigOverrides::default();
    let mut loaded = 0usize;

    for entry in ENV_VARS {
        let Some(raw) = lookup(entry.name) else {
            continue;
        };

        let Some(value) = parse_env_number(&raw) else {
            warn!(var = entry.name, value = %raw, "Ignoring non-numeric curator config value");
            continue;
        };

        if entry.percentage_like && value > 1.0 {
            // Detection only: "30" was probably meant as 0.3
            warn!(
                var = entry.name,
                value,
                "Curator config value looks like a percentage; expected a decimal fraction"
            );
        }

        entry.field.assign(&mut overrides, value);
        loaded += 1;
    }

    if let Some(version) = lookup(CONFIG_VERSION_VAR).map(|v| v.trim().to_string()) {
        if !version.is_empty() {
            overrides.version = Some(version);
            loaded += 1;
        }
    }

    debug!(fields = loaded, "Loaded curator config overrides from environment");
    overrides
}

/// Parse a numeric variable; empty, malformed and non-finite input is `None`
pub fn parse_env_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

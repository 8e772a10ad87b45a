// Curator configuration resolution: defaults + overrides, weight normalization, clamping
use crate::models::{CuratorConfig, CuratorConfigOverrides, ScoringWeights, WeightOverrides, DEFAULT_WEIGHTS};
use crate::utils::math::normalize01;

/// Resolve a complete configuration from the defaults and optional partial overrides.
///
/// Finite scalars are taken as given, weights are normalized to sum to 1 and the
/// percentage-like fields are clamped into `[0, 1]` as the last step.
pub fn merge_config(overrides: Option<&CuratorConfigOverrides>) -> CuratorConfig {
    let defaults = CuratorConfig::default();
    let Some(o) = overrides else {
        return defaults;
    };

    let mut config = CuratorConfig {
        version: o.version.clone().unwrap_or(defaults.version),
        utilization_ceiling: o.utilization_ceiling.unwrap_or(defaults.utilization_ceiling),
        max_utilization_beyond: finite(o.max_utilization_beyond).unwrap_or(defaults.max_utilization_beyond),
        price_stress_pct: o.price_stress_pct.unwrap_or(defaults.price_stress_pct),
        liquidity_stress_pct: o.liquidity_stress_pct.unwrap_or(defaults.liquidity_stress_pct),
        withdrawal_liquidity_min_pct: o
            .withdrawal_liquidity_min_pct
            .unwrap_or(defaults.withdrawal_liquidity_min_pct),
        insolvency_tolerance_pct_tvl: o
            .insolvency_tolerance_pct_tvl
            .unwrap_or(defaults.insolvency_tolerance_pct_tvl),
        min_tvl_usd: finite(o.min_tvl_usd).unwrap_or(defaults.min_tvl_usd),
        fallback_benchmark_rate: finite(o.fallback_benchmark_rate).unwrap_or(defaults.fallback_benchmark_rate),
        rate_alignment_eps: finite(o.rate_alignment_eps).unwrap_or(defaults.rate_alignment_eps),
        rate_alignment_high_yield_buffer: finite(o.rate_alignment_high_yield_buffer).unwrap_or(defaults.rate_alignment_high_yield_buffer),
        rate_alignment_high_yield_eps: finite(o.rate_alignment_high_yield_eps).unwrap_or(defaults.rate_alignment_high_yield_eps),
        weights: match &o.weights {
            Some(weights) => resolve_weights(weights),
            None => defaults.weights,
        },
    };

    clamp_percentages(&mut config);
    config
}

/// Overlay the supplied weight keys on the defaults and normalize to sum to 1.
///
/// Negative and non-finite weights count as 0. A zero sum discards the overrides
/// entirely and returns the default weight set.
pub fn resolve_weights(overrides: &WeightOverrides) -> ScoringWeights {
    let pick = |value: Option<f64>, default: f64| match value {
        Some(v) if v.is_finite() => v.max(0.0),
        Some(_) => 0.0,
        None => default,
    };

    let merged = ScoringWeights {
        utilization: pick(overrides.utilization, DEFAULT_WEIGHTS.utilization),
        rate_alignment: pick(overrides.rate_alignment, DEFAULT_WEIGHTS.rate_alignment),
        stress_exposure: pick(overrides.stress_exposure, DEFAULT_WEIGHTS.stress_exposure),
        withdrawal_liquidity: pick(overrides.withdrawal_liquidity, DEFAULT_WEIGHTS.withdrawal_liquidity),
        liquidation_capacity: pick(overrides.liquidation_capacity, DEFAULT_WEIGHTS.liquidation_capacity),
    };

    let total = merged.total();
    if total <= 0.0 || !total.is_finite() {
        return DEFAULT_WEIGHTS;
    }

    merged.scaled_by(total)
}

/// Non-finite scalar overrides count as absent
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn clamp_percentages(config: &mut CuratorConfig) {
    config.utilization_ceiling = normalize01(config.utilization_ceiling);
    config.price_stress_pct = normalize01(config.price_stress_pct);
    config.liquidity_stress_pct = normalize01(config.liquidity_stress_pct);
    config.withdrawal_liquidity_min_pct = normalize01(config.withdrawal_liquidity_min_pct);
    config.insolvency_tolerance_pct_tvl = normalize01(config.insolvency_tolerance_pct_tvl);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_overrides_returns_defaults() {
        assert_eq!(merge_config(None), CuratorConfig::default());
        assert_eq!(
            merge_config(Some(&CuratorConfigOverrides::default())),
            CuratorConfig::default()
        );
    }

    #[test]
    fn test_partial_weights_renormalize() {
        let weights = resolve_weights(&WeightOverrides {
            utilization: Some(0.6),
            ..WeightOverrides::default()
        });

        // 0.6 + 0.2 + 0.3 + 0.15 + 0.15 = 1.4
        assert!((weights.total() - 1.0).abs() < 1e-9);
        assert!((weights.utilization - 0.6 / 1.4).abs() < 1e-9);
        assert!((weights.stress_exposure - 0.3 / 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_zero_weights_fall_back_to_defaults() {
        let weights = resolve_weights(&WeightOverrides {
            utilization: Some(0.0),
            rate_alignment: Some(0.0),
            stress_exposure: Some(0.0),
            withdrawal_liquidity: Some(0.0),
            liquidation_capacity: Some(0.0),
        });
        assert_eq!(weights, DEFAULT_WEIGHTS);
    }

    #[test]
    fn test_negative_weight_counts_as_zero() {
        let weights = resolve_weights(&WeightOverrides {
            utilization: Some(-1.0),
            ..WeightOverrides::default()
        });
        assert_eq!(weights.utilization, 0.0);
        assert!((weights.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamps_percentages_both_directions() {
        let config = merge_config(Some(&CuratorConfigOverrides {
            price_stress_pct: Some(1.5),
            liquidity_stress_pct: Some(-0.1),
            utilization_ceiling: Some(f64::NAN),
            ..CuratorConfigOverrides::default()
        }));

        assert_eq!(config.price_stress_pct, 1.0);
        assert_eq!(config.liquidity_stress_pct, 0.0);
        assert_eq!(config.utilization_ceiling, 0.0);
    }

    #[test]
    fn test_non_finite_scalars_keep_defaults() {
        let config = merge_config(Some(&CuratorConfigOverrides {
            min_tvl_usd: Some(f64::NAN),
            max_utilization_beyond: Some(f64::INFINITY),
            fallback_benchmark_rate: Some(f64::NEG_INFINITY),
            rate_alignment_eps: Some(f64::NAN),
            rate_alignment_high_yield_buffer: Some(f64::NAN),
            rate_alignment_high_yield_eps: Some(f64::INFINITY),
            ..CuratorConfigOverrides::default()
        }));
        let defaults = CuratorConfig::default();

        assert_eq!(config.min_tvl_usd, defaults.min_tvl_usd);
        assert_eq!(config.max_utilization_beyond, defaults.max_utilization_beyond);
        assert_eq!(config.fallback_benchmark_rate, defaults.fallback_benchmark_rate);
        assert_eq!(config.rate_alignment_eps, defaults.rate_alignment_eps);
        assert_eq!(config.rate_alignment_high_yield_buffer, defaults.rate_alignment_high_yield_buffer);
        assert_eq!(config.rate_alignment_high_yield_eps, defaults.rate_alignment_high_yield_eps);
    }

    #[test]
    fn test_max_utilization_beyond_is_not_clamped() {
        let config = merge_config(Some(&CuratorConfigOverrides {
            max_utilization_beyond: Some(1.4),
            ..CuratorConfigOverrides::default()
        }));
        assert_eq!(config.max_utilization_beyond, 1.4);
    }
}

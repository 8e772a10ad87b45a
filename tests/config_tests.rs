use morpho_curator_risk::{
    compute_metrics_for_market,
    config::{
        load_config_from_env, load_config_from_lookup, load_overrides_from_file, merge_config, resolve_config,
        ENV_VARS,
    },
    models::{CuratorConfig, CuratorConfigOverrides, MarketState, WeightOverrides, DEFAULT_WEIGHTS},
};
use std::env;
use std::io::Write;

fn weights(values: [Option<f64>; 5]) -> CuratorConfigOverrides {
    CuratorConfigOverrides {
        weights: Some(WeightOverrides {
            utilization: values[0],
            rate_alignment: values[1],
            stress_exposure: values[2],
            withdrawal_liquidity: values[3],
            liquidation_capacity: values[4],
        }),
        ..CuratorConfigOverrides::default()
    }
}

#[test]
fn test_weights_always_sum_to_one() {
    let cases = [
        [Some(1.0), None, None, None, None],
        [Some(5.0), Some(3.0), Some(2.0), Some(0.0), Some(0.0)],
        [None, None, Some(0.0), None, None],
        [Some(0.001), Some(0.0), Some(0.0), Some(0.0), Some(0.0)],
        [Some(40.0), Some(20.0), Some(20.0), Some(10.0), Some(10.0)],
    ];

    for case in cases {
        let config = merge_config(Some(&weights(case)));
        assert!((config.weights.total() - 1.0).abs() < 1e-5, "{:?}", case);
    }
}

#[test]
fn test_all_zero_weights_use_defaults() {
    let config = merge_config(Some(&weights([Some(0.0); 5])));
    assert_eq!(config.weights, DEFAULT_WEIGHTS);
}

#[test]
fn test_percentage_fields_are_clamped() {
    let config = merge_config(Some(&CuratorConfigOverrides {
        price_stress_pct: Some(1.5),
        liquidity_stress_pct: Some(-0.1),
        withdrawal_liquidity_min_pct: Some(3.0),
        insolvency_tolerance_pct_tvl: Some(-2.0),
        utilization_ceiling: Some(1.2),
        ..CuratorConfigOverrides::default()
    }));

    assert_eq!(config.price_stress_pct, 1.0);
    assert_eq!(config.liquidity_stress_pct, 0.0);
    assert_eq!(config.withdrawal_liquidity_min_pct, 1.0);
    assert_eq!(config.insolvency_tolerance_pct_tvl, 0.0);
    assert_eq!(config.utilization_ceiling, 1.0);
}

#[test]
fn test_scalar_overrides_apply_directly() {
    let config = merge_config(Some(&CuratorConfigOverrides {
        min_tvl_usd: Some(250_000.0),
        fallback_benchmark_rate: Some(0.042),
        version: Some("desk-2".to_string()),
        ..CuratorConfigOverrides::default()
    }));

    assert_eq!(config.min_tvl_usd, 250_000.0);
    assert_eq!(config.fallback_benchmark_rate, 0.042);
    assert_eq!(config.version, "desk-2");
    assert_eq!(config.price_stress_pct, CuratorConfig::default().price_stress_pct);
}

#[test]
fn test_nan_min_tvl_keeps_threshold() {
    let config = merge_config(Some(&CuratorConfigOverrides {
        min_tvl_usd: Some(f64::NAN),
        ..CuratorConfigOverrides::default()
    }));
    assert_eq!(config.min_tvl_usd, 10_000.0);

    let metrics = compute_metrics_for_market(&MarketState::default(), &config, None);
    assert!(metrics.insufficient_tvl);
    assert_eq!(metrics.rating, None);
}

#[test]
fn test_nan_from_overrides_file_keeps_defaults() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "min_tvl_usd = nan").unwrap();
    writeln!(file, "rate_alignment_eps = inf").unwrap();

    let overrides = load_overrides_from_file(file.path()).unwrap();
    assert!(overrides.min_tvl_usd.is_some_and(f64::is_nan));

    let config = merge_config(Some(&overrides));
    let defaults = CuratorConfig::default();
    assert_eq!(config.min_tvl_usd, defaults.min_tvl_usd);
    assert_eq!(config.rate_alignment_eps, defaults.rate_alignment_eps);
}

#[test]
fn test_env_overrides_flow_into_merge() {
    let overrides = load_config_from_lookup(|name| match name {
        "CURATOR_PRICE_STRESS_PCT" => Some("30".to_string()),
        "CURATOR_WEIGHT_UTILIZATION" => Some("0".to_string()),
        "CURATOR_WEIGHT_RATEALIGNMENT" => Some("0".to_string()),
        "CURATOR_WEIGHT_STRESSEXPOSURE" => Some("1".to_string()),
        "CURATOR_WEIGHT_WITHDRAWALLIQUIDITY" => Some("0".to_string()),
        "CURATOR_WEIGHT_LIQUIDATIONCAPACITY" => Some("0".to_string()),
        _ => None,
    });

    // "30" is kept verbatim by the loader and clamped by the merge
    assert_eq!(overrides.price_stress_pct, Some(30.0));
    let config = merge_config(Some(&overrides));
    assert_eq!(config.price_stress_pct, 1.0);
    assert_eq!(config.weights.stress_exposure, 1.0);
    assert_eq!(config.weights.utilization, 0.0);
}

#[test]
fn test_env_contract_names() {
    let names: Vec<&str> = ENV_VARS.iter().map(|e| e.name).collect();
    for expected in [
        "CURATOR_PRICE_STRESS_PCT",
        "CURATOR_WEIGHT_UTILIZATION",
        "CURATOR_WEIGHT_STRESSEXPOSURE",
        "CURATOR_MIN_TVL_USD",
    ] {
        assert!(names.contains(&expected), "{}", expected);
    }
    assert!(ENV_VARS.iter().all(|e| e.name.starts_with("CURATOR_")));
}

// The only test in this binary that touches the process environment
#[test]
fn test_process_environment_and_file_layering() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "min_tvl_usd = 50000.0\nliquidity_stress_pct = 0.4").unwrap();

    env::set_var("CURATOR_LIQUIDITY_STRESS_PCT", "0.6");
    env::set_var("CURATOR_RATE_ALIGNMENT_EPS", "not-a-number");

    let from_env = load_config_from_env();
    assert_eq!(from_env.liquidity_stress_pct, Some(0.6));
    assert_eq!(from_env.rate_alignment_eps, None);

    let config = resolve_config(Some(file.path())).unwrap();
    assert_eq!(config.min_tvl_usd, 50_000.0);
    assert_eq!(config.liquidity_stress_pct, 0.6);
    assert_eq!(config.rate_alignment_eps, CuratorConfig::default().rate_alignment_eps);

    env::remove_var("CURATOR_LIQUIDITY_STRESS_PCT");
    env::remove_var("CURATOR_RATE_ALIGNMENT_EPS");
}

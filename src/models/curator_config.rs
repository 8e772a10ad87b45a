use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_VERSION: &str = "curator-v1";

pub const DEFAULT_UTILIZATION_CEILING: f64 = 0.9;
pub const DEFAULT_MAX_UTILIZATION_BEYOND: f64 = 1.1;
pub const DEFAULT_PRICE_STRESS_PCT: f64 = 0.3;
pub const DEFAULT_LIQUIDITY_STRESS_PCT: f64 = 0.5;
pub const DEFAULT_WITHDRAWAL_LIQUIDITY_MIN_PCT: f64 = 0.1;
pub const DEFAULT_INSOLVENCY_TOLERANCE_PCT_TVL: f64 = 0.01;
pub const DEFAULT_MIN_TVL_USD: f64 = 10_000.0;
pub const DEFAULT_FALLBACK_BENCHMARK_RATE: f64 = 0.05;
pub const DEFAULT_RATE_ALIGNMENT_EPS: f64 = 0.05;
pub const DEFAULT_RATE_ALIGNMENT_HIGH_YIELD_BUFFER: f64 = 0.01;
pub const DEFAULT_RATE_ALIGNMENT_HIGH_YIELD_EPS: f64 = 0.01;

pub const DEFAULT_WEIGHTS: ScoringWeights = ScoringWeights {
    utilization: 0.2,
    rate_alignment: 0.2,
    stress_exposure: 0.3,
    withdrawal_liquidity: 0.15,
    liquidation_capacity: 0.15,
};

/// Relative importance of the five sub-scores. Sums to 1 once resolved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringWeights {
    pub utilization: f64,
    pub rate_alignment: f64,
    pub stress_exposure: f64,
    pub withdrawal_liquidity: f64,
    pub liquidation_capacity: f64,
}

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.utilization
            + self.rate_alignment
            + self.stress_exposure
            + self.withdrawal_liquidity
            + self.liquidation_capacity
    }

    /// Divide every weight by `divisor`
    pub fn scaled_by(&self, divisor: f64) -> Self {
        Self {
            utilization: self.utilization / divisor,
            rate_alignment: self.rate_alignment / divisor,
            stress_exposure: self.stress_exposure / divisor,
            withdrawal_liquidity: self.withdrawal_liquidity / divisor,
            liquidation_capacity: self.liquidation_capacity / divisor,
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

/// Resolved curator configuration used by the rating engine.
///
/// Percentage-like fields are decimals in `[0, 1]` (0.3 = 30%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuratorConfig {
    pub version: String,
    /// Utilization at or below which the utilization score is perfect
    pub utilization_ceiling: f64,
    /// Utilization above which the utilization score is zero
    pub max_utilization_beyond: f64,
    /// Collateral price shock applied in the stress scenario
    pub price_stress_pct: f64,
    /// Share of available liquidity assumed gone under stress
    pub liquidity_stress_pct: f64,
    pub withdrawal_liquidity_min_pct: f64,
    /// Insolvency, as a share of TVL, tolerated for markets under $50M
    pub insolvency_tolerance_pct_tvl: f64,
    pub min_tvl_usd: f64,
    pub fallback_benchmark_rate: f64,
    pub rate_alignment_eps: f64,
    pub rate_alignment_high_yield_buffer: f64,
    pub rate_alignment_high_yield_eps: f64,
    pub weights: ScoringWeights,
}

impl Default for CuratorConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_CONFIG_VERSION.to_string(),
            utilization_ceiling: DEFAULT_UTILIZATION_CEILING,
            max_utilization_beyond: DEFAULT_MAX_UTILIZATION_BEYOND,
            price_stress_pct: DEFAULT_PRICE_STRESS_PCT,
            liquidity_stress_pct: DEFAULT_LIQUIDITY_STRESS_PCT,
            withdrawal_liquidity_min_pct: DEFAULT_WITHDRAWAL_LIQUIDITY_MIN_PCT,
            insolvency_tolerance_pct_tvl: DEFAULT_INSOLVENCY_TOLERANCE_PCT_TVL,
            min_tvl_usd: DEFAULT_MIN_TVL_USD,
            fallback_benchmark_rate: DEFAULT_FALLBACK_BENCHMARK_RATE,
            rate_alignment_eps: DEFAULT_RATE_ALIGNMENT_EPS,
            rate_alignment_high_yield_buffer: DEFAULT_RATE_ALIGNMENT_HIGH_YIELD_BUFFER,
            rate_alignment_high_yield_eps: DEFAULT_RATE_ALIGNMENT_HIGH_YIELD_EPS,
            weights: DEFAULT_WEIGHTS,
        }
    }
}

/// Partial weight set; only the supplied keys replace defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightOverrides {
    pub utilization: Option<f64>,
    pub rate_alignment: Option<f64>,
    pub stress_exposure: Option<f64>,
    pub withdrawal_liquidity: Option<f64>,
    pub liquidation_capacity: Option<f64>,
}

impl WeightOverrides {
    /// Fields present in `other` win
    pub fn overlay(self, other: WeightOverrides) -> Self {
        Self {
            utilization: other.utilization.or(self.utilization),
            rate_alignment: other.rate_alignment.or(self.rate_alignment),
            stress_exposure: other.stress_exposure.or(self.stress_exposure),
            withdrawal_liquidity: other.withdrawal_liquidity.or(self.withdrawal_liquidity),
            liquidation_capacity: other.liquidation_capacity.or(self.liquidation_capacity),
        }
    }
}

/// Caller-supplied partial configuration. Absent fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CuratorConfigOverrides {
    pub version: Option<String>,
    pub utilization_ceiling: Option<f64>,
    pub max_utilization_beyond: Option<f64>,
    pub price_stress_pct: Option<f64>,
    pub liquidity_stress_pct: Option<f64>,
    pub withdrawal_liquidity_min_pct: Option<f64>,
    pub insolvency_tolerance_pct_tvl: Option<f64>,
    pub min_tvl_usd: Option<f64>,
    pub fallback_benchmark_rate: Option<f64>,
    pub rate_alignment_eps: Option<f64>,
    pub rate_alignment_high_yield_buffer: Option<f64>,
    pub rate_alignment_high_yield_eps: Option<f64>,
    pub weights: Option<WeightOverrides>,
}

impl CuratorConfigOverrides {
    /// Layer `other` on top of `self`; fields present in `other` win
    pub fn overlay(self, other: CuratorConfigOverrides) -> Self {
        let weights = match (self.weights, other.weights) {
            (Some(base), Some(top)) => Some(base.overlay(top)),
            (base, top) => top.or(base),
        };

        Self {
            version: other.version.or(self.version),
            utilization_ceiling: other.utilization_ceiling.or(self.utilization_ceiling),
            max_utilization_beyond: other.max_utilization_beyond.or(self.max_utilization_beyond),
            price_stress_pct: other.price_stress_pct.or(self.price_stress_pct),
            liquidity_stress_pct: other.liquidity_stress_pct.or(self.liquidity_stress_pct),
            withdrawal_liquidity_min_pct: other
                .withdrawal_liquidity_min_pct
                .or(self.withdrawal_liquidity_min_pct),
            insolvency_tolerance_pct_tvl: other
                .insolvency_tolerance_pct_tvl
                .or(self.insolvency_tolerance_pct_tvl),
            min_tvl_usd: other.min_tvl_usd.or(self.min_tvl_usd),
            fallback_benchmark_rate: other.fallback_benchmark_rate.or(self.fallback_benchmark_rate),
            rate_alignment_eps: other.rate_alignment_eps.or(self.rate_alignment_eps),
            rate_alignment_high_yield_buffer: other
                .rate_alignment_high_yield_buffer
                .or(self.rate_alignment_high_yield_buffer),
            rate_alignment_high_yield_eps: other
                .rate_alignment_high_yield_eps
                .or(self.rate_alignment_high_yield_eps),
            weights,
        }
    }
}

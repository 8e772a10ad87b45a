use serde::{Deserialize, Serialize};

use crate::models::{MarketState, ScoringWeights};

/// Risk metrics computed for one market. Sub-scores are in `[0, 1]`, higher is safer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketMetrics {
    pub id: String,
    pub symbol: String,
    pub collateral_symbol: String,
    pub tvl_usd: f64,
    pub utilization_score: f64,
    pub rate_alignment_score: f64,
    pub stress_exposure_score: f64,
    pub withdrawal_liquidity_score: f64,
    pub liquidation_capacity_score: f64,
    pub effective_weights: ScoringWeights,
    /// 0-100, `None` when TVL is below the configured minimum
    pub rating: Option<u8>,
    pub insufficient_tvl: bool,
    pub min_tvl_threshold_hit: bool,
    pub raw: MarketState,
    pub config_version: String,
}

impl MarketMetrics {
    /// Weighted sum of the sub-scores in `[0, 1]`, regardless of the TVL gate
    pub fn weighted_score(&self) -> f64 {
        let w = &self.effective_weights;
        self.utilization_score * w.utilization
            + self.rate_alignment_score * w.rate_alignment
            + self.stress_exposure_score * w.stress_exposure
            + self.withdrawal_liquidity_score * w.withdrawal_liquidity
            + self.liquidation_capacity_score * w.liquidation_capacity
    }
}

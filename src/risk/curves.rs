// Scale-dependent tolerance and soft scoring curves
use crate::utils::math::{lerp_through, normalize01};

/// Markets at or above this TVL get scaled tolerance and soft curves
pub const LARGE_MARKET_TVL_USD: f64 = 50_000_000.0;

// Tolerance anchor points for large markets (TVL, insolvency share of TVL)
const TOLERANCE_AT_LARGE: (f64, f64) = (LARGE_MARKET_TVL_USD, 0.05);
const TOLERANCE_AT_500M: (f64, f64) = (500_000_000.0, 0.20);
const TOLERANCE_AT_2B: (f64, f64) = (2_000_000_000.0, 0.35);
const MAX_SCALED_TOLERANCE: f64 = 0.5;

// Exposure ratio up to which the stress penalty stays mild
const SOFT_KNEE: f64 = 0.8;
const SCORE_AT_KNEE: f64 = 0.75;
const DECAY_PAST_KNEE: f64 = 5.0;

const LARGE_MARKET_COVERAGE_EXPONENT: f64 = 0.6;

pub fn is_large_market(tvl_usd: f64) -> bool {
    tvl_usd >= LARGE_MARKET_TVL_USD
}

/// Insolvency tolerance (share of TVL) for a market of the given size.
///
/// Below $50M the configured base applies. From $50M it rises linearly through
/// 20% at $500M and 35% at $2B, keeps that slope beyond and is capped at 50%.
/// Never drops below the configured base. The step from base to 5% at $50M is
/// a discontinuity, not a ramp.
pub fn scaled_insolvency_tolerance(tvl_usd: f64, base_tolerance: f64) -> f64 {
    if !is_large_market(tvl_usd) {
        return base_tolerance;
    }

    let scaled = if tvl_usd <= TOLERANCE_AT_500M.0 {
        let (x0, y0) = TOLERANCE_AT_LARGE;
        let (x1, y1) = TOLERANCE_AT_500M;
        lerp_through(tvl_usd, x0, y0, x1, y1)
    } else {
        let (x0, y0) = TOLERANCE_AT_500M;
        let (x1, y1) = TOLERANCE_AT_2B;
        lerp_through(tvl_usd, x0, y0, x1, y1).min(MAX_SCALED_TOLERANCE)
    };

    scaled.max(base_tolerance)
}

/// Score for an exposure expressed as a multiple of the tolerated exposure.
///
/// Cubic and shallow up to 0.8x tolerance (0.75 at the knee), exponential decay
/// past it. Monotonically non-increasing, 1 at zero exposure, never exactly 0.
pub fn soft_exposure_curve(exposure_ratio: f64) -> f64 {
    if exposure_ratio.is_nan() {
        return 0.0;
    }
    if exposure_ratio <= 0.0 {
        return 1.0;
    }

    let score = if exposure_ratio <= SOFT_KNEE {
        1.0 - (1.0 - SCORE_AT_KNEE) * (exposure_ratio / SOFT_KNEE).powi(3)
    } else {
        SCORE_AT_KNEE * (-DECAY_PAST_KNEE * (exposure_ratio - SOFT_KNEE)).exp()
    };

    normalize01(score)
}

/// Score for the share of stressed insolvency that liquidators can absorb.
///
/// Large markets are credited above proportional coverage; smaller ones score
/// coverage linearly.
pub fn coverage_curve(coverage: f64, large_market: bool) -> f64 {
    let coverage = normalize01(coverage);
    if large_market {
        coverage.powf(LARGE_MARKET_COVERAGE_EXPONENT)
    } else {
        coverage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_market_uses_base_tolerance() {
        assert_eq!(scaled_insolvency_tolerance(10_000_000.0, 0.01), 0.01);
        assert_eq!(scaled_insolvency_tolerance(49_999_999.0, 0.02), 0.02);
    }

    #[test]
    fn test_tolerance_anchor_points() {
        assert!((scaled_insolvency_tolerance(50_000_000.0, 0.01) - 0.05).abs() < 1e-9);
        assert!((scaled_insolvency_tolerance(500_000_000.0, 0.01) - 0.20).abs() < 1e-9);
        assert!((scaled_insolvency_tolerance(2_000_000_000.0, 0.01) - 0.35).abs() < 1e-9);
        assert_eq!(scaled_insolvency_tolerance(100_000_000_000.0, 0.01), MAX_SCALED_TOLERANCE);
    }

    #[test]
    fn test_tolerance_steps_up_at_large_market_boundary() {
        // 2% insolvency: well past tolerance just under $50M, comfortable at $50M
        let below = scaled_insolvency_tolerance(49_990_000.0, 0.01);
        let at = scaled_insolvency_tolerance(LARGE_MARKET_TVL_USD, 0.01);
        assert_eq!(below, 0.01);
        assert!((at - 0.05).abs() < 1e-9);

        let small_score = soft_exposure_curve(0.02 / below);
        let large_score = soft_exposure_curve(0.02 / at);
        assert!(small_score < 0.01);
        assert!(large_score > 0.95);
        assert!(large_score - small_score > 0.9);
    }

    #[test]
    fn test_tolerance_never_below_base() {
        assert_eq!(scaled_insolvency_tolerance(60_000_000.0, 0.3), 0.3);
    }

    #[test]
    fn test_soft_curve_shape() {
        assert_eq!(soft_exposure_curve(0.0), 1.0);
        assert!(soft_exposure_curve(0.3) > 0.98);
        assert!(soft_exposure_curve(0.8) > 0.7);
        assert!(soft_exposure_curve(1.0) < 0.3);
        assert!(soft_exposure_curve(3.0) < 0.01);
        assert!(soft_exposure_curve(3.0) > 0.0);
        assert_eq!(soft_exposure_curve(f64::NAN), 0.0);
        assert_eq!(soft_exposure_curve(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_soft_curve_is_monotonic() {
        let mut previous = soft_exposure_curve(0.0);
        for step in 1..400 {
            let current = soft_exposure_curve(step as f64 * 0.01);
            assert!(current <= previous, "curve rose at ratio {}", step as f64 * 0.01);
            previous = current;
        }
    }

    #[test]
    fn test_coverage_curve() {
        let large = coverage_curve(0.3, true);
        assert!(large > 0.25 && large < 0.6);
        assert!((coverage_curve(0.3, false) - 0.3).abs() < 1e-12);
        assert_eq!(coverage_curve(1.5, true), 1.0);
        assert_eq!(coverage_curve(f64::NAN, false), 0.0);
    }
}

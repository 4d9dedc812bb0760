//! Recommendation Synthesizer
//!
//! Produces a templated trading verdict for an asset. This is a stochastic
//! template, not market analysis:
//!
//! ```text
//!   r ∈ [0,1)     0.0 ──── 0.3 ──── 0.4 ──── 0.6 ──── 0.7 ──── 1.0
//!   action            Sell  │  Hold         │  Buy
//!   risk              High           │ Medium        │  Low
//! ```
//!
//! Action and risk come from the same draw, so every Buy above 0.7 is
//! Low risk and every Sell is High risk. Target and stop prices ignore the
//! action: a Sell can still carry a target above the current price.

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{Asset, PRICE_SCALE};

/// Suggested trading action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Buy,
    Hold,
    Sell,
}

impl Action {
    /// Map a uniform draw in `[0, 1)` to an action
    pub fn from_draw(r: f64) -> Self {
        if r > 0.6 {
            Self::Buy
        } else if r > 0.3 {
            Self::Hold
        } else {
            Self::Sell
        }
    }

    /// Reasoning pool the two bullets are drawn from
    pub const fn reasoning_pool(self) -> [&'static str; 4] {
        match self {
            Self::Buy => [
                "Positive market sentiment",
                "Strong technical indicators",
                "Bullish trend formation",
                "Increasing trading volume",
            ],
            Self::Sell => [
                "Overbought conditions",
                "Bearish divergence detected",
                "Resistance level reached",
                "Decreasing market interest",
            ],
            Self::Hold => [
                "Market in consolidation phase",
                "Mixed technical signals",
                "Waiting for clearer direction",
                "Neutral trading volume",
            ],
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "Buy"),
            Self::Hold => write!(f, "Hold"),
            Self::Sell => write!(f, "Sell"),
        }
    }
}

/// Risk attached to a recommendation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Map the same uniform draw used for the action to a risk tier
    pub fn from_draw(r: f64) -> Self {
        if r > 0.7 {
            Self::Low
        } else if r > 0.4 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// A trading recommendation for one asset
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Recommendation {
    pub asset: Asset,

    pub action: Action,

    /// Confidence percentage in `[70, 99]`
    pub confidence_pct: u8,

    pub risk_level: RiskLevel,

    /// Base price × `1 + U(-5%, 20%)`
    pub target_price: Decimal,

    /// Base price × `1 - U(0%, 10%)`
    pub stop_loss: Decimal,

    /// Two distinct bullets from the action's reasoning pool
    pub reasoning: [String; 2],
}

/// Synthesize a recommendation from the asset's baseline price
pub fn synthesize<R: Rng + ?Sized>(asset: &Asset, rng: &mut R) -> Recommendation {
    let r: f64 = rng.gen_range(0.0..1.0);
    let action = Action::from_draw(r);
    let risk_level = RiskLevel::from_draw(r);
    let confidence_pct = rng.gen_range(70..=99);

    let target_factor = 1.0 + rng.gen_range(-0.05..0.20);
    let stop_factor = 1.0 - rng.gen_range(0.0..0.10);

    let mut pool = action.reasoning_pool();
    pool.shuffle(rng);

    let recommendation = Recommendation {
        asset: asset.clone(),
        action,
        confidence_pct,
        risk_level,
        target_price: scale(asset.base_price, target_factor),
        stop_loss: scale(asset.base_price, stop_factor),
        reasoning: [pool[0].to_string(), pool[1].to_string()],
    };

    tracing::debug!(
        asset = %asset.id,
        action = %recommendation.action,
        confidence = recommendation.confidence_pct,
        "Synthesized recommendation"
    );

    recommendation
}

fn scale(price: Decimal, factor: f64) -> Decimal {
    (price * Decimal::from_f64_retain(factor).unwrap_or(Decimal::ONE)).round_dp(PRICE_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal_macros::dec;

    #[test]
    fn test_action_thresholds() {
        assert_eq!(Action::from_draw(0.0), Action::Sell);
        assert_eq!(Action::from_draw(0.3), Action::Sell);
        assert_eq!(Action::from_draw(0.31), Action::Hold);
        assert_eq!(Action::from_draw(0.6), Action::Hold);
        assert_eq!(Action::from_draw(0.61), Action::Buy);
        assert_eq!(Action::from_draw(0.999), Action::Buy);
    }

    #[test]
    fn test_risk_thresholds() {
        assert_eq!(RiskLevel::from_draw(0.4), RiskLevel::High);
        assert_eq!(RiskLevel::from_draw(0.41), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_draw(0.7), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_draw(0.71), RiskLevel::Low);
    }

    #[test]
    fn test_shared_draw_coupling() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..1000 {
            let r: f64 = rng.gen_range(0.0..1.0);
            match (Action::from_draw(r), RiskLevel::from_draw(r)) {
                (Action::Sell, risk) => assert_eq!(risk, RiskLevel::High),
                (Action::Hold, risk) => assert_ne!(risk, RiskLevel::Low),
                (Action::Buy, risk) => assert_ne!(risk, RiskLevel::High),
            }
        }
    }

    #[test]
    fn test_synthesize_invariants() {
        let catalog = Catalog::builtin();
        let mut rng = StdRng::seed_from_u64(2024);

        for asset in catalog.list_all() {
            for _ in 0..100 {
                let rec = synthesize(asset, &mut rng);
                assert!((70..=99).contains(&rec.confidence_pct));
                assert_ne!(rec.reasoning[0], rec.reasoning[1]);

                let pool = rec.action.reasoning_pool();
                assert!(rec.reasoning.iter().all(|r| pool.contains(&r.as_str())));

                match rec.action {
                    Action::Sell => assert_eq!(rec.risk_level, RiskLevel::High),
                    Action::Hold => assert_ne!(rec.risk_level, RiskLevel::Low),
                    Action::Buy => assert_ne!(rec.risk_level, RiskLevel::High),
                }

                let base = asset.base_price;
                assert!(rec.target_price >= base * dec!(0.95) - dec!(0.0000000001));
                assert!(rec.target_price <= base * dec!(1.20));
                assert!(rec.stop_loss > base * dec!(0.90) - dec!(0.0000000001));
                assert!(rec.stop_loss <= base);
            }
        }
    }

    #[test]
    fn test_seeded_synthesis_is_reproducible() {
        let catalog = Catalog::builtin();
        let sol = catalog.get("solana").unwrap();

        let a = synthesize(sol, &mut StdRng::seed_from_u64(5));
        let b = synthesize(sol, &mut StdRng::seed_from_u64(5));
        assert_eq!(a.action, b.action);
        assert_eq!(a.confidence_pct, b.confidence_pct);
        assert_eq!(a.target_price, b.target_price);
        assert_eq!(a.reasoning, b.reasoning);
    }

    #[test]
    fn test_all_actions_reachable() {
        let catalog = Catalog::builtin();
        let btc = catalog.get("bitcoin").unwrap();
        let mut rng = StdRng::seed_from_u64(8);

        let actions: Vec<_> = (0..200).map(|_| synthesize(btc, &mut rng).action).collect();
        for expected in [Action::Buy, Action::Hold, Action::Sell] {
            assert!(actions.contains(&expected));
        }
    }
}

//! Technical Indicators
//!
//! Simulated RSI, MACD and Bollinger readings with an RSI-derived hint.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::Asset;
use crate::recommend::Action;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MacdSignal {
    Bullish,
    Bearish,
}

/// Band the price currently sits in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BollingerBand {
    Upper,
    Middle,
    Lower,
}

/// Action suggested by the RSI reading alone
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsiSignal {
    pub action: Action,
    pub reasoning: String,
}

impl RsiSignal {
    /// Below 30 is oversold, above 70 overbought
    pub fn from_rsi(rsi: u8) -> Self {
        let (action, reasoning) = match rsi {
            0..30 => (Action::Buy, "RSI shows oversold conditions"),
            71.. => (Action::Sell, "RSI shows overbought conditions"),
            _ => (Action::Hold, "RSI shows neutral market conditions"),
        };
        Self {
            action,
            reasoning: reasoning.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TechnicalIndicators {
    pub asset: Asset,

    /// Relative strength index in `[0, 99]`
    pub rsi: u8,

    pub macd: MacdSignal,

    pub bollinger_band: BollingerBand,

    pub signal: RsiSignal,
}

/// Draw a fresh set of indicator readings
pub fn sample<R: Rng + ?Sized>(asset: &Asset, rng: &mut R) -> TechnicalIndicators {
    let rsi = rng.gen_range(0..100);
    let macd = if rng.gen_bool(0.5) {
        MacdSignal::Bullish
    } else {
        MacdSignal::Bearish
    };
    let bollinger_band = if rng.gen_bool(0.5) {
        BollingerBand::Upper
    } else if rng.gen_bool(0.5) {
        BollingerBand::Middle
    } else {
        BollingerBand::Lower
    };

    TechnicalIndicators {
        asset: asset.clone(),
        rsi,
        macd,
        bollinger_band,
        signal: RsiSignal::from_rsi(rsi),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_rsi_signal_thresholds() {
        assert_eq!(RsiSignal::from_rsi(0).action, Action::Buy);
        assert_eq!(RsiSignal::from_rsi(29).action, Action::Buy);
        assert_eq!(RsiSignal::from_rsi(30).action, Action::Hold);
        assert_eq!(RsiSignal::from_rsi(70).action, Action::Hold);
        assert_eq!(RsiSignal::from_rsi(71).action, Action::Sell);
        assert_eq!(
            RsiSignal::from_rsi(99).reasoning,
            "RSI shows overbought conditions"
        );
    }

    #[test]
    fn test_sample_bounds() {
        let catalog = Catalog::builtin();
        let eth = catalog.get("ethereum").unwrap();
        let mut rng = StdRng::seed_from_u64(17);

        let mut bands = Vec::new();
        for _ in 0..300 {
            let ind = sample(eth, &mut rng);
            assert!(ind.rsi < 100);
            assert_eq!(ind.signal, RsiSignal::from_rsi(ind.rsi));
            bands.push(ind.bollinger_band);
        }
        for band in [BollingerBand::Upper, BollingerBand::Middle, BollingerBand::Lower] {
            assert!(bands.contains(&band));
        }
    }
}

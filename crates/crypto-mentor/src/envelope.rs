//! Response Envelope
//!
//! The only contract surface toward the presentation layer. Each chat turn
//! resolves to an [`Outcome`], which [`format`] maps onto exactly one
//! envelope shape:
//!
//! | outcome          | envelope         | text                                         |
//! |------------------|------------------|----------------------------------------------|
//! | `Deflected`      | `message`        | out-of-domain deflection                     |
//! | `Answer`         | `message`        | canned answer                                |
//! | `Prices`         | `price`          | "Here are the current cryptocurrency prices:" |
//! | `Chart`          | `chart`          | "Here's the current chart for {name}:"       |
//! | `Recommendation` | `recommendation` | "Here's my trading recommendation for {name}:" |
//! | `Failed`         | `message` (error)| generic error                                |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::knowledge::{ERROR_MESSAGE, OUT_OF_DOMAIN_MESSAGE, WELCOME_MESSAGE};
use crate::model::{Asset, AssetId, ChartPoint, MarketSnapshot, Trend};
use crate::recommend::Recommendation;

/// What a chat turn resolved to, before formatting
#[derive(Clone, Debug)]
pub enum Outcome {
    Deflected,
    Answer(&'static str),
    Prices {
        focus: Option<AssetId>,
        snapshots: Vec<MarketSnapshot>,
    },
    Chart {
        asset: Asset,
        days: u32,
        points: Vec<ChartPoint>,
    },
    Recommendation(Recommendation),
    Failed,
}

/// Plain assistant text
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlainMessage {
    pub id: Uuid,
    pub text: String,
    pub is_error: bool,
    pub timestamp: DateTime<Utc>,
}

impl PlainMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            is_error: false,
            timestamp: Utc::now(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::new(text)
        }
    }
}

/// Tagged response consumed by the chat UI
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseEnvelope {
    Message(PlainMessage),

    Price {
        text: String,
        /// Asset the user named, if any
        focus: Option<AssetId>,
        snapshots: Vec<MarketSnapshot>,
    },

    Chart {
        text: String,
        asset: Asset,
        days: u32,
        trend: Option<Trend>,
        points: Vec<ChartPoint>,
    },

    Recommendation {
        text: String,
        recommendation: Recommendation,
    },
}

impl ResponseEnvelope {
    /// Greeting shown before the first user turn
    pub fn welcome() -> Self {
        Self::Message(PlainMessage::new(WELCOME_MESSAGE))
    }

    /// User-facing line of text
    pub fn text(&self) -> &str {
        match self {
            Self::Message(msg) => &msg.text,
            Self::Price { text, .. }
            | Self::Chart { text, .. }
            | Self::Recommendation { text, .. } => text,
        }
    }

    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Message(PlainMessage { is_error: true, .. }))
    }

    /// Value of the serialized `type` tag
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Message(_) => "message",
            Self::Price { .. } => "price",
            Self::Chart { .. } => "chart",
            Self::Recommendation { .. } => "recommendation",
        }
    }
}

/// Map an outcome to its envelope
pub fn format(outcome: Outcome) -> ResponseEnvelope {
    match outcome {
        Outcome::Deflected => ResponseEnvelope::Message(PlainMessage::new(OUT_OF_DOMAIN_MESSAGE)),
        Outcome::Answer(text) => ResponseEnvelope::Message(PlainMessage::new(text)),
        Outcome::Prices { focus, snapshots } => ResponseEnvelope::Price {
            text: "Here are the current cryptocurrency prices:".into(),
            focus,
            snapshots,
        },
        Outcome::Chart { asset, days, points } => ResponseEnvelope::Chart {
            text: format!("Here's the current chart for {}:", asset.name),
            trend: Trend::of(&points),
            asset,
            days,
            points,
        },
        Outcome::Recommendation(recommendation) => ResponseEnvelope::Recommendation {
            text: format!(
                "Here's my trading recommendation for {}:",
                recommendation.asset.name
            ),
            recommendation,
        },
        Outcome::Failed => ResponseEnvelope::Message(PlainMessage::error(ERROR_MESSAGE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::recommend::synthesize;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deflection_and_failure() {
        let deflected = format(Outcome::Deflected);
        assert_eq!(deflected.kind(), "message");
        assert_eq!(deflected.text(), OUT_OF_DOMAIN_MESSAGE);
        assert!(!deflected.is_error());

        let failed = format(Outcome::Failed);
        assert!(failed.is_error());
        assert_eq!(failed.text(), ERROR_MESSAGE);
    }

    #[test]
    fn test_chart_text_uses_display_name() {
        let catalog = Catalog::builtin();
        let asset = catalog.get("shiba-inu").unwrap().clone();
        let points = vec![
            ChartPoint { timestamp: 0, price: dec!(10) },
            ChartPoint { timestamp: 1, price: dec!(12) },
        ];

        let env = format(Outcome::Chart { asset, days: 7, points });
        assert_eq!(env.text(), "Here's the current chart for Shiba Inu:");
        match env {
            ResponseEnvelope::Chart { trend, days, .. } => {
                assert_eq!(trend, Some(Trend::Up));
                assert_eq!(days, 7);
            }
            other => panic!("expected chart, got {}", other.kind()),
        }
    }

    #[test]
    fn test_recommendation_text() {
        let catalog = Catalog::builtin();
        let rec = synthesize(catalog.get("solana").unwrap(), &mut StdRng::seed_from_u64(1));
        let env = format(Outcome::Recommendation(rec));
        assert_eq!(env.text(), "Here's my trading recommendation for Solana:");
    }

    #[test]
    fn test_serialized_tag() {
        let env = format(Outcome::Prices { focus: Some("ethereum".into()), snapshots: Vec::new() });
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["type"], "price");
        assert_eq!(json["focus"], "ethereum");

        let json = serde_json::to_value(format(Outcome::Answer("hi"))).unwrap();
        assert_eq!(json["type"], "message");
        assert_eq!(json["text"], "hi");
        assert_eq!(json["is_error"], false);
    }

    #[test]
    fn test_welcome() {
        assert_eq!(ResponseEnvelope::welcome().text(), WELCOME_MESSAGE);
    }
}

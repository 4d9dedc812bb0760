//! # crypto-mentor
//!
//! Conversational core of a crypto trading assistant. A chat message is
//! classified, answered from a synthetic market feed, a recommendation
//! template or canned knowledge, and returned as a tagged envelope the UI
//! renders directly.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  "Should I buy Solana?"                                          │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  intent     domain gate ✓  rule: recommendation  asset: solana   │
//! │  mentor     recommend::synthesize(solana)                        │
//! │  envelope   { "type": "recommendation",                          │
//! │               "text": "Here's my trading recommendation for      │
//! │                        Solana:", "recommendation": { ... } }     │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices, charts, recommendations and indicators are all simulated.
//! Nothing here is financial advice.

pub mod catalog;
pub mod config;
pub mod envelope;
pub mod error;
pub mod feed;
pub mod indicators;
pub mod intent;
pub mod knowledge;
pub mod mentor;
pub mod model;
pub mod recommend;
pub mod retry;

pub use catalog::Catalog;
pub use config::MentorConfig;
pub use envelope::{PlainMessage, ResponseEnvelope};
pub use error::{MentorError, Result};
pub use feed::{MarketFeed, SyntheticFeed};
pub use indicators::TechnicalIndicators;
pub use intent::{Intent, classify};
pub use mentor::Mentor;
pub use model::{Asset, AssetId, ChartPoint, ChartRange, MarketSnapshot, Trend};
pub use recommend::{Action, Recommendation, RiskLevel};
pub use retry::RetryPolicy;

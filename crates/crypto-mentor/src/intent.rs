//! Intent Classifier
//!
//! Maps a raw chat message to what the user wants. Single pass over two
//! ordered rule tables:
//!
//! ```text
//!  message ──► domain gate ──no──► OutOfDomain
//!                  │yes
//!                  ▼
//!            INTENT_RULES (first hit wins)
//!              price ─► chart ─► recommendation ─► Informational
//! ```
//!
//! The domain gate runs before anything else, so a bare greeting such as
//! "hello" is out of domain.

use serde::Serialize;

use crate::catalog::{Catalog, DEFAULT_ASSET};
use crate::model::AssetId;

/// Terms that mark a message as crypto or trading related
pub const DOMAIN_KEYWORDS: &[&str] = &[
    "crypto", "bitcoin", "btc", "ethereum", "eth", "blockchain", "token", "coin",
    "wallet", "mining", "defi", "nft", "altcoin", "binance", "exchange", "trading",
    "market", "price", "chart", "analysis", "buy", "sell", "hold", "bull", "bear",
    "trend", "volume", "indicator", "rsi", "macd", "volatility", "leverage", "yield",
    "stake", "liquidity", "smartcontract", "dex", "cex", "hodl", "whale", "dapp",
    "gas", "gwei", "satoshi", "block", "hash", "transaction", "ledger", "fork",
    "cardano", "solana", "ripple", "xrp", "litecoin", "ltc", "dogecoin", "doge",
    "shiba", "polkadot", "dot", "chainlink", "link", "stellar", "xlm", "tron", "trx",
    "uniswap", "pancakeswap", "metamask", "cold wallet", "hot wallet", "air drop",
    "ico", "ido", "ieo", "token sale", "whitepaper", "roadmap", "stablecoin",
    "tether", "usdt", "usdc", "dai", "pump", "dump", "fomo", "fud",
];

/// Routable request kinds, in the order they are tested
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntentKind {
    Price,
    Chart,
    Recommendation,
}

/// Priority-ordered routing table
pub const INTENT_RULES: &[(IntentKind, &[&str])] = &[
    (IntentKind::Price, &["price", "value", "worth", "top", "list"]),
    (IntentKind::Chart, &["chart", "graph", "trend"]),
    (
        IntentKind::Recommendation,
        &["recommend", "should i buy", "should i sell", "analysis", "advice"],
    ),
];

/// Classified purpose of a user message
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Intent {
    /// Not about crypto or trading
    OutOfDomain,

    /// Price listing; `asset` is set when the message names one
    Price { asset: Option<AssetId> },

    Chart { asset: AssetId },

    Recommendation { asset: AssetId },

    /// Anything else in-domain, answered from the canned knowledge table
    Informational { raw: String },
}

impl Intent {
    /// Short label for logs
    pub const fn label(&self) -> &'static str {
        match self {
            Self::OutOfDomain => "out_of_domain",
            Self::Price { .. } => "price",
            Self::Chart { .. } => "chart",
            Self::Recommendation { .. } => "recommendation",
            Self::Informational { .. } => "informational",
        }
    }
}

/// Domain gate over an already-lowercased message
pub fn is_in_domain(lowered: &str) -> bool {
    DOMAIN_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

/// First routing rule whose keywords occur in an already-lowercased message
pub fn match_rule(lowered: &str) -> Option<IntentKind> {
    INTENT_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|(kind, _)| *kind)
}

/// Classify a message. Never fails; unmatched input ends as `Informational`.
pub fn classify(catalog: &Catalog, text: &str) -> Intent {
    let lowered = text.to_lowercase();

    if !is_in_domain(&lowered) {
        return Intent::OutOfDomain;
    }

    let mentioned = || catalog.resolve_alias(&lowered).map(|a| a.id.clone());
    let or_default = || mentioned().unwrap_or_else(|| AssetId::from(DEFAULT_ASSET));

    let intent = match match_rule(&lowered) {
        Some(IntentKind::Price) => Intent::Price { asset: mentioned() },
        Some(IntentKind::Chart) => Intent::Chart { asset: or_default() },
        Some(IntentKind::Recommendation) => Intent::Recommendation { asset: or_default() },
        None => Intent::Informational { raw: text.to_string() },
    };

    tracing::debug!(intent = intent.label(), "Classified message");
    intent
}

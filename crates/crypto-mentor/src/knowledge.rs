//! Canned Knowledge
//!
//! Fixed answers for in-domain questions that are not price, chart or
//! recommendation requests.

/// First message shown when a chat opens
pub const WELCOME_MESSAGE: &str =
    "Hello! How can I help you? I am an AI agent specializing in cryptocurrencies and trading.";

/// Reply for messages outside crypto and trading
pub const OUT_OF_DOMAIN_MESSAGE: &str = "I'm designed to help with cryptocurrency and trading only. Let me know if you need help with crypto!";

/// Reply when a request fails after classification
pub const ERROR_MESSAGE: &str =
    "I encountered an error. Please try again with a different crypto question.";

/// Answer table keyed by topic
pub const ANSWERS: &[(&str, &str)] = &[
    (
        "greeting",
        "Hello! I'm your crypto trading assistant. How can I help you today?",
    ),
    (
        "bitcoin",
        "Bitcoin (BTC) is the first cryptocurrency, created in 2009 by Satoshi Nakamoto. It's a decentralized digital currency that operates without central authority.",
    ),
    (
        "ethereum",
        "Ethereum (ETH) is a blockchain platform for smart contracts and dApps. It's the second-largest cryptocurrency by market cap and powers most of DeFi.",
    ),
    (
        "blockchain",
        "Blockchain is a distributed digital ledger that records transactions securely across many computers. It's the technology behind cryptocurrencies.",
    ),
    (
        "defi",
        "DeFi (Decentralized Finance) refers to financial applications built on blockchain technology without central authorities. Includes exchanges, lending platforms, and more.",
    ),
    (
        "nft",
        "NFTs (Non-Fungible Tokens) are unique digital assets that represent ownership of specific items on the blockchain. Used for digital art, collectibles, music, and gaming.",
    ),
    (
        "investment",
        "Crypto investment tip: Diversify across established coins (60-70%), mid-caps (20-30%), and smaller projects (5-10%). Do your research and consider dollar-cost averaging.",
    ),
    (
        "security",
        "Crypto security tips: Research projects thoroughly, be skeptical of guaranteed returns, use hardware wallets, enable 2FA, never share private keys, and watch for unexpected airdrops.",
    ),
    (
        "market_cycle",
        "Crypto markets cycle through accumulation, markup (bull), distribution, and markdown (bear) phases. These cycles are more extreme in crypto due to the market's volatility.",
    ),
    (
        "fallback",
        "That's an interesting question. For trading decisions, I recommend checking technical charts, sentiment indicators, and project fundamentals. Need specific details?",
    ),
];

/// Topics explained after "what is" / "explain", checked in order
const EXPLAINED_TOPICS: &[&str] = &["bitcoin", "ethereum", "blockchain", "defi", "nft"];

/// Topic rules checked after greetings and explanations
const TOPIC_RULES: &[(&str, &[&str])] = &[
    ("investment", &["investment", "invest", "portfolio"]),
    ("security", &["scam", "security", "safe"]),
    ("market_cycle", &["bull", "bear", "market cycle"]),
];

/// Look up an answer by key
pub fn lookup(key: &str) -> Option<&'static str> {
    ANSWERS.iter().find(|(k, _)| *k == key).map(|(_, answer)| *answer)
}

/// Pick the answer key for a message
pub fn topic_for(message: &str) -> &'static str {
    let lowered = message.to_lowercase();
    let has = |needle: &str| lowered.contains(needle);

    if has("hello") || has("hi") {
        return "greeting";
    }

    if has("what is") || has("explain") {
        if let Some(topic) = EXPLAINED_TOPICS.iter().find(|t| has(t)) {
            return *topic;
        }
    }

    TOPIC_RULES
        .iter()
        .find(|(_, needles)| needles.iter().any(|n| has(n)))
        .map_or("fallback", |(key, _)| *key)
}

/// Canned answer for a message
pub fn answer(message: &str) -> &'static str {
    lookup(topic_for(message)).unwrap_or(ERROR_MESSAGE)
}

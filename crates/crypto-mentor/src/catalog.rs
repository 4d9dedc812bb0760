//! Asset Catalog
//!
//! Static reference list of known cryptocurrencies with their chat aliases
//! and baseline prices. Loaded once, read-only afterwards.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{MentorError, Result};
use crate::model::{Asset, AssetId};

/// Alias table in declaration order: symbols first, then names.
///
/// Resolution walks this table top to bottom and returns on the first alias
/// contained anywhere in the message, so "solana" resolves through "sol" and
/// "polkadot" through "dot". Order is part of the contract.
pub const ALIASES: &[(&str, &str)] = &[
    ("btc", "bitcoin"),
    ("eth", "ethereum"),
    ("bnb", "binancecoin"),
    ("sol", "solana"),
    ("ada", "cardano"),
    ("doge", "dogecoin"),
    ("xrp", "xrp"),
    ("dot", "polkadot"),
    ("link", "chainlink"),
    ("ltc", "litecoin"),
    ("avax", "avalanche"),
    ("matic", "polygon"),
    ("uni", "uniswap"),
    ("shib", "shiba-inu"),
    ("trx", "tron"),
    ("xlm", "stellar"),
    ("near", "near"),
    ("algo", "algorand"),
    ("vet", "vechain"),
    ("fil", "filecoin"),
    ("atom", "cosmos"),
    ("bitcoin", "bitcoin"),
    ("ethereum", "ethereum"),
    ("binance", "binancecoin"),
    ("solana", "solana"),
    ("cardano", "cardano"),
    ("dogecoin", "dogecoin"),
    ("polkadot", "polkadot"),
    ("chainlink", "chainlink"),
    ("avalanche", "avalanche"),
    ("polygon", "polygon"),
    ("uniswap", "uniswap"),
    ("litecoin", "litecoin"),
    ("stellar", "stellar"),
    ("cosmos", "cosmos"),
    ("filecoin", "filecoin"),
    ("algorand", "algorand"),
    ("vechain", "vechain"),
    ("shiba", "shiba-inu"),
];

/// Id used when a chart or recommendation request names no asset
pub const DEFAULT_ASSET: &str = "bitcoin";

fn asset(
    id: &str,
    name: &str,
    symbol: &str,
    base_price: Decimal,
    base_change_pct: Decimal,
    market_cap: Decimal,
) -> Asset {
    Asset {
        id: AssetId::new(id),
        name: name.into(),
        symbol: symbol.into(),
        aliases: Vec::new(),
        base_price,
        base_change_pct,
        market_cap,
    }
}

fn builtin_assets() -> Vec<Asset> {
    vec![
        asset("bitcoin", "Bitcoin", "BTC", dec!(63254.12), dec!(2.35), dec!(1241256789012)),
        asset("ethereum", "Ethereum", "ETH", dec!(3058.45), dec!(-1.24), dec!(368120145632)),
        asset("binancecoin", "Binance Coin", "BNB", dec!(605.78), dec!(0.89), dec!(93125478965)),
        asset("solana", "Solana", "SOL", dec!(135.25), dec!(5.67), dec!(57845124789)),
        asset("cardano", "Cardano", "ADA", dec!(0.45), dec!(-0.32), dec!(15689745123)),
        asset("xrp", "XRP", "XRP", dec!(0.52), dec!(1.23), dec!(28752314569)),
        asset("dogecoin", "Dogecoin", "DOGE", dec!(0.12), dec!(3.45), dec!(17895632145)),
        asset("polkadot", "Polkadot", "DOT", dec!(6.78), dec!(-2.15), dec!(8564123789)),
        asset("avalanche", "Avalanche", "AVAX", dec!(32.15), dec!(4.56), dec!(11452365789)),
        asset("chainlink", "Chainlink", "LINK", dec!(13.45), dec!(2.78), dec!(7563214589)),
        asset("litecoin", "Litecoin", "LTC", dec!(75.32), dec!(-0.98), dec!(5632147895)),
        asset("uniswap", "Uniswap", "UNI", dec!(8.25), dec!(1.52), dec!(4123659874)),
        asset("tron", "TRON", "TRX", dec!(0.095), dec!(0.75), dec!(8945612357)),
        asset("polygon", "Polygon", "MATIC", dec!(0.65), dec!(-1.85), dec!(6325147896)),
        asset("stellar", "Stellar", "XLM", dec!(0.11), dec!(0.45), dec!(3125478965)),
        asset("cosmos", "Cosmos", "ATOM", dec!(8.15), dec!(-0.65), dec!(3245789615)),
        asset("filecoin", "Filecoin", "FIL", dec!(4.85), dec!(1.25), dec!(2154789632)),
        asset("near", "NEAR Protocol", "NEAR", dec!(3.75), dec!(2.45), dec!(3654789215)),
        asset("algorand", "Algorand", "ALGO", dec!(0.15), dec!(-0.35), dec!(1254789632)),
        asset("vechain", "VeChain", "VET", dec!(0.025), dec!(1.05), dec!(1854796325)),
        asset("shiba-inu", "Shiba Inu", "SHIB", dec!(0.000019), dec!(4.85), dec!(11236547895)),
    ]
}

/// Read-only catalog of known assets
#[derive(Clone, Debug)]
pub struct Catalog {
    assets: Vec<Asset>,

    /// (lowercase alias, index into `assets`) in declaration order
    aliases: Vec<(String, usize)>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// Build a catalog from assets and an ordered alias table.
    ///
    /// Fails if an alias points at an id that is not among `assets`.
    pub fn new(mut assets: Vec<Asset>, aliases: &[(&str, &str)]) -> Result<Self> {
        let mut index = Vec::with_capacity(aliases.len());

        for (alias, id) in aliases {
            let pos = assets
                .iter()
                .position(|a| a.id == *id)
                .ok_or_else(|| {
                    MentorError::Config(format!("alias '{alias}' points at unknown asset '{id}'"))
                })?;
            let alias = alias.to_lowercase();
            assets[pos].aliases.push(alias.clone());
            index.push((alias, pos));
        }

        Ok(Self { assets, aliases: index })
    }

    /// The canonical 21-asset catalog
    pub fn builtin() -> Self {
        let assets = builtin_assets();
        let aliases = ALIASES
            .iter()
            .filter_map(|(alias, id)| {
                assets
                    .iter()
                    .position(|a| a.id == *id)
                    .map(|pos| ((*alias).to_string(), pos))
            })
            .collect::<Vec<_>>();

        let mut assets = assets;
        for (alias, pos) in &aliases {
            assets[*pos].aliases.push(alias.clone());
        }

        Self { assets, aliases }
    }

    /// Find the asset a chat message refers to.
    ///
    /// Case-insensitive substring containment, first alias in declaration
    /// order wins. Not a word match: "sol" also hits inside "console".
    pub fn resolve_alias(&self, message: &str) -> Option<&Asset> {
        let lowered = message.to_lowercase();
        self.aliases
            .iter()
            .find(|(alias, _)| lowered.contains(alias.as_str()))
            .map(|(_, pos)| &self.assets[*pos])
    }

    /// Look up an asset by canonical id
    pub fn get(&self, id: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    /// Look up an asset by id, failing with `NotFound`
    pub fn require(&self, id: &str) -> Result<&Asset> {
        self.get(id).ok_or_else(|| MentorError::NotFound(id.to_string()))
    }

    /// All assets in declaration order
    pub fn list_all(&self) -> &[Asset] {
        &self.assets
    }

    /// First `n` assets in declaration order
    pub fn top(&self, n: usize) -> &[Asset] {
        &self.assets[..n.min(self.assets.len())]
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 21);
        assert_eq!(catalog.list_all()[0].id, "bitcoin");
        assert_eq!(catalog.list_all()[20].id, "shiba-inu");

        // every declared alias lands on an asset
        let alias_count: usize = catalog.list_all().iter().map(|a| a.aliases.len()).sum();
        assert_eq!(alias_count, ALIASES.len());

        let btc = catalog.get("bitcoin").unwrap();
        assert_eq!(btc.aliases, vec!["btc".to_string(), "bitcoin".to_string()]);
    }

    #[test]
    fn test_resolve_alias_case_insensitive() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.resolve_alias("What's the price of ETH?").unwrap().id, "ethereum");
        assert_eq!(catalog.resolve_alias("Should I buy Solana?").unwrap().id, "solana");
        assert_eq!(catalog.resolve_alias("SHIBA to the moon").unwrap().id, "shiba-inu");
        assert!(catalog.resolve_alias("nothing to see here").is_none());
    }

    #[test]
    fn test_resolve_alias_first_declared_wins() {
        let catalog = Catalog::builtin();
        // "eth" is declared before "bitcoin", so it wins regardless of position
        assert_eq!(
            catalog.resolve_alias("bitcoin chart vs ethereum").unwrap().id,
            "ethereum"
        );
        // substring, not word match
        assert_eq!(catalog.resolve_alias("anecdote").unwrap().id, "polkadot");
    }

    #[test]
    fn test_resolve_alias_is_deterministic() {
        let catalog = Catalog::builtin();
        for msg in ["btc and eth", "tell me about polygon", "Cosmos ATOM", "hello"] {
            let first = catalog.resolve_alias(msg).map(|a| a.id.clone());
            let second = catalog.resolve_alias(msg).map(|a| a.id.clone());
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_custom_catalog_rejects_dangling_alias() {
        let assets = vec![asset("bitcoin", "Bitcoin", "BTC", dec!(1), dec!(0), dec!(1))];
        assert!(Catalog::new(assets.clone(), &[("btc", "bitcoin")]).is_ok());
        assert!(matches!(
            Catalog::new(assets, &[("eth", "ethereum")]),
            Err(MentorError::Config(_))
        ));
    }

    #[test]
    fn test_top_and_require() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.top(3).len(), 3);
        assert_eq!(catalog.top(100).len(), 21);
        assert!(catalog.require("notreal").is_err());
    }
}

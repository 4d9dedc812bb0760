//! Synthetic Market Feed
//!
//! Emulates a live exchange: baseline catalog prices with a small random
//! wobble per call, and random-walk price history for charts.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::Mutex;

use super::{MarketFeed, generate_series, perturb};
use crate::catalog::Catalog;
use crate::error::Result;
use crate::model::{AssetId, ChartPoint, MarketSnapshot};

/// Feed backed by the static catalog and a private random source
pub struct SyntheticFeed {
    catalog: Arc<Catalog>,

    /// Artificial delay before every call, emulating a network round trip
    latency: Duration,

    rng: Mutex<StdRng>,
}

impl SyntheticFeed {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            latency: Duration::ZERO,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Pin the random source (for reproducible demos and tests)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl MarketFeed for SyntheticFeed {
    async fn snapshot(&self, id: &AssetId) -> Result<MarketSnapshot> {
        self.simulate_latency().await;

        let asset = self.catalog.require(id.as_str())?;
        let mut rng = self.rng.lock().await;
        Ok(perturb(asset, Utc::now(), &mut *rng))
    }

    async fn snapshots(&self) -> Result<Vec<MarketSnapshot>> {
        self.simulate_latency().await;

        let now = Utc::now();
        let mut rng = self.rng.lock().await;
        Ok(self
            .catalog
            .list_all()
            .iter()
            .map(|asset| perturb(asset, now, &mut *rng))
            .collect())
    }

    async fn series(&self, id: &AssetId, days: u32) -> Result<Vec<ChartPoint>> {
        self.simulate_latency().await;

        self.catalog.require(id.as_str())?;
        let mut rng = self.rng.lock().await;
        let points = generate_series(days, Utc::now(), &mut *rng)?;

        tracing::debug!(asset = %id, days, points = points.len(), "Generated synthetic series");
        Ok(points)
    }

    async fn health_check(&self) -> bool {
        true // Synthetic feed is always up
    }

    fn name(&self) -> &str {
        "SyntheticFeed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MentorError;

    fn feed() -> SyntheticFeed {
        SyntheticFeed::new(Arc::new(Catalog::builtin())).with_seed(11)
    }

    #[tokio::test]
    async fn test_snapshot() {
        let btc = feed().snapshot(&AssetId::from("bitcoin")).await.unwrap();
        assert_eq!(btc.asset.symbol, "BTC");
        assert!(btc.price > rust_decimal::Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_unknown_asset() {
        let feed = feed();
        let result = feed.snapshot(&AssetId::from("notreal")).await;
        assert!(matches!(result, Err(MentorError::NotFound(_))));

        let result = feed.series(&AssetId::from("notreal"), 7).await;
        assert!(matches!(result, Err(MentorError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_snapshots_keep_catalog_order() {
        let feed = feed();
        let catalog = Catalog::builtin();
        let snaps = feed.snapshots().await.unwrap();

        let ids: Vec<_> = snaps.iter().map(|s| s.asset.id.clone()).collect();
        let expected: Vec<_> = catalog.list_all().iter().map(|a| a.id.clone()).collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_same_seed_same_prices() {
        let a = feed().snapshots().await.unwrap();
        let b = feed().snapshots().await.unwrap();
        let prices_a: Vec<_> = a.iter().map(|s| s.price).collect();
        let prices_b: Vec<_> = b.iter().map(|s| s.price).collect();
        assert_eq!(prices_a, prices_b);
    }

    #[tokio::test]
    async fn test_series_via_feed() {
        let points = feed().series(&AssetId::from("ethereum"), 1).await.unwrap();
        assert_eq!(points.len(), 24);
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_latency() {
        let feed = feed().with_latency(Duration::from_millis(500));
        let started = tokio::time::Instant::now();
        feed.snapshots().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(500));
    }
}

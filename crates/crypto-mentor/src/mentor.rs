//! Chat orchestration
//!
//! Ties the classifier, feed, synthesizer and formatter into one turn:
//!
//! ```text
//!   text ─▶ classify ─▶ Intent ─▶ resolve ─▶ Outcome ─▶ format ─▶ ResponseEnvelope
//!                                    │
//!                                    ├─ feed (retried on Unavailable)
//!                                    ├─ recommend::synthesize
//!                                    └─ knowledge::answer
//! ```
//!
//! Any error raised while resolving becomes the generic error envelope, so
//! [`Mentor::respond`] never fails.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::Mutex;

use crate::catalog::Catalog;
use crate::config::MentorConfig;
use crate::envelope::{Outcome, ResponseEnvelope, format};
use crate::error::Result;
use crate::feed::{MarketFeed, SyntheticFeed};
use crate::indicators::{self, TechnicalIndicators};
use crate::intent::{self, Intent};
use crate::knowledge;
use crate::model::{Asset, AssetId, ChartPoint, MarketSnapshot};
use crate::recommend::{self, Recommendation};

/// Crypto chat assistant
pub struct Mentor {
    catalog: Arc<Catalog>,
    feed: Arc<dyn MarketFeed>,
    config: MentorConfig,

    /// Source for recommendations and indicators
    rng: Mutex<StdRng>,
}

impl Mentor {
    pub fn new(catalog: Arc<Catalog>, feed: Arc<dyn MarketFeed>, config: MentorConfig) -> Self {
        let rng = config
            .seed
            .map_or_else(StdRng::from_entropy, |seed| StdRng::seed_from_u64(seed.wrapping_add(1)));

        Self {
            catalog,
            feed,
            config,
            rng: Mutex::new(rng),
        }
    }

    /// Built-in catalog with a synthetic feed honoring the configured
    /// latency and seed
    pub fn from_config(config: MentorConfig) -> Self {
        let catalog = Arc::new(Catalog::builtin());

        let mut feed = SyntheticFeed::new(Arc::clone(&catalog)).with_latency(config.feed_latency);
        if let Some(seed) = config.seed {
            feed = feed.with_seed(seed);
        }

        Self::new(catalog, Arc::new(feed), config)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub const fn config(&self) -> &MentorConfig {
        &self.config
    }

    pub fn feed_name(&self) -> &str {
        self.feed.name()
    }

    pub async fn health_check(&self) -> bool {
        self.feed.health_check().await
    }

    pub fn classify(&self, text: &str) -> Intent {
        intent::classify(&self.catalog, text)
    }

    /// Answer one chat message
    pub async fn respond(&self, text: &str) -> ResponseEnvelope {
        let intent = self.classify(text);
        let label = intent.label();

        match self.resolve(intent).await {
            Ok(outcome) => format(outcome),
            Err(err) => {
                tracing::warn!(intent = label, error = %err, "Failed to answer message");
                format(Outcome::Failed)
            }
        }
    }

    async fn resolve(&self, intent: Intent) -> Result<Outcome> {
        let outcome = match intent {
            Intent::OutOfDomain => Outcome::Deflected,
            Intent::Price { asset } => Outcome::Prices {
                focus: asset,
                snapshots: self.snapshots().await?,
            },
            Intent::Chart { asset } => {
                let asset = self.catalog.require(asset.as_str())?.clone();
                let days = self.config.chart_range.days();
                let points = self.series(asset.id.as_str(), days).await?;
                Outcome::Chart { asset, days, points }
            }
            Intent::Recommendation { asset } => {
                Outcome::Recommendation(self.recommend(asset.as_str()).await?)
            }
            Intent::Informational { raw } => Outcome::Answer(knowledge::answer(&raw)),
        };
        Ok(outcome)
    }

    /// Every catalog asset in catalog order
    pub fn list_assets(&self) -> &[Asset] {
        self.catalog.list_all()
    }

    pub async fn snapshot(&self, id: &str) -> Result<MarketSnapshot> {
        let id = AssetId::new(id);
        self.config
            .retry
            .run("snapshot", || self.feed.snapshot(&id))
            .await
    }

    pub async fn snapshots(&self) -> Result<Vec<MarketSnapshot>> {
        self.config
            .retry
            .run("snapshots", || self.feed.snapshots())
            .await
    }

    /// Hourly history; `days` must be in `1..=365`
    pub async fn series(&self, id: &str, days: u32) -> Result<Vec<ChartPoint>> {
        let id = AssetId::new(id);
        self.config
            .retry
            .run("series", || self.feed.series(&id, days))
            .await
    }

    pub async fn recommend(&self, id: &str) -> Result<Recommendation> {
        let asset = self.catalog.require(id)?;

        if !self.config.recommendation_latency.is_zero() {
            tokio::time::sleep(self.config.recommendation_latency).await;
        }

        let mut rng = self.rng.lock().await;
        Ok(recommend::synthesize(asset, &mut *rng))
    }

    pub async fn indicators(&self, id: &str) -> Result<TechnicalIndicators> {
        let asset = self.catalog.require(id)?;
        let mut rng = self.rng.lock().await;
        Ok(indicators::sample(asset, &mut *rng))
    }
}

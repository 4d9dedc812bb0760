//! Market Feed
//!
//! Abstraction over price sources plus the sampling functions behind the
//! synthetic feed. The sampling functions take an explicit random source so
//! callers can pin outcomes with a seeded RNG.

mod synthetic;

pub use synthetic::SyntheticFeed;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;

use crate::error::{MentorError, Result};
use crate::model::{Asset, AssetId, ChartPoint, MarketSnapshot, PRICE_SCALE};

/// Points generated per day of chart history
pub const POINTS_PER_DAY: u32 = 24;

/// Longest chart the feed will generate
pub const MAX_SERIES_DAYS: u32 = 365;

const HOUR_MS: i64 = 3_600_000;
const DAY_MS: i64 = 86_400_000;

/// Smallest representable positive price at `PRICE_SCALE`
const MIN_PRICE: Decimal = Decimal::from_parts(1, 0, 0, false, PRICE_SCALE);

/// Market feed trait (Strategy pattern)
///
/// The synthetic feed is the only implementation today; a real exchange
/// client would report connectivity failures as `MentorError::Unavailable`.
#[async_trait]
pub trait MarketFeed: Send + Sync {
    /// Current snapshot for one asset
    async fn snapshot(&self, id: &AssetId) -> Result<MarketSnapshot>;

    /// Snapshots for every catalog asset, in catalog order
    async fn snapshots(&self) -> Result<Vec<MarketSnapshot>>;

    /// Hourly price history covering the last `days` days
    async fn series(&self, id: &AssetId, days: u32) -> Result<Vec<ChartPoint>>;

    /// Check if feed is available
    async fn health_check(&self) -> bool;

    /// Feed name
    fn name(&self) -> &str;
}

/// Apply a live-feed wobble to an asset's baseline.
///
/// Price is scaled by `1 + U(-1%, 1%)`, the 24h change shifted by
/// `U(-0.25, 0.25)` points.
pub fn perturb<R: Rng + ?Sized>(asset: &Asset, now: DateTime<Utc>, rng: &mut R) -> MarketSnapshot {
    let price_factor = 1.0 + rng.gen_range(-0.01..0.01);
    let change_shift = rng.gen_range(-0.25..0.25);

    let price = (asset.base_price * Decimal::from_f64_retain(price_factor).unwrap_or(Decimal::ONE))
        .round_dp(PRICE_SCALE);
    let change_pct_24h = (asset.base_change_pct
        + Decimal::from_f64_retain(change_shift).unwrap_or(Decimal::ZERO))
    .round_dp(4);

    MarketSnapshot {
        asset: asset.clone(),
        price,
        change_pct_24h,
        observed_at: now,
    }
}

/// Generate a multiplicative random walk of `24 * days` hourly points.
///
/// The walk starts from `100 + U(0, 50)` and every point moves the previous
/// price by `U(-4%, 4%)`. Timestamps begin at `now - days` and advance one
/// hour per point. No mean reversion; each call yields a fresh series.
pub fn generate_series<R: Rng + ?Sized>(
    days: u32,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<Vec<ChartPoint>> {
    if days == 0 || days > MAX_SERIES_DAYS {
        return Err(MentorError::InvalidRange(format!(
            "{days} days (expected 1..={MAX_SERIES_DAYS})"
        )));
    }

    let count = days * POINTS_PER_DAY;
    let start = now.timestamp_millis() - i64::from(days) * DAY_MS;
    let mut price: f64 = 100.0 + rng.gen_range(0.0..50.0);

    let points = (0..i64::from(count))
        .map(|i| {
            price *= 1.0 + rng.gen_range(-0.04..0.04);
            ChartPoint {
                timestamp: start + i * HOUR_MS,
                price: to_price(price),
            }
        })
        .collect();

    Ok(points)
}

fn to_price(value: f64) -> Decimal {
    // keep the walk strictly positive after rounding
    Decimal::from_f64_retain(value)
        .unwrap_or(MIN_PRICE)
        .round_dp(PRICE_SCALE)
        .max(MIN_PRICE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal_macros::dec;

    #[test]
    fn test_perturb_stays_within_one_percent() {
        let catalog = Catalog::builtin();
        let mut rng = StdRng::seed_from_u64(7);
        let now = Utc::now();

        for asset in catalog.list_all() {
            for _ in 0..50 {
                let snap = perturb(asset, now, &mut rng);
                assert!(snap.price > Decimal::ZERO);
                assert!(snap.price >= asset.base_price * dec!(0.99) - MIN_PRICE);
                assert!(snap.price <= asset.base_price * dec!(1.01) + MIN_PRICE);
                assert!((snap.change_pct_24h - asset.base_change_pct).abs() <= dec!(0.25));
                assert_eq!(snap.asset.id, asset.id);
            }
        }
    }

    #[test]
    fn test_series_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let now = Utc::now();

        for days in [1, 7, 30, 90] {
            let points = generate_series(days, now, &mut rng).unwrap();
            assert_eq!(points.len(), (days * 24) as usize);
            assert_eq!(points[0].timestamp, now.timestamp_millis() - i64::from(days) * DAY_MS);
            assert!(points.windows(2).all(|w| w[1].timestamp - w[0].timestamp == HOUR_MS));
            assert!(points.iter().all(|p| p.price > Decimal::ZERO));
            assert!(points.last().unwrap().timestamp < now.timestamp_millis());
        }
    }

    #[test]
    fn test_series_first_point_near_seed_band() {
        let mut rng = StdRng::seed_from_u64(1);
        let points = generate_series(1, Utc::now(), &mut rng).unwrap();
        // seed in [100, 150), first step at most 4% either way
        assert!(points[0].price >= dec!(96));
        assert!(points[0].price < dec!(156));
    }

    #[test]
    fn test_series_rejects_bad_ranges() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            generate_series(0, Utc::now(), &mut rng),
            Err(MentorError::InvalidRange(_))
        ));
        assert!(generate_series(MAX_SERIES_DAYS + 1, Utc::now(), &mut rng).is_err());
    }

    #[test]
    fn test_series_is_fresh_per_call() {
        let mut rng = StdRng::seed_from_u64(3);
        let now = Utc::now();
        let a = generate_series(7, now, &mut rng).unwrap();
        let b = generate_series(7, now, &mut rng).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_to_price_floor() {
        assert_eq!(to_price(0.0), MIN_PRICE);
        assert_eq!(to_price(-1.0), MIN_PRICE);
        assert_eq!(to_price(1.5), dec!(1.5));
    }
}

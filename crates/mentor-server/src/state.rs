//! Application State

use std::sync::Arc;
use std::time::Duration;

use crypto_mentor::Mentor;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Chat assistant and market operations
    pub mentor: Arc<Mentor>,

    /// Interval between pushes on the price stream
    pub price_refresh: Duration,
}

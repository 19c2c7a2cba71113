//! # Crossboost
//!
//! Cross-boosts ActivityPub posts on a Mastodon instance.
//!
//! When the host publishes a federation-eligible object, it hands the
//! outgoing `Create` activity to [`Booster::on_outbox_activity`]. The
//! mirrored status usually takes a few seconds to show up in the instance's
//! search index, so the booster polls the search API on a fixed schedule,
//! verifies the hit is the same object, and reblogs it exactly once.
//!
//! ```rust,no_run
//! use crossboost::{Booster, ConfigStore};
//! use std::sync::Arc;
//!
//! # async fn wire_up(inboxes: Vec<serde_json::Value>, activity_json: String) {
//! let config = Arc::new(ConfigStore::from_env());
//! config.set_domain("https://mastodon.social/"); // stored as "mastodon.social"
//! config.set_access_key("ABC123");
//!
//! let booster = Booster::new(config);
//! crossboost::set_global_booster(Arc::clone(&booster));
//!
//! // From the host's outbox hook:
//! if let Some(booster) = crossboost::global_booster() {
//!     booster.on_outbox_activity(&inboxes, &activity_json);
//! }
//! # }
//! ```
//!
//! Every outcome of a retry chain is reported through `tracing` only; the
//! publishing path that fired the event never sees an error.

pub mod activity;
pub mod booster;
pub mod client;
pub mod config;
pub mod error;
pub mod scheduler;
pub mod types;

use once_cell::sync::OnceCell;
use std::sync::Arc;

pub use booster::{BoostOutcome, Booster, BOOST_ATTEMPTS, RETRY_DELAY};
pub use client::MastodonClient;
pub use config::ConfigStore;
pub use error::{BoostError, Result};
pub use scheduler::RetryScheduler;
pub use types::BoostTask;

static GLOBAL_BOOSTER: OnceCell<Arc<Booster>> = OnceCell::new();

/// Set the global booster (called once during host startup).
pub fn set_global_booster(booster: Arc<Booster>) {
    let _ = GLOBAL_BOOSTER.set(booster);
}

/// Get the global booster if one has been installed.
pub fn global_booster() -> Option<Arc<Booster>> {
    GLOBAL_BOOSTER.get().map(Arc::clone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_booster_install_once() {
        let config = Arc::new(ConfigStore::new());
        let booster = Booster::new(Arc::clone(&config));
        set_global_booster(Arc::clone(&booster));

        assert!(global_booster().is_some());

        // A second install is ignored, the first instance stays.
        let other = Booster::new(config);
        set_global_booster(other);
        assert!(Arc::ptr_eq(&global_booster().unwrap(), &booster));
    }
}

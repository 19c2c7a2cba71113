use crate::activity;
use crate::client::MastodonClient;
use crate::config::ConfigStore;
use crate::error::BoostError;
use crate::scheduler::{RetryScheduler, TokioScheduler};
use crate::types::BoostTask;
use dashmap::DashSet;
use std::sync::Arc;
use std::time::Duration;

/// Search attempts per published object.
pub const BOOST_ATTEMPTS: u32 = 5;
/// Delay before the first search and between retries.
pub const RETRY_DELAY: Duration = Duration::from_secs(10);

/// Result of one boost attempt. Only `Rescheduled` continues the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoostOutcome {
    /// The matching status was reblogged.
    Boosted,
    /// A reblog was already issued for this object by another chain.
    AlreadyBoosted,
    /// Not searchable yet (or a different closest match); a follow-up
    /// attempt was scheduled with one fewer retry.
    Rescheduled,
    /// The attempt budget ran out before the object became searchable.
    RetriesExhausted,
    /// Domain or access key is not configured; waiting will not fix that.
    ConfigMissing,
    /// The search call failed at the connection level.
    TransportError,
    /// The instance rejected the reblog of a confirmed match.
    BoostFailed,
}

/// Correlates locally published objects with their mirrored statuses on the
/// configured instance and boosts each one once.
pub struct Booster {
    config: Arc<ConfigStore>,
    client: MastodonClient,
    scheduler: Arc<dyn RetryScheduler>,
    /// Objects a reblog has been issued for. Set before the call goes out,
    /// so two concurrent chains for one object cannot both boost it.
    boosted: DashSet<String>,
}

impl Booster {
    pub fn new(config: Arc<ConfigStore>) -> Arc<Self> {
        Self::with_client(config, MastodonClient::new())
    }

    /// Booster with a custom client and the default tokio scheduler.
    pub fn with_client(config: Arc<ConfigStore>, client: MastodonClient) -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            config,
            client,
            scheduler: Arc::new(TokioScheduler::new(weak.clone())),
            boosted: DashSet::new(),
        })
    }

    /// Booster with a custom scheduler, e.g. a host's durable task queue.
    pub fn with_scheduler(
        config: Arc<ConfigStore>,
        client: MastodonClient,
        scheduler: Arc<dyn RetryScheduler>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            client,
            scheduler,
            boosted: DashSet::new(),
        })
    }

    /// Host entry point, wired to the outbox-processed event.
    ///
    /// The inbox list is part of the event signature but irrelevant here.
    /// Schedules the first search attempt for a `Create` activity with an
    /// object id; everything else is ignored. Never blocks and never
    /// surfaces an error into the publishing path.
    pub fn on_outbox_activity(&self, _inboxes: &[serde_json::Value], raw: &str) {
        let Some(object_id) = activity::create_object_id(raw) else {
            return;
        };

        tracing::debug!(
            "[BOOST {}] queued, first search in {}s",
            object_id,
            RETRY_DELAY.as_secs()
        );
        self.scheduler.schedule(
            BoostTask {
                object_id,
                attempts_remaining: BOOST_ATTEMPTS,
            },
            RETRY_DELAY,
        );
    }

    /// Run one boost attempt for `object_id`.
    ///
    /// Searches the instance for the object's mirrored status, verifies the
    /// hit by exact URI, and reblogs it. While the instance has not indexed
    /// the object yet, the attempt reschedules itself with one fewer retry;
    /// every other outcome ends the chain.
    pub async fn execute(&self, object_id: &str, attempts_remaining: u32) -> BoostOutcome {
        if attempts_remaining == 0 {
            tracing::warn!("[BOOST {}] giving up: retries exhausted", object_id);
            return BoostOutcome::RetriesExhausted;
        }

        let (domain, access_key) = match self.config.require() {
            Ok(pair) => pair,
            Err(e) => {
                tracing::warn!("[BOOST {}] {}", object_id, e);
                return BoostOutcome::ConfigMissing;
            }
        };

        let statuses = match self
            .client
            .search_statuses(&domain, &access_key, object_id)
            .await
        {
            Ok(response) => response.statuses,
            Err(BoostError::Transport(detail)) => {
                tracing::warn!("[BOOST {}] {}", object_id, detail);
                return BoostOutcome::TransportError;
            }
            // Anything else the search returned is not a status list, which
            // looks the same as "not indexed yet" from here.
            Err(e) => {
                tracing::debug!("[BOOST {}] unusable search response: {}", object_id, e);
                Vec::new()
            }
        };

        let status = match statuses.into_iter().next() {
            Some(status) if status.uri == object_id => status,
            Some(other) => {
                tracing::debug!(
                    "[BOOST {}] closest match is {}, not ours, retrying",
                    object_id,
                    other.uri
                );
                return self.reschedule(object_id, attempts_remaining);
            }
            None => {
                tracing::debug!("[BOOST {}] not searchable yet, retrying", object_id);
                return self.reschedule(object_id, attempts_remaining);
            }
        };

        if !self.boosted.insert(object_id.to_string()) {
            tracing::debug!("[BOOST {}] reblog already issued, skipping", object_id);
            return BoostOutcome::AlreadyBoosted;
        }

        match self.client.reblog(&domain, &access_key, &status.id).await {
            Ok(()) => {
                tracing::info!("[BOOST {}] boosted as status {}", object_id, status.id);
                BoostOutcome::Boosted
            }
            Err(e) => {
                tracing::error!(
                    "[BOOST {}] reblog of status {} failed: {}",
                    object_id,
                    status.id,
                    e
                );
                BoostOutcome::BoostFailed
            }
        }
    }

    fn reschedule(&self, object_id: &str, attempts_remaining: u32) -> BoostOutcome {
        self.scheduler.schedule(
            BoostTask {
                object_id: object_id.to_string(),
                attempts_remaining: attempts_remaining - 1,
            },
            RETRY_DELAY,
        );
        BoostOutcome::Rescheduled
    }
}

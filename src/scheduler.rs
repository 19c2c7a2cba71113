use crate::booster::Booster;
use crate::types::BoostTask;
use std::sync::Weak;
use std::time::Duration;

/// Delayed-execution contract consumed by the booster.
///
/// `schedule` must run the task's boost attempt at-or-after `now + delay`
/// and must not block the caller. The in-crate [`TokioScheduler`] is
/// in-process best-effort; a host with a durable task queue (at-least-once,
/// surviving restarts) implements this trait over it and passes it to
/// [`Booster::with_scheduler`].
pub trait RetryScheduler: Send + Sync {
    fn schedule(&self, task: BoostTask, delay: Duration);
}

/// Default scheduler: a spawned tokio task per pending attempt.
///
/// Holds a weak reference so a dropped booster ends its chains silently
/// instead of keeping the instance alive.
pub struct TokioScheduler {
    booster: Weak<Booster>,
}

impl TokioScheduler {
    pub fn new(booster: Weak<Booster>) -> Self {
        Self { booster }
    }
}

impl RetryScheduler for TokioScheduler {
    fn schedule(&self, task: BoostTask, delay: Duration) {
        let booster = self.booster.clone();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let Some(booster) = booster.upgrade() else {
                return;
            };

            let outcome = booster
                .execute(&task.object_id, task.attempts_remaining)
                .await;
            tracing::debug!("[BOOST {}] attempt finished: {:?}", task.object_id, outcome);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_schedule_outlives_dropped_booster() {
        let booster = Booster::new(Arc::new(ConfigStore::new()));
        let scheduler = TokioScheduler::new(Arc::downgrade(&booster));
        drop(booster);

        // The spawned attempt upgrades to nothing and exits on its own.
        scheduler.schedule(
            BoostTask {
                object_id: "https://example.com/post/1".to_string(),
                attempts_remaining: 1,
            },
            Duration::from_millis(1),
        );
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

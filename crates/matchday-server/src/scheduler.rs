//! Periodic winner assignment.

use std::sync::Arc;

use chrono::Utc;
use matchday_core::{store::LeagueStore, winners::assign_pending_winners};
use tokio_cron_scheduler::{Job, JobScheduler};

/// Start a scheduler that runs the winner batch on `cron`. The returned
/// handle must be kept alive and shut down by the caller.
pub async fn start_winner_job<S>(
  store: Arc<S>,
  cron: &str,
) -> anyhow::Result<JobScheduler>
where
  S: LeagueStore + 'static,
{
  let scheduler = JobScheduler::new()
    .await
    .map_err(|e| anyhow::anyhow!("failed to create scheduler: {e}"))?;

  let job = Job::new_async(cron, move |_id, _sched| {
    let store = store.clone();
    Box::pin(async move {
      let today = Utc::now().date_naive();
      match assign_pending_winners(store.as_ref(), today).await {
        Ok(report) => tracing::info!(
          updated = report.updated,
          skipped = report.skipped,
          failed = report.errors.len(),
          "scheduled winner assignment finished"
        ),
        Err(e) => tracing::error!("scheduled winner assignment failed: {e}"),
      }
    })
  })
  .map_err(|e| anyhow::anyhow!("invalid winner cron {cron:?}: {e}"))?;

  scheduler
    .add(job)
    .await
    .map_err(|e| anyhow::anyhow!("failed to add winner job: {e}"))?;
  scheduler
    .start()
    .await
    .map_err(|e| anyhow::anyhow!("failed to start scheduler: {e}"))?;

  tracing::info!("winner job scheduled ({cron})");
  Ok(scheduler)
}

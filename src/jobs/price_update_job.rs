use crate::errors::AppError;
use crate::services::job_scheduler_service::{JobContext, JobResult};
use tracing::info;

/// Simulate live trading by nudging each stock's latest close.
///
/// Runs every minute by default. Only the close of the newest bar moves;
/// no bar is appended and earlier history is left untouched.
pub async fn update_current_prices(ctx: JobContext) -> Result<JobResult, AppError> {
    let (updated, total) = {
        let mut store = ctx.store.write();
        let total = store.stocks().len();
        let updated = store.update_current_prices(&mut rand::rng());
        (updated, total)
    };

    info!("💹 Updated current prices for {}/{} stocks", updated, total);

    Ok(JobResult {
        items_processed: updated,
        items_failed: total - updated,
    })
}

use crate::metrics::Metrics;
use crate::models::{FilePath, WorkList};
use crate::services::patcher::Patcher;
use crate::services::selector::file_line;
use crate::services::text::single_line;
use crate::state::LogSink;
use std::time::Instant;

/// Marker written when a batch starts
pub const PROCESSING_HEADER: &str = "Processing...";

/// Marker written when a batch ends
pub const DONE_FOOTER: &str = "Done.";

/// Log line for a failed patch attempt, folded onto one line
pub fn error_line(message: impl std::fmt::Display) -> String {
    format!("error: {}", single_line(&message.to_string()))
}

/// Patch every pending file in order, then empty the work list.
///
/// Each file gets its own log line before the patcher runs; a failure adds
/// an `error:` line and the batch moves on to the next file. The list is
/// cleared once all files have been attempted, whatever their outcome.
///
/// Returns the number of files attempted.
pub fn run_batch<P>(
    work_list: &mut WorkList,
    log: &mut LogSink,
    patcher: &mut P,
    metrics: &mut Metrics,
) -> usize
where
    P: Patcher + ?Sized,
{
    metrics.record_batch();
    log.append(PROCESSING_HEADER);

    let pending: Vec<FilePath> = work_list.iter().cloned().collect();
    tracing::info!("Processing {} files", pending.len());

    let mut failed = 0usize;
    for path in &pending {
        log.append(file_line(path));

        let start = Instant::now();
        let result = patcher.patch(path);
        metrics.record_attempt(start.elapsed(), result.is_err());

        if let Err(e) = result {
            failed += 1;
            tracing::warn!("Failed to patch {}: {}", path, e);
            log.append(error_line(&e));
        }
    }

    work_list.clear();
    log.append(DONE_FOOTER);

    tracing::info!(
        "Batch finished: {} attempted, {} failed",
        pending.len(),
        failed
    );

    pending.len()
}

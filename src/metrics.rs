// Session metrics
//
// Lightweight counters for diagnostics. They are written to the tracing log
// and never fed back into batch results.

use std::time::{Duration, Instant};

/// Counters collected over the life of one session
#[derive(Debug)]
pub struct Metrics {
    /// Selections that named at least one usable file
    pub selections: u64,

    /// Distinct files named across all selections
    pub files_selected: u64,

    /// Batches run, including empty ones
    pub batches: u64,

    /// Patch attempts
    pub files_attempted: u64,

    /// Patch attempts that reported failure
    pub files_failed: u64,

    /// Total time spent inside the patcher
    pub total_patch_time: Duration,

    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            selections: 0,
            files_selected: 0,
            batches: 0,
            files_attempted: 0,
            files_failed: 0,
            total_patch_time: Duration::ZERO,
            start_time: Instant::now(),
        }
    }

    pub fn record_selection(&mut self, files: usize) {
        self.selections += 1;
        self.files_selected += files as u64;
    }

    pub fn record_batch(&mut self) {
        self.batches += 1;
    }

    pub fn record_attempt(&mut self, duration: Duration, failed: bool) {
        self.files_attempted += 1;
        self.total_patch_time += duration;
        if failed {
            self.files_failed += 1;
        }
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Average patcher time per attempt in milliseconds
    pub fn avg_patch_time_ms(&self) -> f64 {
        if self.files_attempted > 0 {
            self.total_patch_time.as_secs_f64() * 1000.0 / self.files_attempted as f64
        } else {
            0.0
        }
    }

    pub fn log_summary(&self) {
        tracing::info!("=== Session Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Selections: {} ({} files), batches: {}",
            self.selections,
            self.files_selected,
            self.batches
        );
        tracing::info!(
            "Patch attempts: {} ({} failed), total time {:.2}s (avg: {:.2}ms per file)",
            self.files_attempted,
            self.files_failed,
            self.total_patch_time.as_secs_f64(),
            self.avg_patch_time_ms()
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new();
        assert_eq!(metrics.files_attempted, 0);
        assert_eq!(metrics.files_failed, 0);
        assert_eq!(metrics.batches, 0);
    }

    #[test]
    fn test_record_attempts() {
        let mut metrics = Metrics::new();

        metrics.record_attempt(Duration::from_millis(100), false);
        metrics.record_attempt(Duration::from_millis(200), true);

        assert_eq!(metrics.files_attempted, 2);
        assert_eq!(metrics.files_failed, 1);
        assert_eq!(metrics.total_patch_time, Duration::from_millis(300));
        assert!((metrics.avg_patch_time_ms() - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_avg_patch_time_no_attempts() {
        let metrics = Metrics::new();
        assert_eq!(metrics.avg_patch_time_ms(), 0.0);
    }

    #[test]
    fn test_record_selection_and_batch() {
        let mut metrics = Metrics::new();
        metrics.record_selection(3);
        metrics.record_selection(1);
        metrics.record_batch();

        assert_eq!(metrics.selections, 2);
        assert_eq!(metrics.files_selected, 4);
        assert_eq!(metrics.batches, 1);
    }

    #[test]
    fn test_uptime() {
        let metrics = Metrics::new();
        thread::sleep(Duration::from_millis(10));
        assert!(metrics.uptime().as_millis() >= 10);
    }
}

//! Batched body spawning with cooperative yields
//!
//! Spawning hundreds of bodies in one go would starve an interactive loop,
//! so paths are processed in bounded batches with a yield to the scheduler
//! between batches. The batch size and the yield cadence that follows from
//! it are caller-configurable; cancellation is checked between batches
//! only, never mid-batch.
//!
//! Per-path failures are isolated: a malformed or degenerate path is
//! logged and skipped, and the batch continues. Bodies are created
//! strictly in input order.

use tokio_util::sync::CancellationToken;
use tracing::{error, warn};

use super::session::PhysicsSession;
use crate::svg::{parse_path, FitTransform, SvgError, DEFAULT_SIMPLIFY_TOLERANCE};

/// Default number of paths processed per batch.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Outcome counts for one spawn run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpawnReport {
    /// Bodies created
    pub created: usize,
    /// Paths that collapsed below three vertices and were skipped
    pub skipped_degenerate: usize,
    /// Paths that failed to parse or spawn
    pub failed: usize,
    /// Batches processed; also the number of yields performed
    pub batches: usize,
    /// True if a cancellation request stopped the run between batches
    pub cancelled: bool,
}

/// Spawns bodies from path data in bounded batches.
pub struct BatchSpawner {
    batch_size: usize,
    tolerance: f64,
}

impl BatchSpawner {
    /// Creates a spawner with the default batch size and simplification
    /// tolerance.
    pub fn new() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            tolerance: DEFAULT_SIMPLIFY_TOLERANCE,
        }
    }

    /// Overrides the batch size (clamped to at least 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Overrides the simplification tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Processes all paths, yielding to the scheduler after each batch.
    ///
    /// For `n` paths and batch size `b` this performs `ceil(n / b)` yields.
    pub async fn spawn_paths(
        &self,
        session: &mut PhysicsSession,
        paths: &[String],
        fit: &FitTransform,
        cancel: Option<&CancellationToken>,
    ) -> SpawnReport {
        let mut report = SpawnReport::default();

        for batch in paths.chunks(self.batch_size) {
            if cancel.is_some_and(|token| token.is_cancelled()) {
                report.cancelled = true;
                break;
            }

            for path in batch {
                match parse_path(path, fit, self.tolerance) {
                    Ok(vertices) => match session.spawn_body(&vertices) {
                        Ok(_) => report.created += 1,
                        Err(e) => {
                            error!(error = %e, "failed to create body from vertices");
                            report.failed += 1;
                        }
                    },
                    Err(SvgError::Insufficient(e)) => {
                        warn!(vertices = e.vertices, "insufficient vertices to form a body");
                        report.skipped_degenerate += 1;
                    }
                    Err(e) => {
                        error!(error = %e, path = %path, "error processing path");
                        report.failed += 1;
                    }
                }
            }

            report.batches += 1;
            // Let the owner of the loop breathe between batches
            tokio::task::yield_now().await;
        }

        report
    }
}

impl Default for BatchSpawner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::session::PhysicsConfig;
    use crate::viewport::Viewport;

    fn session() -> PhysicsSession {
        PhysicsSession::new(&Viewport::new(800.0, 600.0, 1.0), &PhysicsConfig::default())
    }

    fn square_path(x: f64, y: f64) -> String {
        format!(
            "M{},{} L{},{} L{},{} L{},{} Z",
            x,
            y,
            x + 20.0,
            y,
            x + 20.0,
            y + 20.0,
            x,
            y + 20.0
        )
    }

    #[tokio::test]
    async fn test_batch_count_is_ceil_of_paths_over_batch_size() {
        let mut session = session();
        let paths: Vec<String> = (0..7).map(|i| square_path(i as f64 * 30.0, 10.0)).collect();

        let spawner = BatchSpawner::new().with_batch_size(3);
        let report = spawner
            .spawn_paths(&mut session, &paths, &FitTransform::identity(), None)
            .await;

        assert_eq!(report.created, 7);
        assert_eq!(report.batches, 3, "ceil(7 / 3) batches");
        assert!(!report.cancelled);
    }

    #[tokio::test]
    async fn test_degenerate_path_skipped_batch_continues() {
        let mut session = session();
        let paths = vec![
            square_path(10.0, 10.0),
            "M0,0 L5,0".to_string(),
            square_path(100.0, 10.0),
        ];

        let report = BatchSpawner::new()
            .spawn_paths(&mut session, &paths, &FitTransform::identity(), None)
            .await;

        assert_eq!(report.created, 2);
        assert_eq!(report.skipped_degenerate, 1);
        assert_eq!(session.body_count(), 2);
    }

    #[tokio::test]
    async fn test_malformed_path_counted_as_failed() {
        let mut session = session();
        let paths = vec!["M0,0 L garbage".to_string(), square_path(10.0, 10.0)];

        let report = BatchSpawner::new()
            .spawn_paths(&mut session, &paths, &FitTransform::identity(), None)
            .await;

        assert_eq!(report.failed, 1);
        assert_eq!(report.created, 1);
    }

    #[tokio::test]
    async fn test_pre_cancelled_token_stops_before_first_batch() {
        let mut session = session();
        let paths = vec![square_path(10.0, 10.0)];
        let token = CancellationToken::new();
        token.cancel();

        let report = BatchSpawner::new()
            .spawn_paths(&mut session, &paths, &FitTransform::identity(), Some(&token))
            .await;

        assert!(report.cancelled);
        assert_eq!(report.created, 0);
    }
}

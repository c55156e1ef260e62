//! Single-host worker pool for per-snapshot tasks.
//!
//! Tasks are pure functions of one `SnapshotIdentity` plus an immutable
//! context captured by reference. A pool of one worker runs on the calling
//! thread; larger pools use a dedicated Rayon thread pool.

use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{PipelineError, PipelineResult};
use crate::interrupt::Interrupt;

/// Thread-safe completed/total counter.
#[derive(Debug)]
pub struct ProgressReporter {
    completed: Arc<AtomicUsize>,
    total: usize,
}

impl ProgressReporter {
    pub fn new(total: usize) -> Self {
        Self {
            completed: Arc::new(AtomicUsize::new(0)),
            total,
        }
    }

    /// Record one finished task and return the new completed count.
    pub fn report_progress(&self) -> usize {
        let completed = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(completed, total = self.total, "Task finished");
        completed
    }

    /// Get current progress (completed, total).
    pub fn get_progress(&self) -> (usize, usize) {
        (self.completed.load(Ordering::SeqCst), self.total)
    }
}

/// Fixed-size pool running one task per item.
pub struct WorkerPool {
    workers: usize,
    pool: Option<rayon::ThreadPool>,
    interrupt: Interrupt,
}

impl WorkerPool {
    /// Create a pool of `workers` threads (at least one).
    ///
    /// Falls back to sequential execution if the thread pool cannot be built.
    pub fn new(workers: usize) -> Self {
        let workers = workers.max(1);
        let pool = if workers > 1 {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("bpost-{}", i))
                .build()
            {
                Ok(pool) => Some(pool),
                Err(e) => {
                    warn!(error = %e, "Failed to create thread pool, processing sequentially");
                    None
                }
            }
        } else {
            None
        };

        Self {
            workers,
            pool,
            interrupt: Interrupt::new(),
        }
    }

    /// Stop scheduling new tasks once `interrupt` is triggered.
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn interrupt(&self) -> &Interrupt {
        &self.interrupt
    }

    /// Whether tasks run on a dedicated thread pool.
    pub fn is_parallel(&self) -> bool {
        self.pool.is_some()
    }

    /// Run `op` for every task, stopping at the first error.
    ///
    /// Tasks not yet started when an error occurs (or the interrupt fires)
    /// are never run. Results keep task order.
    pub fn try_map<T, R, F>(&self, tasks: &[T], op: F) -> PipelineResult<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> PipelineResult<R> + Sync,
    {
        let progress = ProgressReporter::new(tasks.len());
        let run_one = |task: &T| {
            if self.interrupt.is_triggered() {
                return Err(PipelineError::Interrupted);
            }
            let result = op(task);
            progress.report_progress();
            result
        };

        match &self.pool {
            Some(pool) => pool.install(|| tasks.par_iter().map(run_one).collect()),
            None => tasks.iter().map(run_one).collect(),
        }
    }

    /// Run `op` for every task and collect every result.
    ///
    /// Tasks reached after the interrupt fires are not run.
    pub fn map<T, R, F>(&self, tasks: &[T], op: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync,
    {
        let progress = ProgressReporter::new(tasks.len());
        let run_one = |task: &T| {
            if self.interrupt.is_triggered() {
                return None;
            }
            let result = op(task);
            progress.report_progress();
            Some(result)
        };

        match &self.pool {
            Some(pool) => pool.install(|| tasks.par_iter().filter_map(run_one).collect()),
            None => tasks.iter().filter_map(run_one).collect(),
        }
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("workers", &self.workers)
            .field("parallel", &self.is_parallel())
            .finish()
    }
}

//! Execution engines for controlling iteration strategy
//!
//! An execution engine decides how a batch of independent iterations is
//! scheduled: sequentially in the calling thread, or over a bounded rayon
//! worker pool. Results are always returned in iteration-index order, so
//! output never depends on completion order. A failing iteration aborts
//! the whole batch; no partial output is returned.

use crate::Result;
#[cfg(feature = "parallel")]
use crate::Error;

/// Execution strategy for batch operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Process iterations sequentially
    Sequential,
    /// Process iterations in parallel
    Parallel,
}

/// Trait for engines that run a batch of independent fallible tasks
///
/// Tasks must not share mutable state; each task receives its iteration
/// index and derives everything it needs from it. The ordering guarantee
/// is part of the contract: slot `b` of the output always holds the value
/// produced by `task(b)`.
pub trait ExecutionEngine: Clone + Send + Sync {
    /// Run `count` tasks and collect their results in index order
    ///
    /// Fail-fast: the first task error encountered is surfaced and no
    /// partial output is returned.
    fn run_batch<R, F>(&self, count: usize, task: F) -> Result<Vec<R>>
    where
        R: Send,
        F: Fn(usize) -> Result<R> + Send + Sync;

    /// Get the execution strategy
    fn strategy(&self) -> ExecutionStrategy;

    /// Get the number of worker threads available
    fn num_threads(&self) -> usize;
}

/// Number of hardware threads available to bound worker pools
pub fn available_parallelism() -> usize {
    num_cpus::get().max(1)
}

/// Sequential execution engine
///
/// Runs every task in the calling thread, in iteration order.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialEngine;

impl SequentialEngine {
    /// Create a new sequential engine
    pub fn new() -> Self {
        Self
    }
}

impl ExecutionEngine for SequentialEngine {
    fn run_batch<R, F>(&self, count: usize, task: F) -> Result<Vec<R>>
    where
        R: Send,
        F: Fn(usize) -> Result<R> + Send + Sync,
    {
        (0..count).map(task).collect()
    }

    fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::Sequential
    }

    fn num_threads(&self) -> usize {
        1
    }
}

/// Parallel execution engine over a bounded rayon thread pool
#[cfg(feature = "parallel")]
#[derive(Clone)]
pub struct ParallelEngine {
    thread_pool: std::sync::Arc<rayon::ThreadPool>,
    degree: usize,
}

#[cfg(feature = "parallel")]
impl ParallelEngine {
    /// Create a parallel engine with a pool of `degree` workers
    ///
    /// The requested degree is capped to the available hardware
    /// parallelism to avoid oversubscription.
    pub fn with_degree(degree: usize) -> Result<Self> {
        if degree == 0 {
            return Err(Error::InvalidParameter(
                "degree of parallelism must be positive".to_string(),
            ));
        }
        let degree = degree.min(available_parallelism());
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(degree)
            .build()
            .map_err(|e| Error::Execution(format!("Failed to create thread pool: {e}")))?;

        Ok(Self {
            thread_pool: std::sync::Arc::new(pool),
            degree,
        })
    }
}

#[cfg(feature = "parallel")]
impl std::fmt::Debug for ParallelEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallelEngine")
            .field("degree", &self.degree)
            .finish()
    }
}

#[cfg(feature = "parallel")]
impl ExecutionEngine for ParallelEngine {
    fn run_batch<R, F>(&self, count: usize, task: F) -> Result<Vec<R>>
    where
        R: Send,
        F: Fn(usize) -> Result<R> + Send + Sync,
    {
        use rayon::prelude::*;

        self.thread_pool
            .install(|| (0..count).into_par_iter().map(task).collect())
    }

    fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::Parallel
    }

    fn num_threads(&self) -> usize {
        self.degree
    }
}

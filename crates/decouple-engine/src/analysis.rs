//! Decoupling analysis pipeline
//!
//! Sequences the full computation: validate the sample, compute the
//! original pairwise statistic, generate B decoupled cross-statistics via
//! seeded bootstrap resamples, test significance against the resulting
//! null distribution, and assemble the immutable result aggregate.
//!
//! The pipeline is straight-line with no retry: the computation is pure
//! and deterministic given `(data, kernel, seed)`, so a failure at any
//! stage is terminal.

use crate::resample::{independent_copy, iteration_rng};
use crate::significance::two_tailed_significance;
use crate::statistic::{decoupled_pairwise_mean, pairwise_mean};
use decouple_core::{Error, ExecutionEngine, PairwiseKernel, Result, SequentialEngine};
use std::fmt;
use tracing::{debug, instrument};

/// Name of the resampling method carried on every result
pub const METHOD: &str = "decoupling bootstrap";

/// Configuration for a decoupling analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoupleConfig {
    /// Number of bootstrap iterations B
    pub resamples: usize,
    /// Whether to run iterations over a worker pool
    pub parallel: bool,
    /// Worker pool size; defaults to `min(B, 4)` and is always capped to
    /// the available hardware parallelism
    pub degree_of_parallelism: Option<usize>,
    /// Base seed for all per-iteration random streams
    pub seed: u64,
}

impl Default for DecoupleConfig {
    fn default() -> Self {
        Self {
            resamples: 1000,
            parallel: false,
            degree_of_parallelism: None,
            seed: 123,
        }
    }
}

impl DecoupleConfig {
    /// Set the number of bootstrap iterations
    pub fn with_resamples(mut self, resamples: usize) -> Self {
        self.resamples = resamples;
        self
    }

    /// Enable or disable parallel execution
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the worker pool size explicitly
    pub fn with_degree_of_parallelism(mut self, degree: usize) -> Self {
        self.degree_of_parallelism = Some(degree);
        self
    }

    /// Set the base random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Worker pool size to request when parallel execution is enabled
    pub fn effective_degree(&self) -> usize {
        self.degree_of_parallelism
            .unwrap_or_else(|| self.resamples.clamp(1, 4))
    }
}

/// Result of one decoupling analysis
///
/// A plain immutable value: created once per analysis call and consumed
/// read-only. It shares no storage with the inputs it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoupleResult {
    /// Pairwise statistic of the original sample
    pub original_stat: f64,
    /// The B decoupled cross-statistics, in iteration order
    pub decoupled_distribution: Vec<f64>,
    /// Name of the kernel that was evaluated
    pub kernel_name: String,
    /// Resampling method identifier
    pub method: &'static str,
    /// Mean of the null distribution
    pub null_mean: f64,
    /// Sample standard deviation of the null distribution
    pub null_sd: f64,
    /// Standardized deviation, `None` for a degenerate null distribution
    pub z_score: Option<f64>,
    /// Two-tailed p-value in [0, 1], `None` for a degenerate null
    /// distribution
    pub p_value: Option<f64>,
}

impl DecoupleResult {
    /// Whether the null distribution had zero spread
    pub fn is_degenerate(&self) -> bool {
        self.p_value.is_none()
    }

    /// Number of bootstrap iterations that produced this result
    pub fn resamples(&self) -> usize {
        self.decoupled_distribution.len()
    }
}

impl fmt::Display for DecoupleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({} resamples)", self.method, self.resamples())?;
        writeln!(f, "  kernel: {}", self.kernel_name)?;
        writeln!(f, "  original statistic: {:.6}", self.original_stat)?;
        writeln!(
            f,
            "  null distribution: mean {:.6}, sd {:.6}",
            self.null_mean, self.null_sd
        )?;
        match (self.z_score, self.p_value) {
            (Some(z), Some(p)) => write!(f, "  z = {z:.4}, p = {p:.4}"),
            _ => write!(f, "  p undefined (degenerate null distribution)"),
        }
    }
}

/// Decoupling analysis driver
///
/// Owns the execution engine plus the iteration parameters and exposes
/// the full pipeline as one call. The engine decides sequential vs.
/// parallel scheduling; results are identical either way because every
/// iteration's random stream is derived from `(seed, iteration)` alone.
#[derive(Debug, Clone)]
pub struct Decoupler<E> {
    engine: E,
    resamples: usize,
    seed: u64,
}

impl<E: ExecutionEngine> Decoupler<E> {
    /// Create a decoupler with the given execution engine
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            resamples: 1000,
            seed: 123,
        }
    }

    /// Set the number of bootstrap iterations
    pub fn with_resamples(mut self, resamples: usize) -> Self {
        self.resamples = resamples;
        self
    }

    /// Set the base random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Run the full decoupling analysis
    ///
    /// Pipeline: validate, compute the original statistic, run B
    /// iterations of resample-and-cross-statistic, test significance,
    /// assemble the result. Any stage error aborts the call; no partial
    /// result is ever returned.
    #[instrument(skip(self, data, kernel),
                 fields(n = data.len(), resamples = self.resamples, kernel = kernel.name()))]
    pub fn decouple<T, K>(&self, data: &[T], kernel: &K) -> Result<DecoupleResult>
    where
        T: Sync,
        K: PairwiseKernel<T>,
    {
        if data.len() < 2 {
            return Err(Error::insufficient_pairs(data.len()));
        }
        if self.resamples == 0 {
            return Err(Error::InvalidParameter(
                "number of resamples must be positive".to_string(),
            ));
        }

        let original_stat = pairwise_mean(data, kernel)?;
        debug!(original_stat, "computed original statistic");

        let seed = self.seed;
        let decoupled_distribution = self.engine.run_batch(self.resamples, |b| {
            let mut rng = iteration_rng(seed, b);
            let copy = independent_copy(data, &mut rng);
            decoupled_pairwise_mean(data, &copy, kernel)
        })?;
        debug!(
            samples = decoupled_distribution.len(),
            "collected decoupled null distribution"
        );

        let significance = two_tailed_significance(original_stat, &decoupled_distribution)?;
        if significance.is_degenerate() {
            debug!("null distribution is degenerate; p-value undefined");
        }

        Ok(DecoupleResult {
            original_stat,
            decoupled_distribution,
            kernel_name: kernel.name().to_string(),
            method: METHOD,
            null_mean: significance.null_mean,
            null_sd: significance.null_sd,
            z_score: significance.z_score,
            p_value: significance.p_value,
        })
    }
}

/// Run a decoupling analysis with engine selection from a config
///
/// This is the boundary entry point: the execution engine is resolved
/// here, once, and the rest of the pipeline is engine-agnostic.
pub fn decouple<T, K>(data: &[T], kernel: &K, config: &DecoupleConfig) -> Result<DecoupleResult>
where
    T: Sync,
    K: PairwiseKernel<T>,
{
    if config.parallel {
        #[cfg(feature = "parallel")]
        {
            let engine = decouple_core::ParallelEngine::with_degree(config.effective_degree())?;
            return Decoupler::new(engine)
                .with_resamples(config.resamples)
                .with_seed(config.seed)
                .decouple(data, kernel);
        }
        #[cfg(not(feature = "parallel"))]
        {
            return Err(Error::FeatureNotAvailable(
                "parallel execution requires the `parallel` feature".to_string(),
            ));
        }
    }

    Decoupler::new(SequentialEngine::new())
        .with_resamples(config.resamples)
        .with_seed(config.seed)
        .decouple(data, kernel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use decouple_core::FnKernel;

    fn product_kernel() -> FnKernel<impl Fn(&f64, &f64) -> Result<f64>> {
        FnKernel::new(|a: &f64, b: &f64| Ok(a * b)).with_name("product")
    }

    #[test]
    fn test_config_defaults() {
        let config = DecoupleConfig::default();
        assert_eq!(config.resamples, 1000);
        assert!(!config.parallel);
        assert_eq!(config.degree_of_parallelism, None);
        assert_eq!(config.seed, 123);
        assert_eq!(config.effective_degree(), 4);
    }

    #[test]
    fn test_config_builder() {
        let config = DecoupleConfig::default()
            .with_resamples(3)
            .with_parallel(true)
            .with_seed(99);
        assert_eq!(config.resamples, 3);
        assert!(config.parallel);
        assert_eq!(config.seed, 99);
        // Degree defaults to min(B, 4)
        assert_eq!(config.effective_degree(), 3);

        let config = config.with_degree_of_parallelism(2);
        assert_eq!(config.effective_degree(), 2);
    }

    #[test]
    fn test_rejects_small_sample_before_any_kernel_call() {
        let calls = std::sync::atomic::AtomicUsize::new(0);
        let kernel = FnKernel::new(|_: &f64, _: &f64| {
            calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(1.0)
        });

        let err = decouple(&[1.0], &kernel, &DecoupleConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InsufficientData { .. }));
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[test]
    fn test_rejects_zero_resamples() {
        let data = [1.0, 2.0, 3.0];
        let config = DecoupleConfig::default().with_resamples(0);
        let err = decouple(&data, &product_kernel(), &config).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn test_constant_kernel_is_degenerate_not_a_crash() {
        let data = [1.0, 2.0, 3.0, 4.0];
        let kernel = FnKernel::new(|_: &f64, _: &f64| Ok(5.0)).with_name("constant");
        let config = DecoupleConfig::default().with_resamples(50);

        let result = decouple(&data, &kernel, &config).unwrap();
        assert_relative_eq!(result.original_stat, 5.0);
        assert_relative_eq!(result.null_mean, 5.0);
        assert_eq!(result.null_sd, 0.0);
        assert!(result.is_degenerate());
        assert!(result.p_value.is_none());
        assert!(result.z_score.is_none());
    }

    #[test]
    fn test_kernel_failure_aborts_pipeline() {
        let data = [1.0, -1.0, 2.0];
        let kernel = FnKernel::new(|a: &f64, b: &f64| {
            let v = a * b;
            if v < 0.0 {
                return Err(Error::Computation("negative pair".to_string()));
            }
            Ok(v)
        });

        let err = decouple(&data, &kernel, &DecoupleConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Computation(_)));
    }

    #[test]
    fn test_result_carries_kernel_and_method() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        let config = DecoupleConfig::default().with_resamples(20);

        let result = decouple(&data, &product_kernel(), &config).unwrap();
        assert_eq!(result.kernel_name, "product");
        assert_eq!(result.method, METHOD);
        assert_eq!(result.resamples(), 20);
    }

    #[test]
    fn test_display_summary() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        let config = DecoupleConfig::default().with_resamples(20);
        let result = decouple(&data, &product_kernel(), &config).unwrap();

        let summary = format!("{result}");
        assert!(summary.contains("decoupling bootstrap"));
        assert!(summary.contains("product"));
        assert!(summary.contains("original statistic"));

        let degenerate = DecoupleResult {
            original_stat: 5.0,
            decoupled_distribution: vec![5.0; 3],
            kernel_name: "constant".to_string(),
            method: METHOD,
            null_mean: 5.0,
            null_sd: 0.0,
            z_score: None,
            p_value: None,
        };
        assert!(format!("{degenerate}").contains("undefined"));
    }

    #[test]
    fn test_decoupler_builder() {
        let decoupler = Decoupler::new(SequentialEngine::new())
            .with_resamples(10)
            .with_seed(7);
        let data = [1.0, 2.0, 3.0];

        let result = decoupler.decouple(&data, &product_kernel()).unwrap();
        assert_eq!(result.decoupled_distribution.len(), 10);
    }
}

//! Probabilistic decoupling of pairwise U-statistics
//!
//! This facade crate re-exports the workspace members:
//!
//! - [`decouple_core`]: error type, kernel contract, execution engines
//! - [`decouple_engine`]: pairwise statistics, bootstrap resampling,
//!   significance testing, and the analysis pipeline
//!
//! # Example
//!
//! ```rust
//! use decouple_stats::{decouple, DecoupleConfig, FnKernel};
//!
//! let data = vec![1.0_f64, 2.5, 3.1, 4.0, 5.2];
//! let kernel = FnKernel::new(|a: &f64, b: &f64| Ok((a - b).abs()))
//!     .with_name("absolute difference");
//!
//! let config = DecoupleConfig::default().with_resamples(200).with_seed(42);
//! let result = decouple(&data, &kernel, &config).unwrap();
//!
//! println!("{result}");
//! ```

pub use decouple_core::{
    execution::{ExecutionEngine, ExecutionStrategy, ParallelEngine, SequentialEngine},
    Error, FnKernel, PairwiseKernel, Result,
};

pub use decouple_engine::{
    decouple, decoupled_pairwise_mean, independent_copy, iteration_rng, pairwise_mean,
    two_tailed_significance, BootstrapSample, DecoupleConfig, DecoupleResult, Decoupler,
    Significance,
};

//! Bootstrap decoupling of pairwise U-statistics
//!
//! This crate transforms a pairwise (order-2) U-statistic computed over
//! dependent pairs into a null distribution of statistics computed over
//! independent-copy pairs, then reports how far the original statistic
//! deviates from that distribution.
//!
//! # Overview
//!
//! Given a sample and a [`PairwiseKernel`](decouple_core::PairwiseKernel),
//! the analysis:
//!
//! 1. evaluates the mean kernel value over pairs of the original sample;
//! 2. draws B bootstrap independent copies and evaluates the cross
//!    statistic of the original sample against each copy;
//! 3. standardizes the original statistic against the resulting null
//!    distribution and reports a two-tailed p-value under a normal
//!    approximation.
//!
//! Every iteration's random stream is derived purely from the base seed
//! and the iteration index, so sequential and parallel runs of the same
//! seed produce bit-identical distributions.
//!
//! # Example
//!
//! ```rust
//! use decouple_core::FnKernel;
//! use decouple_engine::{decouple, DecoupleConfig};
//!
//! let data = vec![0.4_f64, 1.1, 2.3, 3.0, 4.8];
//! let kernel = FnKernel::new(|a: &f64, b: &f64| Ok((a - b).abs()))
//!     .with_name("absolute difference");
//!
//! let config = DecoupleConfig::default().with_resamples(200).with_seed(7);
//! let result = decouple(&data, &kernel, &config).unwrap();
//!
//! assert_eq!(result.decoupled_distribution.len(), 200);
//! ```

pub mod analysis;
pub mod resample;
pub mod significance;
pub mod statistic;

pub use analysis::{decouple, DecoupleConfig, DecoupleResult, Decoupler, METHOD};
pub use resample::{independent_copy, iteration_rng, BootstrapSample};
pub use significance::{two_tailed_significance, Significance};
pub use statistic::{decoupled_pairwise_mean, pairwise_mean};

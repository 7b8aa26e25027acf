//! Core traits and types for U-statistic decoupling
//!
//! This crate provides the foundations shared by the decouple-stats
//! workspace:
//!
//! - A unified [`Error`] type and [`Result`] alias
//! - The [`PairwiseKernel`] contract that all pairwise statistics consume
//! - Execution engines controlling sequential vs. parallel iteration
//!
//! # Design Philosophy
//!
//! - **Kernels are data-in, value-out**: pure, deterministic, and safe to
//!   call concurrently from independent iterations
//! - **Boundary normalization**: raw comparison closures are wrapped into
//!   [`FnKernel`] once, so nothing above this crate branches on kernel kind
//! - **Order-independent scheduling**: engines return batch results in
//!   iteration-index order regardless of completion order

pub mod error;
pub mod execution;
pub mod kernel;

pub use error::{Error, Result};
pub use execution::{ExecutionEngine, ExecutionStrategy, SequentialEngine};
pub use kernel::{FnKernel, PairwiseKernel};

#[cfg(feature = "parallel")]
pub use execution::ParallelEngine;

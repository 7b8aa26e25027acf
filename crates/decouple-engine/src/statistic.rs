//! Pairwise U-statistic evaluation
//!
//! The order-2 U-statistic is the mean kernel value over index pairs of a
//! sample. Two modes exist: self mode, where both arguments come from the
//! same sample, and cross (decoupled) mode, where the second argument is
//! drawn from an independent copy. Symmetric kernels are evaluated over
//! unordered pairs i < j only; asymmetric kernels over all ordered pairs
//! i != j.
//!
//! This is the O(n^2) hot path. The loops touch no shared mutable state
//! and allocate nothing per pair, so both functions may be called from
//! concurrent iterations over the same read-only inputs. Kernel values
//! must be finite; a NaN or infinite value aborts the computation
//! instead of flowing into the mean.

use crate::resample::BootstrapSample;
use decouple_core::{Error, PairwiseKernel, Result};

fn finite_value(value: f64, kernel_name: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::non_finite(&format!("value of kernel '{kernel_name}'")))
    }
}

/// Mean kernel value over pairs of a single sample (self mode)
///
/// Symmetric kernels average over the C(n,2) unordered pairs; asymmetric
/// kernels over the n(n-1) ordered pairs.
pub fn pairwise_mean<T, K>(x: &[T], kernel: &K) -> Result<f64>
where
    K: PairwiseKernel<T>,
{
    let n = x.len();
    if n < 2 {
        return Err(Error::insufficient_pairs(n));
    }

    let mut total = 0.0;
    let mut count = 0usize;

    if kernel.symmetric() {
        for i in 0..n {
            for j in (i + 1)..n {
                total += finite_value(kernel.evaluate(&x[i], &x[j])?, kernel.name())?;
                count += 1;
            }
        }
    } else {
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    total += finite_value(kernel.evaluate(&x[i], &x[j])?, kernel.name())?;
                    count += 1;
                }
            }
        }
    }

    Ok(total / count as f64)
}

/// Mean kernel value with the second argument decoupled (cross mode)
///
/// Pair enumeration matches [`pairwise_mean`], but every evaluation takes
/// its second argument from the independent copy `y` instead of `x`.
pub fn decoupled_pairwise_mean<T, K>(x: &[T], y: &BootstrapSample<'_, T>, kernel: &K) -> Result<f64>
where
    K: PairwiseKernel<T>,
{
    let n = x.len();
    if n < 2 {
        return Err(Error::insufficient_pairs(n));
    }
    if y.len() != n {
        return Err(Error::size_mismatch(n, y.len(), "independent copy"));
    }

    let mut total = 0.0;
    let mut count = 0usize;

    if kernel.symmetric() {
        for i in 0..n {
            for j in (i + 1)..n {
                total += finite_value(kernel.evaluate(&x[i], y.get(j))?, kernel.name())?;
                count += 1;
            }
        }
    } else {
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    total += finite_value(kernel.evaluate(&x[i], y.get(j))?, kernel.name())?;
                    count += 1;
                }
            }
        }
    }

    Ok(total / count as f64)
}

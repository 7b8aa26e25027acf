//! Pairwise kernel contract
//!
//! A kernel is a pure, deterministic comparison between two observations.
//! Every component above this trait assumes that repeated calls with
//! identical inputs return identical values and that calls may be issued
//! concurrently from independent iterations, so implementations must not
//! touch shared mutable state.

use crate::Result;

/// Pairwise comparison kernel over observations of type `T`
///
/// Implementations must be side-effect-free and return a finite value for
/// any pair of compatible observations. Structurally incomparable
/// observations (e.g. unequal-length sequences) are reported with
/// [`Error::ShapeMismatch`](crate::Error::ShapeMismatch).
pub trait PairwiseKernel<T: ?Sized>: Send + Sync {
    /// Evaluate the kernel on a pair of observations
    fn evaluate(&self, a: &T, b: &T) -> Result<f64>;

    /// Whether the kernel is invariant under argument order
    ///
    /// Symmetric kernels are evaluated over unordered pairs only.
    fn symmetric(&self) -> bool;

    /// Name of this kernel for reporting
    fn name(&self) -> &str;
}

impl<T: ?Sized, K: PairwiseKernel<T> + ?Sized> PairwiseKernel<T> for &K {
    fn evaluate(&self, a: &T, b: &T) -> Result<f64> {
        (**self).evaluate(a, b)
    }

    fn symmetric(&self) -> bool {
        (**self).symmetric()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Adapter turning a raw two-argument closure into a [`PairwiseKernel`]
///
/// This is the single normalization point for the "raw function" input
/// form: the closure is wrapped once at the boundary with a default
/// symmetry assumption, and the core never inspects kernel kind again.
#[derive(Debug, Clone)]
pub struct FnKernel<F> {
    f: F,
    symmetric: bool,
    name: String,
}

impl<F> FnKernel<F> {
    /// Wrap a closure as a kernel, assumed symmetric by default
    pub fn new(f: F) -> Self {
        Self {
            f,
            symmetric: true,
            name: "custom kernel".to_string(),
        }
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Override the symmetry assumption
    pub fn with_symmetric(mut self, symmetric: bool) -> Self {
        self.symmetric = symmetric;
        self
    }
}

impl<T, F> PairwiseKernel<T> for FnKernel<F>
where
    F: Fn(&T, &T) -> Result<f64> + Send + Sync,
{
    fn evaluate(&self, a: &T, b: &T) -> Result<f64> {
        (self.f)(a, b)
    }

    fn symmetric(&self) -> bool {
        self.symmetric
    }

    fn name(&self) -> &str {
        &self.name
    }
}

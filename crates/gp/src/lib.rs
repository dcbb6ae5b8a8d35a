//! This library assembles the covariance matrix of a multi-output
//! [Gaussian Process](https://en.wikipedia.org/wiki/Gaussian_process) jointly modelling
//! stellar radial velocities (RV) and two activity indicators sampled at the same times,
//! following the framework of Rajpaul et al. 2015.
//!
//! The three observables are linear combinations of a latent process `G(t)` and of its time
//! derivative `dG/dt`:
//! * RV = vc G + vr dG/dt,
//! * indicator 1 = lc G,
//! * indicator 2 = bc G + br dG/dt.
//!
//! The stacked covariance matrix is built by [build_bigmatrix] from hyperparameters [CovParams]
//! (a kernel of `G` chosen among the [KernelFamily] and the [Couplings] coefficients),
//! or by [build_bigmatrix_tagged] from a family tag and a positional hyperparameter vector.
//! Individual blocks are available through [k11], [k12], [k13], [k22], [k23], [k33].
//!
//! The RV observable may carry a deterministic trend described by a [mean_models::MeanModel],
//! the keplerian signature of a planet being [mean_models::KeplerianMean].
//! Once the trend removed with [rv_residuals], [log_likelihood] scores the observations.
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
mod blocks;
mod covariance;
mod errors;
mod likelihood;
pub mod mean_models;

mod parameters;
mod utils;

pub use blocks::*;
pub use covariance::*;
pub use errors::*;
pub use likelihood::*;
pub use parameters::*;
pub use utils::{pairwise_lags, small_matrix};

pub use miniframe_kernels::{Derivative, Kernel, QuasiPeriodicKernel, SquaredExponentialKernel};

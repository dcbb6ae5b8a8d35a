//! This library implements stationary covariance kernels of a latent process `G(t)`
//! together with the covariances involving its time derivative `dG/dt`.
//!
//! A multi-output gaussian process where observables are linear combinations of
//! `G` and `dG/dt` (see Rajpaul et al. 2015, "A Gaussian process framework for
//! modelling stellar activity signals in radial velocity data") needs four
//! evaluations of the kernel `k(t1, t2)` of `G`:
//! * `k` itself,
//! * `dk/dt1`, covariance between `dG/dt(t1)` and `G(t2)`,
//! * `dk/dt2`, covariance between `G(t1)` and `dG/dt(t2)`,
//! * `d2k/dt1dt2`, covariance between `dG/dt(t1)` and `dG/dt(t2)`.
//!
//! All of them are functions of the lag `r = t1 - t2` and are provided by the [Kernel] trait.
//!
//! The following kernels are implemented:
//! * squared exponential: [SquaredExponentialKernel],
//! * quasi periodic: [QuasiPeriodicKernel].
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
mod stationary;

pub use stationary::*;

//! A module for mean functions of the RV observable.
//!
//! The following models are implemented:
//! * constant,
//! * linear,
//! * parabola,
//! * keplerian (RV signature of a planet on an eccentric orbit).

use linfa::Float;
use ndarray::{array, Array1, ArrayBase, Data, Ix1};
use paste::paste;
#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of fixed point refinements used to solve Kepler's equation
pub const KEPLER_N_ITER: usize = 100;

/// A trait for mean functions of time
pub trait MeanModel<F: Float>: Clone + Copy + fmt::Display + Sync {
    /// Evaluate the mean function at times `t`, the result has the length of `t`
    fn value(&self, t: &ArrayBase<impl Data<Elem = F>, Ix1>) -> Array1<F>;

    /// Parameters of the model in declaration order
    fn pars(&self) -> Array1<F>;
}

/// A constant offset
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct ConstantMean<F: Float> {
    /// Offset
    pub c: F,
}

impl<F: Float> MeanModel<F> for ConstantMean<F> {
    /// m(t) = c
    fn value(&self, t: &ArrayBase<impl Data<Elem = F>, Ix1>) -> Array1<F> {
        Array1::from_elem(t.len(), self.c)
    }

    fn pars(&self) -> Array1<F> {
        array![self.c]
    }
}

/// A linear function of time
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct LinearMean<F: Float> {
    /// Slope
    pub slope: F,
    /// Intercept
    pub intercept: F,
}

impl<F: Float> MeanModel<F> for LinearMean<F> {
    /// m(t) = slope * t + intercept
    fn value(&self, t: &ArrayBase<impl Data<Elem = F>, Ix1>) -> Array1<F> {
        t.mapv(|v| self.slope * v + self.intercept)
    }

    fn pars(&self) -> Array1<F> {
        array![self.slope, self.intercept]
    }
}

/// A 2nd degree polynomial of time
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct ParabolaMean<F: Float> {
    /// Quadratic coefficient
    pub quad: F,
    /// Slope
    pub slope: F,
    /// Intercept
    pub intercept: F,
}

impl<F: Float> MeanModel<F> for ParabolaMean<F> {
    /// m(t) = quad * t^2 + slope * t + intercept
    fn value(&self, t: &ArrayBase<impl Data<Elem = F>, Ix1>) -> Array1<F> {
        t.mapv(|v| self.quad * v * v + self.slope * v + self.intercept)
    }

    fn pars(&self) -> Array1<F> {
        array![self.quad, self.slope, self.intercept]
    }
}

/// RV signal of a keplerian orbit
///
/// RV(t) = krv * (cos(w + nu(t)) + ecc * cos(w))
///
/// where the true anomaly nu is given by tan(nu / 2) = sqrt((1 + ecc) / (1 - ecc)) * tan(E / 2)
/// and the eccentric anomaly E solves Kepler's equation E - ecc * sin(E) = M
/// for the mean anomaly M(t) = 2 * pi * (t - t0) / period.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct KeplerianMean<F: Float> {
    /// Orbital period
    pub period: F,
    /// Eccentricity, expected in [0, 1)
    pub ecc: F,
    /// RV semi-amplitude
    pub krv: F,
    /// Argument of periastron
    pub w: F,
    /// Reference epoch
    pub t0: F,
}

impl<F: Float> KeplerianMean<F> {
    /// Mean anomaly at time `t`
    pub fn mean_anomaly(&self, t: F) -> F {
        F::cast(2. * std::f64::consts::PI) * (t - self.t0) / self.period
    }

    /// True anomaly at time `t`.
    ///
    /// Not finite when the eccentric anomaly hits pi.
    pub fn true_anomaly(&self, t: F) -> F {
        let e = kepler_eccentric_anomaly(self.mean_anomaly(t), self.ecc);
        let two = F::cast(2.);
        let ratio = ((F::one() + self.ecc) / (F::one() - self.ecc)).sqrt();
        two * F::atan(ratio * F::tan(e / two))
    }
}

impl<F: Float> MeanModel<F> for KeplerianMean<F> {
    fn value(&self, t: &ArrayBase<impl Data<Elem = F>, Ix1>) -> Array1<F> {
        let offset = self.ecc * self.w.cos();
        t.mapv(|v| self.krv * (offset + (self.w + self.true_anomaly(v)).cos()))
    }

    fn pars(&self) -> Array1<F> {
        array![self.period, self.ecc, self.krv, self.w, self.t0]
    }
}

/// Solve Kepler's equation `E - ecc * sin(E) = m` for the eccentric anomaly `E`.
///
/// Starts from `E0 = m + ecc * sin(m) + ecc^2 / 2 * sin(2m)` then always runs
/// [KEPLER_N_ITER] Newton-like refinements `E1 = E0 + (m - M0) / (1 - ecc * cos(E0))`,
/// where `M0` lags one iteration behind `E0`.
pub fn kepler_eccentric_anomaly<F: Float>(m: F, ecc: F) -> F {
    let two = F::cast(2.);
    let mut e0 = m + ecc * m.sin() + F::cast(0.5) * ecc * ecc * (two * m).sin();
    let mut m0 = e0 - ecc * e0.sin();
    for _ in 0..KEPLER_N_ITER {
        let e1 = e0 + (m - m0) / (F::one() - ecc * e0.cos());
        m0 = e0 - ecc * e0.sin();
        e0 = e1;
    }
    e0
}

macro_rules! declare_mean_util_impls {
    ($regr:ident, $($par:ident),+) => {
        paste! {
            impl<F: Float> [<$regr Mean>]<F> {
                /// Constructor given parameters in declaration order
                pub fn new($($par: F),+) -> Self {
                    [<$regr Mean>] { $($par),+ }
                }
            }

            impl<F: Float> fmt::Display for [<$regr Mean>]<F> {
                fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    let pars: Vec<String> = vec![$(self.$par.to_string()),+];
                    write!(f, "{}({})", stringify!($regr), pars.join(", "))
                }
            }
        }
    };
}

declare_mean_util_impls!(Constant, c);
declare_mean_util_impls!(Linear, slope, intercept);
declare_mean_util_impls!(Parabola, quad, slope, intercept);
declare_mean_util_impls!(Keplerian, period, ecc, krv, w, t0);

use linfa::Float;
use ndarray::{Array, ArrayBase, Data, Dimension};
#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Selects which kernel variant to evaluate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub enum Derivative {
    /// k(t1, t2)
    Base,
    /// dk/dt1
    Dt1,
    /// dk/dt2
    Dt2,
    /// d2k/dt1dt2
    Dt1Dt2,
}

/// A trait for stationary kernels of a latent process and of its time derivative.
///
/// Every method takes the lag `r = t1 - t2`.
pub trait Kernel<F: Float>: Clone + fmt::Display + Sync {
    /// Covariance k(t1, t2)
    fn value(&self, r: F) -> F;

    /// Partial derivative dk/dt1
    fn dt1(&self, r: F) -> F;

    /// Partial derivative dk/dt2
    fn dt2(&self, r: F) -> F;

    /// Second order cross derivative d2k/dt1dt2
    fn dt1dt2(&self, r: F) -> F;

    /// Evaluate the given `derivative` variant at lag `r`
    fn eval(&self, derivative: Derivative, r: F) -> F {
        match derivative {
            Derivative::Base => self.value(r),
            Derivative::Dt1 => self.dt1(r),
            Derivative::Dt2 => self.dt2(r),
            Derivative::Dt1Dt2 => self.dt1dt2(r),
        }
    }

    /// Evaluate the given `derivative` variant element-wise over an array of lags.
    /// The result has the shape of `lags`.
    fn apply<D: Dimension>(
        &self,
        derivative: Derivative,
        lags: &ArrayBase<impl Data<Elem = F>, D>,
    ) -> Array<F, D> {
        lags.mapv(|r| self.eval(derivative, r))
    }
}

/// Squared exponential kernel
///
/// k(r) = exp( - r^2 / (2 * ell^2) )
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct SquaredExponentialKernel<F: Float> {
    /// Length scale
    pub ell: F,
}

impl<F: Float> SquaredExponentialKernel<F> {
    /// Constructor given the length scale
    pub fn new(ell: F) -> Self {
        SquaredExponentialKernel { ell }
    }

    fn inv_ell2(&self) -> F {
        F::one() / (self.ell * self.ell)
    }
}

impl<F: Float> Kernel<F> for SquaredExponentialKernel<F> {
    fn value(&self, r: F) -> F {
        F::exp(F::cast(-0.5) * r * r * self.inv_ell2())
    }

    /// - r / ell^2 * k(r)
    fn dt1(&self, r: F) -> F {
        -r * self.inv_ell2() * self.value(r)
    }

    /// r / ell^2 * k(r)
    fn dt2(&self, r: F) -> F {
        r * self.inv_ell2() * self.value(r)
    }

    /// (1 / ell^2 - r^2 / ell^4) * k(r)
    fn dt1dt2(&self, r: F) -> F {
        let inv_ell2 = self.inv_ell2();
        (inv_ell2 - r * r * inv_ell2 * inv_ell2) * self.value(r)
    }
}

impl<F: Float> fmt::Display for SquaredExponentialKernel<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SquaredExponential(ell={})", self.ell)
    }
}

/// Quasi periodic kernel: a periodic kernel damped by a squared exponential envelope
///
/// k(r) = exp( - 2 * sin^2(pi * r / period) / ell_p^2 - r^2 / (2 * ell_e^2) )
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct QuasiPeriodicKernel<F: Float> {
    /// Periodic length scale
    pub ell_p: F,
    /// Evolutionary length scale
    pub ell_e: F,
    /// Period
    pub period: F,
}

impl<F: Float> QuasiPeriodicKernel<F> {
    /// Constructor given periodic length scale, evolutionary length scale and period
    pub fn new(ell_p: F, ell_e: F, period: F) -> Self {
        QuasiPeriodicKernel {
            ell_p,
            ell_e,
            period,
        }
    }

    /// Angular frequency 2 * pi / period
    fn omega(&self) -> F {
        F::cast(2. * std::f64::consts::PI) / self.period
    }

    /// First derivative of the exponent with respect to r
    fn exponent_d1(&self, r: F) -> F {
        let omega = self.omega();
        -omega / (self.ell_p * self.ell_p) * F::sin(omega * r) - r / (self.ell_e * self.ell_e)
    }

    /// Second derivative of the exponent with respect to r
    fn exponent_d2(&self, r: F) -> F {
        let omega = self.omega();
        -omega * omega / (self.ell_p * self.ell_p) * F::cos(omega * r)
            - F::one() / (self.ell_e * self.ell_e)
    }
}

impl<F: Float> Kernel<F> for QuasiPeriodicKernel<F> {
    fn value(&self, r: F) -> F {
        let s = F::sin(F::cast(std::f64::consts::PI) * r / self.period);
        F::exp(
            F::cast(-2.) * s * s / (self.ell_p * self.ell_p)
                - F::cast(0.5) * r * r / (self.ell_e * self.ell_e),
        )
    }

    fn dt1(&self, r: F) -> F {
        self.exponent_d1(r) * self.value(r)
    }

    fn dt2(&self, r: F) -> F {
        -self.exponent_d1(r) * self.value(r)
    }

    fn dt1dt2(&self, r: F) -> F {
        let a1 = self.exponent_d1(r);
        -(self.exponent_d2(r) + a1 * a1) * self.value(r)
    }
}

impl<F: Float> fmt::Display for QuasiPeriodicKernel<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "QuasiPeriodic(ell_p={}, ell_e={}, period={})",
            self.ell_p, self.ell_e, self.period
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use paste::paste;

    #[test]
    fn test_squared_exponential() {
        let kernel = SquaredExponentialKernel::new(2.);
        let lags = array![[0., 1.], [-1., 2.]];
        let expected = array![
            [1., f64::exp(-0.125)],
            [f64::exp(-0.125), f64::exp(-0.5)]
        ];
        assert_abs_diff_eq!(
            kernel.apply(Derivative::Base, &lags),
            expected,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(kernel.dt1dt2(0.), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_quasi_periodic() {
        let kernel = QuasiPeriodicKernel::new(1., 100., 3.);
        // periodic part vanishes at multiples of the period
        assert_abs_diff_eq!(
            kernel.value(3.),
            f64::exp(-0.5 * 9. / 10000.),
            epsilon = 1e-12
        );
        let s = f64::sin(std::f64::consts::PI * 0.5 / 3.);
        assert_abs_diff_eq!(
            kernel.value(0.5),
            f64::exp(-2. * s * s - 0.125 / 10000.),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(kernel.value(0.), 1., epsilon = 1e-15);
    }

    #[test]
    fn test_quasi_periodic_reduces_to_squared_exponential() {
        // an infinite periodic length scale leaves only the evolutionary envelope
        let qp = QuasiPeriodicKernel::new(f64::INFINITY, 1.7, 2.3);
        let se = SquaredExponentialKernel::new(1.7);
        for r in [-3.1, -0.4, 0., 0.9, 2.5] {
            assert_abs_diff_eq!(qp.value(r), se.value(r), epsilon = 1e-12);
            assert_abs_diff_eq!(qp.dt1(r), se.dt1(r), epsilon = 1e-12);
            assert_abs_diff_eq!(qp.dt2(r), se.dt2(r), epsilon = 1e-12);
            assert_abs_diff_eq!(qp.dt1dt2(r), se.dt1dt2(r), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_eval_dispatch() {
        let kernel = SquaredExponentialKernel::new(0.8);
        let r = 0.3;
        assert_eq!(kernel.eval(Derivative::Base, r), kernel.value(r));
        assert_eq!(kernel.eval(Derivative::Dt1, r), kernel.dt1(r));
        assert_eq!(kernel.eval(Derivative::Dt2, r), kernel.dt2(r));
        assert_eq!(kernel.eval(Derivative::Dt1Dt2, r), kernel.dt1dt2(r));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            "SquaredExponential(ell=1.5)",
            SquaredExponentialKernel::new(1.5).to_string()
        );
        assert_eq!(
            "QuasiPeriodic(ell_p=1, ell_e=2, period=3)",
            QuasiPeriodicKernel::new(1., 2., 3.).to_string()
        );
    }

    #[cfg(feature = "serializable")]
    #[test]
    fn test_save_load() {
        let kernel = QuasiPeriodicKernel::new(0.5, 20., 12.);
        let data = serde_json::to_string(&kernel).unwrap();
        let loaded: QuasiPeriodicKernel<f64> = serde_json::from_str(&data).unwrap();
        assert_eq!(kernel, loaded);
    }

    // Derivatives of k(t1, t2) = k(t1 - t2) checked against central finite differences
    macro_rules! test_kernel_derivatives {
        ($name:ident, $kernel:expr) => {
            paste! {
                #[test]
                fn [<test_ $name _derivatives>]() {
                    let kernel = $kernel;
                    let e = 1e-5;
                    let k = |t1: f64, t2: f64| kernel.value(t1 - t2);
                    for (t1, t2) in [(0.3, 1.2), (2.5, -0.7), (4., 4.), (-1.3, 0.2)] {
                        let r = t1 - t2;
                        let fd_t1 = (k(t1 + e, t2) - k(t1 - e, t2)) / (2. * e);
                        assert_abs_diff_eq!(fd_t1, kernel.dt1(r), epsilon = 1e-6);
                        let fd_t2 = (k(t1, t2 + e) - k(t1, t2 - e)) / (2. * e);
                        assert_abs_diff_eq!(fd_t2, kernel.dt2(r), epsilon = 1e-6);
                        let fd_t1t2 = (kernel.dt1(t1 - (t2 + e)) - kernel.dt1(t1 - (t2 - e)))
                            / (2. * e);
                        assert_abs_diff_eq!(fd_t1t2, kernel.dt1dt2(r), epsilon = 1e-5);
                        // stationarity: d/dt1 = - d/dt2
                        assert_abs_diff_eq!(kernel.dt1(r), -kernel.dt2(r), epsilon = 1e-15);
                        assert_abs_diff_eq!(kernel.dt1(r), kernel.dt2(-r), epsilon = 1e-12);
                    }
                }
            }
        };
    }

    test_kernel_derivatives!(squared_exponential, SquaredExponentialKernel::new(1.3));
    test_kernel_derivatives!(quasi_periodic, QuasiPeriodicKernel::new(0.9, 3.5, 2.2));
}

use crate::errors::{GpError, Result};
use linfa::Float;
use miniframe_kernels::{Kernel, QuasiPeriodicKernel, SquaredExponentialKernel};
#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;

/// Number of coupling coefficients `vc, vr, lc, bc, br`
pub const N_COUPLINGS: usize = 5;

/// Kernel family tag as used in positional hyperparameter vectors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub enum KernelFamily {
    /// Tag 1: `[l, vc, vr, lc, bc, br]`
    SquaredExponential = 1,
    /// Tag 2: `[lp, le, p, vc, vr, lc, bc, br]`
    QuasiPeriodic = 2,
}

impl KernelFamily {
    /// Number of kernel hyperparameters, couplings excluded
    pub fn n_kernel_params(&self) -> usize {
        match self {
            KernelFamily::SquaredExponential => 1,
            KernelFamily::QuasiPeriodic => 3,
        }
    }

    /// Expected length of the positional hyperparameter vector
    pub fn arity(&self) -> usize {
        self.n_kernel_params() + N_COUPLINGS
    }

    /// Integer tag of the family
    pub fn tag(&self) -> usize {
        *self as usize
    }
}

impl TryFrom<usize> for KernelFamily {
    type Error = GpError;
    fn try_from(tag: usize) -> Result<Self> {
        match tag {
            1 => Ok(KernelFamily::SquaredExponential),
            2 => Ok(KernelFamily::QuasiPeriodic),
            _ => Err(GpError::InvalidKernelFamily(tag)),
        }
    }
}

impl fmt::Display for KernelFamily {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KernelFamily::SquaredExponential => write!(f, "SquaredExponential"),
            KernelFamily::QuasiPeriodic => write!(f, "QuasiPeriodic"),
        }
    }
}

/// Amplitude couplings between the latent process `G`, its derivative `dG/dt`
/// and the three observables:
/// * RV = vc * G + vr * dG/dt
/// * indicator 1 = lc * G
/// * indicator 2 = bc * G + br * dG/dt
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct Couplings<F: Float> {
    /// RV coupling to G
    pub vc: F,
    /// RV coupling to dG/dt
    pub vr: F,
    /// Indicator 1 coupling to G
    pub lc: F,
    /// Indicator 2 coupling to G
    pub bc: F,
    /// Indicator 2 coupling to dG/dt
    pub br: F,
}

impl<F: Float> Couplings<F> {
    /// Constructor in positional order `vc, vr, lc, bc, br`
    pub fn new(vc: F, vr: F, lc: F, bc: F, br: F) -> Self {
        Couplings { vc, vr, lc, bc, br }
    }

    /// Set RV coupling to G
    pub fn vc(mut self, vc: F) -> Self {
        self.vc = vc;
        self
    }

    /// Set RV coupling to dG/dt
    pub fn vr(mut self, vr: F) -> Self {
        self.vr = vr;
        self
    }

    /// Set indicator 1 coupling to G
    pub fn lc(mut self, lc: F) -> Self {
        self.lc = lc;
        self
    }

    /// Set indicator 2 coupling to G
    pub fn bc(mut self, bc: F) -> Self {
        self.bc = bc;
        self
    }

    /// Set indicator 2 coupling to dG/dt
    pub fn br(mut self, br: F) -> Self {
        self.br = br;
        self
    }

    fn from_slice(a: &[F]) -> Self {
        Couplings::new(a[0], a[1], a[2], a[3], a[4])
    }

    fn to_vec(self) -> Vec<F> {
        vec![self.vc, self.vr, self.lc, self.bc, self.br]
    }
}

/// Kernel hyperparameters of the latent process, one variant per kernel family
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub enum KernelParams<F: Float> {
    /// Squared exponential kernel
    SquaredExponential(SquaredExponentialKernel<F>),
    /// Quasi periodic kernel
    QuasiPeriodic(QuasiPeriodicKernel<F>),
}

impl<F: Float> KernelParams<F> {
    /// Kernel family of these hyperparameters
    pub fn family(&self) -> KernelFamily {
        match self {
            KernelParams::SquaredExponential(_) => KernelFamily::SquaredExponential,
            KernelParams::QuasiPeriodic(_) => KernelFamily::QuasiPeriodic,
        }
    }
}

impl<F: Float> Kernel<F> for KernelParams<F> {
    fn value(&self, r: F) -> F {
        match self {
            KernelParams::SquaredExponential(k) => k.value(r),
            KernelParams::QuasiPeriodic(k) => k.value(r),
        }
    }

    fn dt1(&self, r: F) -> F {
        match self {
            KernelParams::SquaredExponential(k) => k.dt1(r),
            KernelParams::QuasiPeriodic(k) => k.dt1(r),
        }
    }

    fn dt2(&self, r: F) -> F {
        match self {
            KernelParams::SquaredExponential(k) => k.dt2(r),
            KernelParams::QuasiPeriodic(k) => k.dt2(r),
        }
    }

    fn dt1dt2(&self, r: F) -> F {
        match self {
            KernelParams::SquaredExponential(k) => k.dt1dt2(r),
            KernelParams::QuasiPeriodic(k) => k.dt1dt2(r),
        }
    }
}

impl<F: Float> fmt::Display for KernelParams<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KernelParams::SquaredExponential(k) => write!(f, "{k}"),
            KernelParams::QuasiPeriodic(k) => write!(f, "{k}"),
        }
    }
}

/// The full hyperparameter set of the multi-output GP covariance
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct CovParams<F: Float> {
    /// Kernel of the latent process
    pub kernel: KernelParams<F>,
    /// Couplings between latent process and observables
    pub couplings: Couplings<F>,
}

impl<F: Float> CovParams<F> {
    /// Constructor for a squared exponential kernel with length scale `ell`
    pub fn squared_exponential(ell: F, couplings: Couplings<F>) -> Self {
        CovParams {
            kernel: KernelParams::SquaredExponential(SquaredExponentialKernel::new(ell)),
            couplings,
        }
    }

    /// Constructor for a quasi periodic kernel with periodic length scale `ell_p`,
    /// evolutionary length scale `ell_e` and `period`
    pub fn quasi_periodic(ell_p: F, ell_e: F, period: F, couplings: Couplings<F>) -> Self {
        CovParams {
            kernel: KernelParams::QuasiPeriodic(QuasiPeriodicKernel::new(ell_p, ell_e, period)),
            couplings,
        }
    }

    /// Parse a positional hyperparameter vector `a` given the kernel family `tag`:
    /// * 1: `[l, vc, vr, lc, bc, br]`
    /// * 2: `[lp, le, p, vc, vr, lc, bc, br]`
    pub fn from_tagged(tag: usize, a: &[F]) -> Result<Self> {
        let family = KernelFamily::try_from(tag)?;
        if a.len() != family.arity() {
            return Err(GpError::HyperparameterArity {
                family: family.to_string(),
                expected: family.arity(),
                got: a.len(),
            });
        }
        let (kernel_params, couplings) = a.split_at(family.n_kernel_params());
        let couplings = Couplings::from_slice(couplings);
        let params = match family {
            KernelFamily::SquaredExponential => {
                CovParams::squared_exponential(kernel_params[0], couplings)
            }
            KernelFamily::QuasiPeriodic => CovParams::quasi_periodic(
                kernel_params[0],
                kernel_params[1],
                kernel_params[2],
                couplings,
            ),
        };
        Ok(params)
    }

    /// Kernel family of these hyperparameters
    pub fn family(&self) -> KernelFamily {
        self.kernel.family()
    }

    /// Positional hyperparameter vector, inverse of [CovParams::from_tagged]
    pub fn to_vec(&self) -> Vec<F> {
        let mut a = match self.kernel {
            KernelParams::SquaredExponential(k) => vec![k.ell],
            KernelParams::QuasiPeriodic(k) => vec![k.ell_p, k.ell_e, k.period],
        };
        a.extend(self.couplings.to_vec());
        a
    }

    /// Set couplings
    pub fn couplings(mut self, couplings: Couplings<F>) -> Self {
        self.couplings = couplings;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tagged_squared_exponential() {
        let params = CovParams::from_tagged(1, &[2., 0.1, 0.2, 0.3, 0.4, 0.5]).unwrap();
        assert_eq!(params.family(), KernelFamily::SquaredExponential);
        assert_eq!(
            params.kernel,
            KernelParams::SquaredExponential(SquaredExponentialKernel::new(2.))
        );
        assert_eq!(params.couplings, Couplings::new(0.1, 0.2, 0.3, 0.4, 0.5));
    }

    #[test]
    fn test_from_tagged_quasi_periodic() {
        let a = [0.5, 30., 12., 1., 2., 3., 4., 5.];
        let params = CovParams::from_tagged(2, &a).unwrap();
        assert_eq!(params.family(), KernelFamily::QuasiPeriodic);
        assert_eq!(
            params.kernel,
            KernelParams::QuasiPeriodic(QuasiPeriodicKernel::new(0.5, 30., 12.))
        );
        assert_eq!(params.couplings.vc, 1.);
        assert_eq!(params.couplings.br, 5.);
        assert_eq!(params.to_vec(), a.to_vec());
    }

    #[test]
    fn test_invalid_family() {
        let res = CovParams::from_tagged(3, &[1., 1., 1., 1., 1., 1.]);
        assert!(matches!(res, Err(GpError::InvalidKernelFamily(3))));
        let res = CovParams::<f64>::from_tagged(0, &[]);
        assert!(matches!(res, Err(GpError::InvalidKernelFamily(0))));
    }

    #[test]
    fn test_arity_mismatch() {
        // quasi periodic vector given with the squared exponential tag
        let res = CovParams::from_tagged(1, &[0.5, 30., 12., 1., 2., 3., 4., 5.]);
        match res {
            Err(GpError::HyperparameterArity { expected, got, .. }) => {
                assert_eq!(expected, 6);
                assert_eq!(got, 8);
            }
            _ => panic!("arity mismatch should be detected"),
        }
        let res = CovParams::from_tagged(2, &[1., 1., 1., 1., 1., 1.]);
        assert!(matches!(
            res,
            Err(GpError::HyperparameterArity {
                expected: 8,
                got: 6,
                ..
            })
        ));
    }

    #[test]
    fn test_couplings_builder() {
        let c = Couplings::default().vc(1.).vr(2.).lc(3.).bc(4.).br(5.);
        assert_eq!(c, Couplings::new(1., 2., 3., 4., 5.));
    }

    #[test]
    fn test_family() {
        assert_eq!(KernelFamily::SquaredExponential.arity(), 6);
        assert_eq!(KernelFamily::QuasiPeriodic.arity(), 8);
        assert_eq!(KernelFamily::QuasiPeriodic.tag(), 2);
        for family in [KernelFamily::SquaredExponential, KernelFamily::QuasiPeriodic] {
            assert_eq!(family.arity(), family.n_kernel_params() + N_COUPLINGS);
        }
        let c = Couplings::new(1., 2., 3., 4., 5.);
        let params = CovParams::quasi_periodic(0.5f32, 30., 12., c);
        assert_eq!(params.to_vec().len(), params.family().arity());
        assert_eq!(
            KernelFamily::try_from(1).unwrap(),
            KernelFamily::SquaredExponential
        );
    }

    #[cfg(feature = "serializable")]
    #[test]
    fn test_save_load() {
        let params = CovParams::quasi_periodic(0.5, 30., 12., Couplings::new(1., 2., 3., 4., 5.));
        let data = serde_json::to_string(&params).unwrap();
        let loaded: CovParams<f64> = serde_json::from_str(&data).unwrap();
        assert_eq!(params, loaded);
    }
}

//! Covariance blocks between the three observables (RV, indicator 1, indicator 2).
//!
//! Each block is a linear combination of the small matrices of the latent process `G`:
//! * `gg`   : cov(G(t_i), G(t_j)), kernel k
//! * `dgdg` : cov(dG(t_i), dG(t_j)), d2k/dt1dt2
//! * `gdg`  : cov(G(t_i), dG(t_j)), dk/dt2
//! * `dgg`  : cov(dG(t_i), G(t_j)), dk/dt1
//!
//! weighted by products of the [Couplings] coefficients.

use crate::parameters::{CovParams, Couplings};
use crate::utils::small_matrix;
use linfa::Float;
use miniframe_kernels::{Derivative, Kernel};
use ndarray::{Array2, ArrayBase, Data, Ix1};

/// The four (n, n) kernel evaluations over pairwise lags needed by the covariance blocks
#[derive(Clone, Debug, PartialEq)]
pub struct SmallMatrices<F: Float> {
    /// Process autocovariance
    pub gg: Array2<F>,
    /// Derivative autocovariance
    pub dgdg: Array2<F>,
    /// Cross covariance, derivative with respect to the second time
    pub gdg: Array2<F>,
    /// Cross covariance, derivative with respect to the first time
    pub dgg: Array2<F>,
}

impl<F: Float> SmallMatrices<F> {
    /// Evaluate the four kernel variants of `kernel` at times `t`
    pub fn new<K: Kernel<F>>(kernel: &K, t: &ArrayBase<impl Data<Elem = F>, Ix1>) -> Self {
        let t = t.view();
        let ((gg, dgdg), (gdg, dgg)) = rayon::join(
            || {
                (
                    small_matrix(kernel, Derivative::Base, &t),
                    small_matrix(kernel, Derivative::Dt1Dt2, &t),
                )
            },
            || {
                (
                    small_matrix(kernel, Derivative::Dt2, &t),
                    small_matrix(kernel, Derivative::Dt1, &t),
                )
            },
        );
        SmallMatrices { gg, dgdg, gdg, dgg }
    }

    /// RV–RV block: vc^2 gg + vr^2 dgdg + vc vr (gdg + dgg)
    pub fn k11(&self, c: &Couplings<F>) -> Array2<F> {
        &self.gg * (c.vc * c.vc)
            + &self.dgdg * (c.vr * c.vr)
            + (&self.gdg + &self.dgg) * (c.vc * c.vr)
    }

    /// Indicator 1 block: lc^2 gg
    pub fn k22(&self, c: &Couplings<F>) -> Array2<F> {
        k22_from(&self.gg, c)
    }

    /// Indicator 2 block: bc^2 gg + br^2 dgdg + bc br (gdg + dgg)
    pub fn k33(&self, c: &Couplings<F>) -> Array2<F> {
        &self.gg * (c.bc * c.bc)
            + &self.dgdg * (c.br * c.br)
            + (&self.gdg + &self.dgg) * (c.bc * c.br)
    }

    /// RV–indicator 1 block: vc lc gg + vr lc gdg
    pub fn k12(&self, c: &Couplings<F>) -> Array2<F> {
        k12_from(&self.gg, &self.gdg, c)
    }

    /// RV–indicator 2 block: vc bc gg + vr br dgdg + vc br gdg + vr bc dgg
    pub fn k13(&self, c: &Couplings<F>) -> Array2<F> {
        &self.gg * (c.vc * c.bc)
            + &self.dgdg * (c.vr * c.br)
            + &self.gdg * (c.vc * c.br)
            + &self.dgg * (c.vr * c.bc)
    }

    /// Indicator 1–indicator 2 block: bc lc gg + br lc gdg
    pub fn k23(&self, c: &Couplings<F>) -> Array2<F> {
        k23_from(&self.gg, &self.gdg, c)
    }
}

fn k22_from<F: Float>(gg: &Array2<F>, c: &Couplings<F>) -> Array2<F> {
    gg * (c.lc * c.lc)
}

fn k12_from<F: Float>(gg: &Array2<F>, gdg: &Array2<F>, c: &Couplings<F>) -> Array2<F> {
    gg * (c.vc * c.lc) + gdg * (c.vr * c.lc)
}

fn k23_from<F: Float>(gg: &Array2<F>, gdg: &Array2<F>, c: &Couplings<F>) -> Array2<F> {
    gg * (c.bc * c.lc) + gdg * (c.br * c.lc)
}

/// RV–RV covariance block at times `t`
pub fn k11<F: Float>(
    params: &CovParams<F>,
    t: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> Array2<F> {
    SmallMatrices::new(&params.kernel, t).k11(&params.couplings)
}

/// Indicator 1–indicator 1 covariance block at times `t`
pub fn k22<F: Float>(
    params: &CovParams<F>,
    t: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> Array2<F> {
    let gg = small_matrix(&params.kernel, Derivative::Base, t);
    k22_from(&gg, &params.couplings)
}

/// Indicator 2–indicator 2 covariance block at times `t`
pub fn k33<F: Float>(
    params: &CovParams<F>,
    t: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> Array2<F> {
    SmallMatrices::new(&params.kernel, t).k33(&params.couplings)
}

/// RV–indicator 1 covariance block at times `t`
pub fn k12<F: Float>(
    params: &CovParams<F>,
    t: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> Array2<F> {
    let gg = small_matrix(&params.kernel, Derivative::Base, t);
    let gdg = small_matrix(&params.kernel, Derivative::Dt2, t);
    k12_from(&gg, &gdg, &params.couplings)
}

/// RV–indicator 2 covariance block at times `t`
pub fn k13<F: Float>(
    params: &CovParams<F>,
    t: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> Array2<F> {
    SmallMatrices::new(&params.kernel, t).k13(&params.couplings)
}

/// Indicator 1–indicator 2 covariance block at times `t`
pub fn k23<F: Float>(
    params: &CovParams<F>,
    t: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> Array2<F> {
    let gg = small_matrix(&params.kernel, Derivative::Base, t);
    let gdg = small_matrix(&params.kernel, Derivative::Dt2, t);
    k23_from(&gg, &gdg, &params.couplings)
}

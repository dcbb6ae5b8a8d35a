use crate::blocks::SmallMatrices;
use crate::errors::{GpError, Result};
use crate::parameters::CovParams;
use linfa::Float;
use log::debug;
use ndarray::{concatenate, Array2, ArrayBase, Axis, Data, Ix1, Zip};

/// Number of observables modelled jointly: RV, indicator 1 and indicator 2
pub const N_OUTPUTS: usize = 3;

/// Build the (3n, 3n) covariance matrix of the stacked observations (RV, indicator 1, indicator 2)
/// sampled at the `n` times `t`:
///
/// ```text
///     | K11    K12    K13 |
/// K = | K12^T  K22    K23 | + diag(yerr^2)
///     | K13^T  K23^T  K33 |
/// ```
///
/// `yerr` holds the measurement uncertainties of the stacked observations, its length should be 3n.
///
/// Kernel variants are evaluated once and shared by the six blocks.
pub fn build_bigmatrix<F: Float>(
    params: &CovParams<F>,
    t: &ArrayBase<impl Data<Elem = F>, Ix1>,
    yerr: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> Result<Array2<F>> {
    let n = t.len();
    check_len("yerr", yerr.len(), N_OUTPUTS * n)?;
    debug!(
        "Build {}x{} covariance matrix with {} kernel",
        N_OUTPUTS * n,
        N_OUTPUTS * n,
        params.kernel
    );

    let small = SmallMatrices::new(&params.kernel, t);
    let c = &params.couplings;
    let (k11, k22, k33) = (small.k11(c), small.k22(c), small.k33(c));
    let (k12, k13, k23) = (small.k12(c), small.k13(c), small.k23(c));

    let k1 = concatenate(Axis(1), &[k11.view(), k12.view(), k13.view()])?;
    let k2 = concatenate(Axis(1), &[k12.t(), k22.view(), k23.view()])?;
    let k3 = concatenate(Axis(1), &[k13.t(), k23.t(), k33.view()])?;
    let mut k = concatenate(Axis(0), &[k1.view(), k2.view(), k3.view()])?;

    Zip::from(k.diag_mut())
        .and(yerr)
        .for_each(|kii, &e| *kii += e * e);
    Ok(k)
}

/// Build the covariance matrix given a kernel family `tag`
/// and its positional hyperparameter vector `a`:
/// * 1 for squared exponential: `[l, vc, vr, lc, bc, br]`
/// * 2 for quasi periodic: `[lp, le, p, vc, vr, lc, bc, br]`
///
/// See [build_bigmatrix].
pub fn build_bigmatrix_tagged<F: Float>(
    tag: usize,
    a: &[F],
    t: &ArrayBase<impl Data<Elem = F>, Ix1>,
    yerr: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> Result<Array2<F>> {
    let params = CovParams::from_tagged(tag, a)?;
    build_bigmatrix(&params, t, yerr)
}

pub(crate) fn check_len(what: &'static str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(GpError::ShapeMismatch {
            what,
            expected,
            got,
        });
    }
    Ok(())
}

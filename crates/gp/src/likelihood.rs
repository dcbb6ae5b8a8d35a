use crate::covariance::{build_bigmatrix, check_len, N_OUTPUTS};
use crate::errors::Result;
use crate::mean_models::MeanModel;
use crate::parameters::CovParams;
use linfa::Float;
use linfa_linalg::{cholesky::*, triangular::*};
use log::debug;
use ndarray::{s, Array1, ArrayBase, Axis, Data, Ix1};

/// Log marginal likelihood of the stacked observations `y` (RV, indicator 1, indicator 2)
/// at times `t` with uncertainties `yerr`, under the zero-mean multi-output GP of
/// hyperparameters `params`:
///
/// log p(y) = -1/2 y^T K^-1 y - 1/2 log|K| - 3n/2 log(2 pi)
///
/// `y` is expected with mean functions already removed (see [rv_residuals]).
pub fn log_likelihood<F: Float>(
    params: &CovParams<F>,
    t: &ArrayBase<impl Data<Elem = F>, Ix1>,
    y: &ArrayBase<impl Data<Elem = F>, Ix1>,
    yerr: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> Result<F> {
    let n_obs = N_OUTPUTS * t.len();
    check_len("y", y.len(), n_obs)?;
    let k = build_bigmatrix(params, t, yerr)?;

    // K cholesky decomposition
    let k_chol = k.cholesky()?;
    let rhs = y.to_owned().insert_axis(Axis(1));
    let alpha = k_chol.solve_triangular(&rhs, UPLO::Lower)?;

    let data_fit = alpha.mapv(|v| v * v).sum();
    // The determinant of K is equal to the squared product of
    // the diagonal elements of its Cholesky decomposition k_chol
    let half_logdet = k_chol.diag().mapv(|v| v.ln()).sum();
    let norm = F::cast(n_obs) * F::cast(0.5 * (2. * std::f64::consts::PI).ln());

    let likelihood = F::cast(-0.5) * data_fit - half_logdet - norm;
    debug!("log likelihood = {likelihood} for {}", params.kernel);
    Ok(likelihood)
}

/// Stacked observations `y` with the RV mean function `mean` evaluated at times `t`
/// removed from the RV segment (first `n` values), indicators are left untouched.
pub fn rv_residuals<F: Float, M: MeanModel<F>>(
    mean: &M,
    t: &ArrayBase<impl Data<Elem = F>, Ix1>,
    y: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> Result<Array1<F>> {
    let n = t.len();
    check_len("y", y.len(), N_OUTPUTS * n)?;
    let mut res = y.to_owned();
    let mut rv = res.slice_mut(s![..n]);
    rv -= &mean.value(t);
    Ok(res)
}

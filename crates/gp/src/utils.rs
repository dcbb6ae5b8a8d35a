use linfa::Float;
use miniframe_kernels::{Derivative, Kernel};
use ndarray::{Array2, ArrayBase, Axis, Data, Ix1, Zip};

/// Computes lags between each pair of times,
/// resulting in a (n, n) array where entry (i, j) is `t_i - t_j`
pub fn pairwise_lags<F: Float>(t: &ArrayBase<impl Data<Elem = F>, Ix1>) -> Array2<F> {
    &t.view().insert_axis(Axis(1)) - &t.view().insert_axis(Axis(0))
}

/// Evaluates the `derivative` variant of `kernel` over all pairwise lags of `t`,
/// resulting in a (n, n) array where entry (i, j) is `kernel(t_i - t_j)`
pub fn small_matrix<F: Float, K: Kernel<F>>(
    kernel: &K,
    derivative: Derivative,
    t: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> Array2<F> {
    let lags = pairwise_lags(t);
    Zip::from(&lags).par_map_collect(|&r| kernel.eval(derivative, r))
}

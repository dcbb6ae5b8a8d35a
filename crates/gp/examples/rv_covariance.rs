use miniframe_gp::mean_models::{KeplerianMean, MeanModel};
use miniframe_gp::{build_bigmatrix_tagged, log_likelihood, rv_residuals, CovParams};
use ndarray::{concatenate, Array1, Axis};

fn main() {
    env_logger::init();

    let t = Array1::<f64>::linspace(0., 30., 25);
    let n = t.len();

    // quasi periodic activity: [lp, le, p, vc, vr, lc, bc, br]
    let a = [0.8, 20., 4., 1., 0.5, 1., 0.3, 0.2];
    let yerr = Array1::from_elem(3 * n, 1.5);
    let k = build_bigmatrix_tagged(2, &a, &t, &yerr).expect("Covariance matrix");
    println!("covariance matrix shape: {:?}", k.dim());

    let planet = KeplerianMean::new(7.3, 0.2, 5., 1.1, 0.);
    println!("mean model: {planet}");
    let rv = planet.value(&t) + t.mapv(|v| (v * 0.7).sin());
    let ind1 = t.mapv(|v| (v * 0.7).cos());
    let ind2 = t.mapv(|v| 0.3 * (v * 0.7).cos());
    let y = concatenate(Axis(0), &[rv.view(), ind1.view(), ind2.view()]).expect("Observations");

    let params = CovParams::from_tagged(2, &a).expect("Hyperparameters");
    let residuals = rv_residuals(&planet, &t, &y).expect("RV residuals");
    let ll = log_likelihood(&params, &t, &residuals, &yerr).expect("Log likelihood");
    println!("log likelihood = {ll}");
}

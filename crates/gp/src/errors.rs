use thiserror::Error;

/// A result type for covariance and likelihood computations
pub type Result<T> = std::result::Result<T, GpError>;

/// An error when building the multi-output GP covariance matrix or evaluating its likelihood
#[derive(Error, Debug)]
pub enum GpError {
    /// When the kernel family tag is unknown
    #[error(
        "Invalid kernel value: {0}! Choose: 1 for squared exponential, 2 for quasi periodic"
    )]
    InvalidKernelFamily(usize),
    /// When the hyperparameter vector does not match the kernel family
    #[error("{family} kernel expects {expected} hyperparameters, got {got}")]
    HyperparameterArity {
        /// Name of the kernel family
        family: String,
        /// Expected vector length
        expected: usize,
        /// Given vector length
        got: usize,
    },
    /// When an input array does not have the expected length
    #[error("Shape mismatch: {what} should have length {expected}, got {got}")]
    ShapeMismatch {
        /// Name of the offending input
        what: &'static str,
        /// Expected length
        expected: usize,
        /// Given length
        got: usize,
    },
    /// When linear algebra computation fails
    #[error(transparent)]
    LinalgError(#[from] linfa_linalg::LinalgError),
    /// When blocks cannot be tiled
    #[error("Shape error: {0}")]
    ShapeError(#[from] ndarray::ShapeError),
}

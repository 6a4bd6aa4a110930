//! The dominant eigenvector of a comparison matrix, by power iteration.
//!
//! The matrices built from pairwise judgments are positive and reciprocal, so
//! their dominant eigenvector is real and unique up to scaling (Perron). The
//! iteration converges to it from the all-ones vector.

use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::config::*;

/// Computes the priorities of a resolved comparison matrix.
///
/// The returned vector is scaled so that its largest component is 1. Use
/// [`normalize_to_sum`] to get weights that add up to 1.
///
/// All the entries of the matrix must be nonnegative. The iteration stops
/// after `rules.max_iterations` steps with a convergence failure.
///
/// ```
/// use ahp_priorities::eigen::largest_eigenvector;
/// use ahp_priorities::ScaleRules;
/// use nalgebra::DMatrix;
///
/// let m = DMatrix::from_row_slice(2, 2, &[1.0, 3.0, 1.0 / 3.0, 1.0]);
/// let v = largest_eigenvector(&m, &ScaleRules::DEFAULT_RULES)?;
/// assert!((v[0] - 1.0).abs() < 1e-9);
/// assert!((v[1] - 1.0 / 3.0).abs() < 1e-9);
/// # Ok::<(), ahp_priorities::ModelError>(())
/// ```
pub fn largest_eigenvector(
    matrix: &DMatrix<f64>,
    rules: &ScaleRules,
) -> Result<Vec<f64>, ModelError> {
    if !matrix.is_square() {
        return Err(ModelError::ShapeError {
            rows: matrix.nrows(),
            cols: matrix.ncols(),
        });
    }
    let size = matrix.nrows();
    if size == 0 {
        return Ok(Vec::new());
    }

    let mut vec: DVector<f64> = DVector::from_element(size, 1.0);
    let mut last_delta = f64::INFINITY;
    for iteration in 1..=rules.max_iterations {
        let mut next = matrix * &vec;
        let scale = next.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        if scale == 0.0 || !scale.is_finite() {
            debug!(
                "largest_eigenvector: cannot rescale by {} at iteration {}",
                scale, iteration
            );
            return Err(ModelError::ConvergenceFailure {
                iterations: iteration,
                last_delta,
            });
        }
        next /= scale;
        last_delta = (&next - &vec).amax();
        vec = next;
        if last_delta < rules.tolerance {
            debug!(
                "largest_eigenvector: converged after {} iterations",
                iteration
            );
            return Ok(vec.iter().cloned().collect());
        }
    }
    Err(ModelError::ConvergenceFailure {
        iterations: rules.max_iterations,
        last_delta,
    })
}

/// Rescales priorities so that they add up to 1.
///
/// Vectors that add up to 0 are returned unchanged.
pub fn normalize_to_sum(priorities: &[f64]) -> Vec<f64> {
    let total: f64 = priorities.iter().sum();
    if total == 0.0 {
        priorities.to_vec()
    } else {
        priorities.iter().map(|p| p / total).collect()
    }
}

use nalgebra::DMatrix;

use crate::config::*;

/// Combines the resolved matrices of several users into one group matrix.
///
/// Each cell is the geometric mean of the members' values for that cell,
/// leaving out the members who offered no judgment (value 0). A cell without
/// any judgment stays at 0.
///
/// All the matrices must be `size` x `size`.
pub fn geometric_mean_matrix(
    size: usize,
    matrices: &[DMatrix<f64>],
) -> Result<DMatrix<f64>, ModelError> {
    if let Some(m) = matrices
        .iter()
        .find(|m| m.nrows() != size || m.ncols() != size)
    {
        return Err(ModelError::ShapeError {
            rows: m.nrows(),
            cols: m.ncols(),
        });
    }

    Ok(DMatrix::from_fn(size, size, |row, col| {
        let mut product = 1.0;
        let mut count = 0;
        for m in matrices.iter() {
            let val = m[(row, col)];
            if val != 0.0 {
                product *= val;
                count += 1;
            }
        }
        if count == 0 {
            0.0
        } else {
            product.powf(1.0 / count as f64)
        }
    }))
}

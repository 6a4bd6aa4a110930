use log::debug;
use nalgebra::DMatrix;

use crate::codec;
use crate::config::*;

/// The pairwise judgments of one user.
///
/// The cell `(i, j)` holds the judgment of alternative `i` against alternative
/// `j`, with alternatives indexed by order of registration.
///
/// Invariants:
/// - the diagonal holds [`Judgment::Equal`] unless explicitly overwritten
/// - the cells `(i, j)` and `(j, i)` are both missing, or inverse of each other
#[derive(PartialEq, Debug, Clone)]
pub struct ComparisonMatrix {
    cells: DMatrix<Judgment>,
}

impl ComparisonMatrix {
    /// The matrix without judgments over `size` alternatives.
    pub fn identity(size: usize) -> ComparisonMatrix {
        ComparisonMatrix {
            cells: DMatrix::from_fn(size, size, |row, col| {
                if row == col {
                    Judgment::Equal
                } else {
                    Judgment::Missing
                }
            }),
        }
    }

    pub fn size(&self) -> usize {
        self.cells.nrows()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Judgment> {
        self.cells.get((row, col)).copied()
    }

    /// Adds the row and the column of a new alternative.
    pub fn grow(&mut self) {
        let size = self.size();
        self.cells.resize_mut(size + 1, size + 1, Judgment::Missing);
        self.cells[(size, size)] = Judgment::Equal;
    }

    /// Sets a judgment, then its inverse in the mirror cell.
    ///
    /// On the diagonal both writes hit the same cell and the inverse is kept.
    /// Panics if an index is out of bounds.
    pub fn set_reflexive(&mut self, row: usize, col: usize, judgment: Judgment) {
        debug!("set_reflexive: ({}, {}) <- {:?}", row, col, judgment);
        self.cells[(row, col)] = judgment;
        self.cells[(col, row)] = codec::inverse(judgment);
    }

    /// The ratios of all the cells, under the given scale.
    pub fn resolve(&self, rules: &ScaleRules) -> DMatrix<f64> {
        self.cells.map(|j| rules.resolve(j))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grows_into_identity() {
        let mut m = ComparisonMatrix::identity(0);
        assert_eq!(m.size(), 0);
        m.grow();
        assert_eq!(m, ComparisonMatrix::identity(1));
        m.grow();
        assert_eq!(m, ComparisonMatrix::identity(2));
    }

    #[test]
    fn growth_keeps_judgments() {
        let mut m = ComparisonMatrix::identity(2);
        m.set_reflexive(0, 1, Judgment::MuchBetter);
        m.grow();
        assert_eq!(m.size(), 3);
        assert_eq!(m.get(0, 1), Some(Judgment::MuchBetter));
        assert_eq!(m.get(1, 0), Some(Judgment::MuchWorse));
        assert_eq!(m.get(2, 2), Some(Judgment::Equal));
        for i in 0..2 {
            assert_eq!(m.get(i, 2), Some(Judgment::Missing));
            assert_eq!(m.get(2, i), Some(Judgment::Missing));
        }
        assert_eq!(m.get(3, 0), None);
    }

    #[test]
    fn reflexive_assignment() {
        let mut m = ComparisonMatrix::identity(3);
        m.set_reflexive(2, 0, Judgment::Ratio(4.0));
        assert_eq!(m.get(0, 2), Some(Judgment::Ratio(0.25)));
        m.set_reflexive(2, 0, Judgment::Missing);
        assert_eq!(m.get(0, 2), Some(Judgment::Missing));
        assert_eq!(m.get(2, 0), Some(Judgment::Missing));
    }

    #[test]
    fn self_vote_keeps_the_inverse() {
        let mut m = ComparisonMatrix::identity(2);
        m.set_reflexive(1, 1, Judgment::Better);
        assert_eq!(m.get(1, 1), Some(Judgment::Worse));
        m.set_reflexive(0, 0, Judgment::Ratio(4.0));
        assert_eq!(m.get(0, 0), Some(Judgment::Ratio(0.25)));
        assert_eq!(m.get(0, 1), Some(Judgment::Missing));
    }

    #[test]
    fn resolution_does_not_touch_judgments() {
        let mut m = ComparisonMatrix::identity(2);
        m.set_reflexive(0, 1, Judgment::Better);
        let before = m.clone();
        let resolved = m.resolve(&ScaleRules::DEFAULT_RULES);
        assert_eq!(resolved, DMatrix::from_row_slice(2, 2, &[1.0, 3.0, 1.0 / 3.0, 1.0]));
        assert_eq!(m, before);
    }
}

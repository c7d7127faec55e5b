use nalgebra::{Cholesky, DMatrix};

/// Singular values of the normal matrix below `largest * SINGULAR_CUTOFF` count as zero
const SINGULAR_CUTOFF: f64 = 1e-10;

/// `AᵀA` and `Aᵀb` for one design matrix and several right-hand sides
#[derive(Debug, Clone)]
pub struct NormalEquations {
    pub gram: DMatrix<f64>,
    pub rhs: DMatrix<f64>,
}

impl NormalEquations {
    pub fn zeros(unknowns: usize, channels: usize) -> Self {
        Self {
            gram: DMatrix::zeros(unknowns, unknowns),
            rhs: DMatrix::zeros(unknowns, channels),
        }
    }

    /// Adds one equation `Σ x[i] = values[c]` for every channel `c`.
    pub fn add_indicator_row(&mut self, columns: &[usize], values: &[f64]) {
        for &i in columns {
            for &j in columns {
                self.gram[(i, j)] += 1.0;
            }
            for (c, &value) in values.iter().enumerate() {
                self.rhs[(i, c)] += value;
            }
        }
    }
}

/// Least-squares solution with one column per right-hand side. Always finite.
///
/// `ridge > 0` solves `(AᵀA + ridge·I)x = Aᵀb` by Cholesky. `ridge == 0`, or a
/// failed factorisation, falls back to the minimum-norm solution via SVD.
pub fn solve(system: &NormalEquations, ridge: f64) -> DMatrix<f64> {
    if ridge > 0.0 {
        if let Some(solution) = solve_ridge(system, ridge).filter(all_finite) {
            return solution;
        }
    }
    solve_min_norm(system)
}

fn solve_ridge(system: &NormalEquations, ridge: f64) -> Option<DMatrix<f64>> {
    let n = system.gram.nrows();
    let regularized = &system.gram + DMatrix::<f64>::identity(n, n) * ridge;
    Cholesky::new(regularized).map(|cholesky| cholesky.solve(&system.rhs))
}

fn solve_min_norm(system: &NormalEquations) -> DMatrix<f64> {
    let unknowns = system.gram.ncols();
    let channels = system.rhs.ncols();
    if unknowns == 0 {
        return DMatrix::zeros(0, channels);
    }

    // pinv(AᵀA)·Aᵀb equals pinv(A)·b, the minimum-norm least-squares solution
    let svd = system.gram.clone().svd(true, true);
    let cutoff = svd.singular_values.max() * SINGULAR_CUTOFF;

    svd.solve(&system.rhs, cutoff.max(0.0))
        .ok()
        .filter(all_finite)
        .unwrap_or_else(|| DMatrix::zeros(unknowns, channels))
}

fn all_finite(matrix: &DMatrix<f64>) -> bool {
    matrix.iter().all(|v| v.is_finite())
}

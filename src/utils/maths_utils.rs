use argminmax::ArgMinMax;

/// Largest absolute finite value (0.0 when there is none).
pub fn max_abs(values: &[f64]) -> f64 {
    let magnitudes: Vec<f64> = values
        .iter()
        .filter(|v| v.is_finite())
        .map(|v| v.abs())
        .collect();
    if magnitudes.is_empty() {
        return 0.0;
    }
    magnitudes[magnitudes.as_slice().argmax()]
}

/// `count` evenly spaced values from `start` to `end` inclusive, rounded to
/// the nearest index.
pub fn linspace_indices(start: usize, end: usize, count: usize) -> Vec<usize> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end as f64 - start as f64) / (count - 1) as f64;
            (0..count)
                .map(|i| (start as f64 + step * i as f64).round() as usize)
                .collect()
        }
    }
}

/// Solve `A x = b` for a symmetric positive-definite `A` (row-major, `n * n`)
/// by Cholesky decomposition.
///
/// Returns `None` when `A` is not numerically positive definite.
pub fn solve_spd(a: &[f64], b: &[f64], n: usize) -> Option<Vec<f64>> {
    if a.len() != n * n || b.len() != n {
        return None;
    }

    // Lower-triangular factor L with A = L Lᵀ
    let mut l = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i * n + j];
            for k in 0..j {
                sum -= l[i * n + k] * l[j * n + k];
            }
            if i == j {
                if !(sum.is_finite() && sum > 0.0) {
                    return None;
                }
                l[i * n + i] = sum.sqrt();
            } else {
                l[i * n + j] = sum / l[j * n + j];
            }
        }
    }

    // Forward substitution: L z = b
    let mut z = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for k in 0..i {
            sum -= l[i * n + k] * z[k];
        }
        z[i] = sum / l[i * n + i];
    }

    // Back substitution: Lᵀ x = z
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = z[i];
        for k in (i + 1)..n {
            sum -= l[k * n + i] * x[k];
        }
        x[i] = sum / l[i * n + i];
    }

    if x.iter().all(|v| v.is_finite()) {
        Some(x)
    } else {
        None
    }
}

/// Penalized least squares: minimise `|y - X beta|^2 + sum(penalty_j * beta_j^2)`.
///
/// `design` holds one row of `n_cols` features per observation.
pub fn ridge_least_squares(design: &[Vec<f64>], y: &[f64], penalties: &[f64]) -> Option<Vec<f64>> {
    let n_cols = penalties.len();
    if design.len() != y.len() || design.iter().any(|row| row.len() != n_cols) {
        return None;
    }

    let mut xtx = vec![0.0; n_cols * n_cols];
    let mut xty = vec![0.0; n_cols];
    for (row, &target) in design.iter().zip(y) {
        for i in 0..n_cols {
            xty[i] += row[i] * target;
            for j in 0..=i {
                xtx[i * n_cols + j] += row[i] * row[j];
            }
        }
    }
    // Mirror the lower triangle and add the penalties on the diagonal
    for i in 0..n_cols {
        for j in 0..i {
            xtx[j * n_cols + i] = xtx[i * n_cols + j];
        }
        xtx[i * n_cols + i] += penalties[i];
    }

    solve_spd(&xtx, &xty, n_cols)
}

pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

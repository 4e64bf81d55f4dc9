use nalgebra::{DMatrix, DVector, SVD};

/// Raw inverse-based null-space extraction.
///
/// A taller-than-wide matrix is zero-padded to square on the right (the added
/// column count is remembered for the extraction step). A square matrix is
/// replaced by the `Vᵀ` factor of its SVD, which breaks the singularity of
/// rank-deficient square systems. The (possibly augmented) system is then
/// inverted and the column corresponding to the last real compound is the
/// coefficient candidate: absolute values above the tolerance, scaled by
/// their minimum.
pub(super) fn inverse(matrix: &DMatrix<f64>, tolerance: f64) -> Result<Vec<f64>, String> {
    let (rows, cols) = matrix.shape();
    let mut m = matrix.clone();
    let mut width = cols;
    let mut zeros_added = 0;

    if rows > cols {
        zeros_added = rows - cols;
        width = rows;
        m = m.resize_horizontally(rows, 0.0);
    } else if rows == cols {
        let svd = SVD::new(m, false, true);
        m = svd.v_t.ok_or("SVD factorization failed")?;
    }

    let rank = SVD::new(m.clone(), false, false).rank(tolerance);
    let nullity = width.saturating_sub(rank);

    // rank >= width means the square system is used directly
    if nullity > 0 {
        let height = m.nrows();
        let mut augmented = DMatrix::zeros(height + nullity, width);
        augmented.view_mut((0, 0), (height, width)).copy_from(&m);
        for i in 0..nullity {
            augmented[(height + i, width - 1 - i)] = 1.0;
        }
        m = augmented;
    }

    let nonzero_rows: Vec<usize> = (0..m.nrows())
        .filter(|&row| m.row(row).iter().any(|v| v.abs() > tolerance))
        .collect();
    if nonzero_rows.len() < m.nrows() {
        let mut clean = DMatrix::zeros(nonzero_rows.len(), width);
        for (i, &row) in nonzero_rows.iter().enumerate() {
            clean.row_mut(i).copy_from(&m.row(row));
        }
        m = clean;
    }

    if m.nrows() != m.ncols() {
        return Err("singular augmented matrix".to_string());
    }

    let inverse = m.try_inverse().ok_or("matrix inversion failed")?;
    let column = inverse.column(width - zeros_added - 1);

    let candidate: Vec<f64> = column
        .iter()
        .map(|v| v.abs())
        .filter(|v| *v > tolerance)
        .collect();
    let min = candidate.iter().copied().fold(f64::INFINITY, f64::min);
    if !min.is_finite() {
        return Err("no nonzero entries in the solution column".to_string());
    }
    Ok(candidate.iter().map(|v| v / min).collect())
}

/// Raw general-pseudoinverse null-space projection.
///
/// Negates the product columns and projects the all-ones vector onto the
/// null space of the signed matrix: `(I − M⁺M)·1`. The projector is unique,
/// so the result does not depend on the SVD basis.
pub(super) fn general_pseudoinverse(
    matrix: &DMatrix<f64>,
    separator_pos: usize,
    tolerance: f64,
) -> Result<Vec<f64>, String> {
    let (rows, cols) = matrix.shape();
    let mut signed = matrix.clone();
    for i in 0..rows {
        for j in separator_pos..cols {
            signed[(i, j)] = -signed[(i, j)];
        }
    }

    let pinv = signed.clone().pseudo_inverse(tolerance).map_err(str::to_string)?;
    let projector = DMatrix::identity(cols, cols) - &pinv * &signed;
    let coefs = &projector * DVector::from_element(cols, 1.0);
    Ok(coefs.iter().copied().collect())
}

/// Raw partial-pseudoinverse solution over the reactant/product blocks.
///
/// With `A⁺` the pseudoinverse of the reactant block and
/// `G = (I − A·A⁺)·P`, the product coefficients are
/// `y = (I − G⁺G)·1` and the reactant coefficients
/// `x = A⁺·P·y + (I − A⁺·A)·1`.
pub(super) fn partial_pseudoinverse(
    reactants: &DMatrix<f64>,
    products: &DMatrix<f64>,
    tolerance: f64,
) -> Result<Vec<f64>, String> {
    let rows = reactants.nrows();
    let reactant_cols = reactants.ncols();
    let product_cols = products.ncols();

    let a_pinv = reactants
        .clone()
        .pseudo_inverse(tolerance)
        .map_err(str::to_string)?;

    let g = (DMatrix::identity(rows, rows) - reactants * &a_pinv) * products;
    let g_pinv = g.clone().pseudo_inverse(tolerance).map_err(str::to_string)?;

    let y = (DMatrix::identity(product_cols, product_cols) - &g_pinv * &g)
        * DVector::from_element(product_cols, 1.0);
    let x = &a_pinv * products * &y
        + (DMatrix::identity(reactant_cols, reactant_cols) - &a_pinv * reactants)
            * DVector::from_element(reactant_cols, 1.0);

    Ok(x.iter().chain(y.iter()).copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // H2 + O2 = H2O, rows H and O
    fn water_matrix() -> DMatrix<f64> {
        DMatrix::from_row_slice(2, 3, &[2.0, 0.0, 2.0, 0.0, 2.0, 1.0])
    }

    fn assert_proportional(result: &[f64], expected: &[f64]) {
        assert_eq!(result.len(), expected.len());
        let scale = result[0] / expected[0];
        for (r, e) in result.iter().zip(expected) {
            assert_relative_eq!(*r, e * scale, max_relative = 1e-9);
        }
    }

    #[test]
    fn inverse_finds_the_water_null_vector() {
        let coefs = inverse(&water_matrix(), 1e-8).unwrap();
        assert_proportional(&coefs, &[2.0, 1.0, 2.0]);
    }

    #[test]
    fn inverse_handles_rank_deficient_square_systems() {
        // KClO3 = KCl + O2 has identical K and Cl rows
        let matrix = DMatrix::from_row_slice(
            3,
            3,
            &[1.0, 1.0, 0.0, 1.0, 1.0, 0.0, 3.0, 0.0, 2.0],
        );
        let coefs = inverse(&matrix, 1e-8).unwrap();
        assert_proportional(&coefs, &[2.0, 2.0, 3.0]);
    }

    #[test]
    fn general_pseudoinverse_projects_onto_the_null_space() {
        let coefs = general_pseudoinverse(&water_matrix(), 2, 1e-8).unwrap();
        assert_proportional(&coefs, &[2.0, 1.0, 2.0]);
    }

    #[test]
    fn partial_pseudoinverse_solves_block_systems() {
        let matrix = water_matrix();
        let reactants = matrix.columns(0, 2).into_owned();
        let products = matrix.columns(2, 1).into_owned();
        let coefs = partial_pseudoinverse(&reactants, &products, 1e-8).unwrap();
        assert_proportional(&coefs, &[1.0, 0.5, 1.0]);
    }
}

use nalgebra::DMatrix;

use crate::formula::parser::Atom;

/// Builds the element-composition matrix of a reaction.
///
/// Rows are elements in order of first appearance across the parsed
/// compounds, columns follow compound order; entry `(i, j)` is the amount of
/// element `i` in compound `j`, zero when absent. The element order is
/// returned alongside the matrix.
pub fn composition_matrix(parsed_formulas: &[Vec<Atom>]) -> (DMatrix<f64>, Vec<String>) {
    let mut elements: Vec<String> = Vec::new();
    for formula in parsed_formulas {
        for atom in formula {
            if !elements.contains(&atom.label) {
                elements.push(atom.label.clone());
            }
        }
    }

    let mut matrix = DMatrix::zeros(elements.len(), parsed_formulas.len());
    for (col, formula) in parsed_formulas.iter().enumerate() {
        for atom in formula {
            let row = elements
                .iter()
                .position(|label| *label == atom.label)
                .unwrap_or_default();
            matrix[(row, col)] += atom.amount;
        }
    }

    (matrix, elements)
}

use super::balancer::{Balancer, Method, MethodResult};
use super::decomposer::ReactionDecomposer;
use super::error::ReactionError;
use super::Mode;
use crate::core::utils::{symmetric_difference, unique_labels};
use crate::formula::parser::Atom;

/// Produces the coefficient vector for the configured mode.
///
/// Outside Force mode the element sets of the two sides must agree; the
/// symmetric difference is reported otherwise. Force returns the
/// user-supplied initial coefficients verbatim, Check returns them only when
/// they satisfy the balance predicate, Balance runs the automatic method
/// chain. Whatever wins is finally validated for length and positivity.
pub(super) fn compute(
    mode: Mode,
    parsed_formulas: &[Vec<Atom>],
    decomposed: &ReactionDecomposer,
    balancer: &Balancer,
) -> Result<MethodResult, ReactionError> {
    if mode != Mode::Force {
        let difference = element_difference(parsed_formulas, decomposed.separator_pos);
        if !difference.is_empty() {
            return Err(ReactionError::ElementsOnOneSide {
                elements: difference,
            });
        }
    }

    let result = match mode {
        Mode::Force => MethodResult {
            method: Method::User,
            coefficients: decomposed.initial_coefficients.clone(),
        },
        Mode::Check => {
            if !balancer.is_balanced(&decomposed.initial_coefficients) {
                return Err(ReactionError::NotBalanced);
            }
            MethodResult {
                method: Method::User,
                coefficients: decomposed.initial_coefficients.clone(),
            }
        }
        Mode::Balance => balancer.auto()?,
    };

    validate(&result.coefficients, balancer.matrix().ncols())?;
    Ok(result)
}

/// Checks a coefficient vector against the compound count and positivity.
pub(super) fn validate(coefficients: &[f64], expected: usize) -> Result<(), ReactionError> {
    if coefficients.len() != expected {
        return Err(ReactionError::CoefficientCount {
            expected,
            got: coefficients.len(),
        });
    }
    if let Some((position, value)) = coefficients
        .iter()
        .enumerate()
        .find(|(_, value)| **value <= 0.0)
    {
        return Err(ReactionError::NonPositiveCoefficient {
            value: *value,
            position,
        });
    }
    Ok(())
}

/// Elements appearing on only one side of the reaction, reactant side first.
fn element_difference(parsed_formulas: &[Vec<Atom>], separator_pos: usize) -> Vec<String> {
    fn side_labels(formulas: &[Vec<Atom>]) -> Vec<&str> {
        unique_labels(formulas.iter().flatten().map(|atom| atom.label.as_str()))
    }
    let reactants = side_labels(&parsed_formulas[..separator_pos]);
    let products = side_labels(&parsed_formulas[separator_pos..]);
    symmetric_difference(&reactants, &products)
        .into_iter()
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::parser::parse;

    fn parse_all(formulas: &[&str]) -> Vec<Vec<Atom>> {
        formulas.iter().map(|f| parse(f)).collect()
    }

    #[test]
    fn element_difference_lists_reactant_side_first() {
        let parsed = parse_all(&["Rb2CO3", "La2O3", "Nb2O5", "RbLaNb2O7", "Nd"]);
        assert_eq!(element_difference(&parsed, 3), vec!["C", "Nd"]);
    }

    #[test]
    fn element_difference_is_empty_for_matching_sides() {
        let parsed = parse_all(&["H2", "O2", "H2O"]);
        assert!(element_difference(&parsed, 2).is_empty());
    }

    #[test]
    fn validate_rejects_wrong_length_and_non_positive_entries() {
        assert_eq!(
            validate(&[1.0, 2.0], 3),
            Err(ReactionError::CoefficientCount {
                expected: 3,
                got: 2
            })
        );
        assert_eq!(
            validate(&[1.0, -2.0, 1.0], 3),
            Err(ReactionError::NonPositiveCoefficient {
                value: -2.0,
                position: 1
            })
        );
        assert_eq!(validate(&[1.0, 2.0, 0.5], 3), Ok(()));
    }
}

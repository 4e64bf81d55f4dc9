use super::error::ReactionError;

/// Reactant/product separators, tried in order. The first one that splits
/// the reaction into two non-empty sides wins, so the two-character forms
/// come before their one-character substrings.
pub const SEPARATORS: [&str; 8] = ["==", "=", "<->", "->", "<>", ">", "→", "⇄"];

/// The separator between compounds of one side.
pub const COMPOUND_SEPARATOR: char = '+';

/// A reaction term split into its leading numeric coefficient and formula.
#[derive(Debug, Clone, PartialEq)]
struct Term {
    coefficient: f64,
    formula: String,
}

/// A reaction string taken apart into compounds.
///
/// Immutable after construction; the invariant
/// `0 < separator_pos < compounds.len()` holds for every constructed value.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionDecomposer {
    /// The separator actually found in the reaction string.
    pub separator: &'static str,
    /// Number of reactants; also the index of the first product.
    pub separator_pos: usize,
    /// Leading numeric coefficient of every term, 1.0 when absent.
    pub initial_coefficients: Vec<f64>,
    /// Formula strings of every compound, reactants first.
    pub compounds: Vec<String>,
}

impl ReactionDecomposer {
    /// Splits a whitespace-free reaction string into compounds.
    ///
    /// # Errors
    ///
    /// Returns [`ReactionError::NoSeparator`] when no separator yields two
    /// non-empty sides, [`ReactionError::EmptyCompound`] for empty terms
    /// (adjacent or trailing `+`), and
    /// [`ReactionError::InvalidCoefficient`] when a leading numeric prefix
    /// does not parse.
    pub fn new(reaction: &str) -> Result<Self, ReactionError> {
        if reaction.is_empty() {
            return Err(ReactionError::EmptyReaction);
        }

        let separator = extract_separator(reaction).ok_or(ReactionError::NoSeparator {
            reaction: reaction.to_string(),
        })?;

        let (left, right) = reaction.split_once(separator).unwrap_or((reaction, ""));
        let reactant_terms: Vec<&str> = left.split(COMPOUND_SEPARATOR).collect();
        let separator_pos = reactant_terms.len();

        let mut terms = Vec::new();
        for (i, term) in reactant_terms
            .into_iter()
            .chain(right.split(COMPOUND_SEPARATOR))
            .enumerate()
        {
            if term.is_empty() {
                return Err(ReactionError::EmptyCompound { position: i + 1 });
            }
            terms.push(split_coefficient(term)?);
        }

        Ok(Self {
            separator,
            separator_pos,
            initial_coefficients: terms.iter().map(|t| t.coefficient).collect(),
            compounds: terms.into_iter().map(|t| t.formula).collect(),
        })
    }

    /// Formula strings of the reactant side.
    pub fn reactants(&self) -> &[String] {
        &self.compounds[..self.separator_pos]
    }

    /// Formula strings of the product side.
    pub fn products(&self) -> &[String] {
        &self.compounds[self.separator_pos..]
    }
}

/// First separator that splits the reaction into two non-empty sides.
fn extract_separator(reaction: &str) -> Option<&'static str> {
    SEPARATORS.iter().copied().find(|sep| {
        reaction
            .split_once(sep)
            .is_some_and(|(left, right)| !left.is_empty() && !right.is_empty())
    })
}

/// Splits a leading numeric coefficient (digits and dots) off a term.
fn split_coefficient(term: &str) -> Result<Term, ReactionError> {
    let split = term
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(term.len());
    if split == 0 {
        return Ok(Term {
            coefficient: 1.0,
            formula: term.to_string(),
        });
    }
    let coefficient =
        term[..split]
            .parse::<f64>()
            .map_err(|_| ReactionError::InvalidCoefficient {
                term: term.to_string(),
            })?;
    Ok(Term {
        coefficient,
        formula: term[split..].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_compounds_around_the_separator() {
        let decomposed = ReactionDecomposer::new("BaCO3+Y2(CO3)3+CuCO3+O2=YBa2Cu3O7+CO2").unwrap();
        assert_eq!(decomposed.separator, "=");
        assert_eq!(decomposed.separator_pos, 4);
        assert_eq!(
            decomposed.compounds,
            vec!["BaCO3", "Y2(CO3)3", "CuCO3", "O2", "YBa2Cu3O7", "CO2"]
        );
        assert_eq!(decomposed.reactants().len(), 4);
        assert_eq!(decomposed.products(), &["YBa2Cu3O7", "CO2"]);
    }

    #[test]
    fn two_character_separators_win_over_their_substrings() {
        assert_eq!(ReactionDecomposer::new("A+B==C").unwrap().separator, "==");
        assert_eq!(ReactionDecomposer::new("A+B<->C").unwrap().separator, "<->");
        assert_eq!(ReactionDecomposer::new("A+B->C").unwrap().separator, "->");
        assert_eq!(ReactionDecomposer::new("A+B→C").unwrap().separator, "→");
    }

    #[test]
    fn leading_numbers_become_initial_coefficients() {
        let decomposed = ReactionDecomposer::new("Cr2(SO4)3+3Br2+16NaOH=6NaBr+2Na2CrO4+3Na2SO4+8H2O").unwrap();
        assert_eq!(
            decomposed.initial_coefficients,
            vec![1.0, 3.0, 16.0, 6.0, 2.0, 3.0, 8.0]
        );
        assert_eq!(decomposed.compounds[1], "Br2");
    }

    #[test]
    fn fractional_coefficients_are_parsed() {
        let decomposed = ReactionDecomposer::new("2H2+O2=2H2O").unwrap();
        assert_eq!(decomposed.initial_coefficients, vec![2.0, 1.0, 2.0]);

        let fractional = ReactionDecomposer::new("H2+0.5O2=H2O").unwrap();
        assert_eq!(fractional.initial_coefficients, vec![1.0, 0.5, 1.0]);
    }

    #[test]
    fn missing_separator_is_an_error() {
        assert_eq!(
            ReactionDecomposer::new("H2+O2"),
            Err(ReactionError::NoSeparator {
                reaction: "H2+O2".to_string()
            })
        );
        // a separator at the edge leaves an empty side and does not count
        assert!(matches!(
            ReactionDecomposer::new("=H2O+H2"),
            Err(ReactionError::NoSeparator { .. })
        ));
    }

    #[test]
    fn empty_terms_are_reported_with_their_position() {
        assert_eq!(
            ReactionDecomposer::new("H2++O2=H2O"),
            Err(ReactionError::EmptyCompound { position: 2 })
        );
        assert_eq!(
            ReactionDecomposer::new("H2+O2=H2O+"),
            Err(ReactionError::EmptyCompound { position: 4 })
        );
    }

    #[test]
    fn malformed_coefficients_are_rejected() {
        assert!(matches!(
            ReactionDecomposer::new("2.5.3H2O+H2=H2"),
            Err(ReactionError::InvalidCoefficient { .. })
        ));
    }
}

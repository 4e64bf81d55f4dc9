use super::decomposer::{ReactionDecomposer, COMPOUND_SEPARATOR};
use super::error::ReactionError;
use crate::formula::{sanitizer, validator as formula_validator};

/// Validates a whitespace-free reaction string and decomposes it.
///
/// The decomposer runs first, so its term-level failures (empty compounds,
/// malformed coefficients) win over everything else; a missing
/// reactant/product separator is the one decomposer error held back until
/// the characters are known to be legal. After that: characters outside the
/// reaction grammar, absence of any `+`, and finally formula validation of
/// every compound (wrapped with its 1-based position).
pub fn validate(reaction: &str) -> Result<ReactionDecomposer, ReactionError> {
    if reaction.is_empty() {
        return Err(ReactionError::EmptyReaction);
    }

    let decomposed = match ReactionDecomposer::new(reaction) {
        Ok(decomposed) => Ok(decomposed),
        err @ Err(ReactionError::NoSeparator { .. }) => err,
        Err(other) => return Err(other),
    };

    let invalid: Vec<char> = reaction.chars().filter(|c| !is_allowed(*c)).collect();
    if !invalid.is_empty() {
        return Err(ReactionError::InvalidCharacters {
            reaction: reaction.to_string(),
            symbols: invalid,
        });
    }

    let decomposed = decomposed?;

    if !reaction.contains(COMPOUND_SEPARATOR) {
        return Err(ReactionError::NoCompoundSeparator {
            reaction: reaction.to_string(),
        });
    }

    for (i, compound) in decomposed.compounds.iter().enumerate() {
        let sanitized = sanitizer::sanitize(compound);
        formula_validator::validate(compound, &sanitized).map_err(|source| {
            ReactionError::InvalidCompound {
                position: i + 1,
                source,
            }
        })?;
    }

    Ok(decomposed)
}

/// The reaction input grammar: formula characters, bracket and adduct
/// variants, the separator alphabet and `+`.
fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '.' | '(' | ')' | '{' | '}' | '[' | ']' | '*' | '·' | '•' | '=' | '<' | '>' | '-'
                | '→' | '⇄' | '+'
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_reactions_pass() {
        assert!(validate("KMnO4+HCl=KCl+MnCl2+Cl2+H2O").is_ok());
        assert!(validate("CuSO4*5H2O+NaOH=Cu(OH)2+Na2SO4+H2O").is_ok());
    }

    #[test]
    fn empty_reaction_is_rejected() {
        assert_eq!(validate(""), Err(ReactionError::EmptyReaction));
    }

    #[test]
    fn characters_outside_the_grammar_are_reported() {
        let err = validate("H2&O2=H2O!").unwrap_err();
        assert_eq!(
            err,
            ReactionError::InvalidCharacters {
                reaction: "H2&O2=H2O!".to_string(),
                symbols: vec!['&', '!'],
            }
        );
    }

    #[test]
    fn reaction_without_any_plus_is_rejected() {
        assert!(matches!(
            validate("N2O4=2NO2"),
            Err(ReactionError::NoCompoundSeparator { .. })
        ));
    }

    #[test]
    fn empty_compounds_win_over_invalid_characters() {
        assert_eq!(
            validate("H2++O2=H2O!"),
            Err(ReactionError::EmptyCompound { position: 2 })
        );
    }

    #[test]
    fn invalid_characters_win_over_a_missing_separator() {
        assert!(matches!(
            validate("H2+O2!").unwrap_err(),
            ReactionError::InvalidCharacters { ref symbols, .. } if symbols == &['!']
        ));
    }

    #[test]
    fn compound_failures_carry_their_position() {
        let err = validate("H2+Xy2=H2Xy2").unwrap_err();
        assert!(matches!(
            err,
            ReactionError::InvalidCompound { position: 2, .. }
        ));
    }
}

use itertools::Itertools;

use super::error::FormulaError;
use crate::core::periodic_table;

/// Checks a formula against the input grammar, reporting the first failure.
///
/// `initial` is the user-supplied text (quoted in errors), `sanitized` the
/// output of [`super::sanitizer::sanitize`] that later stages consume. The
/// checks run in a fixed priority order: empty input, missing letters,
/// invalid characters, unknown atoms, bracket imbalance, adduct count.
pub fn validate(initial: &str, sanitized: &str) -> Result<(), FormulaError> {
    if sanitized.is_empty() {
        return Err(FormulaError::EmptyFormula);
    }

    if !sanitized.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(FormulaError::NoLetters {
            formula: initial.to_string(),
        });
    }

    let invalid_symbols: Vec<char> = sanitized
        .chars()
        .filter(|c| !is_allowed_symbol(*c))
        .collect();
    if !invalid_symbols.is_empty() {
        return Err(FormulaError::InvalidSymbols {
            formula: initial.to_string(),
            symbols: invalid_symbols,
        });
    }

    let invalid_atoms = invalid_atoms(sanitized);
    if !invalid_atoms.is_empty() {
        return Err(FormulaError::InvalidAtoms {
            formula: initial.to_string(),
            atoms: invalid_atoms,
        });
    }

    let openers = sanitized.chars().filter(|c| *c == '(').count();
    let closers = sanitized.chars().filter(|c| *c == ')').count();
    if openers != closers {
        return Err(FormulaError::BracketsNotBalanced {
            formula: initial.to_string(),
        });
    }

    if sanitized.chars().filter(|c| *c == '*').count() > 1 {
        return Err(FormulaError::MoreThanOneAdduct {
            formula: initial.to_string(),
        });
    }

    Ok(())
}

fn is_allowed_symbol(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '(' | ')' | '.' | '*')
}

/// Two-stage unknown-atom detection.
///
/// Maximal `[A-Z][a-z]*` runs not found in the periodic table are invalid and
/// reported in first-appearance order. All recognized runs are then deleted
/// from a working copy in descending length order (so `Os` goes before `O`
/// and two-letter symbols are never shadowed by their one-letter prefixes);
/// lowercase letters surviving the deletion are leftovers and are appended to
/// the invalid list.
fn invalid_atoms(sanitized: &str) -> Vec<String> {
    let tokens: Vec<&str> = element_tokens(sanitized).into_iter().unique().collect();

    let mut invalid: Vec<String> = tokens
        .iter()
        .filter(|token| !periodic_table::is_element(token))
        .map(|token| token.to_string())
        .collect();

    let mut remainder = sanitized.to_string();
    let mut by_length = tokens;
    by_length.sort_by_key(|token| std::cmp::Reverse(token.len()));
    for token in by_length {
        remainder = remainder.replace(token, "");
    }

    invalid.extend(
        remainder
            .chars()
            .filter(|c| c.is_ascii_lowercase())
            .map(String::from),
    );
    invalid
}

/// Maximal `[A-Z][a-z]*` runs of the input, in order of appearance.
fn element_tokens(input: &str) -> Vec<&str> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_uppercase() {
            let start = i;
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_lowercase() {
                i += 1;
            }
            tokens.push(&input[start..i]);
        } else {
            i += 1;
        }
    }
    tokens
}

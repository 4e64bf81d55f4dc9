//! # Formula Module
//!
//! Everything concerning a single chemical formula: sanitizing the raw text,
//! validating it against the input grammar, parsing it into an ordered
//! element multiset, and deriving molar mass, mass percent, atomic percent
//! and oxide percent from the parse.
//!
//! The [`ChemicalFormula`] facade ties the pipeline together and memoizes
//! every derived value; the submodules stay usable on their own.

pub mod error;
pub mod molar_mass;
pub mod parser;
pub mod sanitizer;
pub mod validator;

use once_cell::unsync::OnceCell;

use self::error::FormulaError;
use self::molar_mass::MolarMass;
use self::parser::Atom;
use crate::core::utils::round_to;

/// Default number of decimal digits in presentation rounding.
pub(crate) const DEFAULT_PRECISION: u32 = 8;

/// Operations on a single chemical formula.
///
/// Construction sanitizes and fully validates the input, so every getter
/// except [`oxide_percent`](Self::oxide_percent) is infallible. Derived
/// values are computed once, on first access.
///
/// # Example
///
/// ```
/// use synthcalc::ChemicalFormula;
///
/// let formula = ChemicalFormula::new("H2O")?;
/// assert_eq!(formula.molar_mass(), 18.015);
/// # Ok::<(), synthcalc::FormulaError>(())
/// ```
#[derive(Debug)]
pub struct ChemicalFormula {
    initial: String,
    sanitized: String,
    precision: u32,
    parsed: OnceCell<Vec<Atom>>,
    molar_mass: OnceCell<f64>,
    mass_percent: OnceCell<Vec<Atom>>,
    atomic_percent: OnceCell<Vec<Atom>>,
}

impl ChemicalFormula {
    /// Creates a formula with the default precision of 8 decimal digits.
    ///
    /// # Errors
    ///
    /// Returns a [`FormulaError`] describing the first grammar violation:
    /// empty input, no letters, invalid symbols, unknown atoms, unbalanced
    /// brackets or multiple adducts.
    pub fn new(formula: &str) -> Result<Self, FormulaError> {
        Self::with_precision(formula, DEFAULT_PRECISION)
    }

    /// Creates a formula rounding all derived values to `precision` digits.
    pub fn with_precision(formula: &str, precision: u32) -> Result<Self, FormulaError> {
        let sanitized = sanitizer::sanitize(formula);
        validator::validate(formula, &sanitized)?;
        Ok(Self {
            initial: formula.to_string(),
            sanitized,
            precision,
            parsed: OnceCell::new(),
            molar_mass: OnceCell::new(),
            mass_percent: OnceCell::new(),
            atomic_percent: OnceCell::new(),
        })
    }

    /// The formula text as supplied by the caller.
    pub fn formula(&self) -> &str {
        &self.initial
    }

    /// The parsed formula: elements in first-appearance order with their
    /// amounts.
    pub fn parsed_formula(&self) -> &[Atom] {
        self.parsed.get_or_init(|| parser::parse(&self.sanitized))
    }

    /// Molar mass in g/mol, rounded to the configured precision.
    pub fn molar_mass(&self) -> f64 {
        *self.molar_mass.get_or_init(|| {
            round_to(
                MolarMass::new(self.parsed_formula()).molar_mass(),
                self.precision,
            )
        })
    }

    /// Mass percent of every element, rounded to the configured precision.
    pub fn mass_percent(&self) -> &[Atom] {
        self.mass_percent.get_or_init(|| {
            self.rounded(MolarMass::new(self.parsed_formula()).mass_percent())
        })
    }

    /// Atomic percent of every element, rounded to the configured precision.
    pub fn atomic_percent(&self) -> &[Atom] {
        self.atomic_percent.get_or_init(|| {
            self.rounded(MolarMass::new(self.parsed_formula()).atomic_percent())
        })
    }

    /// Oxide percent of every non-oxygen element, rounded to the configured
    /// precision.
    ///
    /// `custom_oxides` overrides the conventional oxide form per metal; each
    /// entry must be a valid binary formula whose second element is oxygen.
    ///
    /// # Errors
    ///
    /// Returns a [`FormulaError`] when a custom oxide is malformed, not
    /// binary, not an oxide, or when an element of the formula has no
    /// conventional oxide and no override.
    pub fn oxide_percent(&self, custom_oxides: &[&str]) -> Result<Vec<Atom>, FormulaError> {
        let shares = MolarMass::new(self.parsed_formula()).oxide_percent(custom_oxides)?;
        Ok(self.rounded(shares))
    }

    fn rounded(&self, mut atoms: Vec<Atom>) -> Vec<Atom> {
        for atom in &mut atoms {
            atom.amount = round_to(atom.amount, self.precision);
        }
        atoms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_rejects_invalid_formulas() {
        assert!(ChemicalFormula::new("").is_err());
        assert!(ChemicalFormula::new("H2O@").is_err());
        assert!(ChemicalFormula::new("Xy2O").is_err());
    }

    #[test]
    fn molar_mass_is_rounded_to_precision() {
        let water = ChemicalFormula::new("H2O").unwrap();
        assert_eq!(water.molar_mass(), 18.015);

        let coarse = ChemicalFormula::with_precision("H2SO4", 2).unwrap();
        assert_eq!(coarse.molar_mass(), 98.07);
    }

    #[test]
    fn parsed_formula_is_memoized() {
        let formula = ChemicalFormula::new("Fe2(SO4)3").unwrap();
        let first = formula.parsed_formula().as_ptr();
        let second = formula.parsed_formula().as_ptr();
        assert_eq!(first, second);
    }

    #[test]
    fn oxide_percent_matches_reference_values() {
        let acid = ChemicalFormula::with_precision("H2SO4", 4).unwrap();
        let oxides = acid.oxide_percent(&[]).unwrap();
        assert_eq!(oxides.len(), 2);
        assert_eq!(oxides[0], Atom::new("H2O", 18.3692));
        assert_eq!(oxides[1], Atom::new("SO3", 81.6308));
    }

    #[test]
    fn bracket_variants_parse_like_parentheses() {
        let formula = ChemicalFormula::new("{K2}2Mg2[(SO4)3Ho]2").unwrap();
        let labels: Vec<&str> = formula
            .parsed_formula()
            .iter()
            .map(|a| a.label.as_str())
            .collect();
        assert_eq!(labels, vec!["K", "Mg", "S", "O", "Ho"]);
    }
}

//! # Reaction Module
//!
//! Everything concerning a whole reaction string: decomposing it into
//! compounds, validating the input grammar, assembling the
//! element-composition matrix, balancing it, and converting balanced
//! coefficients into the masses of every compound for a target amount of
//! product.
//!
//! The [`ChemicalReaction`] facade owns the whole chain and memoizes each
//! derived value in dependency order.

pub mod balancer;
mod coefficients;
pub mod decomposer;
pub mod error;
pub mod matrix;
pub mod validator;

use nalgebra::DMatrix;
use once_cell::unsync::OnceCell;

use self::balancer::{Balancer, Method, MethodResult};
use self::decomposer::ReactionDecomposer;
use self::error::ReactionError;
use crate::core::utils::{replace_nth, round_slice};
use crate::formula::molar_mass::MolarMass;
use crate::formula::parser::{self, Atom};
use crate::formula::{sanitizer, DEFAULT_PRECISION};

/// Coefficient calculation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Use the coefficients entered in the reaction string, whether the
    /// reaction balances or not.
    Force,
    /// Use the entered coefficients, but fail unless they balance.
    Check,
    /// Calculate the coefficients automatically.
    #[default]
    Balance,
}

/// Options of a [`ChemicalReaction`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionOptions {
    /// Coefficient calculation mode.
    pub mode: Mode,
    /// Signed index of the target compound: `0` is the first product,
    /// negative values reach back into the reactants, so the valid range is
    /// `[-reactants, products - 1]`.
    pub target: i64,
    /// Desired mass of the target compound, in grams.
    pub target_mass: f64,
    /// Convert calculated coefficients to the smallest integer vector.
    pub intify: bool,
    /// Decimal digits of presentation rounding.
    pub precision: u32,
    /// Numeric tolerance for every balance and rank decision.
    pub tolerance: f64,
}

impl Default for ReactionOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Balance,
            target: 0,
            target_mass: 1.0,
            intify: true,
            precision: DEFAULT_PRECISION,
            tolerance: 1e-8,
        }
    }
}

/// Operations on a chemical reaction.
///
/// Construction strips whitespace and fully validates the input (grammar,
/// decomposition, every compound formula), so the getters only fail for
/// semantic reasons: element sets that cannot balance, a mode-specific
/// failure, or an out-of-range target.
///
/// Derived values are memoized in dependency order; overriding the
/// coefficients with [`set_coefficients`](Self::set_coefficients) invalidates
/// everything downstream of them.
///
/// The facade is a single-threaded owner: share it across threads behind
/// external synchronization or not at all.
#[derive(Debug)]
pub struct ChemicalReaction {
    reaction: String,
    options: ReactionOptions,
    decomposed: ReactionDecomposer,
    parsed: OnceCell<Vec<Vec<Atom>>>,
    molar_masses: OnceCell<Vec<f64>>,
    composition: OnceCell<(DMatrix<f64>, Vec<String>)>,
    balancer: OnceCell<Balancer>,
    coefficients: OnceCell<MethodResult>,
    normalized: OnceCell<Vec<f64>>,
    final_reaction: OnceCell<String>,
    final_reaction_normalized: OnceCell<String>,
    masses: OnceCell<Vec<f64>>,
}

impl ChemicalReaction {
    /// Creates a reaction with default options.
    ///
    /// # Errors
    ///
    /// Returns a [`ReactionError`] for any input-grammar violation: empty
    /// input, foreign characters, missing separators, empty terms, malformed
    /// coefficients or an invalid compound formula.
    pub fn new(reaction: &str) -> Result<Self, ReactionError> {
        Self::with_options(reaction, ReactionOptions::default())
    }

    /// Creates a reaction with explicit options.
    pub fn with_options(
        reaction: &str,
        options: ReactionOptions,
    ) -> Result<Self, ReactionError> {
        let stripped: String = reaction.chars().filter(|c| !c.is_whitespace()).collect();
        let decomposed = validator::validate(&stripped)?;
        Ok(Self {
            reaction: stripped,
            options,
            decomposed,
            parsed: OnceCell::new(),
            molar_masses: OnceCell::new(),
            composition: OnceCell::new(),
            balancer: OnceCell::new(),
            coefficients: OnceCell::new(),
            normalized: OnceCell::new(),
            final_reaction: OnceCell::new(),
            final_reaction_normalized: OnceCell::new(),
            masses: OnceCell::new(),
        })
    }

    /// The reaction string with whitespace stripped.
    pub fn reaction(&self) -> &str {
        &self.reaction
    }

    /// The separator found between reactants and products.
    pub fn separator(&self) -> &str {
        self.decomposed.separator
    }

    /// Formula strings of every compound, reactants first.
    pub fn compounds(&self) -> &[String] {
        &self.decomposed.compounds
    }

    /// Formula strings of the reactant side.
    pub fn reactants(&self) -> &[String] {
        self.decomposed.reactants()
    }

    /// Formula strings of the product side.
    pub fn products(&self) -> &[String] {
        self.decomposed.products()
    }

    /// Coefficients entered in the reaction string, 1.0 where absent.
    pub fn initial_coefficients(&self) -> &[f64] {
        &self.decomposed.initial_coefficients
    }

    /// Parsed formula of every compound.
    pub fn parsed_formulas(&self) -> &[Vec<Atom>] {
        self.parsed.get_or_init(|| {
            self.decomposed
                .compounds
                .iter()
                .map(|compound| parser::parse(&sanitizer::sanitize(compound)))
                .collect()
        })
    }

    /// Molar mass of every compound in g/mol, rounded to the configured
    /// precision.
    pub fn molar_masses(&self) -> Vec<f64> {
        round_slice(self.raw_molar_masses(), self.options.precision)
    }

    /// The element-composition matrix of the reaction.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.composition().0
    }

    /// Elements of the reaction in first-appearance order (the matrix row
    /// order).
    pub fn elements(&self) -> &[String] {
        &self.composition().1
    }

    /// The balancer over the composition matrix, for direct method calls.
    pub fn balancer(&self) -> &Balancer {
        self.balancer.get_or_init(|| {
            Balancer::new(
                self.matrix().clone(),
                self.decomposed.separator_pos,
                self.options.precision,
                self.options.intify,
                self.options.tolerance,
            )
        })
    }

    /// The coefficient vector for the configured mode, with the method that
    /// produced it.
    ///
    /// # Errors
    ///
    /// Returns a [`ReactionError`] when the element sets of the two sides
    /// differ (Check/Balance), user coefficients fail the Check predicate,
    /// or every automatic method fails.
    pub fn coefficients(&self) -> Result<&MethodResult, ReactionError> {
        self.coefficients.get_or_try_init(|| {
            coefficients::compute(
                self.options.mode,
                self.parsed_formulas(),
                &self.decomposed,
                self.balancer(),
            )
        })
    }

    /// The method that produced the current coefficients.
    pub fn method(&self) -> Result<Method, ReactionError> {
        Ok(self.coefficients()?.method)
    }

    /// Coefficients scaled so the target compound's coefficient is exactly 1,
    /// rounded to the configured precision.
    pub fn normalized_coefficients(&self) -> Result<&[f64], ReactionError> {
        self.normalized
            .get_or_try_init(|| {
                let target = self.target_index()?;
                let coefficients = &self.coefficients()?.coefficients;
                let scale = coefficients[target];
                Ok(round_slice(
                    &coefficients.iter().map(|c| c / scale).collect::<Vec<_>>(),
                    self.options.precision,
                ))
            })
            .map(Vec::as_slice)
    }

    /// Whether the current coefficients satisfy the balance predicate.
    pub fn is_balanced(&self) -> Result<bool, ReactionError> {
        let coefficients = &self.coefficients()?.coefficients;
        Ok(self.balancer().is_balanced(coefficients))
    }

    /// The reaction rebuilt with the computed coefficients, the original
    /// separator preserved and coefficients equal to 1 omitted.
    pub fn final_reaction(&self) -> Result<&str, ReactionError> {
        self.final_reaction
            .get_or_try_init(|| {
                let coefficients = self.coefficients()?.coefficients.clone();
                Ok(self.assemble(&coefficients))
            })
            .map(String::as_str)
    }

    /// The reaction rebuilt with the normalized coefficients.
    pub fn final_reaction_normalized(&self) -> Result<&str, ReactionError> {
        self.final_reaction_normalized
            .get_or_try_init(|| {
                let normalized = self.normalized_coefficients()?.to_vec();
                Ok(self.assemble(&normalized))
            })
            .map(String::as_str)
    }

    /// Mass of every compound, in grams, scaled so the target compound
    /// weighs exactly the configured target mass. Rounded to the configured
    /// precision.
    pub fn masses(&self) -> Result<&[f64], ReactionError> {
        self.masses
            .get_or_try_init(|| {
                let target = self.target_index()?;
                let normalized = self.normalized_coefficients()?.to_vec();
                let molar_masses = self.raw_molar_masses();
                let scale = self.options.target_mass / molar_masses[target];
                let masses: Vec<f64> = molar_masses
                    .iter()
                    .zip(normalized)
                    .map(|(molar, coef)| molar * coef * scale)
                    .collect();
                Ok(round_slice(&masses, self.options.precision))
            })
            .map(Vec::as_slice)
    }

    /// Overrides the coefficients with user-supplied values.
    ///
    /// The override becomes the authoritative result (method `User`) and
    /// invalidates every cache derived from the coefficients.
    ///
    /// # Errors
    ///
    /// Returns a [`ReactionError`] when the length does not match the
    /// compound count or any entry is not strictly positive.
    pub fn set_coefficients(&mut self, coefficients: Vec<f64>) -> Result<(), ReactionError> {
        coefficients::validate(&coefficients, self.decomposed.compounds.len())?;
        self.coefficients = OnceCell::with_value(MethodResult {
            method: Method::User,
            coefficients,
        });
        self.normalized = OnceCell::new();
        self.final_reaction = OnceCell::new();
        self.final_reaction_normalized = OnceCell::new();
        self.masses = OnceCell::new();
        Ok(())
    }

    fn composition(&self) -> &(DMatrix<f64>, Vec<String>) {
        self.composition
            .get_or_init(|| matrix::composition_matrix(self.parsed_formulas()))
    }

    fn raw_molar_masses(&self) -> &[f64] {
        self.molar_masses.get_or_init(|| {
            self.parsed_formulas()
                .iter()
                .map(|parsed| MolarMass::new(parsed).molar_mass())
                .collect()
        })
    }

    /// Maps the signed target option to an index into the compound list.
    fn target_index(&self) -> Result<usize, ReactionError> {
        let index = self.options.target + self.decomposed.separator_pos as i64;
        if index < 0 || index >= self.decomposed.compounds.len() as i64 {
            return Err(ReactionError::TargetOutOfRange {
                target: self.options.target,
                reactants: self.decomposed.separator_pos,
                products: self.decomposed.compounds.len() - self.decomposed.separator_pos,
            });
        }
        Ok(index as usize)
    }

    /// Joins coefficient-prefixed compounds with `+` and restores the
    /// original separator at the reactant/product boundary.
    fn assemble(&self, coefficients: &[f64]) -> String {
        let terms: Vec<String> = self
            .decomposed
            .compounds
            .iter()
            .zip(coefficients)
            .map(|(compound, coef)| {
                if *coef == 1.0 {
                    compound.clone()
                } else {
                    format!("{coef}{compound}")
                }
            })
            .collect();
        replace_nth(
            &terms.join("+"),
            "+",
            self.decomposed.separator,
            self.decomposed.separator_pos,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YBCO: &str = "BaCO3 + Y2(CO3)3 + CuCO3 + O2 = YBa2Cu3O7 + CO2";

    fn ybco_options() -> ReactionOptions {
        ReactionOptions {
            precision: 4,
            target_mass: 3.0,
            ..ReactionOptions::default()
        }
    }

    #[test]
    fn whitespace_is_stripped_from_the_reaction() {
        let reaction = ChemicalReaction::new(YBCO).unwrap();
        assert_eq!(
            reaction.reaction(),
            "BaCO3+Y2(CO3)3+CuCO3+O2=YBa2Cu3O7+CO2"
        );
    }

    #[test]
    fn balance_mode_finds_the_inverse_solution() {
        let reaction = ChemicalReaction::with_options(YBCO, ybco_options()).unwrap();
        let result = reaction.coefficients().unwrap();
        assert_eq!(result.method, Method::Inverse);
        assert_eq!(result.coefficients, vec![8.0, 2.0, 12.0, 1.0, 4.0, 26.0]);
        assert!(reaction.is_balanced().unwrap());
    }

    #[test]
    fn normalization_scales_the_target_coefficient_to_one() {
        let reaction = ChemicalReaction::with_options(YBCO, ybco_options()).unwrap();
        assert_eq!(
            reaction.normalized_coefficients().unwrap(),
            &[2.0, 0.5, 3.0, 0.25, 1.0, 6.5]
        );
    }

    #[test]
    fn masses_scale_to_the_target_mass() {
        let reaction = ChemicalReaction::with_options(YBCO, ybco_options()).unwrap();
        assert_eq!(
            reaction.masses().unwrap(),
            &[1.7773, 0.8057, 1.6692, 0.036, 3.0, 1.2882]
        );
    }

    #[test]
    fn final_reactions_preserve_the_separator_and_omit_unit_coefficients() {
        let reaction = ChemicalReaction::with_options(YBCO, ybco_options()).unwrap();
        assert_eq!(
            reaction.final_reaction().unwrap(),
            "8BaCO3+2Y2(CO3)3+12CuCO3+O2=4YBa2Cu3O7+26CO2"
        );
        assert_eq!(
            reaction.final_reaction_normalized().unwrap(),
            "2BaCO3+0.5Y2(CO3)3+3CuCO3+0.25O2=YBa2Cu3O7+6.5CO2"
        );
    }

    #[test]
    fn molar_masses_round_to_the_configured_precision() {
        let reaction = ChemicalReaction::with_options(YBCO, ybco_options()).unwrap();
        assert_eq!(
            reaction.molar_masses(),
            vec![197.335, 357.8357, 123.554, 31.998, 666.1908, 44.009]
        );
    }

    #[test]
    fn negative_targets_reach_into_the_reactants() {
        let options = ReactionOptions {
            target: -4,
            ..ybco_options()
        };
        let reaction = ChemicalReaction::with_options(YBCO, options).unwrap();
        let normalized = reaction.normalized_coefficients().unwrap();
        assert_eq!(normalized[0], 1.0);
    }

    #[test]
    fn out_of_range_targets_are_rejected() {
        for target in [-5, 2] {
            let options = ReactionOptions {
                target,
                ..ybco_options()
            };
            let reaction = ChemicalReaction::with_options(YBCO, options).unwrap();
            assert_eq!(
                reaction.normalized_coefficients().unwrap_err(),
                ReactionError::TargetOutOfRange {
                    target,
                    reactants: 4,
                    products: 2,
                }
            );
        }
    }

    #[test]
    fn set_coefficients_overrides_and_invalidates_downstream_caches() {
        let reaction_str = "Cr2(SO4)3+Br2+NaOH=NaBr+Na2CrO4+Na2SO4+H2O";
        let mut reaction = ChemicalReaction::new(reaction_str).unwrap();
        reaction
            .set_coefficients(vec![2.0, 5.0, 6.0, 1.0, 2.0, 4.0, 2.0])
            .unwrap();

        let result = reaction.coefficients().unwrap();
        assert_eq!(result.method, Method::User);
        assert_eq!(
            result.coefficients,
            vec![2.0, 5.0, 6.0, 1.0, 2.0, 4.0, 2.0]
        );

        assert_eq!(
            reaction.set_coefficients(vec![2.0, 5.0, 6.0, 1.0, 2.0, 4.0]),
            Err(ReactionError::CoefficientCount {
                expected: 7,
                got: 6
            })
        );
        assert_eq!(
            reaction.set_coefficients(vec![2.0, 5.0, 6.0, 1.0, 2.0, 4.0, -2.0]),
            Err(ReactionError::NonPositiveCoefficient {
                value: -2.0,
                position: 6
            })
        );
    }

    #[test]
    fn check_mode_accepts_balanced_user_coefficients() {
        let options = ReactionOptions {
            mode: Mode::Check,
            ..ReactionOptions::default()
        };
        let reaction = ChemicalReaction::with_options(
            "Cr2(SO4)3+3Br2+16NaOH=6NaBr+2Na2CrO4+3Na2SO4+8H2O",
            options,
        )
        .unwrap();
        let result = reaction.coefficients().unwrap();
        assert_eq!(result.method, Method::User);
        assert_eq!(
            result.coefficients,
            vec![1.0, 3.0, 16.0, 6.0, 2.0, 3.0, 8.0]
        );
    }

    #[test]
    fn check_mode_rejects_unbalanced_user_coefficients() {
        let options = ReactionOptions {
            mode: Mode::Check,
            ..ReactionOptions::default()
        };
        let reaction = ChemicalReaction::with_options(
            "Cr2(SO4)3+4Br2+16NaOH=6NaBr+2Na2CrO4+3Na2SO4+8H2O",
            options,
        )
        .unwrap();
        let err = reaction.coefficients().unwrap_err();
        assert_eq!(err, ReactionError::NotBalanced);
        assert_eq!(err.to_string(), "reaction is not balanced");
    }

    #[test]
    fn force_mode_returns_initial_coefficients_verbatim() {
        let options = ReactionOptions {
            mode: Mode::Force,
            ..ReactionOptions::default()
        };
        let reaction =
            ChemicalReaction::with_options("Cr2(SO4)3+Br2+NaOH=NaBr+Na2CrO4+Na2SO4+H2O", options)
                .unwrap();
        let result = reaction.coefficients().unwrap();
        assert_eq!(result.method, Method::User);
        assert_eq!(
            result.coefficients,
            vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]
        );
        assert!(!reaction.is_balanced().unwrap());
    }

    #[test]
    fn elements_on_one_side_fail_with_exact_wording() {
        let reaction = ChemicalReaction::new("Rb2CO3+La2O3+Nb2O5=RbLaNb2O7").unwrap();
        let err = reaction.coefficients().unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot balance this reaction, because element(s) [C] are only in one part of the reaction"
        );

        let reaction = ChemicalReaction::new("Rb2CO3+La2O3+Nb2O5=RbLaNb2O7+Nd").unwrap();
        assert_eq!(
            reaction.coefficients().unwrap_err(),
            ReactionError::ElementsOnOneSide {
                elements: vec!["C".to_string(), "Nd".to_string()]
            }
        );
    }
}

use super::error::FormulaError;
use super::parser::{self, Atom};
use super::{sanitizer, validator};
use crate::core::periodic_table;

/// Mass arithmetic over a parsed formula.
///
/// All results here are unrounded; presentation rounding happens in the
/// [`super::ChemicalFormula`] facade.
pub(crate) struct MolarMass<'a> {
    parsed: &'a [Atom],
}

/// A metal of the source formula paired with the oxide form it converts to.
struct OxideShare {
    metal: String,
    formula: String,
    mass_percent: f64,
}

impl<'a> MolarMass<'a> {
    pub fn new(parsed: &'a [Atom]) -> Self {
        Self { parsed }
    }

    /// Mass contributed by each element: atomic weight times amount.
    pub fn atomic_masses(&self) -> Vec<f64> {
        self.parsed
            .iter()
            .map(|atom| periodic_table::weight(&atom.label).unwrap_or_default() * atom.amount)
            .collect()
    }

    pub fn molar_mass(&self) -> f64 {
        self.atomic_masses().iter().sum()
    }

    /// Mass share of each element, in percent of the molar mass.
    pub fn mass_percent(&self) -> Vec<Atom> {
        let atomic_masses = self.atomic_masses();
        let molar_mass = self.molar_mass();
        self.parsed
            .iter()
            .zip(atomic_masses)
            .map(|(atom, mass)| Atom::new(atom.label.clone(), mass / molar_mass * 100.0))
            .collect()
    }

    /// Atom-count share of each element, in percent of the total atom count.
    pub fn atomic_percent(&self) -> Vec<Atom> {
        let total: f64 = self.parsed.iter().map(|atom| atom.amount).sum();
        self.parsed
            .iter()
            .map(|atom| Atom::new(atom.label.clone(), atom.amount / total * 100.0))
            .collect()
    }

    /// Mass shares recalculated as conventional oxides, normalized to 100 %.
    ///
    /// Every non-oxygen element is converted to an oxide form: a caller
    /// override when the element is the metal of one of `custom_oxides`
    /// (each a valid binary formula whose second element is `O`), the
    /// periodic-table default otherwise.
    pub fn oxide_percent(&self, custom_oxides: &[&str]) -> Result<Vec<Atom>, FormulaError> {
        let shares = self.oxide_shares(custom_oxides)?;

        let raw: Vec<f64> = shares
            .iter()
            .map(|share| {
                let parsed_oxide = parser::parse(&sanitizer::sanitize(&share.formula));
                let oxide_mass = MolarMass::new(&parsed_oxide).molar_mass();
                let metal_count = parsed_oxide
                    .first()
                    .map(|atom| atom.amount)
                    .unwrap_or(1.0);
                let atomic_mass = periodic_table::weight(&share.metal).unwrap_or_default();
                let conversion = oxide_mass / atomic_mass / metal_count;
                share.mass_percent * conversion
            })
            .collect();

        let total: f64 = raw.iter().sum();
        Ok(shares
            .iter()
            .zip(raw)
            .map(|(share, value)| Atom::new(share.formula.clone(), value / total * 100.0))
            .collect())
    }

    /// Resolves the oxide form for every non-oxygen element of the formula.
    fn oxide_shares(&self, custom_oxides: &[&str]) -> Result<Vec<OxideShare>, FormulaError> {
        let mut overrides: Vec<(String, &str)> = Vec::with_capacity(custom_oxides.len());
        for &oxide in custom_oxides {
            let sanitized = sanitizer::sanitize(oxide);
            validator::validate(oxide, &sanitized)?;

            let parsed = parser::parse(&sanitized);
            if parsed.len() > 2 {
                return Err(FormulaError::OnlyBinaryOxide {
                    oxide: oxide.to_string(),
                });
            }
            if parsed.len() != 2 || parsed[1].label != "O" {
                return Err(FormulaError::NotAnOxide {
                    oxide: oxide.to_string(),
                });
            }
            overrides.push((parsed[0].label.clone(), oxide));
        }

        let mass_percents = self.mass_percent();
        let mut shares = Vec::new();
        for (atom, percent) in self.parsed.iter().zip(mass_percents) {
            if atom.label == "O" {
                continue;
            }
            let formula = match overrides.iter().find(|(metal, _)| *metal == atom.label) {
                Some((_, custom)) => custom.to_string(),
                None => periodic_table::default_oxide(&atom.label)
                    .ok_or_else(|| FormulaError::NoDefaultOxide {
                        element: atom.label.clone(),
                    })?
                    .to_string(),
            };
            shares.push(OxideShare {
                metal: atom.label.clone(),
                formula,
                mass_percent: percent.amount,
            });
        }
        Ok(shares)
    }
}

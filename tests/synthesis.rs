//! End-to-end synthesis scenarios through the public API.

use synthcalc::{ChemicalFormula, ChemicalReaction, Method, Mode, ReactionOptions};

#[test]
fn ybco_synthesis_masses_for_three_grams_of_target() {
    let options = ReactionOptions {
        mode: Mode::Balance,
        target: 0,
        target_mass: 3.0,
        intify: true,
        precision: 4,
        tolerance: 1e-8,
    };
    let reaction = ChemicalReaction::with_options(
        "BaCO3 + Y2(CO3)3 + CuCO3 + O2 = YBa2Cu3O7 + CO2",
        options,
    )
    .unwrap();

    let result = reaction.coefficients().unwrap();
    assert_eq!(result.method, Method::Inverse);
    assert_eq!(result.coefficients, vec![8.0, 2.0, 12.0, 1.0, 4.0, 26.0]);
    assert_eq!(
        reaction.normalized_coefficients().unwrap(),
        &[2.0, 0.5, 3.0, 0.25, 1.0, 6.5]
    );
    assert_eq!(
        reaction.masses().unwrap(),
        &[1.7773, 0.8057, 1.6692, 0.036, 3.0, 1.2882]
    );
    assert_eq!(
        reaction.final_reaction().unwrap(),
        "8BaCO3+2Y2(CO3)3+12CuCO3+O2=4YBa2Cu3O7+26CO2"
    );
    assert!(reaction.is_balanced().unwrap());
}

#[test]
fn overriding_coefficients_recomputes_downstream_masses() {
    let mut reaction = ChemicalReaction::new("2H2+O2=2H2O").unwrap();
    let before = reaction.masses().unwrap().to_vec();

    reaction.set_coefficients(vec![4.0, 2.0, 4.0]).unwrap();
    assert_eq!(reaction.method().unwrap(), Method::User);

    // normalization divides the override back out, so masses are unchanged
    assert_eq!(reaction.masses().unwrap(), before.as_slice());
    assert_eq!(
        reaction.final_reaction().unwrap(),
        "4H2+2O2=4H2O"
    );
}

#[test]
fn scenario_coefficients_for_the_iron_chloride_reaction() {
    let reaction = ChemicalReaction::new("FeCl3 + SO2 + H2O = FeCl2 + H2SO4 + HCl").unwrap();
    assert_eq!(
        reaction.coefficients().unwrap().coefficients,
        vec![2.0, 1.0, 2.0, 2.0, 1.0, 2.0]
    );
}

#[test]
fn formula_pipeline_from_text_to_oxide_percent() {
    let formula = ChemicalFormula::with_precision("H2SO4", 4).unwrap();
    assert_eq!(formula.molar_mass(), 98.072);

    let oxides = formula.oxide_percent(&[]).unwrap();
    let labels: Vec<&str> = oxides.iter().map(|a| a.label.as_str()).collect();
    let amounts: Vec<f64> = oxides.iter().map(|a| a.amount).collect();
    assert_eq!(labels, vec!["H2O", "SO3"]);
    assert_eq!(amounts, vec![18.3692, 81.6308]);
}

#[test]
fn hydrate_formulas_parse_with_adduct_dots() {
    let formula = ChemicalFormula::new("CuSO4·5H2O").unwrap();
    let water_content: f64 = formula
        .parsed_formula()
        .iter()
        .find(|atom| atom.label == "H")
        .map(|atom| atom.amount)
        .unwrap();
    assert_eq!(water_content, 10.0);
}

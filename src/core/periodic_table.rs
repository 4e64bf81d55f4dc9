use phf::{phf_map, Map};

/// Static data carried for every chemical element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    /// Standard atomic weight in g/mol.
    pub weight: f64,
    /// The conventional oxide form used by oxide-percent calculations.
    ///
    /// The choice of form (e.g. `Fe2O3` rather than `Fe3O4`) is a convention:
    /// the most common analytical oxide of the element. Elements with no
    /// conventional oxide carry `None`, and oxide-percent calculations over
    /// them require a user-supplied oxide.
    pub default_oxide: Option<&'static str>,
}

/// Atomic weights and conventional oxide forms for the 118 known elements.
///
/// Weights follow the CIAAW standard atomic weights (conventional values for
/// elements with an interval weight, most stable isotope for elements with no
/// stable isotopes).
#[rustfmt::skip]
pub static PERIODIC_TABLE: Map<&'static str, Element> = phf_map! {
    // --- Period 1 ---
    "H"  => Element { weight: 1.008,        default_oxide: Some("H2O") },
    "He" => Element { weight: 4.002602,     default_oxide: None },

    // --- Period 2 ---
    "Li" => Element { weight: 6.94,         default_oxide: Some("Li2O") },
    "Be" => Element { weight: 9.0121831,    default_oxide: Some("BeO") },
    "B"  => Element { weight: 10.81,        default_oxide: Some("B2O3") },
    "C"  => Element { weight: 12.011,       default_oxide: Some("CO2") },
    "N"  => Element { weight: 14.007,       default_oxide: Some("NO2") },
    "O"  => Element { weight: 15.999,       default_oxide: None },
    "F"  => Element { weight: 18.998403163, default_oxide: None },
    "Ne" => Element { weight: 20.1797,      default_oxide: None },

    // --- Period 3 ---
    "Na" => Element { weight: 22.98976928,  default_oxide: Some("Na2O") },
    "Mg" => Element { weight: 24.305,       default_oxide: Some("MgO") },
    "Al" => Element { weight: 26.9815385,   default_oxide: Some("Al2O3") },
    "Si" => Element { weight: 28.085,       default_oxide: Some("SiO2") },
    "P"  => Element { weight: 30.973761998, default_oxide: Some("P2O5") },
    "S"  => Element { weight: 32.06,        default_oxide: Some("SO3") },
    "Cl" => Element { weight: 35.45,        default_oxide: Some("Cl2O7") },
    "Ar" => Element { weight: 39.948,       default_oxide: None },

    // --- Period 4 ---
    "K"  => Element { weight: 39.098,       default_oxide: Some("K2O") },
    "Ca" => Element { weight: 40.078,       default_oxide: Some("CaO") },
    "Sc" => Element { weight: 44.955908,    default_oxide: Some("Sc2O3") },
    "Ti" => Element { weight: 47.867,       default_oxide: Some("TiO2") },
    "V"  => Element { weight: 50.9415,      default_oxide: Some("V2O5") },
    "Cr" => Element { weight: 51.9961,      default_oxide: Some("Cr2O3") },
    "Mn" => Element { weight: 54.938044,    default_oxide: Some("MnO") },
    "Fe" => Element { weight: 55.845,       default_oxide: Some("Fe2O3") },
    "Co" => Element { weight: 58.933194,    default_oxide: Some("CoO") },
    "Ni" => Element { weight: 58.6934,      default_oxide: Some("NiO") },
    "Cu" => Element { weight: 63.546,       default_oxide: Some("CuO") },
    "Zn" => Element { weight: 65.38,        default_oxide: Some("ZnO") },
    "Ga" => Element { weight: 69.723,       default_oxide: Some("Ga2O3") },
    "Ge" => Element { weight: 72.63,        default_oxide: Some("GeO2") },
    "As" => Element { weight: 74.921595,    default_oxide: Some("As2O3") },
    "Se" => Element { weight: 78.971,       default_oxide: Some("SeO2") },
    "Br" => Element { weight: 79.904,       default_oxide: Some("Br2O") },
    "Kr" => Element { weight: 83.798,       default_oxide: None },

    // --- Period 5 ---
    "Rb" => Element { weight: 85.4678,      default_oxide: Some("Rb2O") },
    "Sr" => Element { weight: 87.62,        default_oxide: Some("SrO") },
    "Y"  => Element { weight: 88.90584,     default_oxide: Some("Y2O3") },
    "Zr" => Element { weight: 91.224,       default_oxide: Some("ZrO2") },
    "Nb" => Element { weight: 92.90637,     default_oxide: Some("Nb2O5") },
    "Mo" => Element { weight: 95.95,        default_oxide: Some("MoO3") },
    "Tc" => Element { weight: 98.0,         default_oxide: Some("Tc2O7") },
    "Ru" => Element { weight: 101.07,       default_oxide: Some("RuO2") },
    "Rh" => Element { weight: 102.9055,     default_oxide: Some("Rh2O3") },
    "Pd" => Element { weight: 106.42,       default_oxide: Some("PdO") },
    "Ag" => Element { weight: 107.8682,     default_oxide: Some("Ag2O") },
    "Cd" => Element { weight: 112.414,      default_oxide: Some("CdO") },
    "In" => Element { weight: 114.818,      default_oxide: Some("In2O3") },
    "Sn" => Element { weight: 118.71,       default_oxide: Some("SnO2") },
    "Sb" => Element { weight: 121.76,       default_oxide: Some("Sb2O3") },
    "Te" => Element { weight: 127.6,        default_oxide: Some("TeO2") },
    "I"  => Element { weight: 126.90447,    default_oxide: Some("I2O5") },
    "Xe" => Element { weight: 131.293,      default_oxide: None },

    // --- Period 6 ---
    "Cs" => Element { weight: 132.90545196, default_oxide: Some("Cs2O") },
    "Ba" => Element { weight: 137.327,      default_oxide: Some("BaO") },
    "La" => Element { weight: 138.90547,    default_oxide: Some("La2O3") },
    "Ce" => Element { weight: 140.116,      default_oxide: Some("CeO2") },
    "Pr" => Element { weight: 140.90766,    default_oxide: Some("Pr6O11") },
    "Nd" => Element { weight: 144.242,      default_oxide: Some("Nd2O3") },
    "Pm" => Element { weight: 145.0,        default_oxide: Some("Pm2O3") },
    "Sm" => Element { weight: 150.36,       default_oxide: Some("Sm2O3") },
    "Eu" => Element { weight: 151.964,      default_oxide: Some("Eu2O3") },
    "Gd" => Element { weight: 157.25,       default_oxide: Some("Gd2O3") },
    "Tb" => Element { weight: 158.92535,    default_oxide: Some("Tb4O7") },
    "Dy" => Element { weight: 162.5,        default_oxide: Some("Dy2O3") },
    "Ho" => Element { weight: 164.930329,   default_oxide: Some("Ho2O3") },
    "Er" => Element { weight: 167.259,      default_oxide: Some("Er2O3") },
    "Tm" => Element { weight: 168.93422,    default_oxide: Some("Tm2O3") },
    "Yb" => Element { weight: 173.045,      default_oxide: Some("Yb2O3") },
    "Lu" => Element { weight: 174.9668,     default_oxide: Some("Lu2O3") },
    "Hf" => Element { weight: 178.49,       default_oxide: Some("HfO2") },
    "Ta" => Element { weight: 180.94788,    default_oxide: Some("Ta2O5") },
    "W"  => Element { weight: 183.84,       default_oxide: Some("WO3") },
    "Re" => Element { weight: 186.207,      default_oxide: Some("Re2O7") },
    "Os" => Element { weight: 190.23,       default_oxide: Some("OsO4") },
    "Ir" => Element { weight: 192.217,      default_oxide: Some("IrO2") },
    "Pt" => Element { weight: 195.084,      default_oxide: Some("PtO2") },
    "Au" => Element { weight: 196.966569,   default_oxide: Some("Au2O3") },
    "Hg" => Element { weight: 200.592,      default_oxide: Some("HgO") },
    "Tl" => Element { weight: 204.38,       default_oxide: Some("Tl2O3") },
    "Pb" => Element { weight: 207.2,        default_oxide: Some("PbO") },
    "Bi" => Element { weight: 208.9804,     default_oxide: Some("Bi2O3") },
    "Po" => Element { weight: 209.0,        default_oxide: Some("PoO2") },
    "At" => Element { weight: 210.0,        default_oxide: None },
    "Rn" => Element { weight: 222.0,        default_oxide: None },

    // --- Period 7 ---
    "Fr" => Element { weight: 223.0,        default_oxide: Some("Fr2O") },
    "Ra" => Element { weight: 226.0,        default_oxide: Some("RaO") },
    "Ac" => Element { weight: 227.0,        default_oxide: Some("Ac2O3") },
    "Th" => Element { weight: 232.0377,     default_oxide: Some("ThO2") },
    "Pa" => Element { weight: 231.03588,    default_oxide: Some("Pa2O5") },
    "U"  => Element { weight: 238.02891,    default_oxide: Some("U3O8") },
    "Np" => Element { weight: 237.0,        default_oxide: Some("NpO2") },
    "Pu" => Element { weight: 244.0,        default_oxide: Some("PuO2") },
    "Am" => Element { weight: 243.0,        default_oxide: Some("AmO2") },
    "Cm" => Element { weight: 247.0,        default_oxide: Some("Cm2O3") },
    "Bk" => Element { weight: 247.0,        default_oxide: Some("BkO2") },
    "Cf" => Element { weight: 251.0,        default_oxide: Some("Cf2O3") },
    "Es" => Element { weight: 252.0,        default_oxide: Some("Es2O3") },
    "Fm" => Element { weight: 257.0,        default_oxide: None },
    "Md" => Element { weight: 258.0,        default_oxide: None },
    "No" => Element { weight: 259.0,        default_oxide: None },
    "Lr" => Element { weight: 266.0,        default_oxide: None },
    "Rf" => Element { weight: 267.0,        default_oxide: None },
    "Db" => Element { weight: 268.0,        default_oxide: None },
    "Sg" => Element { weight: 269.0,        default_oxide: None },
    "Bh" => Element { weight: 270.0,        default_oxide: None },
    "Hs" => Element { weight: 269.0,        default_oxide: None },
    "Mt" => Element { weight: 278.0,        default_oxide: None },
    "Ds" => Element { weight: 281.0,        default_oxide: None },
    "Rg" => Element { weight: 282.0,        default_oxide: None },
    "Cn" => Element { weight: 285.0,        default_oxide: None },
    "Nh" => Element { weight: 286.0,        default_oxide: None },
    "Fl" => Element { weight: 289.0,        default_oxide: None },
    "Mc" => Element { weight: 290.0,        default_oxide: None },
    "Lv" => Element { weight: 293.0,        default_oxide: None },
    "Ts" => Element { weight: 294.0,        default_oxide: None },
    "Og" => Element { weight: 294.0,        default_oxide: None },
};

/// Returns whether `symbol` names a known element.
pub fn is_element(symbol: &str) -> bool {
    PERIODIC_TABLE.contains_key(symbol)
}

/// Standard atomic weight of `symbol`, if known.
pub fn weight(symbol: &str) -> Option<f64> {
    PERIODIC_TABLE.get(symbol).map(|e| e.weight)
}

/// Conventional oxide form of `symbol`, if one exists.
pub fn default_oxide(symbol: &str) -> Option<&'static str> {
    PERIODIC_TABLE.get(symbol).and_then(|e| e.default_oxide)
}

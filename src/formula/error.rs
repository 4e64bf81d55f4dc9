use thiserror::Error;

/// Errors produced while validating or interpreting a single chemical formula.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormulaError {
    #[error("empty formula")]
    EmptyFormula,

    #[error("no letters A-Z or a-z in the formula '{formula}'")]
    NoLetters { formula: String },

    #[error("there are invalid symbol(s) [{}] in the formula '{formula}'", symbols.iter().collect::<String>())]
    InvalidSymbols { formula: String, symbols: Vec<char> },

    #[error("there are invalid atom(s) [{}] in the formula '{formula}'", atoms.join(" "))]
    InvalidAtoms { formula: String, atoms: Vec<String> },

    #[error("brackets ()[]{{}} are not balanced in the formula '{formula}'")]
    BracketsNotBalanced { formula: String },

    #[error("there are more than 1 adduct symbol *·• in the formula '{formula}'")]
    MoreThanOneAdduct { formula: String },

    #[error("only binary compounds can be considered as input (oxide '{oxide}')")]
    OnlyBinaryOxide { oxide: String },

    #[error("only oxides can be considered as input (oxide '{oxide}')")]
    NotAnOxide { oxide: String },

    #[error("element '{element}' has no default oxide, provide a custom one")]
    NoDefaultOxide { element: String },
}

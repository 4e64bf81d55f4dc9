use thiserror::Error;

use super::balancer::BalanceError;
use crate::formula::error::FormulaError;

/// Errors produced while decomposing, validating or balancing a reaction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReactionError {
    #[error("empty reaction string")]
    EmptyReaction,

    #[error("there are invalid character(s) [{}] in the reaction '{reaction}'", symbols.iter().collect::<String>())]
    InvalidCharacters { reaction: String, symbols: Vec<char> },

    #[error("no separator between reactants and products in the reaction '{reaction}'")]
    NoSeparator { reaction: String },

    #[error("no '+' separators between compounds in the reaction '{reaction}'")]
    NoCompoundSeparator { reaction: String },

    #[error("compound {position} is empty, maybe there are two adjacent '+'?")]
    EmptyCompound { position: usize },

    #[error("cannot parse a numeric coefficient from the term '{term}'")]
    InvalidCoefficient { term: String },

    #[error("compound {position} is invalid: {source}")]
    InvalidCompound {
        position: usize,
        source: FormulaError,
    },

    #[error("cannot balance this reaction, because element(s) [{}] are only in one part of the reaction", elements.join(" "))]
    ElementsOnOneSide { elements: Vec<String> },

    #[error("reaction is not balanced")]
    NotBalanced,

    #[error(transparent)]
    Balance(#[from] BalanceError),

    #[error("target {target} is out of range [{}, {}]", -(*reactants as i64), *products as i64 - 1)]
    TargetOutOfRange {
        target: i64,
        reactants: usize,
        products: usize,
    },

    #[error("coefficient slice length should be {expected}, got {got}")]
    CoefficientCount { expected: usize, got: usize },

    #[error("coefficient {value} at position {position} is not positive")]
    NonPositiveCoefficient { value: f64, position: usize },
}

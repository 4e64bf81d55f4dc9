//! # synthcalc
//!
//! A library for calculating the masses of substances required for chemical
//! synthesis directly from the reaction string. It includes solutions for all
//! intermediate steps: chemical formula parsing, molar mass calculation and
//! reaction balancing with several matrix methods.
//!
//! ## Architectural Philosophy
//!
//! The library is organized in three layers with a strict dependency order,
//! so each stage of the pipeline can be tested and reused in isolation.
//!
//! - **[`core`]: The Foundation.** Static periodic-table data and the exact
//!   numeric utilities (denominator-limited rationals, slice GCD/LCM,
//!   fixed-decimal rounding) shared by the upper layers.
//!
//! - **[`formula`]: Single formulas.** Sanitizing, validating and parsing a
//!   chemical formula into an ordered element multiset, plus the molar-mass
//!   engine (mass %, atomic %, oxide %). The [`ChemicalFormula`] facade
//!   memoizes every derived value.
//!
//! - **[`reaction`]: Whole reactions.** Decomposing a reaction string into
//!   compounds, assembling the element-composition matrix, and balancing it
//!   with four cooperating strategies (matrix inverse, general and partial
//!   pseudoinverse, combinatorial search). The [`ChemicalReaction`] facade
//!   ties the chain together and converts balanced coefficients into the
//!   masses of every compound for a target amount of product.
//!
//! ## Usage
//!
//! Preparing 3 grams of the YBCO superconductor by solid-state synthesis from
//! the respective carbonates:
//!
//! ```
//! use synthcalc::{ChemicalReaction, Mode, ReactionOptions};
//!
//! let options = ReactionOptions {
//!     mode: Mode::Balance,
//!     target: 0,
//!     target_mass: 3.0,
//!     intify: true,
//!     precision: 4,
//!     tolerance: 1e-8,
//! };
//! let reaction = ChemicalReaction::with_options(
//!     "BaCO3 + Y2(CO3)3 + CuCO3 + O2 = YBa2Cu3O7 + CO2",
//!     options,
//! )?;
//!
//! let coefs = reaction.coefficients()?;
//! assert_eq!(coefs.coefficients, vec![8.0, 2.0, 12.0, 1.0, 4.0, 26.0]);
//!
//! // Masses of every compound, in grams, for 3 g of YBa2Cu3O7.
//! let masses = reaction.masses()?;
//! assert_eq!(masses, &[1.7773, 0.8057, 1.6692, 0.036, 3.0, 1.2882]);
//! # Ok::<(), synthcalc::ReactionError>(())
//! ```

pub mod core;
pub mod formula;
pub mod reaction;

pub use crate::formula::error::FormulaError;
pub use crate::formula::parser::Atom;
pub use crate::formula::ChemicalFormula;
pub use crate::reaction::balancer::search::CancelToken;
pub use crate::reaction::balancer::{BalanceError, Balancer, Method, MethodResult};
pub use crate::reaction::error::ReactionError;
pub use crate::reaction::{ChemicalReaction, Mode, ReactionOptions};

//! # Core Module
//!
//! The foundation layer of the library: static periodic-table data and the
//! numeric utilities shared by the formula and reaction pipelines.
//!
//! Everything here is stateless and free of crate-internal dependencies, so
//! the upper layers can be exercised against it without any setup.

pub mod periodic_table;
pub mod rational;
pub mod utils;

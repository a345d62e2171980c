//! The grade calculation engine.
//!
//! This module owns the pure part of the calculator: the component
//! registry, the scenario value assumed for unscored components, input
//! validation, the required-final-score solve, and the classification of
//! the result into difficulty bands.

pub mod calculate;
pub mod classify;
pub mod registry;
pub mod scenario;
pub mod types;
pub mod validate;

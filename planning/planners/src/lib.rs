//! Planning as satisfiability: encodes a grounded planning problem into CNF, hands it to a
//! SAT oracle and decodes the model into the fluents and actions it denotes.
//!
//! The pipeline is: [`registry::Registry`] (variable numbering) → [`encode::ClauseEncoder`]
//! (clause construction) → [`satplan_sat::SatOracle`] → [`decode::decode`] (model interpretation).
//! [`solver::solve`] runs the whole pipeline for a single problem.

pub mod blocks;
pub mod config;
pub mod decode;
pub mod encode;
pub mod errors;
pub mod fmt;
pub mod registry;
pub mod solver;

pub use config::SatPlanConfig;
pub use decode::Plan;
pub use errors::{Error, Res};
pub use registry::{Object, Registry};
pub use solver::{solve, SolveOutcome, Solution};

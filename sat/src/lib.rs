//! Propositional literals and clauses in DIMACS convention, together with the
//! interface through which clauses are handed to a SAT solver.
//!
//! The solver itself is an opaque oracle ([`SatOracle`]): an instance is created for a
//! given number of variables, clauses are added one at a time and a single call to
//! [`SatInstance::solve`] yields either a model or a proof of unsatisfiability.
//! [`VarisatOracle`] provides an implementation on top of the `varisat` CDCL solver.

pub mod cnf;
pub mod lit;
pub mod oracle;
pub mod varisat_oracle;

pub use cnf::Cnf;
pub use lit::{Clause, Lit, Var};
pub use oracle::{Model, OracleError, SatInstance, SatOracle, SatResult};
pub use varisat_oracle::VarisatOracle;

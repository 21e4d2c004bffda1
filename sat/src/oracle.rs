use crate::{Clause, Lit, Var};
use std::time::Duration;
use thiserror::Error;

/// A complete assignment: one literal per variable, in increasing variable order.
/// The i-th entry refers to variable `i+1` and its sign gives the value of the variable.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Model {
    lits: Vec<Lit>,
}

impl Model {
    pub fn new(lits: Vec<Lit>) -> Model {
        Model { lits }
    }

    /// Builds a model where the variables `1..=values.len()` take the given values.
    pub fn from_values(values: &[bool]) -> Model {
        let lits = values
            .iter()
            .enumerate()
            .filter_map(|(i, &v)| Var::from_index(i).map(|var| Lit::new(var, v)))
            .collect();
        Model { lits }
    }

    pub fn lits(&self) -> &[Lit] {
        &self.lits
    }

    pub fn len(&self) -> usize {
        self.lits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }

    /// Value of the variable in the model, `None` if the model does not cover it.
    pub fn value(&self, var: Var) -> Option<bool> {
        self.lits
            .get(var.index())
            .filter(|l| l.var() == var)
            .or_else(|| self.lits.iter().find(|l| l.var() == var))
            .map(|l| l.is_positive())
    }

    pub fn into_lits(self) -> Vec<Lit> {
        self.lits
    }
}

/// Outcome of a satisfiability check that terminated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SatResult {
    Satisfiable(Model),
    Unsatisfiable,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// The clause set became trivially contradictory while adding a clause.
    #[error("Contradiction detected when adding clause #{clause_index} {clause}")]
    Contradiction { clause_index: usize, clause: Clause },
    #[error("No answer from the solver within {0:?}")]
    Timeout(Duration),
    #[error("Literal {lit} refers to a variable beyond the declared maximum ({max_variables})")]
    VariableOutOfBounds { lit: Lit, max_variables: u32 },
    #[error("SAT backend failure: {0}")]
    Backend(String),
}

/// A SAT solver from which fresh instances can be created.
pub trait SatOracle {
    type Instance: SatInstance;

    /// Creates an empty instance accepting variables `1..=max_variables`.
    /// `expected_clauses` is a hint for preallocation.
    fn new_instance(&self, max_variables: u32, expected_clauses: usize) -> Self::Instance;
}

/// A SAT instance being populated. It is consumed by [`SatInstance::solve`], so that
/// the underlying solver is released whatever the outcome.
pub trait SatInstance {
    /// Adds a clause to the instance.
    ///
    /// An [`OracleError::Contradiction`] is fatal: the instance is known to be unsatisfiable
    /// and no further clause should be added.
    fn add_clause(&mut self, clause: &[Lit]) -> Result<(), OracleError>;

    /// Number of clauses added so far.
    fn num_clauses(&self) -> usize;

    /// Decides the satisfiability of the clauses added so far.
    fn solve(self) -> Result<SatResult, OracleError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_values() {
        let m = Model::from_values(&[true, false, true]);
        assert_eq!(m.lits().iter().map(|l| l.to_dimacs()).collect::<Vec<_>>(), vec![1, -2, 3]);
        assert_eq!(m.value(Var::new(2).unwrap()), Some(false));
        assert_eq!(m.value(Var::new(3).unwrap()), Some(true));
        assert_eq!(m.value(Var::new(4).unwrap()), None);
    }
}

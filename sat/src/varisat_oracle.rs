use crate::oracle::*;
use crate::{Clause, Lit, Var};
use crossbeam_channel::RecvTimeoutError;
use hashbrown::HashMap;
use std::time::{Duration, Instant};
use varisat::ExtendFormula;

/// A [`SatOracle`] backed by the `varisat` CDCL solver.
///
/// When a timeout is given, the search runs on a dedicated thread and the caller stops
/// waiting once the timeout expires. The search itself is not interrupted: the thread is
/// detached and its result discarded.
#[derive(Clone, Debug, Default)]
pub struct VarisatOracle {
    timeout: Option<Duration>,
}

impl VarisatOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        VarisatOracle { timeout }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl SatOracle for VarisatOracle {
    type Instance = VarisatInstance;

    fn new_instance(&self, max_variables: u32, expected_clauses: usize) -> VarisatInstance {
        VarisatInstance {
            max_variables,
            clauses: Vec::with_capacity(expected_clauses),
            units: HashMap::new(),
            timeout: self.timeout,
        }
    }
}

/// Clauses buffered for a single call to varisat.
///
/// Trivial contradictions (empty clause, or a unit clause opposed to a previous unit clause)
/// are detected eagerly when the clause is added.
pub struct VarisatInstance {
    max_variables: u32,
    clauses: Vec<Clause>,
    units: HashMap<Var, bool>,
    timeout: Option<Duration>,
}

impl SatInstance for VarisatInstance {
    fn add_clause(&mut self, clause: &[Lit]) -> Result<(), OracleError> {
        let clause_index = self.clauses.len();
        if let Some(&lit) = clause.iter().find(|l| l.var().get() > self.max_variables) {
            return Err(OracleError::VariableOutOfBounds {
                lit,
                max_variables: self.max_variables,
            });
        }
        let contradiction = match clause {
            [] => true,
            [unit] => {
                let previous = self.units.insert(unit.var(), unit.is_positive());
                previous.is_some_and(|value| value != unit.is_positive())
            }
            _ => false,
        };
        if contradiction {
            return Err(OracleError::Contradiction {
                clause_index,
                clause: Clause::from(clause),
            });
        }
        self.clauses.push(Clause::from(clause));
        Ok(())
    }

    fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    fn solve(self) -> Result<SatResult, OracleError> {
        let VarisatInstance {
            max_variables,
            clauses,
            timeout,
            ..
        } = self;
        tracing::debug!(max_variables, num_clauses = clauses.len(), ?timeout, "varisat: solving");
        let start = Instant::now();
        let result = match timeout {
            None => run_varisat(max_variables, &clauses),
            Some(timeout) => {
                let (snd, rcv) = crossbeam_channel::bounded(1);
                std::thread::Builder::new()
                    .name("varisat".to_string())
                    .spawn(move || {
                        // the receiver may be gone if the caller stopped waiting
                        let _ = snd.send(run_varisat(max_variables, &clauses));
                    })
                    .map_err(|e| OracleError::Backend(format!("Could not start solver thread: {e}")))?;
                match rcv.recv_timeout(timeout) {
                    Ok(result) => result,
                    Err(RecvTimeoutError::Timeout) => Err(OracleError::Timeout(timeout)),
                    Err(RecvTimeoutError::Disconnected) => Err(OracleError::Backend(
                        "Solver thread terminated without an answer".to_string(),
                    )),
                }
            }
        };
        tracing::debug!("varisat: done in {:?}", start.elapsed());
        result
    }
}

fn run_varisat(num_vars: u32, clauses: &[Clause]) -> Result<SatResult, OracleError> {
    let mut solver = varisat::Solver::new();
    let mut lits: Vec<varisat::Lit> = Vec::new();
    for clause in clauses {
        lits.clear();
        lits.extend(clause.iter().map(|l| varisat::Lit::from_dimacs(l.to_dimacs() as isize)));
        solver.add_clause(&lits);
    }
    match solver.solve() {
        Ok(true) => {
            let assignment = solver
                .model()
                .ok_or_else(|| OracleError::Backend("Satisfiable instance without a model".to_string()))?;
            // variables that do not appear in any clause are unconstrained: report them as false
            let mut values = vec![false; num_vars as usize];
            for lit in assignment {
                if let Some(v) = values.get_mut(lit.var().index()) {
                    *v = lit.is_positive();
                }
            }
            Ok(SatResult::Satisfiable(Model::from_values(&values)))
        }
        Ok(false) => Ok(SatResult::Unsatisfiable),
        Err(e) => Err(OracleError::Backend(format!("{e:?}"))),
    }
}

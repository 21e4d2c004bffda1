use crate::config::SatPlanConfig;
use crate::decode::{decode, extract_plan, Plan};
use crate::encode::ClauseEncoder;
use crate::errors::Res;
use crate::registry::{Object, Registry};
use satplan_problem::Problem;
use satplan_sat::{Cnf, SatInstance, SatOracle, SatResult, VarisatOracle};
use std::time::Instant;

/// A plan together with the full assignment it was extracted from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    pub plan: Plan,
    /// Value of every registered object, in model order.
    /// Empty when the goal already held in the initial state and no solver was called.
    pub assignment: Vec<(Object, bool)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
    Plan(Solution),
    /// The encoding has no model: no plan exists under this encoding.
    Unsatisfiable,
}

impl SolveOutcome {
    pub fn plan(&self) -> Option<&Plan> {
        match self {
            SolveOutcome::Plan(sol) => Some(&sol.plan),
            SolveOutcome::Unsatisfiable => None,
        }
    }
}

/// The oracle matching the configuration: varisat, bounded by the configured timeout.
pub fn default_oracle(config: &SatPlanConfig) -> VarisatOracle {
    VarisatOracle::with_timeout(config.timeout)
}

/// Builds the variable registry and the clauses of the problem.
pub fn encode_problem(pb: &Problem, config: &SatPlanConfig) -> Res<(Registry, Vec<satplan_sat::Clause>)> {
    let registry = Registry::for_problem(pb)?;
    tracing::debug!(
        "Registered {} fluents and {} actions",
        registry.num_fluents(),
        registry.num_actions()
    );
    let clauses = ClauseEncoder::new(config.max_variables).encode(pb.actions(), &registry)?;
    Ok((registry, clauses))
}

/// Encodes the problem into a formula declaring one variable per fluent and action.
pub fn encode_to_cnf(pb: &Problem, config: &SatPlanConfig) -> Res<Cnf> {
    let (registry, clauses) = encode_problem(pb, config)?;
    let mut cnf = Cnf::with_num_vars(registry.len() as u32);
    for clause in &clauses {
        cnf.add_clause(clause);
    }
    Ok(cnf)
}

/// Encodes the problem, asks the oracle for a model and decodes it into a plan.
///
/// The registry and clauses live for the duration of the call only. The first clause rejected
/// by the oracle aborts the call: no further clause is added and the error is returned.
/// When the initial state already entails the goal, the oracle is not called, but encoding
/// errors such as an overflow of `max_variables` are still reported.
pub fn solve<O: SatOracle>(pb: &Problem, config: &SatPlanConfig, oracle: &O) -> Res<SolveOutcome> {
    let start = Instant::now();
    let (registry, clauses) = encode_problem(pb, config)?;
    tracing::info!(
        "Encoded {} variables and {} clauses in {:?}",
        registry.len(),
        clauses.len(),
        start.elapsed()
    );

    if pb.goal_holds_initially() {
        tracing::info!("Goal holds in the initial state, returning the empty plan");
        return Ok(SolveOutcome::Plan(Solution {
            plan: Plan::empty(),
            assignment: Vec::new(),
        }));
    }

    // the registry size was checked against `max_variables` during encoding
    let num_vars = registry.len() as u32;
    let mut instance = oracle.new_instance(num_vars, config.expected_clauses.max(clauses.len()));
    for clause in &clauses {
        instance.add_clause(clause)?;
    }

    let start = Instant::now();
    let result = instance.solve()?;
    tracing::info!("Solver answered in {:?}", start.elapsed());

    match result {
        SatResult::Unsatisfiable => {
            tracing::info!("Unsatisfiable");
            Ok(SolveOutcome::Unsatisfiable)
        }
        SatResult::Satisfiable(model) => {
            let assignment = decode(model.lits(), &registry)?;
            let plan = extract_plan(&assignment);
            tracing::info!("Satisfiable, {} actions selected", plan.len());
            Ok(SolveOutcome::Plan(Solution { plan, assignment }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use satplan_problem::{Action, Condition, ConditionalEffect, Effect, InitialState, ProblemBuilder};
    use satplan_sat::{Lit, OracleError};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Oracle counting the instances it creates and the clauses they receive.
    #[derive(Default)]
    struct CountingOracle {
        instances: Cell<usize>,
        clauses: Rc<Cell<usize>>,
    }

    struct CountingInstance {
        clauses: Rc<Cell<usize>>,
    }

    impl SatOracle for CountingOracle {
        type Instance = CountingInstance;

        fn new_instance(&self, _max_variables: u32, _expected_clauses: usize) -> CountingInstance {
            self.instances.set(self.instances.get() + 1);
            CountingInstance {
                clauses: self.clauses.clone(),
            }
        }
    }

    impl SatInstance for CountingInstance {
        fn add_clause(&mut self, _clause: &[Lit]) -> Result<(), OracleError> {
            self.clauses.set(self.clauses.get() + 1);
            Ok(())
        }

        fn num_clauses(&self) -> usize {
            self.clauses.get()
        }

        fn solve(self) -> Result<SatResult, OracleError> {
            Ok(SatResult::Unsatisfiable)
        }
    }

    /// `f` holds initially and is the goal; action `a` requires `g` and achieves `f`.
    fn goal_already_reached() -> Problem {
        let mut pb = ProblemBuilder::new();
        let f = pb.add_fluent("f").unwrap();
        let g = pb.add_fluent("g").unwrap();
        pb.add_action(
            Action::new("a")
                .with_precondition(Condition::new([g], []))
                .with_effect(ConditionalEffect::unconditional(Effect::new([f], []))),
        )
        .unwrap();
        pb.set_initial_state(InitialState::new([f], [g])).unwrap();
        pb.set_goal(Condition::new([f], [])).unwrap();
        pb.build()
    }

    fn config() -> SatPlanConfig {
        SatPlanConfig {
            max_variables: 1000,
            expected_clauses: 16,
            timeout: None,
        }
    }

    #[test]
    fn goal_satisfied_initially() -> Res<()> {
        let oracle = CountingOracle::default();
        let outcome = solve(&goal_already_reached(), &config(), &oracle)?;
        assert_eq!(outcome.plan(), Some(&Plan::empty()));
        // the oracle was never asked anything
        assert_eq!(oracle.instances.get(), 0);
        assert_eq!(oracle.clauses.get(), 0);
        Ok(())
    }

    #[test]
    fn overflow_is_reported_even_when_goal_holds_initially() {
        let pb = goal_already_reached();
        assert!(pb.goal_holds_initially());
        let oracle = CountingOracle::default();
        let res = solve(&pb, &config().with_max_variables(2), &oracle);
        assert_eq!(res, Err(Error::IndexOverflow { required: 3, max: 2 }));
        assert_eq!(oracle.instances.get(), 0);
    }

    #[test]
    fn cnf_declares_all_variables() -> Res<()> {
        let mut pb = ProblemBuilder::new();
        pb.add_fluent("unused").unwrap();
        let g = pb.add_fluent("g").unwrap();
        pb.add_action(Action::new("a").with_precondition(Condition::new([g], []))).unwrap();
        let cnf = encode_to_cnf(&pb.build(), &config())?;
        assert_eq!(cnf.num_vars, 3);
        assert_eq!(cnf.len(), 1);
        assert_eq!(cnf.clauses[0].to_dimacs(), vec![-3, 2]);
        Ok(())
    }
}

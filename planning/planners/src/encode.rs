//! Encoding of ground actions into CNF clauses.
//!
//! Each action `A` is a variable of the SAT problem. Selecting an action implies that its
//! preconditions hold and that each of its effects holds whenever the effect's guard holds.
//! All these implications are encoded as independent binary (or guarded) clauses:
//!
//!  - positive precondition `f`:  `¬A ∨ f`
//!  - negative precondition `g`:  `¬A ∨ ¬g`
//!  - effect making `f` true under guard `c⁺ / c⁻`:  `¬A ∨ ¬c⁺₁ ∨ … ∨ c⁻₁ ∨ … ∨ f`
//!  - effect making `g` false under guard `c⁺ / c⁻`:  `¬A ∨ ¬c⁺₁ ∨ … ∨ c⁻₁ ∨ … ∨ ¬g`
//!
//! The encoding is a single snapshot over one set of fluent variables: no time index is
//! introduced and fluents are shared between the pre- and post-action states.

use crate::errors::{Error, Res};
use crate::registry::Registry;
use satplan_problem::{Action, ActionId, Condition, FluentSet};
use satplan_sat::{Clause, Lit};

/// Number of clauses emitted for each category.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EncodingStats {
    pub positive_preconditions: usize,
    pub negative_preconditions: usize,
    pub positive_effects: usize,
    pub negative_effects: usize,
}

impl EncodingStats {
    pub fn total(&self) -> usize {
        self.positive_preconditions + self.negative_preconditions + self.positive_effects + self.negative_effects
    }
}

impl std::ops::AddAssign for EncodingStats {
    fn add_assign(&mut self, rhs: Self) {
        self.positive_preconditions += rhs.positive_preconditions;
        self.negative_preconditions += rhs.negative_preconditions;
        self.positive_effects += rhs.positive_effects;
        self.negative_effects += rhs.negative_effects;
    }
}

/// Builds the clauses of a set of actions, for a solver accepting at most `max_variables` variables.
#[derive(Copy, Clone, Debug)]
pub struct ClauseEncoder {
    max_variables: u32,
}

impl ClauseEncoder {
    pub fn new(max_variables: u32) -> Self {
        ClauseEncoder { max_variables }
    }

    pub fn max_variables(&self) -> u32 {
        self.max_variables
    }

    /// Encodes all `actions`, the i-th action being identified by `ActionId::from(i)` in the registry.
    ///
    /// Fails with [`Error::IndexOverflow`] before emitting any clause if the registry holds more
    /// variables than the solver accepts.
    pub fn encode(&self, actions: &[Action], registry: &Registry) -> Res<Vec<Clause>> {
        Ok(self.encode_with_stats(actions, registry)?.0)
    }

    pub fn encode_with_stats(&self, actions: &[Action], registry: &Registry) -> Res<(Vec<Clause>, EncodingStats)> {
        let encode_span = tracing::span!(tracing::Level::DEBUG, "ENCODING");
        let _span = encode_span.enter();

        if registry.len() > self.max_variables as usize {
            return Err(Error::IndexOverflow {
                required: registry.len(),
                max: self.max_variables,
            });
        }

        let mut clauses = Vec::new();
        let mut stats = EncodingStats::default();
        for (i, action) in actions.iter().enumerate() {
            stats += encode_action(ActionId::from(i), action, registry, &mut clauses)?;
        }
        debug_assert!(clauses.iter().all(|c| c
            .iter()
            .all(|l| l.var().get() as usize <= registry.len())));

        tracing::debug!("#actions: {}", actions.len());
        tracing::debug!("#variables: {}", registry.len());
        tracing::debug!(
            positive_preconditions = stats.positive_preconditions,
            negative_preconditions = stats.negative_preconditions,
            positive_effects = stats.positive_effects,
            negative_effects = stats.negative_effects
        );
        tracing::debug!("#clauses: {}", clauses.len());
        Ok((clauses, stats))
    }
}

/// Appends to `out` the clauses encoding that action `id` implies its preconditions and effects.
pub fn encode_action(id: ActionId, action: &Action, registry: &Registry, out: &mut Vec<Clause>) -> Res<EncodingStats> {
    let not_a = registry.action_var(id)?.neg();
    let mut stats = EncodingStats::default();

    let pre = action.precondition();
    stats.positive_preconditions = implications(&[not_a], &pre.positive, true, registry, out)?;
    stats.negative_preconditions = implications(&[not_a], &pre.negative, false, registry, out)?;

    let mut premise = Vec::new();
    for ce in action.conditional_effects() {
        premise.clear();
        premise.push(not_a);
        guard_literals(ce.condition(), registry, &mut premise)?;
        let eff = ce.effect();
        stats.positive_effects += implications(&premise, &eff.positive, true, registry, out)?;
        stats.negative_effects += implications(&premise, &eff.negative, false, registry, out)?;
    }
    Ok(stats)
}

/// Literals stating that the guard does not hold: the negation of each positive fluent and
/// each negative fluent of the condition.
fn guard_literals(cond: &Condition, registry: &Registry, out: &mut Vec<Lit>) -> Res<()> {
    for f in cond.positive.iter() {
        out.push(registry.fluent_var(f)?.neg());
    }
    for f in cond.negative.iter() {
        out.push(registry.fluent_var(f)?.pos());
    }
    Ok(())
}

/// For each fluent of `fluents`, emits the clause `premise ∨ l` where `l` is the fluent
/// literal with the given polarity. Returns the number of clauses emitted.
fn implications(
    premise: &[Lit],
    fluents: &FluentSet,
    value: bool,
    registry: &Registry,
    out: &mut Vec<Clause>,
) -> Res<usize> {
    let mut count = 0;
    for f in fluents.iter() {
        let lit = registry.fluent_var(f)?.pos();
        let lit = if value { lit } else { !lit };
        let mut clause = Vec::with_capacity(premise.len() + 1);
        clause.extend_from_slice(premise);
        clause.push(lit);
        out.push(Clause::new(clause));
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use satplan_problem::{Condition, ConditionalEffect, Effect, Problem, ProblemBuilder};

    fn dimacs(clauses: &[Clause]) -> Vec<Vec<i32>> {
        clauses.iter().map(|c| c.to_dimacs()).collect()
    }

    /// on(A,B)=1, clear(A)=2, move=3
    fn move_problem() -> Problem {
        let mut pb = ProblemBuilder::new();
        let on_ab = pb.add_fluent("on(A,B)").unwrap();
        let clear_a = pb.add_fluent("clear(A)").unwrap();
        pb.add_action(
            Action::new("move")
                .with_precondition(Condition::new([clear_a], []))
                .with_effect(ConditionalEffect::unconditional(Effect::new([on_ab], []))),
        )
        .unwrap();
        pb.build()
    }

    #[test]
    fn precondition_and_effect_implications() -> Res<()> {
        let pb = move_problem();
        let reg = Registry::for_problem(&pb)?;
        let clauses = ClauseEncoder::new(100).encode(pb.actions(), &reg)?;
        assert_eq!(dimacs(&clauses), vec![vec![-3, 2], vec![-3, 1]]);
        Ok(())
    }

    #[test]
    fn polarity_of_negative_literals() -> Res<()> {
        let mut pb = ProblemBuilder::new();
        let f = pb.add_fluent("f").unwrap();
        let g = pb.add_fluent("g").unwrap();
        let h = pb.add_fluent("h").unwrap();
        pb.add_action(
            Action::new("a")
                .with_precondition(Condition::new([f], [g]))
                .with_effect(ConditionalEffect::unconditional(Effect::new([], [h]))),
        )
        .unwrap();
        let pb = pb.build();
        let reg = Registry::for_problem(&pb)?;
        let (clauses, stats) = ClauseEncoder::new(100).encode_with_stats(pb.actions(), &reg)?;
        // a = 4
        assert_eq!(dimacs(&clauses), vec![vec![-4, 1], vec![-4, -2], vec![-4, -3]]);
        assert_eq!(stats.positive_preconditions, 1);
        assert_eq!(stats.negative_preconditions, 1);
        assert_eq!(stats.positive_effects, 0);
        assert_eq!(stats.negative_effects, 1);
        assert_eq!(stats.total(), clauses.len());
        Ok(())
    }

    #[test]
    fn guards_are_part_of_effect_clauses() -> Res<()> {
        let mut pb = ProblemBuilder::new();
        let c1 = pb.add_fluent("c1").unwrap();
        let c2 = pb.add_fluent("c2").unwrap();
        let e1 = pb.add_fluent("e1").unwrap();
        let e2 = pb.add_fluent("e2").unwrap();
        pb.add_action(Action::new("a").with_effect(ConditionalEffect::new(
            Condition::new([c1], [c2]),
            Effect::new([e1], [e2]),
        )))
        .unwrap();
        let pb = pb.build();
        let reg = Registry::for_problem(&pb)?;
        let clauses = ClauseEncoder::new(100).encode(pb.actions(), &reg)?;
        // a = 5: (a ∧ c1 ∧ ¬c2) ⇒ e1 and (a ∧ c1 ∧ ¬c2) ⇒ ¬e2
        assert_eq!(dimacs(&clauses), vec![vec![-5, -1, 2, 3], vec![-5, -1, 2, -4]]);
        Ok(())
    }

    #[test]
    fn literals_are_valid() -> Res<()> {
        let pb = crate::blocks::blocks_world(3);
        let reg = Registry::for_problem(&pb)?;
        let clauses = ClauseEncoder::new(1000).encode(pb.actions(), &reg)?;
        assert!(!clauses.is_empty());
        for c in &clauses {
            assert!(c.len() >= 2);
            // every clause starts with the negation of an action variable
            assert!(c[0].is_negative());
            assert!(reg.object_of(c[0].var())?.is_action());
            for l in c.iter() {
                assert!(l.to_dimacs() != 0);
                assert!(l.var().get() as usize <= reg.len());
            }
        }
        Ok(())
    }

    #[test]
    fn actions_without_conditions_emit_nothing() -> Res<()> {
        let mut pb = ProblemBuilder::new();
        pb.add_fluent("f").unwrap();
        pb.add_action(Action::new("noop")).unwrap();
        let pb = pb.build();
        let reg = Registry::for_problem(&pb)?;
        assert!(ClauseEncoder::new(10).encode(pb.actions(), &reg)?.is_empty());
        Ok(())
    }

    #[test]
    fn overflow_of_declared_capacity() -> Res<()> {
        let pb = move_problem();
        let reg = Registry::for_problem(&pb)?;
        assert_eq!(
            ClauseEncoder::new(2).encode(pb.actions(), &reg),
            Err(Error::IndexOverflow { required: 3, max: 2 })
        );
        assert!(ClauseEncoder::new(3).encode(pb.actions(), &reg).is_ok());
        Ok(())
    }

    #[test]
    fn unregistered_fluents_are_rejected() {
        let pb = move_problem();
        // registry that only knows about the action
        let reg = Registry::register([crate::Object::Action(ActionId::from(0usize))]).unwrap();
        let res = ClauseEncoder::new(10).encode(pb.actions(), &reg);
        assert!(matches!(res, Err(Error::UnregisteredObject(crate::Object::Fluent(_)))));
    }
}

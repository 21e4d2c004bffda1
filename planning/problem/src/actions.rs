use crate::{Condition, Effect, FluentId};
use derive_more::Display;

/// Compact, numeric identifier of a ground action. Zero-based, in declaration order.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Display)]
#[display("a{_0}")]
pub struct ActionId(u32);

impl ActionId {
    pub const fn from_u32(id: u32) -> Self {
        ActionId(id)
    }
    pub const fn to_u32(self) -> u32 {
        self.0
    }
}

impl From<usize> for ActionId {
    fn from(i: usize) -> Self {
        ActionId(i as u32)
    }
}

impl From<ActionId> for usize {
    fn from(a: ActionId) -> Self {
        a.0 as usize
    }
}

/// An effect that only applies when its `condition` holds in the state preceding the action.
/// An empty condition makes the effect unconditional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ConditionalEffect {
    pub condition: Condition,
    pub effect: Effect,
}

impl ConditionalEffect {
    pub fn new(condition: Condition, effect: Effect) -> Self {
        ConditionalEffect { condition, effect }
    }

    pub fn unconditional(effect: Effect) -> Self {
        ConditionalEffect {
            condition: Condition::empty(),
            effect,
        }
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    pub fn effect(&self) -> &Effect {
        &self.effect
    }
}

/// A fully instantiated planning operator.
#[derive(Clone, Debug, PartialEq, Eq, Display)]
#[display("{name}")]
pub struct Action {
    pub name: String,
    pub precondition: Condition,
    pub conditional_effects: Vec<ConditionalEffect>,
}

impl Action {
    pub fn new(name: impl Into<String>) -> Self {
        Action {
            name: name.into(),
            precondition: Condition::empty(),
            conditional_effects: Vec::new(),
        }
    }

    pub fn with_precondition(mut self, precondition: Condition) -> Self {
        self.precondition = precondition;
        self
    }

    pub fn with_effect(mut self, effect: ConditionalEffect) -> Self {
        self.conditional_effects.push(effect);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn precondition(&self) -> &Condition {
        &self.precondition
    }

    pub fn conditional_effects(&self) -> &[ConditionalEffect] {
        &self.conditional_effects
    }

    /// All fluents mentioned by the action, in its precondition, guards or effects.
    pub fn fluents(&self) -> impl Iterator<Item = FluentId> + '_ {
        let pre = &self.precondition;
        pre.positive.iter().chain(pre.negative.iter()).chain(
            self.conditional_effects.iter().flat_map(|ce| {
                ce.condition
                    .positive
                    .iter()
                    .chain(ce.condition.negative.iter())
                    .chain(ce.effect.positive.iter())
                    .chain(ce.effect.negative.iter())
            }),
        )
    }
}

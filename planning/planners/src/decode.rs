//! Interpretation of a SAT model in terms of fluents and actions.

use crate::errors::{Error, Res};
use crate::registry::{Object, Registry};
use satplan_problem::ActionId;
use satplan_sat::Lit;

/// Decodes each literal of the model into the object of its variable, paired with the value
/// given by the literal's sign. The output follows the order of the model.
pub fn decode(model: &[Lit], registry: &Registry) -> Res<Vec<(Object, bool)>> {
    model
        .iter()
        .map(|&lit| Ok((registry.object_of(lit.var())?, lit.is_positive())))
        .collect()
}

/// Same as [`decode`] on raw signed integers, as produced by a DIMACS solver.
/// A zero entry is out of range.
pub fn decode_dimacs(model: &[i64], registry: &Registry) -> Res<Vec<(Object, bool)>> {
    model
        .iter()
        .map(|&lit| {
            let index = lit.checked_abs().ok_or(Error::OutOfRange {
                index: lit,
                size: registry.len(),
            })?;
            Ok((registry.object_at(index)?, lit > 0))
        })
        .collect()
}

/// A sequence of actions, in the order in which they appear in the model.
///
/// The encoding has no notion of time: this order is the variable order and carries
/// no causal meaning.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plan {
    pub actions: Vec<ActionId>,
}

impl Plan {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Keeps the actions that are true in the decoded assignment.
pub fn extract_plan(decoded: &[(Object, bool)]) -> Plan {
    let actions = decoded
        .iter()
        .filter_map(|&(o, value)| match o {
            Object::Action(a) if value => Some(a),
            _ => None,
        })
        .collect();
    Plan { actions }
}

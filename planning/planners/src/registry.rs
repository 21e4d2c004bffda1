//! Bijective numbering of fluents and actions into SAT variables.

use crate::errors::{Error, Res};
use derive_more::Display;
use hashbrown::HashMap;
use satplan_problem::{ActionId, FluentId, Problem};
use satplan_sat::Var;

/// An object that is represented by a SAT variable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Object {
    #[display("fluent {_0}")]
    Fluent(FluentId),
    #[display("action {_0}")]
    Action(ActionId),
}

impl Object {
    pub fn is_fluent(self) -> bool {
        matches!(self, Object::Fluent(_))
    }

    pub fn is_action(self) -> bool {
        matches!(self, Object::Action(_))
    }
}

impl From<FluentId> for Object {
    fn from(f: FluentId) -> Self {
        Object::Fluent(f)
    }
}

impl From<ActionId> for Object {
    fn from(a: ActionId) -> Self {
        Object::Action(a)
    }
}

/// Immutable association between objects and the variables `1..=len()`.
///
/// All fluents come first, then all actions, each group in the order in which it was supplied.
#[derive(Clone, Debug)]
pub struct Registry {
    /// Object of the i-th variable (i.e. `Var` with index i).
    objects: Vec<Object>,
    indices: HashMap<Object, Var>,
    num_fluents: usize,
}

impl Registry {
    /// Assigns a variable to each object: fluents first, then actions, preserving the relative
    /// order of the objects within each group.
    pub fn register(objects: impl IntoIterator<Item = Object>) -> Res<Registry> {
        let (fluents, actions): (Vec<Object>, Vec<Object>) = objects.into_iter().partition(|o| o.is_fluent());
        let num_fluents = fluents.len();
        let required = fluents.len() + actions.len();

        let mut objects = Vec::with_capacity(required);
        let mut indices = HashMap::with_capacity(required);
        for (i, o) in fluents.into_iter().chain(actions).enumerate() {
            let var = Var::from_index(i).ok_or(Error::IndexOverflow {
                required,
                max: Var::MAX_ID,
            })?;
            if indices.insert(o, var).is_some() {
                return Err(Error::DuplicateObject(o));
            }
            objects.push(o);
        }
        Ok(Registry {
            objects,
            indices,
            num_fluents,
        })
    }

    /// Registers all fluents of the problem followed by all its actions.
    pub fn for_problem(pb: &Problem) -> Res<Registry> {
        let fluents = pb.fluent_ids().map(Object::Fluent);
        let actions = pb.action_ids().map(Object::Action);
        Registry::register(fluents.chain(actions))
    }

    /// Total number of registered objects, which is also the largest variable.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn num_fluents(&self) -> usize {
        self.num_fluents
    }

    pub fn num_actions(&self) -> usize {
        self.objects.len() - self.num_fluents
    }

    pub fn index_of(&self, object: impl Into<Object>) -> Res<Var> {
        let object = object.into();
        self.indices
            .get(&object)
            .copied()
            .ok_or(Error::UnregisteredObject(object))
    }

    pub fn fluent_var(&self, fluent: FluentId) -> Res<Var> {
        self.index_of(Object::Fluent(fluent))
    }

    pub fn action_var(&self, action: ActionId) -> Res<Var> {
        self.index_of(Object::Action(action))
    }

    /// Object associated to the given (1-based) index.
    pub fn object_at(&self, index: i64) -> Res<Object> {
        let out_of_range = Error::OutOfRange {
            index,
            size: self.len(),
        };
        if index <= 0 {
            return Err(out_of_range);
        }
        usize::try_from(index - 1)
            .ok()
            .and_then(|i| self.objects.get(i))
            .copied()
            .ok_or(out_of_range)
    }

    pub fn object_of(&self, var: Var) -> Res<Object> {
        self.object_at(var.get() as i64)
    }

    /// All (variable, object) pairs, in increasing variable order.
    pub fn iter(&self) -> impl Iterator<Item = (Var, Object)> + '_ {
        self.objects
            .iter()
            .enumerate()
            .filter_map(|(i, &o)| Var::from_index(i).map(|v| (v, o)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fluent(i: usize) -> Object {
        Object::Fluent(FluentId::from(i))
    }
    fn action(i: usize) -> Object {
        Object::Action(ActionId::from(i))
    }

    #[test]
    fn dense_numbering_fluents_first() -> Res<()> {
        let objects = vec![fluent(0), fluent(1), fluent(2), action(0), action(1)];
        let reg = Registry::register(objects.clone())?;
        assert_eq!(reg.len(), 5);
        assert_eq!(reg.num_fluents(), 3);
        assert_eq!(reg.num_actions(), 2);
        for (i, o) in objects.iter().enumerate() {
            assert_eq!(reg.index_of(*o)?.get() as usize, i + 1);
        }
        let vars: Vec<u32> = reg.iter().map(|(v, _)| v.get()).collect();
        assert_eq!(vars, vec![1, 2, 3, 4, 5]);
        Ok(())
    }

    #[test]
    fn actions_supplied_first_are_moved_after_fluents() -> Res<()> {
        let reg = Registry::register([action(0), fluent(0), action(1), fluent(1)])?;
        assert_eq!(reg.object_at(1)?, fluent(0));
        assert_eq!(reg.object_at(2)?, fluent(1));
        assert_eq!(reg.object_at(3)?, action(0));
        assert_eq!(reg.object_at(4)?, action(1));
        Ok(())
    }

    #[test]
    fn bijection() -> Res<()> {
        let reg = Registry::register((0..10).map(fluent).chain((0..7).map(action)))?;
        for (var, o) in reg.iter() {
            assert_eq!(reg.object_of(var)?, o);
            assert_eq!(reg.index_of(o)?, var);
        }
        for i in 1..=reg.len() as i64 {
            assert_eq!(reg.index_of(reg.object_at(i)?)?.get() as i64, i);
        }
        Ok(())
    }

    #[test]
    fn misuse_is_detected() {
        let reg = Registry::register([fluent(0), action(0)]).unwrap();
        assert_eq!(reg.index_of(fluent(1)), Err(Error::UnregisteredObject(fluent(1))));
        assert_eq!(reg.index_of(action(3)), Err(Error::UnregisteredObject(action(3))));
        for index in [0, -1, 3, i64::MAX, i64::MIN] {
            assert_eq!(reg.object_at(index), Err(Error::OutOfRange { index, size: 2 }));
        }

        assert_eq!(
            Registry::register([fluent(0), fluent(1), fluent(0)]).unwrap_err(),
            Error::DuplicateObject(fluent(0))
        );
    }
}

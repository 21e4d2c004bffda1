use crate::FluentId;
use fixedbitset::FixedBitSet;
use std::fmt::{Debug, Display, Error, Formatter};
use std::hash::{Hash, Hasher};

/// A set of fluents, stored as a bitset indexed by [`FluentId`].
///
/// Iteration always yields fluents in increasing identifier order.
#[derive(Clone, Default)]
pub struct FluentSet {
    fluents: FixedBitSet,
}

impl FluentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(num_fluents: usize) -> Self {
        FluentSet {
            fluents: FixedBitSet::with_capacity(num_fluents),
        }
    }

    pub fn insert(&mut self, fluent: FluentId) {
        let i: usize = fluent.into();
        if i >= self.fluents.len() {
            self.fluents.grow(i + 1);
        }
        self.fluents.insert(i);
    }

    pub fn remove(&mut self, fluent: FluentId) {
        let i: usize = fluent.into();
        if i < self.fluents.len() {
            self.fluents.set(i, false);
        }
    }

    pub fn contains(&self, fluent: FluentId) -> bool {
        self.fluents.contains(fluent.into())
    }

    pub fn len(&self) -> usize {
        self.fluents.count_ones(..)
    }

    pub fn is_empty(&self) -> bool {
        self.fluents.is_clear()
    }

    pub fn iter(&self) -> impl Iterator<Item = FluentId> + '_ {
        self.fluents.ones().map(FluentId::from)
    }

    /// Largest fluent contained in the set, if any.
    pub fn max(&self) -> Option<FluentId> {
        self.fluents.ones().last().map(FluentId::from)
    }
}

impl FromIterator<FluentId> for FluentSet {
    fn from_iter<T: IntoIterator<Item = FluentId>>(iter: T) -> Self {
        let mut set = FluentSet::new();
        for f in iter {
            set.insert(f);
        }
        set
    }
}

impl<'a> IntoIterator for &'a FluentSet {
    type Item = FluentId;
    type IntoIter = Box<dyn Iterator<Item = FluentId> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

// two sets are equal if they have the same elements, regardless of the capacity of their bitsets
impl PartialEq for FluentSet {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}
impl Eq for FluentSet {}

impl Hash for FluentSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for f in self.iter() {
            f.hash(state);
        }
    }
}

impl Debug for FluentSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// A conjunction of fluents that must hold (`positive`) and fluents that must not hold (`negative`).
///
/// Used for action preconditions, guards of conditional effects and goals.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Condition {
    pub positive: FluentSet,
    pub negative: FluentSet,
}

impl Condition {
    pub fn new(
        positive: impl IntoIterator<Item = FluentId>,
        negative: impl IntoIterator<Item = FluentId>,
    ) -> Self {
        Condition {
            positive: positive.into_iter().collect(),
            negative: negative.into_iter().collect(),
        }
    }

    /// A condition that always holds.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn positive_fluents(&self) -> &FluentSet {
        &self.positive
    }

    pub fn negative_fluents(&self) -> &FluentSet {
        &self.negative
    }

    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }
}

/// Fluents made true (`positive`) and made false (`negative`) by an effect.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Effect {
    pub positive: FluentSet,
    pub negative: FluentSet,
}

impl Effect {
    pub fn new(
        positive: impl IntoIterator<Item = FluentId>,
        negative: impl IntoIterator<Item = FluentId>,
    ) -> Self {
        Effect {
            positive: positive.into_iter().collect(),
            negative: negative.into_iter().collect(),
        }
    }

    pub fn positive_fluents(&self) -> &FluentSet {
        &self.positive
    }

    pub fn negative_fluents(&self) -> &FluentSet {
        &self.negative
    }

    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }
}

/// Explicit description of the initial state: fluents known to be true and fluents known to be false.
/// Fluents absent from both sets are false under the closed world assumption.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InitialState {
    pub positive: FluentSet,
    pub negative: FluentSet,
}

impl InitialState {
    pub fn new(
        positive: impl IntoIterator<Item = FluentId>,
        negative: impl IntoIterator<Item = FluentId>,
    ) -> Self {
        InitialState {
            positive: positive.into_iter().collect(),
            negative: negative.into_iter().collect(),
        }
    }

    pub fn positive_fluents(&self) -> &FluentSet {
        &self.positive
    }

    pub fn negative_fluents(&self) -> &FluentSet {
        &self.negative
    }
}

/// A complete state: the set of fluents that hold, all others being false.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct State {
    svs: FixedBitSet,
}

impl State {
    pub fn new(num_fluents: usize) -> Self {
        State {
            svs: FixedBitSet::with_capacity(num_fluents),
        }
    }

    pub fn from_initial(num_fluents: usize, init: &InitialState) -> Self {
        let mut s = State::new(num_fluents);
        for f in init.positive.iter() {
            s.add(f);
        }
        s
    }

    pub fn size(&self) -> usize {
        self.svs.len()
    }

    pub fn is_set(&self, fluent: FluentId) -> bool {
        self.svs.contains(fluent.into())
    }

    pub fn set_to(&mut self, fluent: FluentId, value: bool) {
        let i: usize = fluent.into();
        if i >= self.svs.len() {
            self.svs.grow(i + 1);
        }
        self.svs.set(i, value)
    }

    pub fn add(&mut self, fluent: FluentId) {
        self.set_to(fluent, true);
    }

    pub fn del(&mut self, fluent: FluentId) {
        self.set_to(fluent, false);
    }

    pub fn set_fluents(&self) -> impl Iterator<Item = FluentId> + '_ {
        self.svs.ones().map(FluentId::from)
    }

    pub fn entails(&self, cond: &Condition) -> bool {
        cond.positive.iter().all(|f| self.is_set(f)) && cond.negative.iter().all(|f| !self.is_set(f))
    }
}

impl Debug for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        f.debug_set().entries(self.set_fluents()).finish()
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        for fl in self.set_fluents() {
            writeln!(f, "{fl}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(i: usize) -> FluentId {
        FluentId::from(i)
    }

    #[test]
    fn fluent_set_ordering_and_equality() {
        let a: FluentSet = [f(5), f(1), f(3)].into_iter().collect();
        assert_eq!(a.iter().collect::<Vec<_>>(), vec![f(1), f(3), f(5)]);
        assert_eq!(a.len(), 3);
        assert_eq!(a.max(), Some(f(5)));

        let mut b = FluentSet::with_capacity(100);
        b.insert(f(3));
        b.insert(f(1));
        b.insert(f(5));
        assert_eq!(a, b);

        b.remove(f(3));
        assert_ne!(a, b);
        assert!(!b.contains(f(3)));
        assert!(FluentSet::new().is_empty());
    }

    #[test]
    fn state_entailment() {
        let init = InitialState::new([f(0), f(2)], [f(1)]);
        let s = State::from_initial(3, &init);
        assert!(s.is_set(f(0)));
        assert!(!s.is_set(f(1)));

        assert!(s.entails(&Condition::new([f(0)], [f(1)])));
        assert!(s.entails(&Condition::empty()));
        assert!(!s.entails(&Condition::new([f(1)], [])));
        assert!(!s.entails(&Condition::new([], [f(2)])));
    }
}

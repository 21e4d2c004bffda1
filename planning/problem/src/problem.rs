use crate::errors::ProblemError;
use crate::*;
use hashbrown::HashMap;
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// A grounded planning problem.
///
/// Fluents and actions are kept in declaration order: the i-th fluent (resp. action) is
/// identified by `FluentId::from(i)` (resp. `ActionId::from(i)`).
#[derive(Clone, Debug)]
pub struct Problem {
    fluents: Vec<Fluent>,
    actions: Vec<Action>,
    initial_state: InitialState,
    goal: Condition,
}

impl Problem {
    pub fn fluents(&self) -> &[Fluent] {
        &self.fluents
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn initial_state(&self) -> &InitialState {
        &self.initial_state
    }

    pub fn goal(&self) -> &Condition {
        &self.goal
    }

    pub fn num_fluents(&self) -> usize {
        self.fluents.len()
    }

    pub fn num_actions(&self) -> usize {
        self.actions.len()
    }

    pub fn fluent(&self, id: FluentId) -> &Fluent {
        &self.fluents[usize::from(id)]
    }

    pub fn action(&self, id: ActionId) -> &Action {
        &self.actions[usize::from(id)]
    }

    pub fn fluent_ids(&self) -> impl Iterator<Item = FluentId> {
        (0..self.fluents.len()).map(FluentId::from)
    }

    pub fn action_ids(&self) -> impl Iterator<Item = ActionId> {
        (0..self.actions.len()).map(ActionId::from)
    }

    /// Full state described by the initial state (closed world: unmentioned fluents are false).
    pub fn initial_full_state(&self) -> State {
        State::from_initial(self.num_fluents(), &self.initial_state)
    }

    /// Returns true if the goal already holds in the initial state.
    pub fn goal_holds_initially(&self) -> bool {
        self.initial_full_state().entails(&self.goal)
    }
}

fn disp_set(f: &mut Formatter<'_>, pb: &Problem, set: &FluentSet) -> std::fmt::Result {
    write!(f, "{}", set.iter().map(|fl| pb.fluent(fl)).join(" "))
}

impl Display for Problem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Fluents ({}):", self.fluents.len())?;
        for fl in &self.fluents {
            writeln!(f, "  {fl}")?;
        }
        writeln!(f, "Actions ({}):", self.actions.len())?;
        for a in &self.actions {
            writeln!(f, "  {a}")?;
        }
        write!(f, "Init: ")?;
        disp_set(f, self, &self.initial_state.positive)?;
        write!(f, "\nGoal: ")?;
        disp_set(f, self, &self.goal.positive)?;
        if !self.goal.negative.is_empty() {
            write!(f, " | not: ")?;
            disp_set(f, self, &self.goal.negative)?;
        }
        Ok(())
    }
}

/// Incremental construction of a [`Problem`].
///
/// Fluents must be declared before the actions, initial state and goal that refer to them.
#[derive(Default)]
pub struct ProblemBuilder {
    fluents: Vec<Fluent>,
    by_name: HashMap<String, FluentId>,
    actions: Vec<Action>,
    initial_state: InitialState,
    goal: Condition,
}

impl ProblemBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_fluent(&mut self, name: impl Into<String>) -> Res<FluentId> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(ProblemError::DuplicateFluent(name));
        }
        let id = FluentId::from(self.fluents.len());
        self.by_name.insert(name.clone(), id);
        self.fluents.push(Fluent::new(name));
        Ok(id)
    }

    pub fn fluent_id(&self, name: &str) -> Res<FluentId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| ProblemError::UnknownFluent(name.to_string()))
    }

    pub fn add_action(&mut self, action: Action) -> Res<ActionId> {
        let context = format!("action {}", action.name);
        self.check(action.fluents(), &context)?;
        let id = ActionId::from(self.actions.len());
        self.actions.push(action);
        Ok(id)
    }

    pub fn set_initial_state(&mut self, init: InitialState) -> Res<()> {
        self.check(init.positive.iter().chain(init.negative.iter()), "initial state")?;
        self.initial_state = init;
        Ok(())
    }

    pub fn set_goal(&mut self, goal: Condition) -> Res<()> {
        self.check(goal.positive.iter().chain(goal.negative.iter()), "goal")?;
        self.goal = goal;
        Ok(())
    }

    fn check(&self, mut fluents: impl Iterator<Item = FluentId>, context: &str) -> Res<()> {
        let num_fluents = self.fluents.len();
        match fluents.find(|&f| usize::from(f) >= num_fluents) {
            Some(id) => Err(ProblemError::FluentOutOfRange {
                id,
                num_fluents,
                context: context.to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn build(self) -> Problem {
        Problem {
            fluents: self.fluents,
            actions: self.actions,
            initial_state: self.initial_state,
            goal: self.goal,
        }
    }
}

//! Generator of ground blocks-world problems, used by the `satplan` binary and in tests.
//!
//! All blocks start on the table and the goal is a single tower where the i-th block
//! is stacked on the (i+1)-th one.

use satplan_problem::*;

fn block_name(i: usize) -> String {
    if i < 26 {
        ((b'A' + i as u8) as char).to_string()
    } else {
        format!("B{i}")
    }
}

struct Fluents {
    on: Vec<Vec<Option<FluentId>>>,
    ontable: Vec<FluentId>,
    clear: Vec<FluentId>,
}

impl Fluents {
    fn on(&self, x: usize, y: usize) -> FluentId {
        // only called with x != y
        self.on[x][y].expect("no on(x,x) fluent")
    }
}

pub fn blocks_world(num_blocks: usize) -> Problem {
    let names: Vec<String> = (0..num_blocks).map(block_name).collect();
    let mut pb = ProblemBuilder::new();

    // fluent names are unique by construction, the builder cannot fail
    let mut fluent = |name: String| pb.add_fluent(name).expect("duplicate fluent");
    let ontable: Vec<FluentId> = names.iter().map(|x| fluent(format!("ontable({x})"))).collect();
    let clear: Vec<FluentId> = names.iter().map(|x| fluent(format!("clear({x})"))).collect();
    let on: Vec<Vec<Option<FluentId>>> = names
        .iter()
        .map(|x| {
            names
                .iter()
                .map(|y| (x != y).then(|| fluent(format!("on({x},{y})"))))
                .collect()
        })
        .collect();
    let fl = Fluents { on, ontable, clear };

    let mut actions = Vec::new();
    for x in 0..num_blocks {
        for y in (0..num_blocks).filter(|&y| y != x) {
            for z in (0..num_blocks).filter(|&z| z != x && z != y) {
                actions.push(
                    Action::new(format!("move({},{},{})", names[x], names[y], names[z]))
                        .with_precondition(Condition::new([fl.on(x, y), fl.clear[x], fl.clear[z]], []))
                        .with_effect(ConditionalEffect::unconditional(Effect::new(
                            [fl.on(x, z), fl.clear[y]],
                            [fl.on(x, y), fl.clear[z]],
                        ))),
                );
            }
            actions.push(
                Action::new(format!("move-to-table({},{})", names[x], names[y]))
                    .with_precondition(Condition::new([fl.on(x, y), fl.clear[x]], []))
                    .with_effect(ConditionalEffect::unconditional(Effect::new(
                        [fl.ontable[x], fl.clear[y]],
                        [fl.on(x, y)],
                    ))),
            );
            actions.push(
                Action::new(format!("move-from-table({},{})", names[x], names[y]))
                    .with_precondition(Condition::new([fl.ontable[x], fl.clear[x], fl.clear[y]], []))
                    .with_effect(ConditionalEffect::unconditional(Effect::new(
                        [fl.on(x, y)],
                        [fl.ontable[x], fl.clear[y]],
                    ))),
            );
        }
    }
    for a in actions {
        pb.add_action(a).expect("action refers to an undeclared fluent");
    }

    pb.set_initial_state(InitialState::new(fl.ontable.iter().chain(fl.clear.iter()).copied(), []))
        .expect("invalid initial state");

    let mut goal = Vec::new();
    for x in 0..num_blocks.saturating_sub(1) {
        goal.push(fl.on(x, x + 1));
    }
    if let Some(&last) = fl.ontable.last() {
        goal.push(last);
    }
    pb.set_goal(Condition::new(goal, [])).expect("invalid goal");
    pb.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn problem_size() {
        for n in 1..5 {
            let pb = blocks_world(n);
            assert_eq!(pb.num_fluents(), 2 * n + n * (n - 1));
            assert_eq!(pb.num_actions(), n * (n - 1) * n.saturating_sub(2) + 2 * n * (n - 1));
        }
    }

    #[test]
    fn initial_state_and_goal() {
        let pb = blocks_world(3);
        assert_eq!(pb.initial_state().positive_fluents().len(), 6);
        let goal: Vec<&str> = pb.goal().positive_fluents().iter().map(|f| pb.fluent(f).name()).collect();
        assert_eq!(goal.len(), 3);
        assert!(goal.contains(&"on(A,B)"));
        assert!(goal.contains(&"on(B,C)"));
        assert!(goal.contains(&"ontable(C)"));
        assert!(!pb.goal_holds_initially());

        // a single block is already in its goal position
        assert!(blocks_world(1).goal_holds_initially());
    }
}

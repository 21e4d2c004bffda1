//! Functions related to printing and formatting plans and assignments.

use crate::decode::Plan;
use crate::registry::Object;
use satplan_problem::Problem;
use std::fmt::Write;

/// Name of the fluent or action in the problem.
pub fn object_name(pb: &Problem, object: Object) -> &str {
    match object {
        Object::Fluent(f) => pb.fluent(f).name(),
        Object::Action(a) => pb.action(a).name(),
    }
}

/// One action per line, prefixed by its position in the plan.
pub fn format_plan(pb: &Problem, plan: &Plan) -> String {
    let mut out = String::new();
    for (i, &a) in plan.actions.iter().enumerate() {
        writeln!(out, "{i:>3}: {}", pb.action(a).name()).unwrap();
    }
    out
}

/// One object per line, prefixed with `+` if true and `-` if false.
/// Fluents are listed first, then actions.
pub fn format_assignment(pb: &Problem, assignment: &[(Object, bool)]) -> String {
    let mut out = String::new();
    for group in [Object::is_fluent as fn(Object) -> bool, Object::is_action] {
        for &(o, value) in assignment.iter().filter(|(o, _)| group(*o)) {
            let sign = if value { '+' } else { '-' };
            writeln!(out, "{sign} {}", object_name(pb, o)).unwrap();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use satplan_problem::{Action, ActionId, FluentId, ProblemBuilder};

    fn problem() -> Problem {
        let mut pb = ProblemBuilder::new();
        pb.add_fluent("on(A,B)").unwrap();
        pb.add_action(Action::new("move(A,T,B)")).unwrap();
        pb.add_action(Action::new("move(B,T,A)")).unwrap();
        pb.build()
    }

    #[test]
    fn plan_formatting() {
        let pb = problem();
        let plan = Plan {
            actions: vec![ActionId::from(1usize), ActionId::from(0usize)],
        };
        assert_eq!(format_plan(&pb, &plan), "  0: move(B,T,A)\n  1: move(A,T,B)\n");
        assert_eq!(format_plan(&pb, &Plan::empty()), "");
    }

    #[test]
    fn assignment_formatting() {
        let pb = problem();
        let assignment = vec![
            (Object::Action(ActionId::from(0usize)), true),
            (Object::Fluent(FluentId::from(0usize)), false),
        ];
        assert_eq!(format_assignment(&pb, &assignment), "- on(A,B)\n+ move(A,T,B)\n");
    }
}

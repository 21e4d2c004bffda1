//! Grounded representation of a classical planning problem.
//!
//! A [`Problem`] is a finite set of propositional fluents, an initial state, a goal and a
//! finite set of ground actions. Each action has a precondition (fluents that must be
//! true and fluents that must be false) and an ordered list of conditional effects.
//!
//! Fluents and actions are referred to by compact identifiers ([`FluentId`], [`ActionId`])
//! that index into the problem. The problem is immutable once built through a [`ProblemBuilder`].

mod actions;
pub mod errors;
mod fluents;
mod problem;
mod state;

pub use actions::*;
pub use errors::ProblemError;
pub use fluents::*;
pub use problem::*;
pub use state::*;

pub type Res<T> = Result<T, ProblemError>;

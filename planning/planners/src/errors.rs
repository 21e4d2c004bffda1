use crate::registry::Object;
use satplan_sat::OracleError;
use thiserror::Error;

/// Failures of the planning pipeline.
///
/// An unsatisfiable encoding is not an error: it is reported as
/// [`SolveOutcome::Unsatisfiable`](crate::SolveOutcome::Unsatisfiable).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0} is not registered")]
    UnregisteredObject(Object),
    #[error("Variable index {index} is out of range [1, {size}]")]
    OutOfRange { index: i64, size: usize },
    #[error("{0} is registered more than once")]
    DuplicateObject(Object),
    #[error("The problem requires {required} variables but the solver accepts at most {max}")]
    IndexOverflow { required: usize, max: u32 },
    #[error(transparent)]
    Oracle(#[from] OracleError),
}

pub type Res<T> = std::result::Result<T, Error>;

use thiserror::Error;

use crate::FluentId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProblemError {
    #[error("Duplicate fluent: {0}")]
    DuplicateFluent(String),
    #[error("Unknown fluent: {0}")]
    UnknownFluent(String),
    #[error("Fluent {id} is out of range (the problem declares {num_fluents} fluents) in {context}")]
    FluentOutOfRange {
        id: FluentId,
        num_fluents: usize,
        context: String,
    },
}

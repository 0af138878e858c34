//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::NodeKind;

/// Domain errors represent violations while shaping records into a tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("line {line}: required column {column} is empty")]
    MissingKey { line: u64, column: &'static str },

    #[error("line {line}: id {id:?} already names a {existing}, cannot reuse it for a {wanted}")]
    KindCollision {
        line: u64,
        id: String,
        existing: NodeKind,
        wanted: NodeKind,
    },
}

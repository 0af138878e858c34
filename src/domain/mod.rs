//! Domain layer: records, tree entities and the tree builder
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod entities;
pub mod error;

pub use builder::{TreeBuilder, TreeResult, DEFAULT_ROOT_NAME};
pub use entities::*;
pub use error::DomainError;

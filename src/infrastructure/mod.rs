//! Infrastructure layer: I/O implementations and DI container
//!
//! This layer implements I/O boundary traits and wires up services.

pub mod di;
pub mod traits;

pub use di::service_container::ServiceContainer;
pub use traits::{FileSystem, RealFileSystem};

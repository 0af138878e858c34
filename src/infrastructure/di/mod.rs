//! Dependency wiring

pub mod service_container;

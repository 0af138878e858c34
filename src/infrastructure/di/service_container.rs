//! Service container for dependency injection
//!
//! Wires settings and the filesystem boundary into the timetable service.

use std::sync::Arc;

use crate::application::services::TimetableService;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Record ingestion, tree construction and output
    pub timetable: TimetableService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let timetable = TimetableService::new(fs, Arc::new(settings));

        Self { timetable }
    }
}

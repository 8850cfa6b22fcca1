//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::PlanService;
use crate::config::Settings;
use crate::infrastructure::git::GitCli;
use crate::infrastructure::traits::{
    FileSystem, InputReader, RealFileSystem, RealStdin, VersionControl,
};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    plan_service: PlanService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(
            settings,
            Arc::new(RealFileSystem),
            Arc::new(RealStdin),
            Arc::new(GitCli),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        input: Arc<dyn InputReader>,
        vcs: Arc<dyn VersionControl>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            plan_service: PlanService::new(fs, input, vcs),
        }
    }

    pub fn plan_service(&self) -> &PlanService {
        &self.plan_service
    }
}

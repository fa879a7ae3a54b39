//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::SystemClock,
    ports::{CelestialBodyRepo, CharacterRepo, ClockPort, VehicleRepo},
    sqlite::SqliteRepositories,
};
use crate::use_cases::{
    management::{CelestialBodyCrud, CharacterCrud, VehicleCrud},
    ConsistencyChecker, ManagementUseCases,
};

/// Main application state.
///
/// Holds all use cases and the clock used for error timestamps.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
    pub clock: Arc<dyn ClockPort>,
}

/// Container for all use cases.
pub struct UseCases {
    pub management: ManagementUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(repos: SqliteRepositories) -> Self {
        Self::with_clock(repos, Arc::new(SystemClock::new()))
    }

    pub fn with_clock(repos: SqliteRepositories, clock: Arc<dyn ClockPort>) -> Self {
        let body_repo: Arc<dyn CelestialBodyRepo> = repos.celestial_body;
        let character_repo: Arc<dyn CharacterRepo> = repos.character;
        let vehicle_repo: Arc<dyn VehicleRepo> = repos.vehicle;

        let checker = Arc::new(ConsistencyChecker::new(
            body_repo.clone(),
            character_repo.clone(),
            vehicle_repo.clone(),
        ));

        let management = ManagementUseCases::new(
            Arc::new(CelestialBodyCrud::new(body_repo, checker.clone())),
            Arc::new(CharacterCrud::new(character_repo, checker.clone())),
            Arc::new(VehicleCrud::new(vehicle_repo, checker)),
        );

        Self {
            use_cases: UseCases { management },
            clock,
        }
    }
}

//! Football League Service
//!
//! CRUD persistence and REST API over a small sports-league schema
//! (leagues, teams, coaches, matches). Every write carries a version token
//! for optimistic concurrency; leagues are soft-deleted and hidden from
//! default reads.

// Public exports
pub mod contract;
pub use contract::{Audit, Coach, League, LeagueError, Match, Team};

pub mod config;
pub use config::Config;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Wire the domain service to SeaORM repositories over one shared
/// connection pool.
pub fn build_service(db: Arc<DatabaseConnection>) -> Arc<domain::Service> {
    use infra::storage::repositories::{
        SeaOrmCoachRepository, SeaOrmLeagueRepository, SeaOrmMatchRepository, SeaOrmTeamRepository,
    };

    Arc::new(domain::Service::new(
        Arc::new(SeaOrmLeagueRepository::new(db.clone())),
        Arc::new(SeaOrmTeamRepository::new(db.clone())),
        Arc::new(SeaOrmCoachRepository::new(db.clone())),
        Arc::new(SeaOrmMatchRepository::new(db)),
    ))
}

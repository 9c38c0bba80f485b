//! Contract layer - public domain types for the league service
//!
//! This layer contains transport-agnostic models and errors.
//! NO serde derives on models - these are pure domain types.

pub mod error;
pub mod model;

pub use error::LeagueError;
pub use model::{
    Audit, Coach, CoachSpec, CoachUpdate, League, LeagueUpdate, Match, MatchUpdate, NameFilter,
    NewCoach, NewLeague, NewMatch, NewTeam, Team, TeamDetails, TeamLeagueRow, TeamSummary,
    TeamUpdate,
};

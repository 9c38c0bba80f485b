//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs
//!
//! Updates are version-conditional: the write only applies when the stored
//! version token still matches the one the caller last read, and the
//! implementation reports `Conflict` (row changed) or `NotFound` (row gone)
//! when it does not.

use crate::contract::{
    Coach, CoachSpec, CoachUpdate, League, LeagueError, LeagueUpdate, Match, MatchUpdate,
    NameFilter, NewCoach, NewLeague, NewMatch, NewTeam, Team, TeamDetails, TeamLeagueRow,
    TeamSummary, TeamUpdate,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

type Result<T> = std::result::Result<T, LeagueError>;

/// Repository for leagues. Default reads hide soft-deleted rows; the
/// `include_deleted` flag is the explicit, narrowly-scoped override.
#[async_trait]
pub trait LeagueRepository: Send + Sync {
    /// List leagues, hiding soft-deleted rows unless overridden
    async fn list(&self, include_deleted: bool) -> Result<Vec<League>>;

    /// Find a league by id, subject to the same soft-delete filter
    async fn find_by_id(&self, id: i32, include_deleted: bool) -> Result<Option<League>>;

    /// Teams belonging to a league
    async fn teams_of(&self, league_id: i32) -> Result<Vec<Team>>;

    /// Insert a league, assigning id, audit fields and version
    async fn create(&self, league: &NewLeague, actor: &str) -> Result<League>;

    /// Version-conditional update
    async fn update(&self, id: i32, update: &LeagueUpdate, actor: &str) -> Result<()>;

    /// Flip the soft-delete flag; idempotent, never removes the row
    async fn soft_delete(&self, id: i32, actor: &str) -> Result<()>;

    /// Insert a league and its teams in one transaction. A savepoint after
    /// the league insert means a failing team insert rolls back the teams
    /// only; the league still commits.
    async fn create_with_teams(
        &self,
        league: &NewLeague,
        teams: &[NewTeam],
        actor: &str,
    ) -> Result<(League, Vec<Team>)>;
}

/// Repository for teams
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// List teams as projections (scalar fields plus coach name)
    async fn list(&self, filter: Option<&NameFilter>) -> Result<Vec<TeamSummary>>;

    /// Find a team by id
    async fn find_by_id(&self, id: i32) -> Result<Option<Team>>;

    /// Find a team with its coach and league explicitly loaded
    async fn find_details(&self, id: i32) -> Result<Option<TeamDetails>>;

    /// Insert a team and bind its coach in one transaction
    async fn create_with_coach(
        &self,
        team: &NewTeam,
        coach: &CoachSpec,
        actor: &str,
    ) -> Result<TeamDetails>;

    /// Version-conditional update
    async fn update(&self, id: i32, update: &TeamUpdate, actor: &str) -> Result<()>;

    /// Conditional delete; matching zero rows is success. Referential
    /// restrictions (matches pointing at the team) surface as `Constraint`.
    async fn delete(&self, id: i32) -> Result<()>;

    /// Rows of the pre-created `vw_teams_and_leagues` view
    async fn list_with_leagues(&self) -> Result<Vec<TeamLeagueRow>>;
}

/// Repository for coaches
#[async_trait]
pub trait CoachRepository: Send + Sync {
    async fn list(&self, filter: Option<&NameFilter>) -> Result<Vec<Coach>>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Coach>>;

    /// Insert an unattached coach
    async fn create(&self, coach: &NewCoach, actor: &str) -> Result<Coach>;

    /// Version-conditional update
    async fn update(&self, id: i32, update: &CoachUpdate, actor: &str) -> Result<()>;

    /// Conditional delete; matching zero rows is success
    async fn delete(&self, id: i32) -> Result<()>;
}

/// Repository for matches
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// List matches, optionally only those a team plays in (home or away)
    async fn list(&self, team_id: Option<i32>) -> Result<Vec<Match>>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Match>>;

    async fn create(&self, m: &NewMatch, actor: &str) -> Result<Match>;

    /// Version-conditional update
    async fn update(&self, id: i32, update: &MatchUpdate, actor: &str) -> Result<()>;

    /// Conditional delete; matching zero rows is success
    async fn delete(&self, id: i32) -> Result<()>;

    /// Earliest match date for a team, backed by the declared store function
    /// `fn_get_earliest_match`
    async fn earliest_for_team(&self, team_id: i32) -> Result<DateTime<Utc>>;
}

//! Contract models for the league service
//!
//! These models are transport-agnostic; the REST layer owns its own DTOs and
//! relationships are carried as foreign-key values, never as live
//! back-references.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Audit fields shared by every stored record.
///
/// Composed into each entity rather than inherited. `version` is the
/// optimistic-concurrency token: regenerated on every successful write and
/// checked against the caller-supplied value on updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Audit {
    /// Primary key (auto-increment)
    pub id: i32,
    /// Creation timestamp, assigned server-side
    pub created_date: DateTime<Utc>,
    /// Last modification timestamp, assigned server-side
    pub modified_date: DateTime<Utc>,
    /// Actor that created the record
    pub created_by: Option<String>,
    /// Actor that last modified the record
    pub modified_by: Option<String>,
    /// Optimistic-concurrency token
    pub version: Uuid,
}

/// A league of teams. Soft-deleted rather than physically removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct League {
    pub audit: Audit,
    pub name: String,
    /// Soft-delete marker; flagged rows are hidden from default reads
    pub is_deleted: bool,
}

/// A team. Name is globally unique; the league reference is optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub audit: Audit,
    pub name: String,
    pub league_id: Option<i32>,
}

/// A coach. Belongs to at most one team (unique team reference).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coach {
    pub audit: Audit,
    pub name: String,
    pub team_id: Option<i32>,
}

/// A match between two teams. Referenced teams cannot be deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub audit: Audit,
    pub home_team_id: i32,
    pub away_team_id: i32,
    pub home_team_score: i32,
    pub away_team_score: i32,
    /// Fixed-point price, 16 total digits / 2 decimal
    pub ticket_price: Decimal,
    pub date: DateTime<Utc>,
}

// ===== Read projections =====

/// List projection for teams: scalar fields plus the coach name, no
/// back-references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamSummary {
    pub id: i32,
    pub name: String,
    pub coach_name: Option<String>,
}

/// A team with its explicitly requested related records loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamDetails {
    pub team: Team,
    pub coach: Option<Coach>,
    pub league: Option<League>,
}

/// Row of the pre-created `vw_teams_and_leagues` view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamLeagueRow {
    pub name: String,
    pub league_name: Option<String>,
}

/// Caller-supplied name predicate for list operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameFilter {
    Exact(String),
    Contains(String),
}

// ===== Write shapes =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLeague {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeam {
    pub name: String,
    pub league_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCoach {
    pub name: String,
}

/// The coach a new team is created with: either a nested new coach or an
/// existing, unattached one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoachSpec {
    New(NewCoach),
    Existing(i32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMatch {
    pub home_team_id: i32,
    pub away_team_id: i32,
    pub home_team_score: i32,
    pub away_team_score: i32,
    pub ticket_price: Decimal,
    pub date: DateTime<Utc>,
}

/// Update shapes carry the version token the caller last read; the write
/// fails with a conflict when the stored token no longer matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueUpdate {
    pub name: String,
    pub version: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamUpdate {
    pub name: String,
    pub league_id: Option<i32>,
    pub version: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachUpdate {
    pub name: String,
    pub version: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchUpdate {
    pub home_team_id: i32,
    pub away_team_id: i32,
    pub home_team_score: i32,
    pub away_team_score: i32,
    pub ticket_price: Decimal,
    pub date: DateTime<Utc>,
    pub version: Uuid,
}

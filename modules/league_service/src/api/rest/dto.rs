//! REST DTOs with serde derives for HTTP API
//!
//! Responses are flat projections with foreign-key values; no entity
//! back-references ever cross the HTTP boundary.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ===== League DTOs =====

/// League response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeagueDto {
    pub id: i32,

    /// League name
    #[schema(example = "English Premiere League")]
    pub name: String,

    /// Soft-delete marker; only visible under the include_deleted override
    pub is_deleted: bool,

    pub created_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,

    /// Optimistic-concurrency token; echo it back on PUT
    pub version: Uuid,
}

/// League create request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateLeagueRequest {
    #[schema(example = "La Liga")]
    pub name: String,
}

/// League update request; `id` must match the path id
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateLeagueRequest {
    pub id: i32,
    pub name: String,
    /// Token the caller last read
    pub version: Uuid,
}

// ===== Team DTOs =====

/// Team list projection
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamSummaryDto {
    pub id: i32,
    #[schema(example = "Tivoli Gardens F.C.")]
    pub name: String,
    pub coach_name: Option<String>,
}

/// Team detail response with eagerly loaded coach and league
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamDetailsDto {
    pub id: i32,
    pub name: String,
    pub league_id: Option<i32>,
    pub coach: Option<CoachDto>,
    pub league: Option<LeagueDto>,

    pub created_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
    pub version: Uuid,
}

/// Team create request; exactly one of `coach` / `coach_id` is required
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTeamRequest {
    #[schema(example = "Test FC")]
    pub name: String,
    pub league_id: Option<i32>,
    /// Nested new coach
    pub coach: Option<CreateCoachRequest>,
    /// Existing, unattached coach
    pub coach_id: Option<i32>,
}

/// Team update request; `id` must match the path id
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateTeamRequest {
    pub id: i32,
    pub name: String,
    pub league_id: Option<i32>,
    pub version: Uuid,
}

// ===== Coach DTOs =====

/// Coach response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CoachDto {
    pub id: i32,
    #[schema(example = "Jose Mourinho")]
    pub name: String,
    pub team_id: Option<i32>,

    pub created_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
    pub version: Uuid,
}

/// Coach create request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCoachRequest {
    #[schema(example = "Pep Guardiola")]
    pub name: String,
}

/// Coach update request; `id` must match the path id
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateCoachRequest {
    pub id: i32,
    pub name: String,
    pub version: Uuid,
}

// ===== Match DTOs =====

/// Match response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MatchDto {
    pub id: i32,
    pub home_team_id: i32,
    pub away_team_id: i32,
    pub home_team_score: i32,
    pub away_team_score: i32,
    /// Fixed-point price, 16 total digits / 2 decimal
    pub ticket_price: Decimal,
    pub date: DateTime<Utc>,

    pub created_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
    pub version: Uuid,
}

/// Match create request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateMatchRequest {
    pub home_team_id: i32,
    pub away_team_id: i32,
    #[serde(default)]
    pub home_team_score: i32,
    #[serde(default)]
    pub away_team_score: i32,
    pub ticket_price: Decimal,
    pub date: DateTime<Utc>,
}

/// Match update request; `id` must match the path id
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateMatchRequest {
    pub id: i32,
    pub home_team_id: i32,
    pub away_team_id: i32,
    pub home_team_score: i32,
    pub away_team_score: i32,
    pub ticket_price: Decimal,
    pub date: DateTime<Utc>,
    pub version: Uuid,
}

/// Earliest match date for a team, from the declared store function
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EarliestMatchDto {
    pub team_id: i32,
    pub earliest: DateTime<Utc>,
}

// ===== View DTOs =====

/// Row of the teams-and-leagues view
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamLeagueRowDto {
    pub name: String,
    pub league_name: Option<String>,
}

// ===== List Response DTOs =====

/// List of leagues
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaguesListResponse {
    pub items: Vec<LeagueDto>,
    pub total: usize,
}

/// List of team projections
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeamsListResponse {
    pub items: Vec<TeamSummaryDto>,
    pub total: usize,
}

/// List of coaches
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CoachesListResponse {
    pub items: Vec<CoachDto>,
    pub total: usize,
}

/// List of matches
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MatchesListResponse {
    pub items: Vec<MatchDto>,
    pub total: usize,
}

/// Rows of the teams-and-leagues view
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeamsWithLeaguesResponse {
    pub items: Vec<TeamLeagueRowDto>,
    pub total: usize,
}

// Note: Conversion implementations live in mapper.rs

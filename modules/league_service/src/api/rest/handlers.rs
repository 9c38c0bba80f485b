//! HTTP request handlers - thin layer that delegates to the domain service

use super::{
    dto::*,
    error::{map_domain_error, Problem},
};
use crate::contract::NameFilter;
use crate::domain::Service;
use axum::{
    extract::{Path, Query},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

/// Actor recorded on writes when the request carries no `x-actor` header
const DEFAULT_ACTOR: &str = "api";

fn actor_from(headers: &HeaderMap) -> String {
    headers
        .get("x-actor")
        .and_then(|value| value.to_str().ok())
        .unwrap_or(DEFAULT_ACTOR)
        .to_string()
}

fn created_at(location: String, body: impl IntoResponse) -> impl IntoResponse {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        body,
    )
}

fn path_body_id_mismatch() -> Problem {
    Problem::new(StatusCode::BAD_REQUEST, "Validation Error")
        .with_detail("path id does not match body id")
}

// ===== League Handlers =====

/// Query parameters for league reads
#[derive(Debug, Default, Deserialize)]
pub struct LeagueQuery {
    /// Bypass the soft-delete filter (administrative listing / restore flows)
    #[serde(default)]
    pub include_deleted: bool,
}

pub async fn list_leagues(
    Extension(service): Extension<Arc<Service>>,
    Query(query): Query<LeagueQuery>,
) -> Result<Json<LeaguesListResponse>, Problem> {
    let leagues = service
        .list_leagues(query.include_deleted)
        .await
        .map_err(map_domain_error)?;

    let items: Vec<LeagueDto> = leagues.into_iter().map(|l| l.into()).collect();
    let total = items.len();

    Ok(Json(LeaguesListResponse { items, total }))
}

pub async fn get_league(
    Extension(service): Extension<Arc<Service>>,
    Path(id): Path<i32>,
    Query(query): Query<LeagueQuery>,
) -> Result<Json<LeagueDto>, Problem> {
    let league = service
        .get_league(id, query.include_deleted)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(league.into()))
}

pub async fn get_league_teams(
    Extension(service): Extension<Arc<Service>>,
    Path(id): Path<i32>,
) -> Result<Json<TeamsListResponse>, Problem> {
    let teams = service.league_teams(id).await.map_err(map_domain_error)?;

    let items: Vec<TeamSummaryDto> = teams
        .into_iter()
        .map(|t| TeamSummaryDto {
            id: t.audit.id,
            name: t.name,
            coach_name: None,
        })
        .collect();
    let total = items.len();

    Ok(Json(TeamsListResponse { items, total }))
}

pub async fn create_league(
    Extension(service): Extension<Arc<Service>>,
    headers: HeaderMap,
    Json(req): Json<CreateLeagueRequest>,
) -> Result<impl IntoResponse, Problem> {
    let league = service
        .create_league(req.into(), &actor_from(&headers))
        .await
        .map_err(map_domain_error)?;

    let dto: LeagueDto = league.into();
    Ok(created_at(format!("/leagues/{}", dto.id), Json(dto)))
}

pub async fn update_league(
    Extension(service): Extension<Arc<Service>>,
    Path(id): Path<i32>,
    headers: HeaderMap,
    Json(req): Json<UpdateLeagueRequest>,
) -> Result<StatusCode, Problem> {
    if id != req.id {
        return Err(path_body_id_mismatch());
    }
    service
        .update_league(id, req.into(), &actor_from(&headers))
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE on a league flips the soft-delete flag; idempotent
pub async fn delete_league(
    Extension(service): Extension<Arc<Service>>,
    Path(id): Path<i32>,
    headers: HeaderMap,
) -> Result<StatusCode, Problem> {
    service
        .delete_league(id, &actor_from(&headers))
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Team Handlers =====

/// Query parameters for listing teams and coaches
#[derive(Debug, Default, Deserialize)]
pub struct NameQuery {
    /// Exact name match
    pub name: Option<String>,
    /// Substring match; ignored when `name` is present
    pub name_contains: Option<String>,
}

impl NameQuery {
    fn into_filter(self) -> Option<NameFilter> {
        match (self.name, self.name_contains) {
            (Some(name), _) => Some(NameFilter::Exact(name)),
            (None, Some(fragment)) => Some(NameFilter::Contains(fragment)),
            (None, None) => None,
        }
    }
}

pub async fn list_teams(
    Extension(service): Extension<Arc<Service>>,
    Query(query): Query<NameQuery>,
) -> Result<Json<TeamsListResponse>, Problem> {
    let teams = service
        .list_teams(query.into_filter())
        .await
        .map_err(map_domain_error)?;

    let items: Vec<TeamSummaryDto> = teams.into_iter().map(|t| t.into()).collect();
    let total = items.len();

    Ok(Json(TeamsListResponse { items, total }))
}

pub async fn get_team(
    Extension(service): Extension<Arc<Service>>,
    Path(id): Path<i32>,
) -> Result<Json<TeamDetailsDto>, Problem> {
    let details = service
        .get_team_details(id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(details.into()))
}

pub async fn create_team(
    Extension(service): Extension<Arc<Service>>,
    headers: HeaderMap,
    Json(req): Json<CreateTeamRequest>,
) -> Result<impl IntoResponse, Problem> {
    let Some((team, coach)) = req.into_parts() else {
        return Err(Problem::new(StatusCode::BAD_REQUEST, "Validation Error")
            .with_detail("exactly one of 'coach' or 'coach_id' is required"));
    };

    let details = service
        .create_team(team, coach, &actor_from(&headers))
        .await
        .map_err(map_domain_error)?;

    let dto: TeamDetailsDto = details.into();
    Ok(created_at(format!("/teams/{}", dto.id), Json(dto)))
}

pub async fn update_team(
    Extension(service): Extension<Arc<Service>>,
    Path(id): Path<i32>,
    headers: HeaderMap,
    Json(req): Json<UpdateTeamRequest>,
) -> Result<StatusCode, Problem> {
    if id != req.id {
        return Err(path_body_id_mismatch());
    }
    service
        .update_team(id, req.into(), &actor_from(&headers))
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_team(
    Extension(service): Extension<Arc<Service>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, Problem> {
    service.delete_team(id).await.map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Rows of the pre-created teams-and-leagues view
pub async fn teams_with_leagues(
    Extension(service): Extension<Arc<Service>>,
) -> Result<Json<TeamsWithLeaguesResponse>, Problem> {
    let rows = service
        .teams_with_leagues()
        .await
        .map_err(map_domain_error)?;

    let items: Vec<TeamLeagueRowDto> = rows.into_iter().map(|r| r.into()).collect();
    let total = items.len();

    Ok(Json(TeamsWithLeaguesResponse { items, total }))
}

/// Earliest match date for a team via the declared store function
pub async fn team_earliest_match(
    Extension(service): Extension<Arc<Service>>,
    Path(id): Path<i32>,
) -> Result<Json<EarliestMatchDto>, Problem> {
    let earliest = service
        .earliest_team_match(id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(EarliestMatchDto {
        team_id: id,
        earliest,
    }))
}

// ===== Coach Handlers =====

pub async fn list_coaches(
    Extension(service): Extension<Arc<Service>>,
    Query(query): Query<NameQuery>,
) -> Result<Json<CoachesListResponse>, Problem> {
    let coaches = service
        .list_coaches(query.into_filter())
        .await
        .map_err(map_domain_error)?;

    let items: Vec<CoachDto> = coaches.into_iter().map(|c| c.into()).collect();
    let total = items.len();

    Ok(Json(CoachesListResponse { items, total }))
}

pub async fn get_coach(
    Extension(service): Extension<Arc<Service>>,
    Path(id): Path<i32>,
) -> Result<Json<CoachDto>, Problem> {
    let coach = service.get_coach(id).await.map_err(map_domain_error)?;

    Ok(Json(coach.into()))
}

pub async fn create_coach(
    Extension(service): Extension<Arc<Service>>,
    headers: HeaderMap,
    Json(req): Json<CreateCoachRequest>,
) -> Result<impl IntoResponse, Problem> {
    let coach = service
        .create_coach(req.into(), &actor_from(&headers))
        .await
        .map_err(map_domain_error)?;

    let dto: CoachDto = coach.into();
    Ok(created_at(format!("/coaches/{}", dto.id), Json(dto)))
}

pub async fn update_coach(
    Extension(service): Extension<Arc<Service>>,
    Path(id): Path<i32>,
    headers: HeaderMap,
    Json(req): Json<UpdateCoachRequest>,
) -> Result<StatusCode, Problem> {
    if id != req.id {
        return Err(path_body_id_mismatch());
    }
    service
        .update_coach(id, req.into(), &actor_from(&headers))
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_coach(
    Extension(service): Extension<Arc<Service>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, Problem> {
    service.delete_coach(id).await.map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Match Handlers =====

/// Query parameters for listing matches
#[derive(Debug, Default, Deserialize)]
pub struct MatchQuery {
    /// Only matches a team plays in, home or away
    pub team_id: Option<i32>,
}

pub async fn list_matches(
    Extension(service): Extension<Arc<Service>>,
    Query(query): Query<MatchQuery>,
) -> Result<Json<MatchesListResponse>, Problem> {
    let matches = service
        .list_matches(query.team_id)
        .await
        .map_err(map_domain_error)?;

    let items: Vec<MatchDto> = matches.into_iter().map(|m| m.into()).collect();
    let total = items.len();

    Ok(Json(MatchesListResponse { items, total }))
}

pub async fn get_match(
    Extension(service): Extension<Arc<Service>>,
    Path(id): Path<i32>,
) -> Result<Json<MatchDto>, Problem> {
    let m = service.get_match(id).await.map_err(map_domain_error)?;

    Ok(Json(m.into()))
}

pub async fn create_match(
    Extension(service): Extension<Arc<Service>>,
    headers: HeaderMap,
    Json(req): Json<CreateMatchRequest>,
) -> Result<impl IntoResponse, Problem> {
    let m = service
        .create_match(req.into(), &actor_from(&headers))
        .await
        .map_err(map_domain_error)?;

    let dto: MatchDto = m.into();
    Ok(created_at(format!("/matches/{}", dto.id), Json(dto)))
}

pub async fn update_match(
    Extension(service): Extension<Arc<Service>>,
    Path(id): Path<i32>,
    headers: HeaderMap,
    Json(req): Json<UpdateMatchRequest>,
) -> Result<StatusCode, Problem> {
    if id != req.id {
        return Err(path_body_id_mismatch());
    }
    service
        .update_match(id, req.into(), &actor_from(&headers))
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_match(
    Extension(service): Extension<Arc<Service>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, Problem> {
    service.delete_match(id).await.map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

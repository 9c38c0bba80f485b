//! Domain service - validation and orchestration over the repositories

use super::repository::{CoachRepository, LeagueRepository, MatchRepository, TeamRepository};
use super::validation;
use crate::contract::{
    Coach, CoachSpec, CoachUpdate, League, LeagueError, LeagueUpdate, Match, MatchUpdate,
    NameFilter, NewCoach, NewLeague, NewMatch, NewTeam, Team, TeamDetails, TeamLeagueRow,
    TeamSummary, TeamUpdate,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

type Result<T> = std::result::Result<T, LeagueError>;

/// Domain service for the league schema
pub struct Service {
    leagues: Arc<dyn LeagueRepository>,
    teams: Arc<dyn TeamRepository>,
    coaches: Arc<dyn CoachRepository>,
    matches: Arc<dyn MatchRepository>,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        leagues: Arc<dyn LeagueRepository>,
        teams: Arc<dyn TeamRepository>,
        coaches: Arc<dyn CoachRepository>,
        matches: Arc<dyn MatchRepository>,
    ) -> Self {
        Self {
            leagues,
            teams,
            coaches,
            matches,
        }
    }

    // ===== League operations =====

    pub async fn list_leagues(&self, include_deleted: bool) -> Result<Vec<League>> {
        self.leagues.list(include_deleted).await
    }

    pub async fn get_league(&self, id: i32, include_deleted: bool) -> Result<League> {
        self.leagues
            .find_by_id(id, include_deleted)
            .await?
            .ok_or_else(|| LeagueError::not_found("league", id))
    }

    pub async fn league_teams(&self, league_id: i32) -> Result<Vec<Team>> {
        // 404 for a soft-deleted league, same as the league itself
        self.get_league(league_id, false).await?;
        self.leagues.teams_of(league_id).await
    }

    pub async fn create_league(&self, league: NewLeague, actor: &str) -> Result<League> {
        validation::require_name("league name", &league.name)?;
        self.leagues.create(&league, actor).await
    }

    /// Insert a league together with its teams; a failing team insert rolls
    /// back to the savepoint taken after the league insert, so the league
    /// still commits.
    pub async fn create_league_with_teams(
        &self,
        league: NewLeague,
        teams: Vec<NewTeam>,
        actor: &str,
    ) -> Result<(League, Vec<Team>)> {
        validation::require_name("league name", &league.name)?;
        for team in &teams {
            validation::require_name("team name", &team.name)?;
        }
        self.leagues.create_with_teams(&league, &teams, actor).await
    }

    pub async fn update_league(&self, id: i32, update: LeagueUpdate, actor: &str) -> Result<()> {
        validation::require_name("league name", &update.name)?;
        self.leagues.update(id, &update, actor).await
    }

    /// DELETE on a league flips the soft-delete flag; idempotent.
    pub async fn delete_league(&self, id: i32, actor: &str) -> Result<()> {
        self.leagues.soft_delete(id, actor).await
    }

    // ===== Team operations =====

    pub async fn list_teams(&self, filter: Option<NameFilter>) -> Result<Vec<TeamSummary>> {
        self.teams.list(filter.as_ref()).await
    }

    pub async fn get_team(&self, id: i32) -> Result<Team> {
        self.teams
            .find_by_id(id)
            .await?
            .ok_or_else(|| LeagueError::not_found("team", id))
    }

    /// Team with coach and league eagerly loaded.
    pub async fn get_team_details(&self, id: i32) -> Result<TeamDetails> {
        self.teams
            .find_details(id)
            .await?
            .ok_or_else(|| LeagueError::not_found("team", id))
    }

    /// Create a team with its coach: either a nested new coach or an
    /// existing, unattached one. A coach already bound to a team is rejected.
    pub async fn create_team(
        &self,
        team: NewTeam,
        coach: CoachSpec,
        actor: &str,
    ) -> Result<TeamDetails> {
        validation::require_name("team name", &team.name)?;
        match &coach {
            CoachSpec::New(new_coach) => {
                validation::require_name("coach name", &new_coach.name)?;
            }
            CoachSpec::Existing(coach_id) => {
                let existing = self
                    .coaches
                    .find_by_id(*coach_id)
                    .await?
                    .ok_or_else(|| LeagueError::not_found("coach", *coach_id))?;
                if let Some(team_id) = existing.team_id {
                    return Err(LeagueError::Constraint {
                        reason: format!("coach {coach_id} already belongs to team {team_id}"),
                    });
                }
            }
        }
        self.teams.create_with_coach(&team, &coach, actor).await
    }

    pub async fn update_team(&self, id: i32, update: TeamUpdate, actor: &str) -> Result<()> {
        validation::require_name("team name", &update.name)?;
        self.teams.update(id, &update, actor).await
    }

    pub async fn delete_team(&self, id: i32) -> Result<()> {
        self.teams.delete(id).await
    }

    /// Rows of the pre-created teams-and-leagues view.
    pub async fn teams_with_leagues(&self) -> Result<Vec<TeamLeagueRow>> {
        self.teams.list_with_leagues().await
    }

    // ===== Coach operations =====

    pub async fn list_coaches(&self, filter: Option<NameFilter>) -> Result<Vec<Coach>> {
        self.coaches.list(filter.as_ref()).await
    }

    pub async fn get_coach(&self, id: i32) -> Result<Coach> {
        self.coaches
            .find_by_id(id)
            .await?
            .ok_or_else(|| LeagueError::not_found("coach", id))
    }

    pub async fn create_coach(&self, coach: NewCoach, actor: &str) -> Result<Coach> {
        validation::require_name("coach name", &coach.name)?;
        self.coaches.create(&coach, actor).await
    }

    pub async fn update_coach(&self, id: i32, update: CoachUpdate, actor: &str) -> Result<()> {
        validation::require_name("coach name", &update.name)?;
        self.coaches.update(id, &update, actor).await
    }

    pub async fn delete_coach(&self, id: i32) -> Result<()> {
        self.coaches.delete(id).await
    }

    // ===== Match operations =====

    pub async fn list_matches(&self, team_id: Option<i32>) -> Result<Vec<Match>> {
        self.matches.list(team_id).await
    }

    pub async fn get_match(&self, id: i32) -> Result<Match> {
        self.matches
            .find_by_id(id)
            .await?
            .ok_or_else(|| LeagueError::not_found("match", id))
    }

    pub async fn create_match(&self, m: NewMatch, actor: &str) -> Result<Match> {
        validation::validate_match(
            m.home_team_id,
            m.away_team_id,
            m.home_team_score,
            m.away_team_score,
            m.ticket_price,
        )?;
        self.matches.create(&m, actor).await
    }

    pub async fn update_match(&self, id: i32, update: MatchUpdate, actor: &str) -> Result<()> {
        validation::validate_match(
            update.home_team_id,
            update.away_team_id,
            update.home_team_score,
            update.away_team_score,
            update.ticket_price,
        )?;
        self.matches.update(id, &update, actor).await
    }

    pub async fn delete_match(&self, id: i32) -> Result<()> {
        self.matches.delete(id).await
    }

    /// Earliest match date for a team via the declared store function.
    pub async fn earliest_team_match(&self, team_id: i32) -> Result<DateTime<Utc>> {
        self.get_team(team_id).await?;
        self.matches.earliest_for_team(team_id).await
    }
}

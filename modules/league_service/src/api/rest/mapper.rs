//! Conversions between contract models and REST DTOs

use super::dto::*;
use crate::contract::{
    Coach, CoachSpec, CoachUpdate, League, LeagueUpdate, Match, MatchUpdate, NewCoach, NewLeague,
    NewMatch, NewTeam, Team, TeamDetails, TeamLeagueRow, TeamSummary, TeamUpdate,
};

// ===== Responses =====

impl From<League> for LeagueDto {
    fn from(model: League) -> Self {
        Self {
            id: model.audit.id,
            name: model.name,
            is_deleted: model.is_deleted,
            created_date: model.audit.created_date,
            modified_date: model.audit.modified_date,
            created_by: model.audit.created_by,
            modified_by: model.audit.modified_by,
            version: model.audit.version,
        }
    }
}

impl From<TeamSummary> for TeamSummaryDto {
    fn from(model: TeamSummary) -> Self {
        Self {
            id: model.id,
            name: model.name,
            coach_name: model.coach_name,
        }
    }
}

impl From<TeamDetails> for TeamDetailsDto {
    fn from(details: TeamDetails) -> Self {
        let Team { audit, name, league_id } = details.team;
        Self {
            id: audit.id,
            name,
            league_id,
            coach: details.coach.map(Into::into),
            league: details.league.map(Into::into),
            created_date: audit.created_date,
            modified_date: audit.modified_date,
            created_by: audit.created_by,
            modified_by: audit.modified_by,
            version: audit.version,
        }
    }
}

impl From<Coach> for CoachDto {
    fn from(model: Coach) -> Self {
        Self {
            id: model.audit.id,
            name: model.name,
            team_id: model.team_id,
            created_date: model.audit.created_date,
            modified_date: model.audit.modified_date,
            created_by: model.audit.created_by,
            modified_by: model.audit.modified_by,
            version: model.audit.version,
        }
    }
}

impl From<Match> for MatchDto {
    fn from(model: Match) -> Self {
        Self {
            id: model.audit.id,
            home_team_id: model.home_team_id,
            away_team_id: model.away_team_id,
            home_team_score: model.home_team_score,
            away_team_score: model.away_team_score,
            ticket_price: model.ticket_price,
            date: model.date,
            created_date: model.audit.created_date,
            modified_date: model.audit.modified_date,
            created_by: model.audit.created_by,
            modified_by: model.audit.modified_by,
            version: model.audit.version,
        }
    }
}

impl From<TeamLeagueRow> for TeamLeagueRowDto {
    fn from(row: TeamLeagueRow) -> Self {
        Self {
            name: row.name,
            league_name: row.league_name,
        }
    }
}

// ===== Requests =====

impl From<CreateLeagueRequest> for NewLeague {
    fn from(req: CreateLeagueRequest) -> Self {
        Self { name: req.name }
    }
}

impl From<UpdateLeagueRequest> for LeagueUpdate {
    fn from(req: UpdateLeagueRequest) -> Self {
        Self {
            name: req.name,
            version: req.version,
        }
    }
}

impl CreateTeamRequest {
    /// Split into the team shape and its coach specification. `None` when
    /// neither or both coach variants were supplied.
    pub fn into_parts(self) -> Option<(NewTeam, CoachSpec)> {
        let team = NewTeam {
            name: self.name,
            league_id: self.league_id,
        };
        match (self.coach, self.coach_id) {
            (Some(coach), None) => Some((team, CoachSpec::New(NewCoach { name: coach.name }))),
            (None, Some(coach_id)) => Some((team, CoachSpec::Existing(coach_id))),
            _ => None,
        }
    }
}

impl From<UpdateTeamRequest> for TeamUpdate {
    fn from(req: UpdateTeamRequest) -> Self {
        Self {
            name: req.name,
            league_id: req.league_id,
            version: req.version,
        }
    }
}

impl From<CreateCoachRequest> for NewCoach {
    fn from(req: CreateCoachRequest) -> Self {
        Self { name: req.name }
    }
}

impl From<UpdateCoachRequest> for CoachUpdate {
    fn from(req: UpdateCoachRequest) -> Self {
        Self {
            name: req.name,
            version: req.version,
        }
    }
}

impl From<CreateMatchRequest> for NewMatch {
    fn from(req: CreateMatchRequest) -> Self {
        Self {
            home_team_id: req.home_team_id,
            away_team_id: req.away_team_id,
            home_team_score: req.home_team_score,
            away_team_score: req.away_team_score,
            ticket_price: req.ticket_price,
            date: req.date,
        }
    }
}

impl From<UpdateMatchRequest> for MatchUpdate {
    fn from(req: UpdateMatchRequest) -> Self {
        Self {
            home_team_id: req.home_team_id,
            away_team_id: req.away_team_id,
            home_team_score: req.home_team_score,
            away_team_score: req.away_team_score,
            ticket_price: req.ticket_price,
            date: req.date,
            version: req.version,
        }
    }
}

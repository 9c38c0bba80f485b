//! Shared test fixtures: an in-memory store implementing all four
//! repository traits with the same constraint and concurrency semantics as
//! the real storage layer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use league_service::contract::*;
use league_service::domain::repository::{
    CoachRepository, LeagueRepository, MatchRepository, TeamRepository,
};
use league_service::domain::Service;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

type Result<T> = std::result::Result<T, LeagueError>;

#[derive(Default)]
struct StoreInner {
    leagues: HashMap<i32, League>,
    teams: HashMap<i32, Team>,
    coaches: HashMap<i32, Coach>,
    matches: HashMap<i32, Match>,
    next_id: i32,
}

impl StoreInner {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory store shared by the four mock repositories. Cross-table rules
/// (unique team names, the coach-per-team index, the restrict rule on match
/// references) live here so tests exercise the same failure paths as the
/// real backend.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn team_count(&self) -> usize {
        self.inner.read().teams.len()
    }

    pub fn coach_count(&self) -> usize {
        self.inner.read().coaches.len()
    }
}

fn new_audit(id: i32, actor: &str) -> Audit {
    let now = Utc::now();
    Audit {
        id,
        created_date: now,
        modified_date: now,
        created_by: Some(actor.to_string()),
        modified_by: Some(actor.to_string()),
        version: Uuid::new_v4(),
    }
}

fn touch(audit: &mut Audit, actor: &str) {
    audit.modified_date = Utc::now();
    audit.modified_by = Some(actor.to_string());
    audit.version = Uuid::new_v4();
}

fn name_matches(filter: Option<&NameFilter>, name: &str) -> bool {
    match filter {
        None => true,
        Some(NameFilter::Exact(wanted)) => name == wanted,
        Some(NameFilter::Contains(fragment)) => name.contains(fragment.as_str()),
    }
}

#[async_trait]
impl LeagueRepository for InMemoryStore {
    async fn list(&self, include_deleted: bool) -> Result<Vec<League>> {
        let inner = self.inner.read();
        let mut leagues: Vec<League> = inner
            .leagues
            .values()
            .filter(|l| include_deleted || !l.is_deleted)
            .cloned()
            .collect();
        leagues.sort_by_key(|l| l.audit.id);
        Ok(leagues)
    }

    async fn find_by_id(&self, id: i32, include_deleted: bool) -> Result<Option<League>> {
        let inner = self.inner.read();
        Ok(inner
            .leagues
            .get(&id)
            .filter(|l| include_deleted || !l.is_deleted)
            .cloned())
    }

    async fn teams_of(&self, league_id: i32) -> Result<Vec<Team>> {
        let inner = self.inner.read();
        let mut teams: Vec<Team> = inner
            .teams
            .values()
            .filter(|t| t.league_id == Some(league_id))
            .cloned()
            .collect();
        teams.sort_by_key(|t| t.audit.id);
        Ok(teams)
    }

    async fn create(&self, league: &NewLeague, actor: &str) -> Result<League> {
        let mut inner = self.inner.write();
        let id = inner.next_id();
        let created = League {
            audit: new_audit(id, actor),
            name: league.name.clone(),
            is_deleted: false,
        };
        inner.leagues.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, update: &LeagueUpdate, actor: &str) -> Result<()> {
        let mut inner = self.inner.write();
        let Some(stored) = inner.leagues.get_mut(&id).filter(|l| !l.is_deleted) else {
            return Err(LeagueError::not_found("league", id));
        };
        if stored.audit.version != update.version {
            return Err(LeagueError::version_conflict("league", id));
        }
        stored.name = update.name.clone();
        touch(&mut stored.audit, actor);
        Ok(())
    }

    async fn soft_delete(&self, id: i32, actor: &str) -> Result<()> {
        let mut inner = self.inner.write();
        if let Some(stored) = inner.leagues.get_mut(&id) {
            if !stored.is_deleted {
                stored.is_deleted = true;
                touch(&mut stored.audit, actor);
            }
        }
        Ok(())
    }

    async fn create_with_teams(
        &self,
        league: &NewLeague,
        teams: &[NewTeam],
        actor: &str,
    ) -> Result<(League, Vec<Team>)> {
        let mut inner = self.inner.write();
        let id = inner.next_id();
        let created = League {
            audit: new_audit(id, actor),
            name: league.name.clone(),
            is_deleted: false,
        };
        inner.leagues.insert(id, created.clone());

        // Dependent inserts roll back as a unit; the league stays.
        let mut created_teams = Vec::with_capacity(teams.len());
        for team in teams {
            let duplicate = inner.teams.values().any(|t| t.name == team.name)
                || created_teams.iter().any(|t: &Team| t.name == team.name);
            if duplicate {
                return Ok((created, Vec::new()));
            }
            let team_id = inner.next_id();
            created_teams.push(Team {
                audit: new_audit(team_id, actor),
                name: team.name.clone(),
                league_id: Some(id),
            });
        }
        for team in &created_teams {
            inner.teams.insert(team.audit.id, team.clone());
        }
        Ok((created, created_teams))
    }
}

#[async_trait]
impl TeamRepository for InMemoryStore {
    async fn list(&self, filter: Option<&NameFilter>) -> Result<Vec<TeamSummary>> {
        let inner = self.inner.read();
        let mut teams: Vec<TeamSummary> = inner
            .teams
            .values()
            .filter(|t| name_matches(filter, &t.name))
            .map(|t| TeamSummary {
                id: t.audit.id,
                name: t.name.clone(),
                coach_name: inner
                    .coaches
                    .values()
                    .find(|c| c.team_id == Some(t.audit.id))
                    .map(|c| c.name.clone()),
            })
            .collect();
        teams.sort_by_key(|t| t.id);
        Ok(teams)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Team>> {
        Ok(self.inner.read().teams.get(&id).cloned())
    }

    async fn find_details(&self, id: i32) -> Result<Option<TeamDetails>> {
        let inner = self.inner.read();
        let Some(team) = inner.teams.get(&id).cloned() else {
            return Ok(None);
        };
        let coach = inner
            .coaches
            .values()
            .find(|c| c.team_id == Some(id))
            .cloned();
        let league = team
            .league_id
            .and_then(|lid| inner.leagues.get(&lid))
            .filter(|l| !l.is_deleted)
            .cloned();
        Ok(Some(TeamDetails {
            team,
            coach,
            league,
        }))
    }

    async fn create_with_coach(
        &self,
        team: &NewTeam,
        coach: &CoachSpec,
        actor: &str,
    ) -> Result<TeamDetails> {
        let mut inner = self.inner.write();
        if inner.teams.values().any(|t| t.name == team.name) {
            return Err(LeagueError::Constraint {
                reason: format!("team name already in use: {}", team.name),
            });
        }
        let team_id = inner.next_id();
        let created = Team {
            audit: new_audit(team_id, actor),
            name: team.name.clone(),
            league_id: team.league_id,
        };

        let bound_coach = match coach {
            CoachSpec::New(new_coach) => {
                let coach_id = inner.next_id();
                let created_coach = Coach {
                    audit: new_audit(coach_id, actor),
                    name: new_coach.name.clone(),
                    team_id: Some(team_id),
                };
                inner.coaches.insert(coach_id, created_coach.clone());
                created_coach
            }
            CoachSpec::Existing(coach_id) => {
                let Some(stored) = inner.coaches.get_mut(coach_id) else {
                    return Err(LeagueError::not_found("coach", *coach_id));
                };
                if stored.team_id.is_some() {
                    return Err(LeagueError::Constraint {
                        reason: format!("coach {coach_id} is already attached to a team"),
                    });
                }
                stored.team_id = Some(team_id);
                touch(&mut stored.audit, actor);
                stored.clone()
            }
        };

        inner.teams.insert(team_id, created.clone());
        let league = created
            .league_id
            .and_then(|lid| inner.leagues.get(&lid))
            .filter(|l| !l.is_deleted)
            .cloned();
        Ok(TeamDetails {
            team: created,
            coach: Some(bound_coach),
            league,
        })
    }

    async fn update(&self, id: i32, update: &TeamUpdate, actor: &str) -> Result<()> {
        let mut inner = self.inner.write();
        let duplicate = inner
            .teams
            .values()
            .any(|t| t.audit.id != id && t.name == update.name);
        if duplicate {
            return Err(LeagueError::Constraint {
                reason: format!("team name already in use: {}", update.name),
            });
        }
        let Some(stored) = inner.teams.get_mut(&id) else {
            return Err(LeagueError::not_found("team", id));
        };
        if stored.audit.version != update.version {
            return Err(LeagueError::version_conflict("team", id));
        }
        stored.name = update.name.clone();
        stored.league_id = update.league_id;
        touch(&mut stored.audit, actor);
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let mut inner = self.inner.write();
        let referenced = inner
            .matches
            .values()
            .any(|m| m.home_team_id == id || m.away_team_id == id);
        if referenced {
            return Err(LeagueError::Constraint {
                reason: format!("team {id} is referenced by matches"),
            });
        }
        inner.teams.remove(&id);
        Ok(())
    }

    async fn list_with_leagues(&self) -> Result<Vec<TeamLeagueRow>> {
        let inner = self.inner.read();
        let mut rows: Vec<TeamLeagueRow> = inner
            .teams
            .values()
            .map(|t| TeamLeagueRow {
                name: t.name.clone(),
                league_name: t
                    .league_id
                    .and_then(|lid| inner.leagues.get(&lid))
                    .map(|l| l.name.clone()),
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }
}

#[async_trait]
impl CoachRepository for InMemoryStore {
    async fn list(&self, filter: Option<&NameFilter>) -> Result<Vec<Coach>> {
        let inner = self.inner.read();
        let mut coaches: Vec<Coach> = inner
            .coaches
            .values()
            .filter(|c| name_matches(filter, &c.name))
            .cloned()
            .collect();
        coaches.sort_by_key(|c| c.audit.id);
        Ok(coaches)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Coach>> {
        Ok(self.inner.read().coaches.get(&id).cloned())
    }

    async fn create(&self, coach: &NewCoach, actor: &str) -> Result<Coach> {
        let mut inner = self.inner.write();
        let id = inner.next_id();
        let created = Coach {
            audit: new_audit(id, actor),
            name: coach.name.clone(),
            team_id: None,
        };
        inner.coaches.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, update: &CoachUpdate, actor: &str) -> Result<()> {
        let mut inner = self.inner.write();
        let Some(stored) = inner.coaches.get_mut(&id) else {
            return Err(LeagueError::not_found("coach", id));
        };
        if stored.audit.version != update.version {
            return Err(LeagueError::version_conflict("coach", id));
        }
        stored.name = update.name.clone();
        touch(&mut stored.audit, actor);
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<()> {
        self.inner.write().coaches.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl MatchRepository for InMemoryStore {
    async fn list(&self, team_id: Option<i32>) -> Result<Vec<Match>> {
        let inner = self.inner.read();
        let mut matches: Vec<Match> = inner
            .matches
            .values()
            .filter(|m| match team_id {
                Some(id) => m.home_team_id == id || m.away_team_id == id,
                None => true,
            })
            .cloned()
            .collect();
        matches.sort_by_key(|m| m.audit.id);
        Ok(matches)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Match>> {
        Ok(self.inner.read().matches.get(&id).cloned())
    }

    async fn create(&self, m: &NewMatch, actor: &str) -> Result<Match> {
        let mut inner = self.inner.write();
        for team_id in [m.home_team_id, m.away_team_id] {
            if !inner.teams.contains_key(&team_id) {
                return Err(LeagueError::Constraint {
                    reason: format!("match references missing team {team_id}"),
                });
            }
        }
        let id = inner.next_id();
        let created = Match {
            audit: new_audit(id, actor),
            home_team_id: m.home_team_id,
            away_team_id: m.away_team_id,
            home_team_score: m.home_team_score,
            away_team_score: m.away_team_score,
            ticket_price: m.ticket_price,
            date: m.date,
        };
        inner.matches.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, update: &MatchUpdate, actor: &str) -> Result<()> {
        let mut inner = self.inner.write();
        let Some(stored) = inner.matches.get_mut(&id) else {
            return Err(LeagueError::not_found("match", id));
        };
        if stored.audit.version != update.version {
            return Err(LeagueError::version_conflict("match", id));
        }
        stored.home_team_id = update.home_team_id;
        stored.away_team_id = update.away_team_id;
        stored.home_team_score = update.home_team_score;
        stored.away_team_score = update.away_team_score;
        stored.ticket_price = update.ticket_price;
        stored.date = update.date;
        touch(&mut stored.audit, actor);
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<()> {
        self.inner.write().matches.remove(&id);
        Ok(())
    }

    async fn earliest_for_team(&self, _team_id: i32) -> Result<DateTime<Utc>> {
        Err(LeagueError::NotImplemented {
            feature: "fn_get_earliest_match",
        })
    }
}

/// Service wired to a fresh in-memory store.
pub fn mock_service() -> (Arc<Service>, InMemoryStore) {
    let store = InMemoryStore::new();
    let service = Arc::new(Service::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
    ));
    (service, store)
}

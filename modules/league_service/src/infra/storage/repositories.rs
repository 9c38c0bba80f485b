//! SeaORM repository implementations
//!
//! Every update is a single conditional UPDATE filtered on id and the stored
//! version token; zero affected rows means the row either vanished (NotFound)
//! or changed under the caller (Conflict).

use crate::contract::{
    Coach, CoachSpec, CoachUpdate, League, LeagueError, LeagueUpdate, Match, MatchUpdate,
    NameFilter, NewCoach, NewLeague, NewMatch, NewTeam, Team, TeamDetails, TeamLeagueRow,
    TeamSummary, TeamUpdate,
};
use crate::domain::repository::{
    CoachRepository, LeagueRepository, MatchRepository, TeamRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    prelude::Expr, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, SqlErr, Statement,
    TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::entity;

type Result<T> = std::result::Result<T, LeagueError>;

/// Classify a store failure into the contract taxonomy. Driver details are
/// logged, never returned.
fn classify_db_err(err: DbErr) -> LeagueError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => LeagueError::Constraint {
            reason: format!("unique constraint violated: {msg}"),
        },
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => LeagueError::Constraint {
            reason: format!("foreign key constraint violated: {msg}"),
        },
        _ => {
            tracing::error!(error = %err, "database error");
            LeagueError::Internal
        }
    }
}

fn name_condition<C: ColumnTrait>(column: C, filter: &NameFilter) -> sea_orm::sea_query::SimpleExpr {
    match filter {
        NameFilter::Exact(name) => column.eq(name.clone()),
        NameFilter::Contains(fragment) => column.contains(fragment.clone()),
    }
}

// ===== League Repository =====

pub struct SeaOrmLeagueRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmLeagueRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

async fn insert_league<C: ConnectionTrait>(
    conn: &C,
    league: &NewLeague,
    actor: &str,
) -> Result<entity::league::Model> {
    let now = Utc::now();
    let active = entity::league::ActiveModel {
        name: Set(league.name.clone()),
        is_deleted: Set(false),
        created_date: Set(now),
        modified_date: Set(now),
        created_by: Set(Some(actor.to_owned())),
        modified_by: Set(Some(actor.to_owned())),
        version: Set(Uuid::new_v4()),
        ..Default::default()
    };
    entity::league::Entity::insert(active)
        .exec_with_returning(conn)
        .await
        .map_err(classify_db_err)
}

async fn insert_team<C: ConnectionTrait>(
    conn: &C,
    team: &NewTeam,
    actor: &str,
) -> Result<entity::team::Model> {
    let now = Utc::now();
    let active = entity::team::ActiveModel {
        name: Set(team.name.clone()),
        league_id: Set(team.league_id),
        created_date: Set(now),
        modified_date: Set(now),
        created_by: Set(Some(actor.to_owned())),
        modified_by: Set(Some(actor.to_owned())),
        version: Set(Uuid::new_v4()),
        ..Default::default()
    };
    entity::team::Entity::insert(active)
        .exec_with_returning(conn)
        .await
        .map_err(classify_db_err)
}

#[async_trait]
impl LeagueRepository for SeaOrmLeagueRepository {
    async fn list(&self, include_deleted: bool) -> Result<Vec<League>> {
        let mut query = entity::league::Entity::find();
        if !include_deleted {
            query = query.filter(entity::league::Column::IsDeleted.eq(false));
        }
        let results = query
            .order_by_asc(entity::league::Column::Id)
            .all(&*self.db)
            .await
            .map_err(classify_db_err)?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn find_by_id(&self, id: i32, include_deleted: bool) -> Result<Option<League>> {
        let mut query = entity::league::Entity::find_by_id(id);
        if !include_deleted {
            query = query.filter(entity::league::Column::IsDeleted.eq(false));
        }
        let result = query.one(&*self.db).await.map_err(classify_db_err)?;

        Ok(result.map(|e| e.into()))
    }

    async fn teams_of(&self, league_id: i32) -> Result<Vec<Team>> {
        let results = entity::team::Entity::find()
            .filter(entity::team::Column::LeagueId.eq(league_id))
            .order_by_asc(entity::team::Column::Name)
            .all(&*self.db)
            .await
            .map_err(classify_db_err)?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn create(&self, league: &NewLeague, actor: &str) -> Result<League> {
        insert_league(&*self.db, league, actor).await.map(Into::into)
    }

    async fn update(&self, id: i32, update: &LeagueUpdate, actor: &str) -> Result<()> {
        let result = entity::league::Entity::update_many()
            .col_expr(entity::league::Column::Name, Expr::value(update.name.clone()))
            .col_expr(entity::league::Column::ModifiedDate, Expr::value(Utc::now()))
            .col_expr(
                entity::league::Column::ModifiedBy,
                Expr::value(Some(actor.to_owned())),
            )
            .col_expr(entity::league::Column::Version, Expr::value(Uuid::new_v4()))
            .filter(entity::league::Column::Id.eq(id))
            .filter(entity::league::Column::IsDeleted.eq(false))
            .filter(entity::league::Column::Version.eq(update.version))
            .exec(&*self.db)
            .await
            .map_err(classify_db_err)?;

        if result.rows_affected == 0 {
            let exists = entity::league::Entity::find_by_id(id)
                .filter(entity::league::Column::IsDeleted.eq(false))
                .count(&*self.db)
                .await
                .map_err(classify_db_err)?
                > 0;
            return Err(if exists {
                LeagueError::version_conflict("league", id)
            } else {
                LeagueError::not_found("league", id)
            });
        }
        Ok(())
    }

    async fn soft_delete(&self, id: i32, actor: &str) -> Result<()> {
        // Conditional flag flip: zero matched rows (absent or already
        // flagged) is still success.
        entity::league::Entity::update_many()
            .col_expr(entity::league::Column::IsDeleted, Expr::value(true))
            .col_expr(entity::league::Column::ModifiedDate, Expr::value(Utc::now()))
            .col_expr(
                entity::league::Column::ModifiedBy,
                Expr::value(Some(actor.to_owned())),
            )
            .col_expr(entity::league::Column::Version, Expr::value(Uuid::new_v4()))
            .filter(entity::league::Column::Id.eq(id))
            .filter(entity::league::Column::IsDeleted.eq(false))
            .exec(&*self.db)
            .await
            .map_err(classify_db_err)?;

        Ok(())
    }

    async fn create_with_teams(
        &self,
        league: &NewLeague,
        teams: &[NewTeam],
        actor: &str,
    ) -> Result<(League, Vec<Team>)> {
        let txn = self.db.begin().await.map_err(classify_db_err)?;

        let league_model = insert_league(&txn, league, actor).await?;

        // Savepoint: a failing dependent insert must not discard the league.
        let savepoint = txn.begin().await.map_err(classify_db_err)?;
        let mut created = Vec::with_capacity(teams.len());
        let mut rolled_back = false;
        for team in teams {
            let bound = NewTeam {
                name: team.name.clone(),
                league_id: Some(league_model.id),
            };
            match insert_team(&savepoint, &bound, actor).await {
                Ok(model) => created.push(model),
                Err(err) => {
                    tracing::warn!(error = %err, team = %team.name, "team insert failed; rolling back to savepoint");
                    rolled_back = true;
                    break;
                }
            }
        }
        if rolled_back {
            savepoint.rollback().await.map_err(classify_db_err)?;
            created.clear();
        } else {
            savepoint.commit().await.map_err(classify_db_err)?;
        }

        txn.commit().await.map_err(classify_db_err)?;

        Ok((
            league_model.into(),
            created.into_iter().map(Into::into).collect(),
        ))
    }
}

// ===== Team Repository =====

pub struct SeaOrmTeamRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmTeamRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// Keyless row shape for `vw_teams_and_leagues`
#[derive(Debug, FromQueryResult)]
struct TeamLeagueViewRow {
    name: String,
    league_name: Option<String>,
}

#[async_trait]
impl TeamRepository for SeaOrmTeamRepository {
    async fn list(&self, filter: Option<&NameFilter>) -> Result<Vec<TeamSummary>> {
        let mut query = entity::team::Entity::find().find_also_related(entity::coach::Entity);
        if let Some(filter) = filter {
            query = query.filter(name_condition(entity::team::Column::Name, filter));
        }
        let results = query
            .order_by_asc(entity::team::Column::Name)
            .all(&*self.db)
            .await
            .map_err(classify_db_err)?;

        Ok(results
            .into_iter()
            .map(|(team, coach)| TeamSummary {
                id: team.id,
                name: team.name,
                coach_name: coach.map(|c| c.name),
            })
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Team>> {
        let result = entity::team::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(classify_db_err)?;

        Ok(result.map(|e| e.into()))
    }

    async fn find_details(&self, id: i32) -> Result<Option<TeamDetails>> {
        let Some(team) = entity::team::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(classify_db_err)?
        else {
            return Ok(None);
        };

        let coach = entity::coach::Entity::find()
            .filter(entity::coach::Column::TeamId.eq(team.id))
            .one(&*self.db)
            .await
            .map_err(classify_db_err)?;

        // Soft-deleted leagues stay hidden here as well.
        let league = match team.league_id {
            Some(league_id) => entity::league::Entity::find_by_id(league_id)
                .filter(entity::league::Column::IsDeleted.eq(false))
                .one(&*self.db)
                .await
                .map_err(classify_db_err)?,
            None => None,
        };

        Ok(Some(TeamDetails {
            team: team.into(),
            coach: coach.map(Into::into),
            league: league.map(Into::into),
        }))
    }

    async fn create_with_coach(
        &self,
        team: &NewTeam,
        coach: &CoachSpec,
        actor: &str,
    ) -> Result<TeamDetails> {
        let txn = self.db.begin().await.map_err(classify_db_err)?;

        let team_model = insert_team(&txn, team, actor).await?;

        let coach_model = match coach {
            CoachSpec::New(new_coach) => {
                let now = Utc::now();
                let active = entity::coach::ActiveModel {
                    name: Set(new_coach.name.clone()),
                    team_id: Set(Some(team_model.id)),
                    created_date: Set(now),
                    modified_date: Set(now),
                    created_by: Set(Some(actor.to_owned())),
                    modified_by: Set(Some(actor.to_owned())),
                    version: Set(Uuid::new_v4()),
                    ..Default::default()
                };
                entity::coach::Entity::insert(active)
                    .exec_with_returning(&txn)
                    .await
                    .map_err(classify_db_err)?
            }
            CoachSpec::Existing(coach_id) => {
                // Bind only when still unattached; a raced attachment shows
                // up as zero affected rows.
                let result = entity::coach::Entity::update_many()
                    .col_expr(
                        entity::coach::Column::TeamId,
                        Expr::value(Some(team_model.id)),
                    )
                    .col_expr(entity::coach::Column::ModifiedDate, Expr::value(Utc::now()))
                    .col_expr(
                        entity::coach::Column::ModifiedBy,
                        Expr::value(Some(actor.to_owned())),
                    )
                    .col_expr(entity::coach::Column::Version, Expr::value(Uuid::new_v4()))
                    .filter(entity::coach::Column::Id.eq(*coach_id))
                    .filter(entity::coach::Column::TeamId.is_null())
                    .exec(&txn)
                    .await
                    .map_err(classify_db_err)?;

                if result.rows_affected == 0 {
                    return Err(LeagueError::Constraint {
                        reason: format!("coach {coach_id} does not exist or already belongs to a team"),
                    });
                }

                entity::coach::Entity::find_by_id(*coach_id)
                    .one(&txn)
                    .await
                    .map_err(classify_db_err)?
                    .ok_or(LeagueError::Internal)?
            }
        };

        txn.commit().await.map_err(classify_db_err)?;

        let league = match team_model.league_id {
            Some(league_id) => entity::league::Entity::find_by_id(league_id)
                .filter(entity::league::Column::IsDeleted.eq(false))
                .one(&*self.db)
                .await
                .map_err(classify_db_err)?,
            None => None,
        };

        Ok(TeamDetails {
            team: team_model.into(),
            coach: Some(coach_model.into()),
            league: league.map(Into::into),
        })
    }

    async fn update(&self, id: i32, update: &TeamUpdate, actor: &str) -> Result<()> {
        let result = entity::team::Entity::update_many()
            .col_expr(entity::team::Column::Name, Expr::value(update.name.clone()))
            .col_expr(entity::team::Column::LeagueId, Expr::value(update.league_id))
            .col_expr(entity::team::Column::ModifiedDate, Expr::value(Utc::now()))
            .col_expr(
                entity::team::Column::ModifiedBy,
                Expr::value(Some(actor.to_owned())),
            )
            .col_expr(entity::team::Column::Version, Expr::value(Uuid::new_v4()))
            .filter(entity::team::Column::Id.eq(id))
            .filter(entity::team::Column::Version.eq(update.version))
            .exec(&*self.db)
            .await
            .map_err(classify_db_err)?;

        if result.rows_affected == 0 {
            let exists = entity::team::Entity::find_by_id(id)
                .count(&*self.db)
                .await
                .map_err(classify_db_err)?
                > 0;
            return Err(if exists {
                LeagueError::version_conflict("team", id)
            } else {
                LeagueError::not_found("team", id)
            });
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<()> {
        // Conditional delete: an absent id matches zero rows and still
        // succeeds. The coach goes with the team (cascade); a referencing
        // match blocks the delete (restrict).
        entity::team::Entity::delete_many()
            .filter(entity::team::Column::Id.eq(id))
            .exec(&*self.db)
            .await
            .map_err(classify_db_err)?;

        Ok(())
    }

    async fn list_with_leagues(&self) -> Result<Vec<TeamLeagueRow>> {
        let rows = TeamLeagueViewRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            "SELECT name, league_name FROM vw_teams_and_leagues ORDER BY name",
            [],
        ))
        .all(&*self.db)
        .await
        .map_err(classify_db_err)?;

        Ok(rows
            .into_iter()
            .map(|row| TeamLeagueRow {
                name: row.name,
                league_name: row.league_name,
            })
            .collect())
    }
}

// ===== Coach Repository =====

pub struct SeaOrmCoachRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCoachRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CoachRepository for SeaOrmCoachRepository {
    async fn list(&self, filter: Option<&NameFilter>) -> Result<Vec<Coach>> {
        let mut query = entity::coach::Entity::find();
        if let Some(filter) = filter {
            query = query.filter(name_condition(entity::coach::Column::Name, filter));
        }
        let results = query
            .order_by_asc(entity::coach::Column::Name)
            .all(&*self.db)
            .await
            .map_err(classify_db_err)?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Coach>> {
        let result = entity::coach::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(classify_db_err)?;

        Ok(result.map(|e| e.into()))
    }

    async fn create(&self, coach: &NewCoach, actor: &str) -> Result<Coach> {
        let now = Utc::now();
        let active = entity::coach::ActiveModel {
            name: Set(coach.name.clone()),
            team_id: Set(None),
            created_date: Set(now),
            modified_date: Set(now),
            created_by: Set(Some(actor.to_owned())),
            modified_by: Set(Some(actor.to_owned())),
            version: Set(Uuid::new_v4()),
            ..Default::default()
        };
        let model = entity::coach::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await
            .map_err(classify_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, id: i32, update: &CoachUpdate, actor: &str) -> Result<()> {
        let result = entity::coach::Entity::update_many()
            .col_expr(entity::coach::Column::Name, Expr::value(update.name.clone()))
            .col_expr(entity::coach::Column::ModifiedDate, Expr::value(Utc::now()))
            .col_expr(
                entity::coach::Column::ModifiedBy,
                Expr::value(Some(actor.to_owned())),
            )
            .col_expr(entity::coach::Column::Version, Expr::value(Uuid::new_v4()))
            .filter(entity::coach::Column::Id.eq(id))
            .filter(entity::coach::Column::Version.eq(update.version))
            .exec(&*self.db)
            .await
            .map_err(classify_db_err)?;

        if result.rows_affected == 0 {
            let exists = entity::coach::Entity::find_by_id(id)
                .count(&*self.db)
                .await
                .map_err(classify_db_err)?
                > 0;
            return Err(if exists {
                LeagueError::version_conflict("coach", id)
            } else {
                LeagueError::not_found("coach", id)
            });
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<()> {
        entity::coach::Entity::delete_many()
            .filter(entity::coach::Column::Id.eq(id))
            .exec(&*self.db)
            .await
            .map_err(classify_db_err)?;

        Ok(())
    }
}

// ===== Match Repository =====

pub struct SeaOrmMatchRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmMatchRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MatchRepository for SeaOrmMatchRepository {
    async fn list(&self, team_id: Option<i32>) -> Result<Vec<Match>> {
        let mut query = entity::matches::Entity::find();
        if let Some(team_id) = team_id {
            query = query.filter(
                entity::matches::Column::HomeTeamId
                    .eq(team_id)
                    .or(entity::matches::Column::AwayTeamId.eq(team_id)),
            );
        }
        let results = query
            .order_by_asc(entity::matches::Column::Date)
            .all(&*self.db)
            .await
            .map_err(classify_db_err)?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Match>> {
        let result = entity::matches::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(classify_db_err)?;

        Ok(result.map(|e| e.into()))
    }

    async fn create(&self, m: &NewMatch, actor: &str) -> Result<Match> {
        let now = Utc::now();
        let active = entity::matches::ActiveModel {
            home_team_id: Set(m.home_team_id),
            away_team_id: Set(m.away_team_id),
            home_team_score: Set(m.home_team_score),
            away_team_score: Set(m.away_team_score),
            ticket_price: Set(m.ticket_price),
            date: Set(m.date),
            created_date: Set(now),
            modified_date: Set(now),
            created_by: Set(Some(actor.to_owned())),
            modified_by: Set(Some(actor.to_owned())),
            version: Set(Uuid::new_v4()),
            ..Default::default()
        };
        let model = entity::matches::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await
            .map_err(classify_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, id: i32, update: &MatchUpdate, actor: &str) -> Result<()> {
        let result = entity::matches::Entity::update_many()
            .col_expr(
                entity::matches::Column::HomeTeamId,
                Expr::value(update.home_team_id),
            )
            .col_expr(
                entity::matches::Column::AwayTeamId,
                Expr::value(update.away_team_id),
            )
            .col_expr(
                entity::matches::Column::HomeTeamScore,
                Expr::value(update.home_team_score),
            )
            .col_expr(
                entity::matches::Column::AwayTeamScore,
                Expr::value(update.away_team_score),
            )
            .col_expr(
                entity::matches::Column::TicketPrice,
                Expr::value(update.ticket_price),
            )
            .col_expr(entity::matches::Column::Date, Expr::value(update.date))
            .col_expr(entity::matches::Column::ModifiedDate, Expr::value(Utc::now()))
            .col_expr(
                entity::matches::Column::ModifiedBy,
                Expr::value(Some(actor.to_owned())),
            )
            .col_expr(entity::matches::Column::Version, Expr::value(Uuid::new_v4()))
            .filter(entity::matches::Column::Id.eq(id))
            .filter(entity::matches::Column::Version.eq(update.version))
            .exec(&*self.db)
            .await
            .map_err(classify_db_err)?;

        if result.rows_affected == 0 {
            let exists = entity::matches::Entity::find_by_id(id)
                .count(&*self.db)
                .await
                .map_err(classify_db_err)?
                > 0;
            return Err(if exists {
                LeagueError::version_conflict("match", id)
            } else {
                LeagueError::not_found("match", id)
            });
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<()> {
        entity::matches::Entity::delete_many()
            .filter(entity::matches::Column::Id.eq(id))
            .exec(&*self.db)
            .await
            .map_err(classify_db_err)?;

        Ok(())
    }

    async fn earliest_for_team(&self, _team_id: i32) -> Result<DateTime<Utc>> {
        // fn_get_earliest_match is declared in the schema contract but only
        // exists in hosted deployments; there is no SQLite counterpart.
        Err(LeagueError::NotImplemented {
            feature: "fn_get_earliest_match",
        })
    }
}

//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models. The flat audit
//! columns of each table fold into the shared `Audit` composition.

use super::entity;
use crate::contract::{Audit, Coach, League, Match, Team};

impl From<entity::league::Model> for League {
    fn from(entity: entity::league::Model) -> Self {
        Self {
            audit: Audit {
                id: entity.id,
                created_date: entity.created_date,
                modified_date: entity.modified_date,
                created_by: entity.created_by,
                modified_by: entity.modified_by,
                version: entity.version,
            },
            name: entity.name,
            is_deleted: entity.is_deleted,
        }
    }
}

impl From<entity::team::Model> for Team {
    fn from(entity: entity::team::Model) -> Self {
        Self {
            audit: Audit {
                id: entity.id,
                created_date: entity.created_date,
                modified_date: entity.modified_date,
                created_by: entity.created_by,
                modified_by: entity.modified_by,
                version: entity.version,
            },
            name: entity.name,
            league_id: entity.league_id,
        }
    }
}

impl From<entity::coach::Model> for Coach {
    fn from(entity: entity::coach::Model) -> Self {
        Self {
            audit: Audit {
                id: entity.id,
                created_date: entity.created_date,
                modified_date: entity.modified_date,
                created_by: entity.created_by,
                modified_by: entity.modified_by,
                version: entity.version,
            },
            name: entity.name,
            team_id: entity.team_id,
        }
    }
}

impl From<entity::matches::Model> for Match {
    fn from(entity: entity::matches::Model) -> Self {
        Self {
            audit: Audit {
                id: entity.id,
                created_date: entity.created_date,
                modified_date: entity.modified_date,
                created_by: entity.created_by,
                modified_by: entity.modified_by,
                version: entity.version,
            },
            home_team_id: entity.home_team_id,
            away_team_id: entity.away_team_id,
            home_team_score: entity.home_team_score,
            away_team_score: entity.away_team_score,
            ticket_price: entity.ticket_price,
            date: entity.date,
        }
    }
}

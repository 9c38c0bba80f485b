//! Database migrations for the league service

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_leagues::Migration),
            Box::new(m20240601_000002_create_teams::Migration),
            Box::new(m20240601_000003_create_coaches::Migration),
            Box::new(m20240601_000004_create_matches::Migration),
            Box::new(m20240601_000005_create_teams_and_leagues_view::Migration),
            Box::new(m20240601_000006_seed_league_data::Migration),
        ]
    }
}

mod m20240601_000001_create_leagues {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Leagues::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Leagues::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Leagues::Name).string_len(100).not_null())
                        .col(
                            ColumnDef::new(Leagues::IsDeleted)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Leagues::CreatedDate)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(Leagues::ModifiedDate)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(ColumnDef::new(Leagues::CreatedBy).string())
                        .col(ColumnDef::new(Leagues::ModifiedBy).string())
                        .col(ColumnDef::new(Leagues::Version).uuid().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Leagues::Table).to_owned())
                .await
        }
    }
}

mod m20240601_000002_create_teams {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Teams::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Teams::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Teams::Name)
                                .string_len(100)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Teams::LeagueId).integer())
                        .col(
                            ColumnDef::new(Teams::CreatedDate)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(Teams::ModifiedDate)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(ColumnDef::new(Teams::CreatedBy).string())
                        .col(ColumnDef::new(Teams::ModifiedBy).string())
                        .col(ColumnDef::new(Teams::Version).uuid().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_teams_league")
                                .from(Teams::Table, Teams::LeagueId)
                                .to(Leagues::Table, Leagues::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_teams_league_id")
                        .table(Teams::Table)
                        .col(Teams::LeagueId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Teams::Table).to_owned())
                .await
        }
    }
}

mod m20240601_000003_create_coaches {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Coaches::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Coaches::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Coaches::Name).string_len(100).not_null())
                        .col(ColumnDef::new(Coaches::TeamId).integer())
                        .col(
                            ColumnDef::new(Coaches::CreatedDate)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(Coaches::ModifiedDate)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(ColumnDef::new(Coaches::CreatedBy).string())
                        .col(ColumnDef::new(Coaches::ModifiedBy).string())
                        .col(ColumnDef::new(Coaches::Version).uuid().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_coaches_team")
                                .from(Coaches::Table, Coaches::TeamId)
                                .to(Teams::Table, Teams::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            // Strict 1:1 pairing: a coach belongs to at most one team
            manager
                .create_index(
                    Index::create()
                        .name("uq_coaches_team_id")
                        .table(Coaches::Table)
                        .col(Coaches::TeamId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Coaches::Table).to_owned())
                .await
        }
    }
}

mod m20240601_000004_create_matches {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Matches::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Matches::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Matches::HomeTeamId).integer().not_null())
                        .col(ColumnDef::new(Matches::AwayTeamId).integer().not_null())
                        .col(
                            ColumnDef::new(Matches::HomeTeamScore)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Matches::AwayTeamScore)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Matches::TicketPrice)
                                .decimal_len(16, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Matches::Date)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Matches::CreatedDate)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(Matches::ModifiedDate)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(ColumnDef::new(Matches::CreatedBy).string())
                        .col(ColumnDef::new(Matches::ModifiedBy).string())
                        .col(ColumnDef::new(Matches::Version).uuid().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_matches_home_team")
                                .from(Matches::Table, Matches::HomeTeamId)
                                .to(Teams::Table, Teams::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_matches_away_team")
                                .from(Matches::Table, Matches::AwayTeamId)
                                .to(Teams::Table, Teams::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_matches_home_team_id")
                        .table(Matches::Table)
                        .col(Matches::HomeTeamId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_matches_away_team_id")
                        .table(Matches::Table)
                        .col(Matches::AwayTeamId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Matches::Table).to_owned())
                .await
        }
    }
}

mod m20240601_000005_create_teams_and_leagues_view {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .get_connection()
                .execute_unprepared(
                    "CREATE VIEW vw_teams_and_leagues AS \
                     SELECT t.name AS name, l.name AS league_name \
                     FROM teams AS t \
                     LEFT JOIN leagues AS l ON t.league_id = l.id",
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .get_connection()
                .execute_unprepared("DROP VIEW vw_teams_and_leagues")
                .await?;

            Ok(())
        }
    }
}

mod m20240601_000006_seed_league_data {
    use super::*;
    use uuid::Uuid;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    const SEED_ACTOR: &str = "seed";

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            let mut leagues = Query::insert()
                .into_table(Leagues::Table)
                .columns([
                    Leagues::Id,
                    Leagues::Name,
                    Leagues::CreatedBy,
                    Leagues::ModifiedBy,
                    Leagues::Version,
                ])
                .to_owned();
            for (id, name) in [
                (1, "Jamaica Premiere League"),
                (2, "English Premiere League"),
                (3, "La Liga"),
            ] {
                leagues.values_panic([
                    id.into(),
                    name.into(),
                    SEED_ACTOR.into(),
                    SEED_ACTOR.into(),
                    Uuid::new_v4().into(),
                ]);
            }
            manager.exec_stmt(leagues).await?;

            let mut teams = Query::insert()
                .into_table(Teams::Table)
                .columns([
                    Teams::Id,
                    Teams::Name,
                    Teams::LeagueId,
                    Teams::CreatedBy,
                    Teams::ModifiedBy,
                    Teams::Version,
                ])
                .to_owned();
            for (id, name) in [
                (1, "Tivoli Gardens F.C."),
                (2, "Waterhouse F.C."),
                (3, "Humble Lions F.C."),
            ] {
                teams.values_panic([
                    id.into(),
                    name.into(),
                    1.into(),
                    SEED_ACTOR.into(),
                    SEED_ACTOR.into(),
                    Uuid::new_v4().into(),
                ]);
            }
            manager.exec_stmt(teams).await?;

            let mut coaches = Query::insert()
                .into_table(Coaches::Table)
                .columns([
                    Coaches::Id,
                    Coaches::Name,
                    Coaches::TeamId,
                    Coaches::CreatedBy,
                    Coaches::ModifiedBy,
                    Coaches::Version,
                ])
                .to_owned();
            for (id, name, team_id) in [
                (1, "Jose Mourinho", 1),
                (2, "Pep Guardiola", 2),
                (3, "Trevoir Williams", 3),
            ] {
                coaches.values_panic([
                    id.into(),
                    name.into(),
                    team_id.into(),
                    SEED_ACTOR.into(),
                    SEED_ACTOR.into(),
                    Uuid::new_v4().into(),
                ]);
            }
            manager.exec_stmt(coaches).await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .exec_stmt(
                    Query::delete()
                        .from_table(Coaches::Table)
                        .and_where(Expr::col(Coaches::Id).is_in([1, 2, 3]))
                        .to_owned(),
                )
                .await?;
            manager
                .exec_stmt(
                    Query::delete()
                        .from_table(Teams::Table)
                        .and_where(Expr::col(Teams::Id).is_in([1, 2, 3]))
                        .to_owned(),
                )
                .await?;
            manager
                .exec_stmt(
                    Query::delete()
                        .from_table(Leagues::Table)
                        .and_where(Expr::col(Leagues::Id).is_in([1, 2, 3]))
                        .to_owned(),
                )
                .await?;

            Ok(())
        }
    }
}

#[derive(DeriveIden)]
enum Leagues {
    Table,
    Id,
    Name,
    IsDeleted,
    CreatedDate,
    ModifiedDate,
    CreatedBy,
    ModifiedBy,
    Version,
}

#[derive(DeriveIden)]
enum Teams {
    Table,
    Id,
    Name,
    LeagueId,
    CreatedDate,
    ModifiedDate,
    CreatedBy,
    ModifiedBy,
    Version,
}

#[derive(DeriveIden)]
enum Coaches {
    Table,
    Id,
    Name,
    TeamId,
    CreatedDate,
    ModifiedDate,
    CreatedBy,
    ModifiedBy,
    Version,
}

#[derive(DeriveIden)]
enum Matches {
    Table,
    Id,
    HomeTeamId,
    AwayTeamId,
    HomeTeamScore,
    AwayTeamScore,
    TicketPrice,
    Date,
    CreatedDate,
    ModifiedDate,
    CreatedBy,
    ModifiedBy,
    Version,
}

//! SeaORM entities for database tables
//!
//! Every table carries the shared audit columns (created/modified stamps and
//! the `version` concurrency token) alongside its own fields.

/// Leagues table entity
pub mod league {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "leagues")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,

        /// League name (required, max length 100)
        pub name: String,

        /// Soft-delete marker; hidden from default reads when set
        pub is_deleted: bool,

        pub created_date: DateTimeUtc,
        pub modified_date: DateTimeUtc,
        pub created_by: Option<String>,
        pub modified_by: Option<String>,

        /// Optimistic-concurrency token
        pub version: Uuid,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// One-to-many relationship with teams
        #[sea_orm(has_many = "super::team::Entity")]
        Teams,
    }

    impl Related<super::team::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Teams.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Teams table entity
pub mod team {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "teams")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,

        /// Team name (required, max length 100, globally unique)
        #[sea_orm(unique)]
        pub name: String,

        /// Optional league membership; set to NULL when the league is removed
        pub league_id: Option<i32>,

        pub created_date: DateTimeUtc,
        pub modified_date: DateTimeUtc,
        pub created_by: Option<String>,
        pub modified_by: Option<String>,

        /// Optimistic-concurrency token
        pub version: Uuid,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// Foreign key to leagues
        #[sea_orm(
            belongs_to = "super::league::Entity",
            from = "Column::LeagueId",
            to = "super::league::Column::Id"
        )]
        League,
        /// One-to-one relationship with coaches
        #[sea_orm(has_one = "super::coach::Entity")]
        Coach,
    }

    impl Related<super::league::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::League.def()
        }
    }

    impl Related<super::coach::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Coach.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Coaches table entity
pub mod coach {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "coaches")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,

        /// Coach name (required, max length 100)
        pub name: String,

        /// Owning team; unique so a coach belongs to at most one team
        #[sea_orm(unique)]
        pub team_id: Option<i32>,

        pub created_date: DateTimeUtc,
        pub modified_date: DateTimeUtc,
        pub created_by: Option<String>,
        pub modified_by: Option<String>,

        /// Optimistic-concurrency token
        pub version: Uuid,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// Foreign key to teams; deleting a team deletes its coach
        #[sea_orm(
            belongs_to = "super::team::Entity",
            from = "Column::TeamId",
            to = "super::team::Column::Id"
        )]
        Team,
    }

    impl Related<super::team::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Team.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Matches table entity
pub mod matches {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "matches")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,

        /// Home team; deletion of a referenced team is restricted
        pub home_team_id: i32,

        /// Away team; deletion of a referenced team is restricted
        pub away_team_id: i32,

        pub home_team_score: i32,
        pub away_team_score: i32,

        /// Ticket price, 16 total digits / 2 decimal
        #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
        pub ticket_price: Decimal,

        pub date: DateTimeUtc,

        pub created_date: DateTimeUtc,
        pub modified_date: DateTimeUtc,
        pub created_by: Option<String>,
        pub modified_by: Option<String>,

        /// Optimistic-concurrency token
        pub version: Uuid,
    }

    // Two links to the same table: no `Related` impl, repositories filter on
    // the explicit columns instead.
    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::team::Entity",
            from = "Column::HomeTeamId",
            to = "super::team::Column::Id"
        )]
        HomeTeam,
        #[sea_orm(
            belongs_to = "super::team::Entity",
            from = "Column::AwayTeamId",
            to = "super::team::Column::Id"
        )]
        AwayTeam,
    }

    impl ActiveModelBehavior for ActiveModel {}
}

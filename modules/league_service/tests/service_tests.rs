//! Integration tests for the league domain service over mock repositories

use league_service::contract::*;
use rust_decimal::Decimal;

mod common;
use common::mock_service;

const ACTOR: &str = "tester";

fn new_team(name: &str) -> NewTeam {
    NewTeam {
        name: name.to_string(),
        league_id: None,
    }
}

fn nested_coach(name: &str) -> CoachSpec {
    CoachSpec::New(NewCoach {
        name: name.to_string(),
    })
}

// ===== Team creation =====

#[tokio::test]
async fn create_team_assigns_audit_fields_and_version() {
    let (service, _store) = mock_service();

    let details = service
        .create_team(new_team("Test FC"), nested_coach("Coach X"), ACTOR)
        .await
        .unwrap();

    assert!(details.team.audit.id > 0);
    assert_eq!(details.team.audit.created_by.as_deref(), Some(ACTOR));
    assert_eq!(details.team.audit.modified_by.as_deref(), Some(ACTOR));
    assert!(!details.team.audit.version.is_nil());

    let coach = details.coach.expect("nested coach should be created");
    assert_eq!(coach.name, "Coach X");
    assert_eq!(coach.team_id, Some(details.team.audit.id));
}

#[tokio::test]
async fn create_team_with_duplicate_name_is_a_constraint_violation() {
    let (service, store) = mock_service();

    service
        .create_team(new_team("Tivoli Gardens F.C."), nested_coach("First"), ACTOR)
        .await
        .unwrap();

    let err = service
        .create_team(
            new_team("Tivoli Gardens F.C."),
            nested_coach("Second"),
            ACTOR,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, LeagueError::Constraint { .. }));
    assert_eq!(store.team_count(), 1);
}

#[tokio::test]
async fn create_team_rejects_blank_and_overlong_names() {
    let (service, _store) = mock_service();

    let blank = service
        .create_team(new_team("   "), nested_coach("Coach"), ACTOR)
        .await
        .unwrap_err();
    assert!(matches!(blank, LeagueError::Validation { .. }));

    let overlong = service
        .create_team(new_team(&"x".repeat(101)), nested_coach("Coach"), ACTOR)
        .await
        .unwrap_err();
    assert!(matches!(overlong, LeagueError::Validation { .. }));
}

#[tokio::test]
async fn create_team_binds_an_existing_unattached_coach() {
    let (service, _store) = mock_service();

    let coach = service
        .create_coach(
            NewCoach {
                name: "Free Agent".to_string(),
            },
            ACTOR,
        )
        .await
        .unwrap();
    assert_eq!(coach.team_id, None);

    let details = service
        .create_team(
            new_team("Binders FC"),
            CoachSpec::Existing(coach.audit.id),
            ACTOR,
        )
        .await
        .unwrap();

    let bound = details.coach.expect("existing coach should be bound");
    assert_eq!(bound.audit.id, coach.audit.id);
    assert_eq!(bound.team_id, Some(details.team.audit.id));
}

#[tokio::test]
async fn create_team_rejects_a_coach_already_attached_elsewhere() {
    let (service, store) = mock_service();

    let details = service
        .create_team(new_team("First FC"), nested_coach("Taken"), ACTOR)
        .await
        .unwrap();
    let coach_id = details.coach.unwrap().audit.id;

    let err = service
        .create_team(new_team("Second FC"), CoachSpec::Existing(coach_id), ACTOR)
        .await
        .unwrap_err();

    assert!(matches!(err, LeagueError::Constraint { .. }));
    // The rejected team insert must not leave a row behind.
    assert_eq!(store.team_count(), 1);
    assert_eq!(store.coach_count(), 1);
}

// ===== Optimistic concurrency =====

#[tokio::test]
async fn update_with_stale_version_conflicts_and_fresh_version_succeeds() {
    let (service, _store) = mock_service();

    let details = service
        .create_team(new_team("Rotators"), nested_coach("Coach"), ACTOR)
        .await
        .unwrap();
    let id = details.team.audit.id;
    let first_version = details.team.audit.version;

    service
        .update_team(
            id,
            TeamUpdate {
                name: "Rotators Renamed".to_string(),
                league_id: None,
                version: first_version,
            },
            ACTOR,
        )
        .await
        .unwrap();

    // Replaying the original token must fail now that it has rotated.
    let stale = service
        .update_team(
            id,
            TeamUpdate {
                name: "Rotators Again".to_string(),
                league_id: None,
                version: first_version,
            },
            ACTOR,
        )
        .await
        .unwrap_err();
    assert!(matches!(stale, LeagueError::Conflict { .. }));

    let current = service.get_team(id).await.unwrap();
    assert_eq!(current.name, "Rotators Renamed");
    assert_ne!(current.audit.version, first_version);

    service
        .update_team(
            id,
            TeamUpdate {
                name: "Rotators Again".to_string(),
                league_id: None,
                version: current.audit.version,
            },
            ACTOR,
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn update_of_a_missing_team_is_not_found() {
    let (service, _store) = mock_service();

    let err = service
        .update_team(
            999,
            TeamUpdate {
                name: "Ghost".to_string(),
                league_id: None,
                version: uuid::Uuid::new_v4(),
            },
            ACTOR,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, LeagueError::NotFound { .. }));
}

// ===== League soft delete =====

#[tokio::test]
async fn soft_deleted_league_is_hidden_from_default_reads() {
    let (service, _store) = mock_service();

    let league = service
        .create_league(
            NewLeague {
                name: "Vanishing League".to_string(),
            },
            ACTOR,
        )
        .await
        .unwrap();
    let id = league.audit.id;

    service.delete_league(id, ACTOR).await.unwrap();

    assert!(service.list_leagues(false).await.unwrap().is_empty());
    let lookup = service.get_league(id, false).await.unwrap_err();
    assert!(matches!(lookup, LeagueError::NotFound { .. }));

    // The explicit override still sees the flagged row.
    let all = service.list_leagues(true).await.unwrap();
    assert_eq!(all.len(), 1);
    assert!(all[0].is_deleted);
    let found = service.get_league(id, true).await.unwrap();
    assert!(found.is_deleted);
}

#[tokio::test]
async fn league_delete_is_idempotent() {
    let (service, _store) = mock_service();

    let league = service
        .create_league(
            NewLeague {
                name: "Twice Deleted".to_string(),
            },
            ACTOR,
        )
        .await
        .unwrap();

    service.delete_league(league.audit.id, ACTOR).await.unwrap();
    service.delete_league(league.audit.id, ACTOR).await.unwrap();
    service.delete_league(12345, ACTOR).await.unwrap();
}

#[tokio::test]
async fn teams_of_a_soft_deleted_league_are_not_served() {
    let (service, _store) = mock_service();

    let league = service
        .create_league(
            NewLeague {
                name: "Folding League".to_string(),
            },
            ACTOR,
        )
        .await
        .unwrap();
    service
        .create_team(
            NewTeam {
                name: "Member FC".to_string(),
                league_id: Some(league.audit.id),
            },
            nested_coach("Coach"),
            ACTOR,
        )
        .await
        .unwrap();

    assert_eq!(service.league_teams(league.audit.id).await.unwrap().len(), 1);

    service.delete_league(league.audit.id, ACTOR).await.unwrap();

    let err = service.league_teams(league.audit.id).await.unwrap_err();
    assert!(matches!(err, LeagueError::NotFound { .. }));
}

// ===== Savepoint semantics =====

#[tokio::test]
async fn league_commits_even_when_its_team_inserts_roll_back() {
    let (service, store) = mock_service();

    service
        .create_team(new_team("Existing FC"), nested_coach("Coach"), ACTOR)
        .await
        .unwrap();

    let (league, teams) = service
        .create_league_with_teams(
            NewLeague {
                name: "Partial League".to_string(),
            },
            vec![new_team("Fresh FC"), new_team("Existing FC")],
            ACTOR,
        )
        .await
        .unwrap();

    assert_eq!(league.name, "Partial League");
    assert!(teams.is_empty(), "team inserts should have rolled back");
    assert_eq!(store.team_count(), 1);

    let listed = service.list_leagues(false).await.unwrap();
    assert!(listed.iter().any(|l| l.audit.id == league.audit.id));
}

#[tokio::test]
async fn league_with_unique_teams_creates_all_of_them() {
    let (service, _store) = mock_service();

    let (league, teams) = service
        .create_league_with_teams(
            NewLeague {
                name: "Full League".to_string(),
            },
            vec![new_team("Alpha FC"), new_team("Beta FC")],
            ACTOR,
        )
        .await
        .unwrap();

    assert_eq!(teams.len(), 2);
    assert!(teams.iter().all(|t| t.league_id == Some(league.audit.id)));
}

// ===== Team deletion =====

#[tokio::test]
async fn deleting_a_team_referenced_by_matches_is_restricted() {
    let (service, _store) = mock_service();

    let home = service
        .create_team(new_team("Home FC"), nested_coach("H"), ACTOR)
        .await
        .unwrap();
    let away = service
        .create_team(new_team("Away FC"), nested_coach("A"), ACTOR)
        .await
        .unwrap();

    service
        .create_match(
            NewMatch {
                home_team_id: home.team.audit.id,
                away_team_id: away.team.audit.id,
                home_team_score: 0,
                away_team_score: 0,
                ticket_price: Decimal::new(2550, 2),
                date: chrono::Utc::now(),
            },
            ACTOR,
        )
        .await
        .unwrap();

    let err = service.delete_team(home.team.audit.id).await.unwrap_err();
    assert!(matches!(err, LeagueError::Constraint { .. }));

    // The team is still there.
    service.get_team(home.team.audit.id).await.unwrap();
}

#[tokio::test]
async fn deleting_an_absent_team_succeeds() {
    let (service, _store) = mock_service();
    service.delete_team(424242).await.unwrap();
}

// ===== Matches =====

#[tokio::test]
async fn match_validation_rejects_self_play_and_negative_values() {
    let (service, _store) = mock_service();

    let base = NewMatch {
        home_team_id: 1,
        away_team_id: 2,
        home_team_score: 0,
        away_team_score: 0,
        ticket_price: Decimal::new(1000, 2),
        date: chrono::Utc::now(),
    };

    let self_play = service
        .create_match(
            NewMatch {
                away_team_id: 1,
                ..base.clone()
            },
            ACTOR,
        )
        .await
        .unwrap_err();
    assert!(matches!(self_play, LeagueError::Validation { .. }));

    let negative_score = service
        .create_match(
            NewMatch {
                home_team_score: -1,
                ..base.clone()
            },
            ACTOR,
        )
        .await
        .unwrap_err();
    assert!(matches!(negative_score, LeagueError::Validation { .. }));

    let negative_price = service
        .create_match(
            NewMatch {
                ticket_price: Decimal::NEGATIVE_ONE,
                ..base
            },
            ACTOR,
        )
        .await
        .unwrap_err();
    assert!(matches!(negative_price, LeagueError::Validation { .. }));
}

#[tokio::test]
async fn match_list_filters_by_participating_team() {
    let (service, _store) = mock_service();

    let a = service
        .create_team(new_team("A FC"), nested_coach("a"), ACTOR)
        .await
        .unwrap();
    let b = service
        .create_team(new_team("B FC"), nested_coach("b"), ACTOR)
        .await
        .unwrap();
    let c = service
        .create_team(new_team("C FC"), nested_coach("c"), ACTOR)
        .await
        .unwrap();

    let fixture = |home: i32, away: i32| NewMatch {
        home_team_id: home,
        away_team_id: away,
        home_team_score: 0,
        away_team_score: 0,
        ticket_price: Decimal::new(500, 2),
        date: chrono::Utc::now(),
    };

    let (a_id, b_id, c_id) = (a.team.audit.id, b.team.audit.id, c.team.audit.id);
    service.create_match(fixture(a_id, b_id), ACTOR).await.unwrap();
    service.create_match(fixture(b_id, c_id), ACTOR).await.unwrap();

    assert_eq!(service.list_matches(None).await.unwrap().len(), 2);
    assert_eq!(service.list_matches(Some(a_id)).await.unwrap().len(), 1);
    assert_eq!(service.list_matches(Some(b_id)).await.unwrap().len(), 2);
    assert_eq!(service.list_matches(Some(c_id)).await.unwrap().len(), 1);
}

#[tokio::test]
async fn earliest_match_lookup_reports_the_unimplemented_function() {
    let (service, _store) = mock_service();

    // Missing team wins over the function gap.
    let missing = service.earliest_team_match(99).await.unwrap_err();
    assert!(matches!(missing, LeagueError::NotFound { .. }));

    let team = service
        .create_team(new_team("Early FC"), nested_coach("e"), ACTOR)
        .await
        .unwrap();
    let err = service
        .earliest_team_match(team.team.audit.id)
        .await
        .unwrap_err();
    assert!(matches!(err, LeagueError::NotImplemented { .. }));
}

// ===== Listings and projections =====

#[tokio::test]
async fn team_listing_projects_the_coach_name_and_honors_filters() {
    let (service, _store) = mock_service();

    service
        .create_team(new_team("Arsenal"), nested_coach("Arteta"), ACTOR)
        .await
        .unwrap();
    service
        .create_team(new_team("Aston Villa"), nested_coach("Emery"), ACTOR)
        .await
        .unwrap();

    let all = service.list_teams(None).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].coach_name.as_deref(), Some("Arteta"));

    let exact = service
        .list_teams(Some(NameFilter::Exact("Arsenal".to_string())))
        .await
        .unwrap();
    assert_eq!(exact.len(), 1);

    let contains = service
        .list_teams(Some(NameFilter::Contains("Aston".to_string())))
        .await
        .unwrap();
    assert_eq!(contains.len(), 1);
    assert_eq!(contains[0].name, "Aston Villa");
}

#[tokio::test]
async fn teams_with_leagues_view_pairs_names() {
    let (service, _store) = mock_service();

    let league = service
        .create_league(
            NewLeague {
                name: "Premier".to_string(),
            },
            ACTOR,
        )
        .await
        .unwrap();
    service
        .create_team(
            NewTeam {
                name: "Paired FC".to_string(),
                league_id: Some(league.audit.id),
            },
            nested_coach("p"),
            ACTOR,
        )
        .await
        .unwrap();
    service
        .create_team(new_team("Loner FC"), nested_coach("l"), ACTOR)
        .await
        .unwrap();

    let rows = service.teams_with_leagues().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Loner FC");
    assert_eq!(rows[0].league_name, None);
    assert_eq!(rows[1].name, "Paired FC");
    assert_eq!(rows[1].league_name.as_deref(), Some("Premier"));
}

#[tokio::test]
async fn team_details_load_coach_and_league() {
    let (service, _store) = mock_service();

    let league = service
        .create_league(
            NewLeague {
                name: "Detail League".to_string(),
            },
            ACTOR,
        )
        .await
        .unwrap();
    let created = service
        .create_team(
            NewTeam {
                name: "Detailed FC".to_string(),
                league_id: Some(league.audit.id),
            },
            nested_coach("Detail Coach"),
            ACTOR,
        )
        .await
        .unwrap();

    let details = service.get_team_details(created.team.audit.id).await.unwrap();
    assert_eq!(details.coach.unwrap().name, "Detail Coach");
    assert_eq!(details.league.unwrap().name, "Detail League");
}

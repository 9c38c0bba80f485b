//! Interactive console exercising the data-access layer directly
//!
//! No flags: a numbered menu of routines, each driving the domain service
//! against the same store the API uses. Some routines prompt on stdin.

use anyhow::{Context, Result};
use league_service::build_service;
use league_service::contract::{CoachSpec, LeagueError, NameFilter, NewCoach, NewLeague, NewTeam};
use league_service::domain::Service;
use league_service::infra::storage::migrations::Migrator;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use std::io::{self, Write};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const ACTOR: &str = "console";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .compact()
        .init();

    let database_url = std::env::var("LEAGUE_DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://football_league.db?mode=rwc".to_string());
    let db = Arc::new(
        Database::connect(&database_url)
            .await
            .context("failed to connect to database")?,
    );
    Migrator::up(db.as_ref(), None).await?;

    let service = build_service(db);

    loop {
        println!();
        println!("1) list teams");
        println!("2) find team by name");
        println!("3) create team with coach");
        println!("4) soft-delete a league");
        println!("5) concurrency token demonstration");
        println!("6) league with teams (savepoint) demonstration");
        println!("7) teams and leagues view");
        println!("8) earliest match lookup");
        println!("q) quit");

        match prompt("choice")?.as_str() {
            "1" => list_teams(&service).await?,
            "2" => find_team_by_name(&service).await?,
            "3" => create_team_with_coach(&service).await?,
            "4" => soft_delete_league(&service).await?,
            "5" => concurrency_demo(&service).await?,
            "6" => savepoint_demo(&service).await?,
            "7" => teams_and_leagues_view(&service).await?,
            "8" => earliest_match(&service).await?,
            "q" | "Q" => break,
            other => println!("unknown choice: {other}"),
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

async fn list_teams(service: &Service) -> Result<()> {
    let teams = service.list_teams(None).await?;
    println!("{} team(s)", teams.len());
    for team in teams {
        let coach = team.coach_name.unwrap_or_else(|| "(no coach)".to_string());
        println!("  {:>3}  {} - {}", team.id, team.name, coach);
    }
    Ok(())
}

async fn find_team_by_name(service: &Service) -> Result<()> {
    let name = prompt("team name")?;
    let teams = service
        .list_teams(Some(NameFilter::Contains(name)))
        .await?;
    if teams.is_empty() {
        println!("no matching teams");
    }
    for team in teams {
        println!("  {:>3}  {}", team.id, team.name);
    }
    Ok(())
}

async fn create_team_with_coach(service: &Service) -> Result<()> {
    let team_name = prompt("team name")?;
    let coach_name = prompt("coach name")?;
    let result = service
        .create_team(
            NewTeam {
                name: team_name,
                league_id: None,
            },
            CoachSpec::New(NewCoach { name: coach_name }),
            ACTOR,
        )
        .await;

    match result {
        Ok(details) => {
            println!(
                "created team {} (id {}, version {})",
                details.team.name, details.team.audit.id, details.team.audit.version
            );
        }
        Err(err) => println!("create failed: {err}"),
    }
    Ok(())
}

async fn soft_delete_league(service: &Service) -> Result<()> {
    println!("leagues before:");
    for league in service.list_leagues(false).await? {
        println!("  {:>3}  {}", league.audit.id, league.name);
    }

    let id: i32 = prompt("league id to soft-delete")?
        .parse()
        .context("not a number")?;
    service.delete_league(id, ACTOR).await?;

    println!("leagues after (filter hides the deleted record):");
    for league in service.list_leagues(false).await? {
        println!("  {:>3}  {}", league.audit.id, league.name);
    }

    println!("leagues with the soft-delete override:");
    for league in service.list_leagues(true).await? {
        let marker = if league.is_deleted { " [deleted]" } else { "" };
        println!("  {:>3}  {}{}", league.audit.id, league.name, marker);
    }
    Ok(())
}

async fn concurrency_demo(service: &Service) -> Result<()> {
    let id: i32 = prompt("team id")?.parse().context("not a number")?;
    let team = service.get_team(id).await?;
    let stale = team.audit.version;
    println!("read version {stale}");

    service
        .update_team(
            id,
            league_service::contract::TeamUpdate {
                name: team.name.clone(),
                league_id: team.league_id,
                version: stale,
            },
            ACTOR,
        )
        .await?;
    println!("first update applied; the stored token has rotated");

    let second = service
        .update_team(
            id,
            league_service::contract::TeamUpdate {
                name: team.name,
                league_id: team.league_id,
                version: stale,
            },
            ACTOR,
        )
        .await;
    match second {
        Err(LeagueError::Conflict { reason }) => println!("second update rejected: {reason}"),
        Err(err) => println!("second update failed differently: {err}"),
        Ok(()) => println!("unexpected: second update went through"),
    }
    Ok(())
}

async fn savepoint_demo(service: &Service) -> Result<()> {
    // The duplicate team name fails the dependent insert; the savepoint
    // taken after the league insert lets the league commit regardless.
    let league_name = prompt("new league name")?;
    let (league, teams) = service
        .create_league_with_teams(
            NewLeague { name: league_name },
            vec![
                NewTeam {
                    name: prompt("first team name")?,
                    league_id: None,
                },
                NewTeam {
                    name: "Tivoli Gardens F.C.".to_string(),
                    league_id: None,
                },
            ],
            ACTOR,
        )
        .await?;

    println!("league {} committed (id {})", league.name, league.audit.id);
    if teams.is_empty() {
        println!("team inserts rolled back to the savepoint");
    } else {
        for team in teams {
            println!("  created team {}", team.name);
        }
    }
    Ok(())
}

async fn teams_and_leagues_view(service: &Service) -> Result<()> {
    for row in service.teams_with_leagues().await? {
        let league = row.league_name.unwrap_or_else(|| "(no league)".to_string());
        println!("  {} - {}", row.name, league);
    }
    Ok(())
}

async fn earliest_match(service: &Service) -> Result<()> {
    let id: i32 = prompt("team id")?.parse().context("not a number")?;
    match service.earliest_team_match(id).await {
        Ok(date) => println!("earliest match: {date}"),
        Err(err) => println!("lookup failed: {err}"),
    }
    Ok(())
}

//! Route registration

use super::handlers;
use crate::domain::Service;
use axum::{
    routing::{delete, get, post, put},
    Extension, Router,
};
use std::sync::Arc;

/// Build the REST router with all endpoints
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        // League endpoints
        .route("/leagues", get(handlers::list_leagues))
        .route("/leagues", post(handlers::create_league))
        .route("/leagues/{id}", get(handlers::get_league))
        .route("/leagues/{id}", put(handlers::update_league))
        .route("/leagues/{id}", delete(handlers::delete_league))
        .route("/leagues/{id}/teams", get(handlers::get_league_teams))
        // Team endpoints; the static path goes first so it is not shadowed
        .route("/teams/with-leagues", get(handlers::teams_with_leagues))
        .route("/teams", get(handlers::list_teams))
        .route("/teams", post(handlers::create_team))
        .route("/teams/{id}", get(handlers::get_team))
        .route("/teams/{id}", put(handlers::update_team))
        .route("/teams/{id}", delete(handlers::delete_team))
        .route(
            "/teams/{id}/earliest-match",
            get(handlers::team_earliest_match),
        )
        // Coach endpoints
        .route("/coaches", get(handlers::list_coaches))
        .route("/coaches", post(handlers::create_coach))
        .route("/coaches/{id}", get(handlers::get_coach))
        .route("/coaches/{id}", put(handlers::update_coach))
        .route("/coaches/{id}", delete(handlers::delete_coach))
        // Match endpoints
        .route("/matches", get(handlers::list_matches))
        .route("/matches", post(handlers::create_match))
        .route("/matches/{id}", get(handlers::get_match))
        .route("/matches/{id}", put(handlers::update_match))
        .route("/matches/{id}", delete(handlers::delete_match))
        // Service shared with handlers through an extension
        .layer(Extension(service))
}

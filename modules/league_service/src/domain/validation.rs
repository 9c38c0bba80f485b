//! Input validation for write operations
//!
//! Field constraints are checked here before any store call; the store's own
//! unique and foreign-key constraints are still the final authority.

use crate::contract::LeagueError;
use rust_decimal::Decimal;

/// Maximum length for league, team and coach names
pub const MAX_NAME_LEN: usize = 100;

/// Require a non-empty name within the length limit.
pub fn require_name(field: &'static str, value: &str) -> Result<(), LeagueError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LeagueError::Validation {
            message: format!("{field} is required"),
        });
    }
    if value.chars().count() > MAX_NAME_LEN {
        return Err(LeagueError::Validation {
            message: format!("{field} exceeds maximum length of {MAX_NAME_LEN}"),
        });
    }
    Ok(())
}

/// Validate the fields of a match write.
pub fn validate_match(
    home_team_id: i32,
    away_team_id: i32,
    home_team_score: i32,
    away_team_score: i32,
    ticket_price: Decimal,
) -> Result<(), LeagueError> {
    if home_team_id == away_team_id {
        return Err(LeagueError::Validation {
            message: "a team cannot play itself".to_string(),
        });
    }
    if home_team_score < 0 || away_team_score < 0 {
        return Err(LeagueError::Validation {
            message: "scores cannot be negative".to_string(),
        });
    }
    if ticket_price < Decimal::ZERO {
        return Err(LeagueError::Validation {
            message: "ticket price cannot be negative".to_string(),
        });
    }
    Ok(())
}

//! Errors raised by the scoring engine and by result validation.

use crate::models::game::{MatchFormat, Team};
use crate::models::session::MAX_TARGET_SCORE;
use thiserror::Error;

/// Errors that can occur while running a scoring session.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ScoringError {
    /// The session could not be started with the given settings.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigurationError),

    /// The operation is not allowed in the session's current state.
    #[error("Illegal operation: {0}")]
    IllegalOperation(#[from] IllegalOperation),
}

/// Rejected session settings.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("{format} needs {expected} player(s) on team {team}, got {got}")]
    RosterSize {
        team: Team,
        format: MatchFormat,
        expected: usize,
        got: usize,
    },

    #[error("Target score must be between 1 and {}", MAX_TARGET_SCORE)]
    TargetScore,

    #[error("Invalid player name: {0}")]
    PlayerName(#[from] ValidationError),

    #[error("{0} appears more than once in the line-up")]
    DuplicatePlayer(String),
}

/// Operations refused because of session state or bad input.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum IllegalOperation {
    #[error("Game is already over")]
    GameOver,

    #[error("Game is not finished yet")]
    GameNotComplete,

    #[error("Unknown team: {0:?}")]
    UnknownTeam(String),
}

/// Match data that fails the name or line-up rules.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ValidationError {
    #[error("Name must not be empty")]
    EmptyName,

    #[error("Name must not exceed {max} characters")]
    NameTooLong { max: usize },

    #[error("Name contains invalid characters: {0:?}")]
    InvalidCharacters(String),

    #[error("Match type must be one of: singles, doubles (got {0:?})")]
    UnknownFormat(String),

    #[error("Need at least one winner and one loser")]
    MissingPlayers,

    #[error("{format} match must have exactly {expected} winner(s) and {expected} loser(s)")]
    WrongPlayerCount { format: MatchFormat, expected: usize },

    #[error("{0} is listed twice on the same side")]
    DuplicatePlayer(String),

    #[error("{0} cannot be both a winner and a loser")]
    PlayerOnBothSides(String),
}

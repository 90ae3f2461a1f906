//! Team, MatchFormat and court sides for 1v1 / 2v2 games.

use crate::models::error::{IllegalOperation, ScoringError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two sides of the net.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Team {
    #[default]
    A,
    B,
}

impl Team {
    pub const BOTH: [Team; 2] = [Team::A, Team::B];

    /// Parse a team identifier sent by a client ("A"/"B", any case).
    pub fn parse(s: &str) -> Result<Self, ScoringError> {
        match s.trim() {
            "A" | "a" => Ok(Team::A),
            "B" | "b" => Ok(Team::B),
            other => Err(IllegalOperation::UnknownTeam(other.to_string()).into()),
        }
    }

    pub fn other(self) -> Self {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }

    /// Default label for an unnamed roster slot, e.g. `A1` or `B2`.
    pub fn slot_label(self, slot: usize) -> String {
        format!("{}{}", self, slot + 1)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::A => write!(f, "A"),
            Team::B => write!(f, "B"),
        }
    }
}

/// Singles (1v1) or doubles (2v2).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFormat {
    Singles,
    #[default]
    Doubles,
}

impl MatchFormat {
    /// Players per team.
    pub fn players_per_team(self) -> usize {
        match self {
            MatchFormat::Singles => 1,
            MatchFormat::Doubles => 2,
        }
    }

    /// Tag stored in match history ("Singles" / "Doubles").
    pub fn history_tag(self) -> &'static str {
        match self {
            MatchFormat::Singles => "Singles",
            MatchFormat::Doubles => "Doubles",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "singles" => Ok(MatchFormat::Singles),
            "doubles" => Ok(MatchFormat::Doubles),
            _ => Err(ValidationError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for MatchFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchFormat::Singles => write!(f, "singles"),
            MatchFormat::Doubles => write!(f, "doubles"),
        }
    }
}

/// Half of a team's court. Right is the even-score service court.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourtSide {
    Left,
    Right,
}

impl CourtSide {
    /// Service court for a score: even serves from the right, odd from the left.
    pub fn for_score(score: u32) -> Self {
        if score % 2 == 0 {
            CourtSide::Right
        } else {
            CourtSide::Left
        }
    }
}

//! MatchSession (live game state) and MatchResult.

use crate::models::game::{MatchFormat, Team};
use serde::{Deserialize, Serialize};

/// Points beyond the target at which a game ends regardless of margin.
pub const HARD_CAP_MARGIN: u32 = 9;

/// Highest target score a session accepts.
pub const MAX_TARGET_SCORE: u32 = 99;

/// Per-team point counts.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub a: u32,
    pub b: u32,
}

impl Scores {
    pub fn get(&self, team: Team) -> u32 {
        match team {
            Team::A => self.a,
            Team::B => self.b,
        }
    }

    pub(crate) fn add_point(&mut self, team: Team) {
        match team {
            Team::A => self.a += 1,
            Team::B => self.b += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.a + self.b
    }
}

/// Roster slot of a doubles pair.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    #[default]
    First,
    Second,
}

impl Slot {
    pub fn index(self) -> usize {
        match self {
            Slot::First => 0,
            Slot::Second => 1,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Slot::First => Slot::Second,
            Slot::Second => Slot::First,
        }
    }
}

/// For each team, the roster slot standing in the right (even) service court.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ServicePositions {
    pub a: Slot,
    pub b: Slot,
}

impl ServicePositions {
    pub fn right_slot(&self, team: Team) -> Slot {
        match team {
            Team::A => self.a,
            Team::B => self.b,
        }
    }

    /// Swap the pair's sides for one team.
    pub fn toggle(&mut self, team: Team) {
        match team {
            Team::A => self.a = self.a.other(),
            Team::B => self.b = self.b.other(),
        }
    }
}

/// Whether the game is still being played.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    InProgress,
    Complete,
}

/// Player names per team, fixed once the session starts.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub a: Vec<String>,
    pub b: Vec<String>,
}

impl Roster {
    pub fn get(&self, team: Team) -> &[String] {
        match team {
            Team::A => &self.a,
            Team::B => &self.b,
        }
    }
}

/// Everything a point can change, saved before each point for undo.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub scores: Scores,
    pub serving_team: Team,
    pub positions: ServicePositions,
    pub status: SessionStatus,
}

/// Live state of one game. Only mutated through the functions in `logic::scoring`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MatchSession {
    pub(crate) mode: MatchFormat,
    pub(crate) target_score: u32,
    pub(crate) roster: Roster,
    pub(crate) scores: Scores,
    pub(crate) serving_team: Team,
    pub(crate) positions: ServicePositions,
    pub(crate) status: SessionStatus,
    #[serde(skip)]
    pub(crate) history: Vec<Snapshot>,
}

impl MatchSession {
    /// Fresh session: 0-0, team A serving, first slots on the right. Inputs are not validated here.
    pub(crate) fn new(mode: MatchFormat, target_score: u32, roster: Roster) -> Self {
        Self {
            mode,
            target_score,
            roster,
            scores: Scores::default(),
            serving_team: Team::A,
            positions: ServicePositions::default(),
            status: SessionStatus::InProgress,
            history: Vec::new(),
        }
    }

    pub fn mode(&self) -> MatchFormat {
        self.mode
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn hard_cap_score(&self) -> u32 {
        self.target_score.saturating_add(HARD_CAP_MARGIN)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn score(&self, team: Team) -> u32 {
        self.scores.get(team)
    }

    pub fn serving_team(&self) -> Team {
        self.serving_team
    }

    pub fn positions(&self) -> ServicePositions {
        self.positions
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        self.status == SessionStatus::Complete
    }

    /// Number of points that can still be undone.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            scores: self.scores,
            serving_team: self.serving_team,
            positions: self.positions,
            status: self.status,
        }
    }

    pub(crate) fn restore(&mut self, snapshot: Snapshot) {
        self.scores = snapshot.scores;
        self.serving_team = snapshot.serving_team;
        self.positions = snapshot.positions;
        self.status = snapshot.status;
    }
}

/// Outcome of a finished game, handed to the store.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winners: Vec<String>,
    pub losers: Vec<String>,
    pub format: MatchFormat,
}

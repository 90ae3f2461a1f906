//! Data structures for the scoreboard: teams, sessions, results, players.

mod error;
mod game;
mod player;
mod session;

pub use error::{ConfigurationError, IllegalOperation, ScoringError, ValidationError};
pub use game::{CourtSide, MatchFormat, Team};
pub use player::{MatchHistory, PlayerRecord, PlayerStats, RankingRow};
pub use session::{
    MatchResult, MatchSession, Roster, Scores, ServicePositions, SessionStatus, Slot, Snapshot,
    HARD_CAP_MARGIN, MAX_TARGET_SCORE,
};

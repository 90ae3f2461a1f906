//! Badminton scoreboard: live scoring with serve rotation, plus player statistics.

pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use logic::{
    award_point, court_layout, final_score, finalize, force_swap_serve_position, next_rotation,
    parse_manual_result, start_session, undo_point, validate_match_result, validate_name, winner,
    CourtLayout, Rotation, ScoreboardView, TeamCourt,
};
pub use models::{
    ConfigurationError, CourtSide, IllegalOperation, MatchFormat, MatchHistory, MatchResult,
    MatchSession, PlayerRecord, PlayerStats, RankingRow, Roster, Scores, ScoringError,
    ServicePositions, SessionStatus, Slot, Team, ValidationError, MAX_TARGET_SCORE,
};
pub use store::{Store, StoreError};

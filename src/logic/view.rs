//! Scoreboard view: what a client shows after every operation.

use crate::logic::rotation::{court_layout, CourtLayout};
use crate::logic::scoring::winner;
use crate::models::{MatchFormat, MatchSession, Scores, SessionStatus, Team};
use serde::Serialize;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ScoreboardView {
    pub mode: MatchFormat,
    pub target_score: u32,
    pub hard_cap_score: u32,
    pub scores: Scores,
    pub serving_team: Team,
    pub server: String,
    pub court: CourtLayout,
    pub status: SessionStatus,
    pub winner: Option<Team>,
    pub can_undo: bool,
}

impl ScoreboardView {
    pub fn from_session(session: &MatchSession) -> Self {
        let court = court_layout(session);
        Self {
            mode: session.mode(),
            target_score: session.target_score(),
            hard_cap_score: session.hard_cap_score(),
            scores: session.scores(),
            serving_team: session.serving_team(),
            server: court.server.clone(),
            court,
            status: session.status(),
            winner: winner(session),
            can_undo: session.can_undo(),
        }
    }
}

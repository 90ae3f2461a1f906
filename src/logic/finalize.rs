//! Turn a finished game into a result for the store.

use crate::models::{IllegalOperation, MatchResult, MatchSession, ScoringError, Team};

/// Build the result of a completed session. Winners are the higher-scoring team's roster.
pub fn finalize(session: &MatchSession) -> Result<MatchResult, ScoringError> {
    if !session.is_complete() {
        return Err(IllegalOperation::GameNotComplete.into());
    }
    let winning = if session.score(Team::A) > session.score(Team::B) {
        Team::A
    } else {
        Team::B
    };
    Ok(MatchResult {
        winners: session.roster().get(winning).to_vec(),
        losers: session.roster().get(winning.other()).to_vec(),
        format: session.mode(),
    })
}

/// Final score as stored in match history, winner first (e.g. `21-17`).
pub fn final_score(session: &MatchSession) -> String {
    let (a, b) = (session.score(Team::A), session.score(Team::B));
    format!("{}-{}", a.max(b), a.min(b))
}

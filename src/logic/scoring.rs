//! Scoring state machine: start a game, award and undo points, detect the winner.

use crate::logic::rotation::next_rotation;
use crate::logic::validate::validate_name;
use crate::models::{
    ConfigurationError, IllegalOperation, MatchFormat, MatchSession, Roster, ScoringError,
    SessionStatus, Team, MAX_TARGET_SCORE,
};

/// Start a new game.
///
/// Each roster must hold exactly one name (singles) or two (doubles). Blank
/// names fall back to their slot label (`A1`, `B2`, ...); the rest must pass
/// the player-name rules and be unique within the session.
pub fn start_session(
    mode: MatchFormat,
    target_score: u32,
    roster_a: Vec<String>,
    roster_b: Vec<String>,
) -> Result<MatchSession, ScoringError> {
    if target_score == 0 || target_score > MAX_TARGET_SCORE {
        return Err(ConfigurationError::TargetScore.into());
    }
    let a = normalise_roster(mode, Team::A, roster_a)?;
    let b = normalise_roster(mode, Team::B, roster_b)?;

    let mut seen: Vec<&String> = Vec::with_capacity(a.len() + b.len());
    for name in a.iter().chain(b.iter()) {
        if seen.iter().any(|s| s.eq_ignore_ascii_case(name)) {
            return Err(ConfigurationError::DuplicatePlayer(name.clone()).into());
        }
        seen.push(name);
    }

    log::info!(
        "Starting {} game to {}: {} vs {}",
        mode,
        target_score,
        a.join(" & "),
        b.join(" & ")
    );
    Ok(MatchSession::new(mode, target_score, Roster { a, b }))
}

fn normalise_roster(
    mode: MatchFormat,
    team: Team,
    names: Vec<String>,
) -> Result<Vec<String>, ScoringError> {
    let expected = mode.players_per_team();
    if names.len() != expected {
        return Err(ConfigurationError::RosterSize {
            team,
            format: mode,
            expected,
            got: names.len(),
        }
        .into());
    }
    names
        .into_iter()
        .enumerate()
        .map(|(slot, name)| {
            if name.trim().is_empty() {
                Ok(team.slot_label(slot))
            } else {
                validate_name(&name)
                    .map_err(|e| ScoringError::from(ConfigurationError::PlayerName(e)))
            }
        })
        .collect()
}

/// Team that has won under the current scores, if any.
///
/// A team wins on reaching the target with a two-point lead, or on reaching
/// the hard cap (target + 9) regardless of margin.
pub fn winner(session: &MatchSession) -> Option<Team> {
    let target = session.target_score();
    let cap = session.hard_cap_score();
    Team::BOTH.into_iter().find(|&team| {
        let own = session.score(team);
        let other = session.score(team.other());
        (own >= target && own >= other + 2) || own == cap
    })
}

/// Award one point to `team`.
///
/// Rejected without touching the session once the game is over.
pub fn award_point(session: &mut MatchSession, team: Team) -> Result<(), ScoringError> {
    if session.status == SessionStatus::Complete {
        log::warn!("Rejected point for team {}: game is already over", team);
        return Err(IllegalOperation::GameOver.into());
    }

    session.history.push(session.snapshot());
    session.scores.add_point(team);

    let rotation = next_rotation(session.mode, session.serving_team, session.positions, team);
    session.serving_team = rotation.serving_team;
    session.positions = rotation.positions;

    log::debug!(
        "Point {}: {}-{}, {} serving",
        team,
        session.scores.a,
        session.scores.b,
        session.serving_team
    );

    if let Some(w) = winner(session) {
        session.status = SessionStatus::Complete;
        log::info!(
            "Game won by team {} ({}-{})",
            w,
            session.scores.a,
            session.scores.b
        );
    }
    Ok(())
}

/// Revert the most recent point. Returns `false` (and does nothing) when there is nothing to undo.
pub fn undo_point(session: &mut MatchSession) -> bool {
    match session.history.pop() {
        Some(previous) => {
            session.restore(previous);
            log::debug!("Undo: back to {}-{}", session.scores.a, session.scores.b);
            true
        }
        None => false,
    }
}

/// Manually swap the serving pair's sides when the players on court got out of sync.
///
/// Not a point: scores, server and history are left alone.
pub fn force_swap_serve_position(session: &mut MatchSession) {
    let team = session.serving_team;
    session.positions.toggle(team);
    log::debug!("Manual position swap for team {}", team);
}

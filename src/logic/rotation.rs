//! Service rotation: who serves next, and where everybody stands.
//!
//! Singles: the point winner serves; each player's side follows their own score
//! (even → right, odd → left).
//!
//! Doubles (side-out scoring):
//! - server point: same team keeps serve and its pair swaps sides;
//! - side out: serve passes to the scorer, nobody moves.
//!
//! The entitled doubles server is whoever of the serving pair stands on the side
//! matching the serving team's score parity.

use crate::models::{CourtSide, MatchFormat, MatchSession, ServicePositions, Team};
use serde::Serialize;

/// Serve state after a point.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rotation {
    pub serving_team: Team,
    pub positions: ServicePositions,
}

/// Compute the serving team and position flags after `scorer` wins a point.
pub fn next_rotation(
    mode: MatchFormat,
    serving_team: Team,
    positions: ServicePositions,
    scorer: Team,
) -> Rotation {
    match mode {
        MatchFormat::Singles => Rotation {
            serving_team: scorer,
            positions,
        },
        MatchFormat::Doubles => {
            let mut positions = positions;
            if scorer == serving_team {
                positions.toggle(scorer);
            }
            Rotation {
                serving_team: scorer,
                positions,
            }
        }
    }
}

/// Names on each service court of one team. Empty in singles on the unused side.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct TeamCourt {
    pub left: Option<String>,
    pub right: Option<String>,
}

impl TeamCourt {
    pub fn at(&self, side: CourtSide) -> Option<&str> {
        match side {
            CourtSide::Left => self.left.as_deref(),
            CourtSide::Right => self.right.as_deref(),
        }
    }
}

/// Where every player stands and who serves.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CourtLayout {
    pub a: TeamCourt,
    pub b: TeamCourt,
    pub serving_team: Team,
    pub serving_side: CourtSide,
    pub server: String,
}

impl CourtLayout {
    pub fn team(&self, team: Team) -> &TeamCourt {
        match team {
            Team::A => &self.a,
            Team::B => &self.b,
        }
    }
}

fn team_court(session: &MatchSession, team: Team) -> TeamCourt {
    let names = session.roster().get(team);
    match session.mode() {
        MatchFormat::Singles => {
            let name = names.first().cloned();
            match CourtSide::for_score(session.score(team)) {
                CourtSide::Right => TeamCourt { left: None, right: name },
                CourtSide::Left => TeamCourt { left: name, right: None },
            }
        }
        MatchFormat::Doubles => {
            let right = session.positions().right_slot(team);
            TeamCourt {
                left: names.get(right.other().index()).cloned(),
                right: names.get(right.index()).cloned(),
            }
        }
    }
}

/// Lay out both teams for the current score and pick out the server.
pub fn court_layout(session: &MatchSession) -> CourtLayout {
    let a = team_court(session, Team::A);
    let b = team_court(session, Team::B);
    let serving_team = session.serving_team();
    let serving_side = CourtSide::for_score(session.score(serving_team));
    let server = match serving_team {
        Team::A => &a,
        Team::B => &b,
    }
    .at(serving_side)
    .unwrap_or_default()
    .to_string();

    CourtLayout {
        a,
        b,
        serving_team,
        serving_side,
        server,
    }
}

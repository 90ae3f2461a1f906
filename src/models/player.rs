//! Persisted player statistics and match history records.

use crate::models::game::MatchFormat;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A player with separate singles and doubles counters.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub name: String,
    pub singles_played: u32,
    pub singles_won: u32,
    pub singles_lost: u32,
    pub doubles_played: u32,
    pub doubles_won: u32,
    pub doubles_lost: u32,
    pub created_at: DateTime<Utc>,
}

impl PlayerRecord {
    /// Create a new player with the given name. Counters start at zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            singles_played: 0,
            singles_won: 0,
            singles_lost: 0,
            doubles_played: 0,
            doubles_won: 0,
            doubles_lost: 0,
            created_at: Utc::now(),
        }
    }

    /// Record a win in the given format.
    pub fn add_win(&mut self, format: MatchFormat) {
        match format {
            MatchFormat::Singles => {
                self.singles_played += 1;
                self.singles_won += 1;
            }
            MatchFormat::Doubles => {
                self.doubles_played += 1;
                self.doubles_won += 1;
            }
        }
    }

    /// Record a loss in the given format.
    pub fn add_loss(&mut self, format: MatchFormat) {
        match format {
            MatchFormat::Singles => {
                self.singles_played += 1;
                self.singles_lost += 1;
            }
            MatchFormat::Doubles => {
                self.doubles_played += 1;
                self.doubles_lost += 1;
            }
        }
    }

    /// `(played, won, lost)` for one format.
    pub fn counts(&self, format: MatchFormat) -> (u32, u32, u32) {
        match format {
            MatchFormat::Singles => (self.singles_played, self.singles_won, self.singles_lost),
            MatchFormat::Doubles => (self.doubles_played, self.doubles_won, self.doubles_lost),
        }
    }

    pub fn total_matches(&self) -> u32 {
        self.singles_played + self.doubles_played
    }

    pub fn total_wins(&self) -> u32 {
        self.singles_won + self.doubles_won
    }

    /// Win percentage across both formats, rounded to two decimals.
    pub fn win_rate(&self) -> f64 {
        let total = self.total_matches();
        if total == 0 {
            return 0.0;
        }
        let rate = f64::from(self.total_wins()) / f64::from(total) * 100.0;
        (rate * 100.0).round() / 100.0
    }

    /// Statistics view (for API responses).
    pub fn stats(&self) -> PlayerStats {
        PlayerStats::from_player(self)
    }
}

/// Player record plus derived totals.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    #[serde(flatten)]
    pub player: PlayerRecord,
    pub total_matches: u32,
    pub total_wins: u32,
    pub win_rate: f64,
}

impl PlayerStats {
    pub fn from_player(p: &PlayerRecord) -> Self {
        Self {
            player: p.clone(),
            total_matches: p.total_matches(),
            total_wins: p.total_wins(),
            win_rate: p.win_rate(),
        }
    }
}

/// One line of a ranking table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RankingRow {
    pub rank: usize,
    pub name: String,
    pub played: u32,
    pub won: u32,
    pub lost: u32,
}

/// A recorded match. Names are stored comma-joined.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchHistory {
    pub id: u64,
    pub winner_names: String,
    pub loser_names: String,
    /// Final score such as `21-17`; absent for manually entered results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
    /// "Singles" or "Doubles".
    pub match_type: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_rate_is_zero_without_matches() {
        assert_eq!(PlayerRecord::new("Sam").win_rate(), 0.0);
    }

    #[test]
    fn win_rate_rounds_to_two_decimals() {
        let mut p = PlayerRecord::new("Sam");
        p.add_win(MatchFormat::Singles);
        p.add_loss(MatchFormat::Doubles);
        p.add_loss(MatchFormat::Doubles);
        assert_eq!(p.total_matches(), 3);
        assert_eq!(p.win_rate(), 33.33);
    }

    #[test]
    fn counters_serialize_camel_case() {
        let mut p = PlayerRecord::new("Jo");
        p.add_win(MatchFormat::Doubles);
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["doublesPlayed"], 1);
        assert_eq!(v["doublesWon"], 1);
        assert_eq!(v["singlesLost"], 0);
    }
}

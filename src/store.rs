//! Player statistics and match history, kept in one JSON document.
//!
//! Applying a match result is all-or-nothing: the updated document is written
//! to disk (temp file + rename) before it replaces the in-memory copy, so a
//! failed write leaves both the counters and the history untouched.

use crate::logic::{validate_match_result, validate_name};
use crate::models::{
    MatchFormat, MatchHistory, MatchResult, PlayerRecord, RankingRow, ValidationError,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid match: {0}")]
    Invalid(#[from] ValidationError),
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreData {
    players: Vec<PlayerRecord>,
    matches: Vec<MatchHistory>,
    next_match_id: u64,
}

impl StoreData {
    fn player_mut_or_insert(&mut self, name: &str) -> &mut PlayerRecord {
        let idx = match self.players.iter().position(|p| p.name == name) {
            Some(idx) => idx,
            None => {
                self.players.push(PlayerRecord::new(name));
                self.players.len() - 1
            }
        };
        &mut self.players[idx]
    }
}

/// Player and match-history store. `path == None` keeps everything in memory.
#[derive(Debug, Default)]
pub struct Store {
    path: Option<PathBuf>,
    data: StoreData,
}

impl Store {
    /// Store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load the document at `path`, or start empty if the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let data = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            let data: StoreData = serde_json::from_str(&raw)?;
            log::info!(
                "Loaded {} player(s) and {} match(es) from {:?}",
                data.players.len(),
                data.matches.len(),
                path
            );
            data
        } else {
            log::info!("No store at {:?}, starting empty", path);
            StoreData::default()
        };
        Ok(Self {
            path: Some(path),
            data,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Add the given players when the store has none yet. Returns how many were added.
    pub fn seed_players<S: AsRef<str>>(&mut self, names: &[S]) -> Result<usize, StoreError> {
        if !self.data.players.is_empty() || names.is_empty() {
            return Ok(0);
        }
        let mut next = self.data.clone();
        for name in names {
            let name = validate_name(name.as_ref())?;
            if !next.players.iter().any(|p| p.name == name) {
                next.players.push(PlayerRecord::new(name));
            }
        }
        let added = next.players.len();
        self.commit(next)?;
        log::info!("Seeded {} initial player(s)", added);
        Ok(added)
    }

    /// Apply a match result: bump played/won/lost for every named player in the
    /// result's format (creating unknown players) and append a history entry.
    pub fn record_match(
        &mut self,
        result: &MatchResult,
        score: Option<String>,
    ) -> Result<MatchHistory, StoreError> {
        let result = validate_match_result(result)?;
        let mut next = self.data.clone();

        for name in &result.winners {
            next.player_mut_or_insert(name).add_win(result.format);
        }
        for name in &result.losers {
            next.player_mut_or_insert(name).add_loss(result.format);
        }

        next.next_match_id += 1;
        let record = MatchHistory {
            id: next.next_match_id,
            winner_names: result.winners.join(","),
            loser_names: result.losers.join(","),
            score,
            match_type: result.format.history_tag().to_string(),
            timestamp: Utc::now(),
        };
        next.matches.push(record.clone());

        self.commit(next)?;
        log::info!(
            "Match saved: {} - Winners: {:?}, Losers: {:?}",
            result.format.history_tag().to_uppercase(),
            result.winners,
            result.losers
        );
        Ok(record)
    }

    /// All players, ordered by name.
    pub fn players(&self) -> Vec<PlayerRecord> {
        let mut players = self.data.players.clone();
        players.sort_by(|a, b| a.name.cmp(&b.name));
        players
    }

    pub fn player(&self, name: &str) -> Option<&PlayerRecord> {
        self.data.players.iter().find(|p| p.name == name)
    }

    /// Ranking table for one format: most wins first, fewer matches played breaks ties.
    pub fn rankings(&self, format: MatchFormat) -> Vec<RankingRow> {
        let mut players: Vec<&PlayerRecord> = self.data.players.iter().collect();
        players.sort_by_key(|p| {
            let (played, won, _) = p.counts(format);
            (Reverse(won), played, p.name.clone())
        });
        players
            .into_iter()
            .enumerate()
            .map(|(i, p)| {
                let (played, won, lost) = p.counts(format);
                RankingRow {
                    rank: i + 1,
                    name: p.name.clone(),
                    played,
                    won,
                    lost,
                }
            })
            .collect()
    }

    /// Match history, newest first.
    pub fn match_history(&self) -> Vec<MatchHistory> {
        self.data.matches.iter().rev().cloned().collect()
    }

    /// Persist `next`, then make it the current state.
    fn commit(&mut self, next: StoreData) -> Result<(), StoreError> {
        if let Some(path) = &self.path {
            if let Err(e) = write_atomically(path, &next) {
                log::warn!("Failed to write store {:?}: {}", path, e);
                return Err(e);
            }
        }
        self.data = next;
        Ok(())
    }
}

fn write_atomically(path: &Path, data: &StoreData) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(data)?;
    let tmp = path.with_extension("json.tmp");
    {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

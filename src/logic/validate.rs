//! Name and match-result validation shared by session start, manual entry and the store.

use crate::models::{MatchFormat, MatchResult, ValidationError};

/// Longest accepted player name (in characters).
pub const MAX_NAME_LEN: usize = 50;

/// Trim and check a player name: 1-50 chars of ASCII letters, digits, whitespace, `'` or `-`.
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong { max: MAX_NAME_LEN });
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || c.is_whitespace() || c == '\'' || c == '-';
    if !name.chars().all(allowed) {
        return Err(ValidationError::InvalidCharacters(name.to_string()));
    }
    Ok(name.to_string())
}

/// Check a result's line-up against its format and normalise the names.
///
/// Singles needs exactly one winner and one loser, doubles two of each; no
/// player may be on both sides.
pub fn validate_match_result(result: &MatchResult) -> Result<MatchResult, ValidationError> {
    if result.winners.is_empty() || result.losers.is_empty() {
        return Err(ValidationError::MissingPlayers);
    }
    let winners = result
        .winners
        .iter()
        .map(|n| validate_name(n))
        .collect::<Result<Vec<_>, _>>()?;
    let losers = result
        .losers
        .iter()
        .map(|n| validate_name(n))
        .collect::<Result<Vec<_>, _>>()?;

    let expected = result.format.players_per_team();
    if winners.len() != expected || losers.len() != expected {
        return Err(ValidationError::WrongPlayerCount {
            format: result.format,
            expected,
        });
    }
    for side in [&winners, &losers] {
        for (i, name) in side.iter().enumerate() {
            if side[..i].iter().any(|n| n.eq_ignore_ascii_case(name)) {
                return Err(ValidationError::DuplicatePlayer(name.clone()));
            }
        }
    }
    if let Some(dup) = winners.iter().find(|w| losers.contains(w)) {
        return Err(ValidationError::PlayerOnBothSides(dup.clone()));
    }

    Ok(MatchResult {
        winners,
        losers,
        format: result.format,
    })
}

/// Build and validate a result from manually entered fields (`type` is "singles"/"doubles").
pub fn parse_manual_result(
    winners: &[String],
    losers: &[String],
    match_type: &str,
) -> Result<MatchResult, ValidationError> {
    let format = MatchFormat::parse(match_type)?;
    validate_match_result(&MatchResult {
        winners: winners.to_vec(),
        losers: losers.to_vec(),
        format,
    })
}

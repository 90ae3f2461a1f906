//! Integration tests for turning a finished game into a match result.

use badminton_scoreboard::{
    award_point, final_score, finalize, start_session, undo_point, IllegalOperation, MatchFormat,
    MatchResult, ScoringError, Team,
};
use pretty_assertions::assert_eq;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn doubles_shutout_names_the_winning_pair() {
    let mut s = start_session(
        MatchFormat::Doubles,
        21,
        names(&["Alice", "Bob"]),
        names(&["Carol", "Dave"]),
    )
    .unwrap();
    for _ in 0..21 {
        award_point(&mut s, Team::A).unwrap();
    }
    let result = finalize(&s).unwrap();
    assert_eq!(
        result,
        MatchResult {
            winners: names(&["Alice", "Bob"]),
            losers: names(&["Carol", "Dave"]),
            format: MatchFormat::Doubles,
        }
    );
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        serde_json::json!({
            "winners": ["Alice", "Bob"],
            "losers": ["Carol", "Dave"],
            "format": "doubles"
        })
    );
    assert_eq!(final_score(&s), "21-0");
}

#[test]
fn team_b_can_win() {
    let mut s = start_session(MatchFormat::Singles, 7, names(&["Sam"]), names(&["Jo"])).unwrap();
    award_point(&mut s, Team::A).unwrap();
    for _ in 0..7 {
        award_point(&mut s, Team::B).unwrap();
    }
    let result = finalize(&s).unwrap();
    assert_eq!(result.winners, names(&["Jo"]));
    assert_eq!(result.losers, names(&["Sam"]));
    assert_eq!(result.format, MatchFormat::Singles);
    assert_eq!(final_score(&s), "7-1");
}

#[test]
fn unfinished_game_cannot_be_finalized() {
    let mut s = start_session(MatchFormat::Singles, 7, names(&["Sam"]), names(&["Jo"])).unwrap();
    assert_eq!(
        finalize(&s),
        Err(ScoringError::IllegalOperation(
            IllegalOperation::GameNotComplete
        ))
    );
    for _ in 0..7 {
        award_point(&mut s, Team::A).unwrap();
    }
    assert!(finalize(&s).is_ok());
    undo_point(&mut s);
    assert!(finalize(&s).is_err(), "undoing the final point reopens the game");
}

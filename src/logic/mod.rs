//! Scoreboard business logic: scoring, service rotation, finalization, validation.

mod finalize;
mod rotation;
mod scoring;
mod validate;
mod view;

pub use finalize::{final_score, finalize};
pub use rotation::{court_layout, next_rotation, CourtLayout, Rotation, TeamCourt};
pub use scoring::{award_point, force_swap_serve_position, start_session, undo_point, winner};
pub use validate::{parse_manual_result, validate_match_result, validate_name, MAX_NAME_LEN};
pub use view::ScoreboardView;

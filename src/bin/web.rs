//! Single binary web server: live scoreboard sessions, match saving and rankings via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT, DATA_FILE,
//! SESSION_IDLE_TIMEOUT, SEED_PLAYERS (see `config`).

use actix_web::{
    delete, get, post,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use badminton_scoreboard::{
    award_point, final_score, finalize, force_swap_serve_position, parse_manual_result,
    start_session, undo_point, AppConfig, MatchFormat, MatchHistory, MatchResult, MatchSession,
    PlayerStats, RankingRow, ScoreboardView, Store, Team,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Unique identifier for a live session.
type SessionId = Uuid;

/// Per-session entry: live game + last activity time (for auto-cleanup).
struct SessionEntry {
    session: MatchSession,
    /// Result computed by a finalize whose save failed; re-used on retry.
    pending_result: Option<MatchResult>,
    last_activity: Instant,
}

struct AppState {
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,
    store: RwLock<Store>,
    idle_timeout: Duration,
}

type SharedState = Data<AppState>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct SessionResponse {
    id: SessionId,
    #[serde(flatten)]
    view: ScoreboardView,
}

#[derive(Serialize)]
struct FinalizeResponse {
    result: MatchResult,
    record: MatchHistory,
}

#[derive(Serialize)]
struct RankingsResponse {
    singles: Vec<RankingRow>,
    doubles: Vec<RankingRow>,
}

#[derive(Deserialize)]
struct CreateSessionBody {
    #[serde(default)]
    mode: MatchFormat,
    #[serde(default = "default_target_score")]
    target_score: u32,
    #[serde(default)]
    team_a: Vec<String>,
    #[serde(default)]
    team_b: Vec<String>,
}

fn default_target_score() -> u32 {
    21
}

#[derive(Deserialize)]
struct AwardPointBody {
    team: String,
}

#[derive(Deserialize)]
struct SaveMatchBody {
    #[serde(default)]
    winners: Vec<String>,
    #[serde(default)]
    losers: Vec<String>,
    #[serde(rename = "type", default = "default_match_type")]
    match_type: String,
}

fn default_match_type() -> String {
    "singles".to_string()
}

#[derive(Deserialize)]
struct RankingsQuery {
    format: Option<String>,
}

/// Path segment: session id (e.g. /api/sessions/{id})
#[derive(Deserialize)]
struct SessionPath {
    id: SessionId,
}

fn error_body(status: actix_web::http::StatusCode, message: impl Display) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({ "error": message.to_string() }))
}

fn bad_request(e: impl Display) -> HttpResponse {
    error_body(actix_web::http::StatusCode::BAD_REQUEST, e)
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn no_session() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" }))
}

fn session_json(id: SessionId, session: &MatchSession) -> HttpResponse {
    HttpResponse::Ok().json(SessionResponse {
        id,
        view: ScoreboardView::from_session(session),
    })
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "badminton-scoreboard",
    })
}

/// Start a live game (returns it with id; client keeps the id for subsequent requests).
#[post("/api/sessions")]
async fn api_create_session(state: SharedState, body: Json<CreateSessionBody>) -> HttpResponse {
    let body = body.into_inner();
    let session = match start_session(body.mode, body.target_score, body.team_a, body.team_b) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("Rejected new session: {}", e);
            return bad_request(e);
        }
    };
    let id = Uuid::new_v4();
    let mut g = match state.sessions.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let response = session_json(id, &session);
    g.insert(
        id,
        SessionEntry {
            session,
            pending_result: None,
            last_activity: Instant::now(),
        },
    );
    log::info!("Session {} started ({} live)", id, g.len());
    response
}

/// Current scoreboard (404 if not found). Touching it refreshes last_activity.
#[get("/api/sessions/{id}")]
async fn api_get_session(state: SharedState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.sessions.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            session_json(path.id, &entry.session)
        }
        None => no_session(),
    }
}

/// Award a point to team "A" or "B".
#[post("/api/sessions/{id}/points")]
async fn api_award_point(
    state: SharedState,
    path: Path<SessionPath>,
    body: Json<AwardPointBody>,
) -> HttpResponse {
    let mut g = match state.sessions.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_session(),
    };
    entry.last_activity = Instant::now();
    let result = Team::parse(&body.team).and_then(|team| award_point(&mut entry.session, team));
    match result {
        Ok(()) => {
            entry.pending_result = None;
            session_json(path.id, &entry.session)
        }
        Err(e) => bad_request(e),
    }
}

/// Undo the last point (no-op when there is nothing to undo).
#[post("/api/sessions/{id}/undo")]
async fn api_undo_point(state: SharedState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.sessions.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_session(),
    };
    entry.last_activity = Instant::now();
    if undo_point(&mut entry.session) {
        entry.pending_result = None;
    }
    session_json(path.id, &entry.session)
}

/// Swap the serving pair's sides by hand.
#[post("/api/sessions/{id}/swap")]
async fn api_swap_positions(state: SharedState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.sessions.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_session(),
    };
    entry.last_activity = Instant::now();
    force_swap_serve_position(&mut entry.session);
    session_json(path.id, &entry.session)
}

/// Record the finished game. On a failed save the session and its result are kept for a retry.
#[post("/api/sessions/{id}/finalize")]
async fn api_finalize(state: SharedState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.sessions.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_session(),
    };
    entry.last_activity = Instant::now();
    let result = match &entry.pending_result {
        Some(r) => r.clone(),
        None => match finalize(&entry.session) {
            Ok(r) => r,
            Err(e) => return bad_request(e),
        },
    };
    entry.pending_result = Some(result.clone());
    let score = final_score(&entry.session);

    let mut store = match state.store.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match store.record_match(&result, Some(score)) {
        Ok(record) => {
            g.remove(&path.id);
            log::info!("Session {} finalized as match {}", path.id, record.id);
            HttpResponse::Ok().json(FinalizeResponse { result, record })
        }
        Err(e) => {
            log::error!("Error saving match for session {}: {}", path.id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to save match: {}", e),
                "result": result,
            }))
        }
    }
}

/// Abandon a game without recording it.
#[delete("/api/sessions/{id}")]
async fn api_discard_session(state: SharedState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.sessions.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.remove(&path.id) {
        Some(_) => {
            log::info!("Session {} discarded", path.id);
            HttpResponse::NoContent().finish()
        }
        None => no_session(),
    }
}

/// Manually entered result (no live scoring).
#[post("/api/save-match")]
async fn api_save_match(state: SharedState, body: Json<SaveMatchBody>) -> HttpResponse {
    let result = match parse_manual_result(&body.winners, &body.losers, &body.match_type) {
        Ok(r) => r,
        Err(e) => {
            log::warn!("Validation error: {}", e);
            return bad_request(e);
        }
    };
    let mut store = match state.store.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match store.record_match(&result, None) {
        Ok(record) => HttpResponse::Created().json(record),
        Err(e) => {
            log::error!("Error saving match: {}", e);
            error_body(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save match",
            )
        }
    }
}

#[get("/api/players")]
async fn api_players(state: SharedState) -> HttpResponse {
    let store = match state.store.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let players: Vec<PlayerStats> = store.players().iter().map(|p| p.stats()).collect();
    HttpResponse::Ok().json(players)
}

/// Both ranking tables, or one with `?format=singles|doubles`.
#[get("/api/rankings")]
async fn api_rankings(state: SharedState, query: Query<RankingsQuery>) -> HttpResponse {
    let store = match state.store.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match &query.format {
        Some(f) => match MatchFormat::parse(f) {
            Ok(format) => HttpResponse::Ok().json(store.rankings(format)),
            Err(e) => bad_request(e),
        },
        None => HttpResponse::Ok().json(RankingsResponse {
            singles: store.rankings(MatchFormat::Singles),
            doubles: store.rankings(MatchFormat::Doubles),
        }),
    }
}

#[get("/api/matches")]
async fn api_matches(state: SharedState) -> HttpResponse {
    let store = match state.store.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(store.match_history())
}

fn to_io_error(e: impl Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("{}", e);
        to_io_error(e)
    })?;

    let mut store = Store::open(&config.data_file).map_err(|e| {
        log::error!("Cannot open store {:?}: {}", config.data_file, e);
        to_io_error(e)
    })?;
    store.seed_players(&config.seed_players).map_err(to_io_error)?;

    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(AppState {
        sessions: RwLock::new(HashMap::new()),
        store: RwLock::new(store),
        idle_timeout: config.session_idle_timeout,
    });

    // Background task: every 30 minutes, drop live sessions idle past the timeout
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.sessions.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            let timeout = state_cleanup.idle_timeout;
            g.retain(|_, entry| entry.last_activity.elapsed() < timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} idle session(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_session)
            .service(api_get_session)
            .service(api_award_point)
            .service(api_undo_point)
            .service(api_swap_positions)
            .service(api_finalize)
            .service(api_discard_session)
            .service(api_save_match)
            .service(api_players)
            .service(api_rankings)
            .service(api_matches)
    })
    .bind(bind)?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    fn test_state() -> SharedState {
        Data::new(AppState {
            sessions: RwLock::new(HashMap::new()),
            store: RwLock::new(Store::in_memory()),
            idle_timeout: Duration::from_secs(60),
        })
    }

    /// State whose store sits under a regular file, so every save fails.
    fn failing_state(tmp: &tempfile::TempDir) -> SharedState {
        let blocker = tmp.path().join("blocked");
        std::fs::write(&blocker, b"not a directory").unwrap();
        Data::new(AppState {
            sessions: RwLock::new(HashMap::new()),
            store: RwLock::new(Store::open(blocker.join("badminton.json")).unwrap()),
            idle_timeout: Duration::from_secs(60),
        })
    }

    fn pending_result(state: &SharedState, id: &str) -> Option<MatchResult> {
        let id: SessionId = id.parse().unwrap();
        let g = state.sessions.read().unwrap();
        g.get(&id).and_then(|entry| entry.pending_result.clone())
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state.clone())
                    .service(api_create_session)
                    .service(api_get_session)
                    .service(api_award_point)
                    .service(api_undo_point)
                    .service(api_swap_positions)
                    .service(api_finalize)
                    .service(api_discard_session)
                    .service(api_save_match)
                    .service(api_rankings),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn live_singles_game_is_recorded() {
        let state = test_state();
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/sessions")
            .set_json(serde_json::json!({
                "mode": "singles", "target_score": 7, "team_a": ["Sam"], "team_b": ["Jo"]
            }))
            .to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_str().unwrap().to_string();

        for _ in 0..7 {
            let req = test::TestRequest::post()
                .uri(&format!("/api/sessions/{id}/points"))
                .set_json(serde_json::json!({ "team": "A" }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{id}/finalize"))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["result"]["winners"], serde_json::json!(["Sam"]));
        assert_eq!(body["result"]["format"], "singles");
        assert_eq!(body["record"]["score"], "7-0");

        // The session is closed once recorded.
        let req = test::TestRequest::get()
            .uri(&format!("/api/sessions/{id}"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let store = state.store.read().unwrap();
        assert_eq!(store.player("Sam").unwrap().singles_won, 1);
        assert_eq!(store.player("Jo").unwrap().singles_lost, 1);
    }

    /// Start a singles game to 7 and let Sam win it.
    macro_rules! finished_singles {
        ($app:expr) => {{
            let req = test::TestRequest::post()
                .uri("/api/sessions")
                .set_json(serde_json::json!({
                    "mode": "singles", "target_score": 7, "team_a": ["Sam"], "team_b": ["Jo"]
                }))
                .to_request();
            let created: serde_json::Value = test::call_and_read_body_json(&$app, req).await;
            let id = created["id"].as_str().unwrap().to_string();
            for _ in 0..7 {
                let req = test::TestRequest::post()
                    .uri(&format!("/api/sessions/{id}/points"))
                    .set_json(serde_json::json!({ "team": "A" }))
                    .to_request();
                assert_eq!(test::call_service(&$app, req).await.status(), StatusCode::OK);
            }
            id
        }};
    }

    #[actix_web::test]
    async fn failed_save_keeps_session_for_retry() {
        let tmp = tempfile::tempdir().unwrap();
        let state = failing_state(&tmp);
        let app = app!(state);
        let id = finished_singles!(app);

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{id}/finalize"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["result"]["winners"], serde_json::json!(["Sam"]));

        let pending = pending_result(&state, &id).expect("result kept after failed save");
        assert_eq!(pending.winners, vec!["Sam".to_string()]);
        assert!(state.store.read().unwrap().match_history().is_empty());

        // Storage comes back; the retry records the kept result exactly once.
        *state.store.write().unwrap() = Store::in_memory();
        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{id}/finalize"))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["record"]["score"], "7-0");
        assert!(state.sessions.read().unwrap().is_empty());

        let store = state.store.read().unwrap();
        assert_eq!(store.match_history().len(), 1);
        assert_eq!(store.player("Sam").unwrap().singles_won, 1);
    }

    #[actix_web::test]
    async fn undo_after_failed_save_drops_pending_result() {
        let tmp = tempfile::tempdir().unwrap();
        let state = failing_state(&tmp);
        let app = app!(state);
        let id = finished_singles!(app);

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{id}/finalize"))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert!(pending_result(&state, &id).is_some());

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{id}/undo"))
            .to_request();
        let view: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(view["scores"]["a"], 6);
        assert_eq!(view["status"], "in_progress");
        assert!(pending_result(&state, &id).is_none());

        // The reopened game cannot be finalized.
        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{id}/finalize"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn swap_flips_serving_pair_only() {
        let state = test_state();
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/sessions")
            .set_json(serde_json::json!({
                "mode": "doubles", "team_a": ["Alice", "Bob"], "team_b": ["Carol", "Dave"]
            }))
            .to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_str().unwrap().to_string();
        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{id}/points"))
            .set_json(serde_json::json!({ "team": "A" }))
            .to_request();
        let before: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(before["court"]["a"]["right"], "Bob");
        assert_eq!(before["court"]["a"]["left"], "Alice");

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{id}/swap"))
            .to_request();
        let after: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(after["court"]["a"]["right"], before["court"]["a"]["left"]);
        assert_eq!(after["court"]["a"]["left"], before["court"]["a"]["right"]);
        assert_eq!(after["court"]["b"], before["court"]["b"]);
        assert_eq!(after["scores"], before["scores"]);
        assert_eq!(after["serving_team"], "A");
        assert_eq!(after["can_undo"], before["can_undo"]);
    }

    #[actix_web::test]
    async fn oversized_target_is_rejected_and_sessions_stay_usable() {
        let state = test_state();
        let app = app!(state);
        let req = test::TestRequest::post()
            .uri("/api/sessions")
            .set_json(serde_json::json!({
                "mode": "singles", "target_score": 4294967295u64, "team_a": ["Sam"], "team_b": ["Jo"]
            }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let id = finished_singles!(app);
        assert!(state.sessions.read().unwrap().contains_key(&id.parse::<SessionId>().unwrap()));
    }

    #[actix_web::test]
    async fn unknown_team_and_early_finalize_are_rejected() {
        let state = test_state();
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/sessions")
            .set_json(serde_json::json!({
                "mode": "doubles", "team_a": ["Alice", "Bob"], "team_b": ["Carol", "Dave"]
            }))
            .to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created["target_score"], 21);
        let id = created["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{id}/points"))
            .set_json(serde_json::json!({ "team": "C" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{id}/finalize"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/sessions/{id}"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
        assert!(state.store.read().unwrap().match_history().is_empty());
    }

    #[actix_web::test]
    async fn wrong_roster_size_is_rejected() {
        let state = test_state();
        let app = app!(state);
        let req = test::TestRequest::post()
            .uri("/api/sessions")
            .set_json(serde_json::json!({
                "mode": "doubles", "team_a": ["Alice"], "team_b": ["Carol", "Dave"]
            }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
        assert!(state.sessions.read().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn manual_match_updates_rankings() {
        let state = test_state();
        let app = app!(state);
        let req = test::TestRequest::post()
            .uri("/api/save-match")
            .set_json(serde_json::json!({
                "winners": ["Alice", "Bob"], "losers": ["Carol", "Dave"], "type": "doubles"
            }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = test::TestRequest::get()
            .uri("/api/rankings?format=doubles")
            .to_request();
        let rows: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(rows[0]["won"], 1);
        assert_eq!(rows[3]["lost"], 1);
    }

    #[actix_web::test]
    async fn invalid_manual_match_is_rejected() {
        let state = test_state();
        let app = app!(state);
        let req = test::TestRequest::post()
            .uri("/api/save-match")
            .set_json(serde_json::json!({
                "winners": ["Alice", "Bob"], "losers": ["Carol"], "type": "doubles"
            }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }
}

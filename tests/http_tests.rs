use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use battleship_tracker::protocol::{ErrorResponse, ShotResponse, StateResponse};
use battleship_tracker::server::{router, BANNER};
use battleship_tracker::{
    Board, BoardError, CellState, ClientAuthoritative, GameSession, ResolverMode,
    ServerAuthoritative, SharedSession, ShipLayout, Shot, ShotError, ShotOutcome, ShotResolver,
    SunkMarker,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

fn server_app() -> Router {
    router(SharedSession::new(GameSession::new(Box::new(
        ServerAuthoritative::new(ShipLayout::standard().unwrap()),
    ))))
}

fn client_app() -> Router {
    router(SharedSession::new(GameSession::new(Box::new(
        ClientAuthoritative,
    ))))
}

/// Resolver that scribbles on the board and then reports a fault.
struct FaultyResolver;

impl ShotResolver for FaultyResolver {
    fn mode(&self) -> ResolverMode {
        ResolverMode::ServerAuthoritative
    }

    fn resolve(&self, board: &mut Board, shot: &Shot) -> Result<ShotOutcome, ShotError> {
        board.set_cell(shot.row as usize, shot.col as usize, CellState::Hit)?;
        board.mark_sunk(SunkMarker::Ship(0));
        Err(BoardError::OutOfRange { row: 42, col: 42 }.into())
    }
}

async fn send(app: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn click(app: &Router, body: &str) -> (StatusCode, Vec<u8>) {
    send(app, Method::POST, "/click", body).await
}

#[tokio::test]
async fn test_banner() {
    let app = server_app();
    let (status, body) = send(&app, Method::GET, "/", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), BANNER);
}

#[tokio::test]
async fn test_state_json_shape() {
    let app = server_app();
    let (status, body) = send(&app, Method::GET, "/state", "").await;
    assert_eq!(status, StatusCode::OK);

    let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["success"], true);
    let cells = v["gameState"]["cellStates"].as_array().unwrap();
    assert_eq!(cells.len(), 10);
    assert!(cells
        .iter()
        .all(|row| row.as_array().unwrap().iter().all(|c| c == 0)));
    assert_eq!(v["gameState"]["sunkShips"], serde_json::json!([]));
}

#[tokio::test]
async fn test_click_hit_then_sunk() {
    let app = server_app();
    let (status, body) = click(&app, r#"{"row":0,"col":1}"#).await;
    assert_eq!(status, StatusCode::OK);
    let resp: ShotResponse = serde_json::from_slice(&body).unwrap();
    assert!(resp.success);
    assert_eq!(resp.result, ShotOutcome::Hit);
    assert_eq!(resp.game_state.cell(0, 1), Some(CellState::Hit));
    assert_eq!(resp.game_state.cell(0, 2), Some(CellState::Empty));

    let (_, body) = click(&app, r#"{"row":0,"col":2}"#).await;
    let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["result"], "sunk");
    assert_eq!(v["gameState"]["cellStates"][0][1], 3);
    assert_eq!(v["gameState"]["cellStates"][0][2], 3);
    assert_eq!(v["gameState"]["sunkShips"], serde_json::json!([0]));
}

#[tokio::test]
async fn test_click_accepts_integral_floats() {
    let app = server_app();
    let (status, body) = click(&app, r#"{"row":5.0,"col":5}"#).await;
    assert_eq!(status, StatusCode::OK);
    let resp: ShotResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(resp.result, ShotOutcome::Miss);
}

#[tokio::test]
async fn test_invalid_coordinates_are_400() {
    let app = server_app();
    for body in [
        r#"{"row":-1,"col":0}"#,
        r#"{"row":10,"col":0}"#,
        r#"{"row":0,"col":10}"#,
        r#"{"row":1.5,"col":0}"#,
        r#"{"row":"1","col":0}"#,
        r#"{"row":null,"col":0}"#,
        r#"{"col":0}"#,
        r#"[1,2]"#,
        "not json",
        "",
    ] {
        let (status, resp) = click(&app, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {:?}", body);
        let err: ErrorResponse = serde_json::from_slice(&resp).unwrap();
        assert!(!err.success);
        assert_eq!(err.error, "Invalid coordinates");
    }

    let (_, body) = send(&app, Method::GET, "/state", "").await;
    let state: StateResponse = serde_json::from_slice(&body).unwrap();
    assert!(state
        .game_state
        .cell_states
        .iter()
        .flatten()
        .all(|&c| c == 0));
}

#[tokio::test]
async fn test_internal_fault_is_500() {
    let app = router(SharedSession::new(GameSession::new(Box::new(FaultyResolver))));
    let (_, before) = send(&app, Method::GET, "/state", "").await;

    let (status, body) = click(&app, r#"{"row":2,"col":3}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        v,
        serde_json::json!({"success": false, "error": "Server error processing shot"})
    );

    let (status, after) = send(&app, Method::GET, "/state", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after, before);
    let state: StateResponse = serde_json::from_slice(&after).unwrap();
    assert_eq!(state.game_state.cell(2, 3), Some(CellState::Empty));
    assert!(state.game_state.sunk_ships.is_empty());
}

#[tokio::test]
async fn test_reset_endpoint() {
    let app = server_app();
    click(&app, r#"{"row":0,"col":1}"#).await;
    click(&app, r#"{"row":0,"col":2}"#).await;

    let (status, body) = send(&app, Method::POST, "/reset", "").await;
    assert_eq!(status, StatusCode::OK);
    let state: StateResponse = serde_json::from_slice(&body).unwrap();
    assert!(state.success);
    assert!(state.game_state.sunk_ships.is_empty());
    assert!(state
        .game_state
        .cell_states
        .iter()
        .flatten()
        .all(|&c| c == 0));
}

#[tokio::test]
async fn test_client_mode_results() {
    let app = client_app();
    let (status, body) = click(&app, r#"{"row":3,"col":3,"result":" Sunk "}"#).await;
    assert_eq!(status, StatusCode::OK);
    let resp: ShotResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(resp.result, ShotOutcome::Sunk);
    assert_eq!(
        resp.game_state.sunk_ships,
        vec![SunkMarker::Cell("D4".to_string())]
    );

    let (_, body) = send(&app, Method::GET, "/state", "").await;
    let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["gameState"]["sunkShips"], serde_json::json!(["D4"]));
    assert_eq!(v["gameState"]["cellStates"][3][3], 3);

    for body in [
        r#"{"row":4,"col":4,"result":"kaboom"}"#,
        r#"{"row":4,"col":4,"result":3}"#,
        r#"{"row":4,"col":4}"#,
    ] {
        let (status, resp) = click(&app, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ErrorResponse = serde_json::from_slice(&resp).unwrap();
        assert_eq!(err.error, "Invalid result");
    }

    let (_, after) = send(&app, Method::GET, "/state", "").await;
    let after: serde_json::Value = serde_json::from_slice(&after).unwrap();
    assert_eq!(after, v);
}

#[tokio::test]
async fn test_cors_headers_present() {
    let app = server_app();
    let request = Request::builder()
        .method(Method::GET)
        .uri("/state")
        .header(header::ORIGIN, "http://display.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

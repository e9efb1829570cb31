use actix_web::http::header::{IF_MATCH, IF_NONE_MATCH};
use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use serde_json::{json, Value};

use super::helpers::{dealt_room, etag_of, post_json, seated_room};
use crate::support::app_builder::seeded_test_app;

#[actix_web::test]
async fn matching_if_none_match_returns_304() {
    let app = seeded_test_app().await;
    let code = seated_room(&app).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/rooms/{code}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let etag = etag_of(&resp);

    let req = test::TestRequest::get()
        .uri(&format!("/api/rooms/{code}"))
        .insert_header((IF_NONE_MATCH, etag.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(etag_of(&resp), etag);
    let body = test::read_body(resp).await;
    assert!(body.is_empty());
}

#[actix_web::test]
async fn stale_if_none_match_returns_the_room() {
    let app = seeded_test_app().await;
    let code = seated_room(&app).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/rooms/{code}"))
        .insert_header((IF_NONE_MATCH, format!("\"room-{code}-v1\"")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["version"], 2);
}

#[actix_web::test]
async fn if_match_guards_a_play() {
    let app = seeded_test_app().await;
    let (code, dealt) = dealt_room(&app).await;
    let version = dealt["version"].as_u64().unwrap();
    let card_id = dealt["state"]["player1Hand"][0]["id"].clone();

    let stale = test::TestRequest::post()
        .uri(&format!("/api/rooms/{code}/play"))
        .insert_header((IF_MATCH, format!("\"room-{code}-v{}\"", version - 1)))
        .set_json(json!({ "playerId": 1, "cardId": card_id, "action": "trail" }))
        .to_request();
    let resp = test::call_service(&app, stale).await;
    assert_problem_details_from_service_response(
        resp,
        "OPTIMISTIC_LOCK",
        StatusCode::CONFLICT,
        None,
    )
    .await;

    let fresh = test::TestRequest::post()
        .uri(&format!("/api/rooms/{code}/play"))
        .insert_header((IF_MATCH, format!("\"room-{code}-v{version}\"")))
        .set_json(json!({ "playerId": 1, "cardId": card_id, "action": "trail" }))
        .to_request();
    let resp = test::call_service(&app, fresh).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(etag_of(&resp), format!("\"room-{code}-v{}\"", version + 1));
}

#[actix_web::test]
async fn body_expected_version_wins_over_if_match() {
    let app = seeded_test_app().await;
    let (code, dealt) = dealt_room(&app).await;
    let version = dealt["version"].as_u64().unwrap();
    let card_id = dealt["state"]["player1Hand"][0]["id"].clone();

    let req = test::TestRequest::post()
        .uri(&format!("/api/rooms/{code}/play"))
        .insert_header((IF_MATCH, "\"room-stale-v1\""))
        .set_json(json!({
            "playerId": 1,
            "cardId": card_id,
            "action": "trail",
            "expectedVersion": version,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn malformed_if_match_is_400_invalid_header() {
    let app = seeded_test_app().await;
    let (code, dealt) = dealt_room(&app).await;
    let card_id = dealt["state"]["player1Hand"][0]["id"].clone();

    let req = test::TestRequest::post()
        .uri(&format!("/api/rooms/{code}/play"))
        .insert_header((IF_MATCH, "\"not-an-etag\""))
        .set_json(json!({ "playerId": 1, "cardId": card_id, "action": "trail" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "INVALID_HEADER",
        StatusCode::BAD_REQUEST,
        Some("ETag"),
    )
    .await;
}

#[actix_web::test]
async fn play_on_missing_room_is_404() {
    let app = seeded_test_app().await;
    let resp = post_json(
        &app,
        "/api/rooms/GONE00/play",
        json!({ "playerId": 1, "cardId": "A_spades", "action": "trail" }),
    )
    .await;

    assert_problem_details_from_service_response(
        resp,
        "ROOM_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    )
    .await;
}

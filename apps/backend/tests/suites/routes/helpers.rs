//! Request shortcuts shared by the route suites.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header::ETAG;
use actix_web::{test, Error};
use serde_json::{json, Value};

/// POST a JSON body and return the response.
pub async fn post_json<S>(app: &S, uri: &str, body: Value) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request();
    test::call_service(app, req).await
}

pub fn etag_of(resp: &ServiceResponse<BoxBody>) -> String {
    resp.headers()
        .get(ETAG)
        .expect("ETag header")
        .to_str()
        .expect("ASCII ETag")
        .to_string()
}

/// Create a room as Ada and seat Bo. Returns the room code.
pub async fn seated_room<S>(app: &S) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let resp = post_json(app, "/api/rooms", json!({ "playerName": "Ada" })).await;
    assert_eq!(resp.status().as_u16(), 201);
    let body: Value = test::read_body_json(resp).await;
    let code = body["roomId"].as_str().expect("roomId").to_string();

    let resp = post_json(
        app,
        &format!("/api/rooms/{code}/join"),
        json!({ "playerName": "Bo" }),
    )
    .await;
    assert!(resp.status().is_success());
    code
}

/// Seat both players, shuffle, lay out the first four deck cards and deal.
/// Returns the room code and the dealt state.
pub async fn dealt_room<S>(app: &S) -> (String, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let code = seated_room(app).await;

    let resp = post_json(
        app,
        &format!("/api/rooms/{code}/shuffle"),
        json!({ "playerId": 1 }),
    )
    .await;
    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    let face_up: Vec<Value> = body["state"]["deck"].as_array().expect("deck")[..4]
        .iter()
        .map(|card| card["id"].clone())
        .collect();

    let resp = post_json(
        app,
        &format!("/api/rooms/{code}/face-up"),
        json!({ "playerId": 1, "cardIds": face_up }),
    )
    .await;
    assert!(resp.status().is_success());

    let resp = post_json(
        app,
        &format!("/api/rooms/{code}/deal"),
        json!({ "playerId": 1 }),
    )
    .await;
    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    (code, body)
}

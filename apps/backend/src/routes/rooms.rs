//! Room-related HTTP routes: a thin JSON envelope over `RoomService`.

use actix_web::http::header::{ETAG, IF_MATCH, IF_NONE_MATCH};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::plays::{PlayRequest, PlayResult};
use crate::domain::{GameState, Seat};
use crate::error::AppError;
use crate::http::etag::{if_none_match_hits, parse_room_version_from_etag, room_etag};
use crate::services::rooms::RoomSnapshot;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerNameBody {
    pub player_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyBody {
    pub player_id: u8,
    pub is_ready: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatBody {
    pub player_id: u8,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceUpBody {
    pub player_id: u8,
    pub card_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayBody {
    pub player_id: u8,
    #[serde(flatten)]
    pub play: PlayRequest,
    #[serde(default)]
    pub expected_version: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlayResponse {
    room_id: String,
    version: u64,
    play: PlayResult,
    state: GameState,
}

fn seat(player_id: u8) -> Result<Seat, AppError> {
    Ok(Seat::try_from(player_id)?)
}

fn with_etag(status: StatusCode, snapshot: &RoomSnapshot) -> actix_web::HttpResponseBuilder {
    let mut builder = HttpResponse::build(status);
    builder.insert_header((ETAG, room_etag(&snapshot.room_id, snapshot.version)));
    builder
}

fn snapshot_response(snapshot: RoomSnapshot) -> HttpResponse {
    with_etag(StatusCode::OK, &snapshot).json(snapshot)
}

/// POST /api/rooms
async fn create_room(
    body: web::Json<PlayerNameBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let created = app_state.rooms.create_room(&body.player_name)?;
    Ok(HttpResponse::Created()
        .insert_header((ETAG, room_etag(&created.room_id, created.version)))
        .json(created))
}

/// GET /api/rooms/{code}
///
/// Supports `If-None-Match`: when the client's ETag matches the current
/// version, returns `304 Not Modified` with no body.
async fn get_room(
    http_req: HttpRequest,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let snapshot = app_state.rooms.get_room(&path)?;
    let etag = room_etag(&snapshot.room_id, snapshot.version);

    if let Some(header) = http_req.headers().get(IF_NONE_MATCH) {
        if let Ok(client_etag) = header.to_str() {
            if if_none_match_hits(client_etag, &etag) {
                return Ok(HttpResponse::build(StatusCode::NOT_MODIFIED)
                    .insert_header((ETAG, etag))
                    .finish());
            }
        }
    }

    Ok(snapshot_response(snapshot))
}

/// GET /api/rooms/{code}/players/{player_id}/view
async fn get_player_view(
    path: web::Path<(String, u8)>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (code, player_id) = path.into_inner();
    let view = app_state.rooms.player_view(&code, seat(player_id)?)?;
    Ok(HttpResponse::Ok()
        .insert_header((ETAG, room_etag(&view.view.room_id, view.version)))
        .json(view))
}

/// POST /api/rooms/{code}/join
async fn join_room(
    path: web::Path<String>,
    body: web::Json<PlayerNameBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let joined = app_state.rooms.join_room(&path, &body.player_name)?;
    Ok(HttpResponse::Ok()
        .insert_header((ETAG, room_etag(&joined.room_id, joined.version)))
        .json(joined))
}

/// POST /api/rooms/{code}/ready
async fn set_ready(
    path: web::Path<String>,
    body: web::Json<ReadyBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let snapshot = app_state
        .rooms
        .set_player_ready(&path, seat(body.player_id)?, body.is_ready)?;
    Ok(snapshot_response(snapshot))
}

/// POST /api/rooms/{code}/shuffle
async fn start_shuffle(
    path: web::Path<String>,
    body: web::Json<SeatBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let snapshot = app_state.rooms.start_shuffle(&path, seat(body.player_id)?)?;
    Ok(snapshot_response(snapshot))
}

/// POST /api/rooms/{code}/face-up
async fn select_face_up(
    path: web::Path<String>,
    body: web::Json<FaceUpBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let snapshot =
        app_state
            .rooms
            .select_face_up_cards(&path, seat(body.player_id)?, &body.card_ids)?;
    Ok(snapshot_response(snapshot))
}

/// POST /api/rooms/{code}/deal
async fn deal_cards(
    path: web::Path<String>,
    body: web::Json<SeatBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let snapshot = app_state.rooms.deal_cards(&path, seat(body.player_id)?)?;
    Ok(snapshot_response(snapshot))
}

/// POST /api/rooms/{code}/play
///
/// The expected version comes from `expectedVersion` in the body or, failing
/// that, from an `If-Match` ETag.
async fn play_card(
    http_req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<PlayBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let expected_version = match body.expected_version {
        Some(v) => Some(v),
        None => match http_req.headers().get(IF_MATCH) {
            Some(value) => {
                let raw = value.to_str().map_err(|_| {
                    AppError::bad_request(
                        crate::errors::ErrorCode::InvalidHeader,
                        "If-Match header is not valid ASCII".to_string(),
                    )
                })?;
                Some(parse_room_version_from_etag(raw)?)
            }
            None => None,
        },
    };

    let (snapshot, play) =
        app_state
            .rooms
            .play_card(&path, seat(body.player_id)?, &body.play, expected_version)?;

    let response = PlayResponse {
        room_id: snapshot.room_id.clone(),
        version: snapshot.version,
        play,
        state: snapshot.state.clone(),
    };
    Ok(with_etag(StatusCode::OK, &snapshot).json(response))
}

/// POST /api/rooms/{code}/countdown
async fn update_countdown(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    Ok(snapshot_response(app_state.rooms.update_countdown(&path)?))
}

/// POST /api/rooms/{code}/reset
async fn reset_game(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    Ok(snapshot_response(app_state.rooms.reset_game(&path)?))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_room)));
    cfg.service(web::resource("/{code}").route(web::get().to(get_room)));
    cfg.service(
        web::resource("/{code}/players/{player_id}/view").route(web::get().to(get_player_view)),
    );
    cfg.service(web::resource("/{code}/join").route(web::post().to(join_room)));
    cfg.service(web::resource("/{code}/ready").route(web::post().to(set_ready)));
    cfg.service(web::resource("/{code}/shuffle").route(web::post().to(start_shuffle)));
    cfg.service(web::resource("/{code}/face-up").route(web::post().to(select_face_up)));
    cfg.service(web::resource("/{code}/deal").route(web::post().to(deal_cards)));
    cfg.service(web::resource("/{code}/play").route(web::post().to(play_card)));
    cfg.service(web::resource("/{code}/countdown").route(web::post().to(update_countdown)));
    cfg.service(web::resource("/{code}/reset").route(web::post().to(reset_game)));
}

use actix_web::{error, web, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod health;
pub mod rooms;

fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> error::Error {
    AppError::bad_request(ErrorCode::BadRequest, format!("Invalid JSON body: {err}")).into()
}

fn path_error(err: error::PathError, _req: &HttpRequest) -> error::Error {
    AppError::bad_request(ErrorCode::BadRequest, format!("Invalid path: {err}")).into()
}

/// Configure application routes.
///
/// Body and path extraction failures are rendered as problem details like
/// every other error.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error));
    cfg.app_data(web::PathConfig::default().error_handler(path_error));

    // Health check routes: /health
    cfg.configure(health::configure_routes);

    // Room routes: /api/rooms/**
    cfg.service(web::scope("/api/rooms").configure(rooms::configure_routes));
}

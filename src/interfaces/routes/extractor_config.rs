use actix_multipart::form::MultipartFormConfig;
use actix_web::{
    error::{JsonPayloadError, PathError},
    web,
};

use crate::errors::AppError;

/// Routes extractor failures through `AppError` so malformed bodies get the
/// same JSON error shape as everything else.
pub fn configure_extractors(max_upload_bytes: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(
            web::JsonConfig::default().error_handler(|err, _req| json_error(err).into())
        )
        .app_data(
            web::PathConfig::default().error_handler(|err, _req| path_error(err).into())
        )
        .app_data(
            MultipartFormConfig::default()
                .total_limit(max_upload_bytes)
                .memory_limit(max_upload_bytes.min(2 * 1024 * 1024))
                .error_handler(|err, _req| AppError::from(err).into())
        );
    }
}

fn json_error(err: JsonPayloadError) -> AppError {
    AppError::BadRequest(format!("JSON payload error: {}", err))
}

// Non-numeric ids never match a row
fn path_error(err: PathError) -> AppError {
    AppError::NotFound(format!("Invalid path: {}", err))
}

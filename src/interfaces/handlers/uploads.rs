use actix_web::{http::header, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    errors::AppError,
    storage::evidence::content_type_for,
    use_cases::extractors::SessionClaims,
    AppState,
};

/// Serves a stored evidence file to any logged-in user.
#[instrument(skip(state, _session))]
pub async fn serve_evidence(
    state: web::Data<AppState>,
    _session: SessionClaims,
    filename: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let filename = filename.into_inner();
    let bytes = state.evidence_store.read(&filename).await?;

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, content_type_for(&filename, &bytes)))
        .insert_header((header::CONTENT_DISPOSITION, format!("inline; filename=\"{filename}\"")))
        .body(bytes))
}

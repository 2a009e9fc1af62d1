use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::validation::{FeedbackRequest, StatusUpdateRequest},
    errors::AppError,
    use_cases::extractors::FacultyClaims,
    AppState,
};

#[instrument(skip(state, faculty), fields(user_id = faculty.0.id))]
pub async fn list_submissions(
    state: web::Data<AppState>,
    faculty: FacultyClaims,
) -> Result<impl Responder, AppError> {
    let submissions = state.review_handler.list_submissions(faculty.0.id).await?;
    Ok(HttpResponse::Ok().json(submissions))
}

#[instrument(skip(state, faculty, body), fields(user_id = faculty.0.id))]
pub async fn update_status(
    state: web::Data<AppState>,
    faculty: FacultyClaims,
    validation_id: web::Path<i64>,
    body: web::Json<StatusUpdateRequest>,
) -> Result<impl Responder, AppError> {
    let validation = state.review_handler
        .update_status(validation_id.into_inner(), faculty.0.id, body.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(validation))
}

#[instrument(skip(state, faculty, body), fields(user_id = faculty.0.id))]
pub async fn update_feedback(
    state: web::Data<AppState>,
    faculty: FacultyClaims,
    validation_id: web::Path<i64>,
    body: web::Json<FeedbackRequest>,
) -> Result<impl Responder, AppError> {
    let validation = state.review_handler
        .update_feedback(validation_id.into_inner(), faculty.0.id, body.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(validation))
}

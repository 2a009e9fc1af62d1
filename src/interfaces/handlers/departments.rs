use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{errors::AppError, AppState};

#[instrument(skip(state))]
pub async fn list_departments(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let departments = state.department_handler.list_departments().await?;
    Ok(HttpResponse::Ok().json(departments))
}

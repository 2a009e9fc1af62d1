use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;
use validator::Validate;

use crate::{
    entities::skill::NewSkill,
    errors::AppError,
    use_cases::extractors::{SessionClaims, StudentClaims},
    AppState,
};

/// Multipart body of a skill submission. Field names follow the form the
/// browser client posts.
#[derive(Debug, MultipartForm)]
pub struct SkillUpload {
    #[multipart(rename = "skillName")]
    pub skill_name: Option<Text<String>>,

    pub level: Option<Text<String>>,

    pub evidence: Option<TempFile>,
}

#[instrument(skip(state, session), fields(user_id = session.0.id))]
pub async fn list_my_skills(
    state: web::Data<AppState>,
    session: SessionClaims,
) -> Result<impl Responder, AppError> {
    let skills = state.skill_handler.list_student_skills(session.0.id).await?;
    Ok(HttpResponse::Ok().json(skills))
}

#[instrument(skip(state, student, form), fields(user_id = student.0.id))]
pub async fn submit_skill(
    state: web::Data<AppState>,
    student: StudentClaims,
    form: MultipartForm<SkillUpload>,
) -> Result<impl Responder, AppError> {
    let upload = form.into_inner();

    let request = NewSkill {
        skill_name: upload.skill_name.map(Text::into_inner),
        level: upload.level.map(Text::into_inner),
    };
    // Reject bad text fields before anything touches the upload directory
    request.validate()?;

    let evidence = match &upload.evidence {
        Some(file) => {
            state.evidence_store
                .store(file.file_name.as_deref(), file.file.path())
                .await?
        }
        None => None,
    };

    let skill = state.skill_handler
        .submit_skill(student.0.id, request, evidence)
        .await?;

    Ok(HttpResponse::Created().json(skill))
}

#[instrument(skip(state, student), fields(user_id = student.0.id))]
pub async fn withdraw_skill(
    state: web::Data<AppState>,
    student: StudentClaims,
    skill_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    state.skill_handler
        .withdraw_skill(student.0.id, skill_id.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

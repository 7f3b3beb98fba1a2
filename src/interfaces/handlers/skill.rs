use actix_web::{http::header::ContentType, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::skill::SkillRequest, errors::AppError, AppState};

#[instrument(skip(state))]
pub async fn list_skills(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let skills = state.skill_handler.list_skills().await?;

    Ok(HttpResponse::Ok().json(skills))
}

#[instrument(skip(state))]
pub async fn list_skills_by_category(
    state: web::Data<AppState>,
    category: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let skills = state.skill_handler.list_skills_by_category(&category).await?;

    Ok(HttpResponse::Ok().json(skills))
}

#[instrument(skip(state))]
pub async fn list_skill_categories(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let categories = state.skill_handler.list_skill_categories().await?;

    Ok(HttpResponse::Ok().json(categories))
}

#[instrument(skip(state))]
pub async fn get_skill(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let skill = state.skill_handler.get_skill_by_id(id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(skill))
}

#[instrument(skip(state, data))]
pub async fn create_skill(
    state: web::Data<AppState>,
    data: web::Json<SkillRequest>,
) -> Result<impl Responder, AppError> {
    let skill = state.skill_handler.create_skill(data.into_inner()).await?;

    Ok(HttpResponse::Ok().json(skill))
}

#[instrument(skip(state, data))]
pub async fn update_skill(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    data: web::Json<SkillRequest>,
) -> Result<impl Responder, AppError> {
    let skill = state
        .skill_handler
        .update_skill(id.into_inner(), data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(skill))
}

#[instrument(skip(state))]
pub async fn delete_skill(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    state.skill_handler.delete_skill(id.into_inner()).await?;

    Ok(HttpResponse::Ok().finish())
}

pub async fn skills_health() -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body("Skills service is running")
}

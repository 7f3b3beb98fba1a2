use actix_web::{http::header::ContentType, web, HttpResponse, Responder};
use tracing::{error, instrument};

use crate::{
    entities::project::ProjectRequest, errors::AppError, use_cases::seed::SeedOutcome, AppState,
};

#[instrument(skip(state))]
pub async fn list_projects(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.list_projects().await?;

    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(state))]
pub async fn list_featured_projects(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.list_featured_projects().await?;

    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(state))]
pub async fn list_projects_by_category(
    state: web::Data<AppState>,
    category: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let projects = state
        .project_handler
        .list_projects_by_category(&category)
        .await?;

    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(state))]
pub async fn list_project_categories(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let categories = state.project_handler.list_project_categories().await?;

    Ok(HttpResponse::Ok().json(categories))
}

#[instrument(skip(state))]
pub async fn get_project(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.get_project_by_id(id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(state, data))]
pub async fn create_project(
    state: web::Data<AppState>,
    data: web::Json<ProjectRequest>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.create_project(data.into_inner()).await?;

    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(state, data))]
pub async fn update_project(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    data: web::Json<ProjectRequest>,
) -> Result<impl Responder, AppError> {
    let project = state
        .project_handler
        .update_project(id.into_inner(), data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(state))]
pub async fn delete_project(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    state.project_handler.delete_project(id.into_inner()).await?;

    Ok(HttpResponse::Ok().finish())
}

pub async fn projects_health() -> impl Responder {
    plain_text("Projects service is running")
}

fn plain_text(body: impl Into<String>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(body.into())
}

fn maintenance_failure(operation: &str, e: AppError) -> HttpResponse {
    error!(error = %e, "{} failed", operation);
    HttpResponse::InternalServerError()
        .content_type(ContentType::plaintext())
        .body(format!("Error: {}", e))
}

#[instrument(skip(state))]
pub async fn cleanup_duplicates(state: web::Data<AppState>) -> HttpResponse {
    match state.project_handler.cleanup_duplicates().await {
        Ok(report) => plain_text(format!(
            "Cleanup completed! Removed {} duplicates. Projects: {} -> {}",
            report.removed, report.before, report.after
        )),
        Err(e) => maintenance_failure("Duplicate cleanup", e),
    }
}

#[instrument(skip(state))]
pub async fn reset_projects(state: web::Data<AppState>) -> HttpResponse {
    match state.project_handler.reset_projects().await {
        Ok(_) => plain_text("All projects deleted. Sample projects will be restored on next startup."),
        Err(e) => maintenance_failure("Project reset", e),
    }
}

#[instrument(skip(state))]
pub async fn seed_projects(state: web::Data<AppState>) -> HttpResponse {
    match state.project_handler.seed_projects().await {
        Ok(SeedOutcome::Skipped(count)) => plain_text(format!("Projects already exist. Count: {}", count)),
        Ok(SeedOutcome::Seeded(_)) => match state.project_handler.count_projects().await {
            Ok(count) => plain_text(format!("Projects seeded successfully! Count: {}", count)),
            Err(e) => maintenance_failure("Project seeding", e),
        },
        Err(e) => maintenance_failure("Project seeding", e),
    }
}

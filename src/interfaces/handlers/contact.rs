use actix_web::{http::header::ContentType, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::contact_message::ContactForm, errors::AppError, AppState};

/// Stores a contact form submission and answers with the saved message.
/// Notification emails are best-effort and never change the response.
#[instrument(skip(state, form))]
pub async fn send_contact_message(
    state: web::Data<AppState>,
    form: web::Json<ContactForm>,
) -> Result<impl Responder, AppError> {
    let saved = state
        .contact_handler
        .submit_contact_message(form.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(saved))
}

#[instrument(skip(state))]
pub async fn list_contact_messages(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let messages = state.contact_handler.list_contact_messages().await?;

    Ok(HttpResponse::Ok().json(messages))
}

#[instrument(skip(state))]
pub async fn list_unread_contact_messages(
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let messages = state.contact_handler.list_unread_contact_messages().await?;

    Ok(HttpResponse::Ok().json(messages))
}

#[instrument(skip(state))]
pub async fn count_unread_contact_messages(
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let count = state.contact_handler.count_unread_contact_messages().await?;

    Ok(HttpResponse::Ok().json(count))
}

#[instrument(skip(state))]
pub async fn get_contact_message(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let message = state
        .contact_handler
        .get_contact_message_by_id(id.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(message))
}

#[instrument(skip(state))]
pub async fn mark_contact_message_read(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let message = state
        .contact_handler
        .mark_contact_message_read(id.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(message))
}

#[instrument(skip(state))]
pub async fn delete_contact_message(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    state
        .contact_handler
        .delete_contact_message(id.into_inner())
        .await?;

    Ok(HttpResponse::Ok().finish())
}

pub async fn contact_health() -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body("Contact service is running")
}

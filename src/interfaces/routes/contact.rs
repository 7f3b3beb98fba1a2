use actix_web::web;

use crate::handlers::contact;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/contact")
            .route("", web::get().to(contact::list_contact_messages))
            .route("/send", web::post().to(contact::send_contact_message))
            .route("/unread", web::get().to(contact::list_unread_contact_messages))
            .route("/count/unread", web::get().to(contact::count_unread_contact_messages))
            .route("/health", web::get().to(contact::contact_health))
            .route("/{id}/read", web::put().to(contact::mark_contact_message_read))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(contact::get_contact_message))
                    .route(web::delete().to(contact::delete_contact_message))
            )
    );
}

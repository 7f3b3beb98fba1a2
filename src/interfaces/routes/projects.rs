use actix_web::web;

use crate::handlers::project;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    // Literal segments must be registered ahead of `/{id}`
    cfg.service(
        web::scope("/projects")
            .service(
                web::resource("")
                    .route(web::get().to(project::list_projects))
                    .route(web::post().to(project::create_project))
            )
            .route("/featured", web::get().to(project::list_featured_projects))
            .route("/categories", web::get().to(project::list_project_categories))
            .route("/category/{category}", web::get().to(project::list_projects_by_category))
            .route("/health", web::get().to(project::projects_health))
            .route("/cleanup", web::get().to(project::cleanup_duplicates))
            .route("/reset", web::get().to(project::reset_projects))
            .route("/seed", web::post().to(project::seed_projects))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(project::get_project))
                    .route(web::put().to(project::update_project))
                    .route(web::delete().to(project::delete_project))
            )
    );
}

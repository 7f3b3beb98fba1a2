use actix_web::web;

use crate::handlers::skill;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/skills")
            .service(
                web::resource("")
                    .route(web::get().to(skill::list_skills))
                    .route(web::post().to(skill::create_skill))
            )
            .route("/categories", web::get().to(skill::list_skill_categories))
            .route("/category/{category}", web::get().to(skill::list_skills_by_category))
            .route("/health", web::get().to(skill::skills_health))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(skill::get_skill))
                    .route(web::put().to(skill::update_skill))
                    .route(web::delete().to(skill::delete_skill))
            )
    );
}

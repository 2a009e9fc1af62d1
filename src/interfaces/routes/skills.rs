use actix_web::web;

use crate::handlers::skills;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/skills")
            .service(
                web::resource("")
                    .route(web::get().to(skills::list_my_skills))
                    .route(web::post().to(skills::submit_skill))
            )
            .service(
                web::resource("/{skill_id}")
                    .route(web::delete().to(skills::withdraw_skill))
            )
    );
}

use actix_web::web;

use crate::handlers::reviews;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/submissions")
            .route(web::get().to(reviews::list_submissions))
    )
    .service(
        web::scope("/validation/{validation_id}")
            .service(
                web::resource("/status")
                    .route(web::put().to(reviews::update_status))
            )
            .service(
                web::resource("/feedback")
                    .route(web::post().to(reviews::update_feedback))
            )
    );
}

use actix_web::web;

use crate::handlers::home::home;

mod auth;
mod extractor_config;
mod reviews;
mod skills;
mod system;
mod uploads;

pub use extractor_config::configure_extractors;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home));

    cfg.service(
        web::scope("/api")
            .configure(system::config_routes)
            .configure(auth::config_routes)
            .configure(skills::config_routes)
            .configure(reviews::config_routes)
    );

    cfg.configure(uploads::config_routes);
}

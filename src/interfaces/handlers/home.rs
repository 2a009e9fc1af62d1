use actix_web::{HttpResponse, Responder};

pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Welcome to the Skill Tracker API!",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "departments": "/api/departments",
        "health": "/api/health"
    }))
}

use rocket::{Request, catch, get, http::Status, serde::json::Json};
use serde_json::{Value, json};

pub mod misc;

#[get("/")]
pub fn index() -> &'static str {
    "cinema-db is running"
}

#[catch(404)]
pub fn catch404(req: &Request) -> Json<Value> {
    Json(json!({
        "error": format!("No route for {}", req.uri()),
        "status": Status::NotFound.code
    }))
}

#[catch(500)]
pub fn catch500() -> Json<Value> {
    Json(json!({
        "error": "Internal server error",
        "status": Status::InternalServerError.code
    }))
}

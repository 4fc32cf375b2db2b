use rocket::{State, get, http::Status, routes as rocket_routes, serde::json::Json};
use serde::Serialize;

use crate::db::ConnectionHandle;
use crate::state::ConnectionState;

#[derive(Serialize, Clone)]
pub struct HealthStatus {
    pub db_status: ConnectionState,
    pub endpoint: String,
}

/// Reports the shared connection's state. 200 once connected, 503 otherwise.
#[get("/check-health")]
pub fn health(db: &State<ConnectionHandle>) -> (Status, Json<HealthStatus>) {
    let health = HealthStatus {
        db_status: db.state(),
        endpoint: db.redacted_endpoint(),
    };

    let status = if health.db_status.is_ready() {
        Status::Ok
    } else {
        Status::ServiceUnavailable
    };

    (status, Json(health))
}

pub fn routes() -> Vec<rocket::Route> {
    rocket_routes![health]
}

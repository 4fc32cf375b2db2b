//! # cinema-db
//!
//! Bootstraps the single MongoDB connection shared by the cinema backend and exposes
//! its state over a small Rocket health endpoint.

use rocket::{Build, Rocket, catchers, routes};

use crate::db::ConnectionHandle;

pub mod cli;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod state;
pub mod telemetry;

/// Builds the Rocket instance around an already-initialized connection handle.
pub fn build_rocket(db: ConnectionHandle) -> Rocket<Build> {
    rocket::build()
        .manage(db)
        .register("/", catchers![handlers::catch404, handlers::catch500])
        .mount("/", routes![handlers::index])
        .mount("/", handlers::misc::routes())
}

pub mod auth;
pub mod controllers;
pub mod db;
pub mod error;
pub mod guard;
pub mod ordering;
pub mod service;

use crate::db::connection::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

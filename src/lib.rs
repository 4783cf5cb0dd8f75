pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod guard;
pub mod identity;
pub mod middlewares;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod schema;
pub mod services;
pub mod types;
pub mod utils;

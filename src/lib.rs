pub mod auth;
pub mod batch;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod openapi;
pub mod pipeline;
pub mod routes;
pub mod validation;

//! Defines controller functions that correspond to individual routes

pub mod annotation;
pub mod auth;
pub mod reservation;
pub mod resource;

use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Handle ping requests
pub async fn healthcheck() -> impl IntoResponse { StatusCode::OK }

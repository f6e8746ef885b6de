//! Request and response schemas

pub mod auth;
pub mod reservation;
pub mod resource;

use serde::{Deserialize, Serialize};

/// The shared error-text slot of a workspace
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AnnotationResponse {
	pub error: Option<String>,
}

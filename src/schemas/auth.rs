use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::Session;

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
	#[validate(length(min = 1, message = "username must not be empty"))]
	pub username: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
	pub user_id:  Uuid,
	pub username: String,
}

impl From<&Session> for SessionResponse {
	fn from(session: &Session) -> Self {
		Self {
			user_id:  session.data.user_id,
			username: session.data.username.clone(),
		}
	}
}

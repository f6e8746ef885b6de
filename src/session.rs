//! User sessions and tokens

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::TimeDelta;
use common::Error;
use datastore::{Datastore, SessionRow};
use time::Duration;
use uuid::Uuid;

use crate::AppState;

/// A session for any signed-in user
///
/// ```rs
/// pub async fn foo_route(session: Session) -> impl IntoResponse {
///     println!("{:?}", session.data.user_id);
///
///     ()
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Session {
	pub id:   Uuid,
	pub data: SessionData,
}

#[derive(Clone, Debug)]
pub struct SessionData {
	pub user_id:  Uuid,
	pub username: String,
}

impl FromRequestParts<AppState> for Session {
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let session_id = match parts.extensions.get::<Uuid>() {
			Some(id) => *id,
			None => {
				return Err(Error::Infallible(
					"attempted to extract session without checking \
					 authorization"
						.to_string(),
				));
			},
		};

		let session =
			Self::get(session_id, state.datastore.as_ref()).await?;

		let Some(session) = session else {
			return Err(Error::Infallible(
				"failed to retrieve session despite passing auth middleware"
					.to_string(),
			));
		};

		Ok(session)
	}
}

impl Session {
	fn from_row(row: SessionRow) -> Self {
		Self {
			id:   row.id,
			data: SessionData {
				user_id:  row.user_id,
				username: row.username,
			},
		}
	}

	/// Create and store a new [`Session`] for a given username
	#[instrument(skip(store))]
	pub async fn create(
		lifetime: TimeDelta,
		username: &str,
		store: &dyn Datastore,
	) -> Result<Self, Error> {
		let row =
			store.create_session(username, lifetime.num_seconds()).await?;

		debug!("stored session {} for user {}", row.id, row.username);

		Ok(Self::from_row(row))
	}

	/// Get a session from the collaborator
	#[instrument(skip(store))]
	pub async fn get(
		id: Uuid,
		store: &dyn Datastore,
	) -> Result<Option<Self>, Error> {
		let row = store.get_session(id).await?;

		Ok(row.map(Self::from_row))
	}

	/// Remove a session given its id
	#[instrument(skip(store))]
	pub async fn delete(id: Uuid, store: &dyn Datastore) -> Result<(), Error> {
		store.delete_session(id).await?;

		Ok(())
	}

	/// Convert this [`Session`] into an access token cookie
	#[must_use]
	pub fn to_access_token_cookie(
		&self,
		name: String,
		lifetime: Duration,
		secure: bool,
	) -> Cookie<'static> {
		Cookie::build((name, self.id.to_string()))
			.http_only(true)
			.max_age(lifetime)
			.path("/")
			.same_site(SameSite::Lax)
			.secure(secure)
			.into()
	}
}

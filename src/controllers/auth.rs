use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::Cookie;
use common::Error;
use time::Duration;
use validator::Validate;

use crate::schemas::auth::{LoginRequest, SessionResponse};
use crate::{AppState, Session};

/// Sign a user in and open their workspace
#[instrument(skip(state, jar))]
pub async fn login(
	State(state): State<AppState>,
	jar: CookieJar,
	Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let session = Session::create(
		state.config.access_token_lifetime,
		&request.username,
		state.datastore.as_ref(),
	)
	.await?;

	state.open_workspace(session.id).await?;

	let cookie = session.to_access_token_cookie(
		state.config.access_token_name.clone(),
		Duration::seconds(state.config.access_token_lifetime.num_seconds()),
		state.config.production,
	);

	let jar = jar.add(cookie);

	Ok((StatusCode::OK, jar, Json(SessionResponse::from(&session))))
}

/// Sign the current user out and tear down their workspace
#[instrument(skip(state, jar))]
pub async fn logout(
	State(state): State<AppState>,
	jar: CookieJar,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	Session::delete(session.id, state.datastore.as_ref()).await?;

	state.workspaces.remove(session.id);

	let jar =
		jar.remove(Cookie::from(state.config.access_token_name.clone()));

	Ok((StatusCode::NO_CONTENT, jar))
}

/// Get the current session
#[instrument]
pub async fn get_current_session(
	session: Session,
) -> Result<impl IntoResponse, Error> {
	Ok((StatusCode::OK, Json(SessionResponse::from(&session))))
}

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::Error;

use crate::schemas::AnnotationResponse;
use crate::{AppState, Session};

/// Read the shared error-text slot
#[instrument(skip(state))]
pub async fn get_annotation(
	State(state): State<AppState>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	state.ensure_workspace(session.id).await?;

	let workspace = state.workspace(session.id)?;

	Ok((
		StatusCode::OK,
		Json(AnnotationResponse { error: workspace.annotation }),
	))
}

/// Clear the shared error-text slot
#[instrument(skip(state))]
pub async fn clear_annotation(
	State(state): State<AppState>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	state.workspaces.update(session.id, |workspace| {
		workspace.annotation = None;
	});

	Ok(StatusCode::NO_CONTENT)
}

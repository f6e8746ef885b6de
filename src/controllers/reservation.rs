use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{Error, ReservationError};
use reservation::{
	Claim,
	NewReservation,
	Reservation,
	ReservationUpdate,
	check_window,
	find_conflict,
	visible_reservations,
};
use resource::{Palette, Resource};
use validator::Validate;

use crate::schemas::reservation::{
	ReservationResponse,
	ReservationWindowQuery,
	SaveReservationRequest,
};
use crate::{AppState, Session};

/// Get the visible reservations as calendar display records
#[instrument(skip(state))]
pub async fn get_reservations(
	State(state): State<AppState>,
	session: Session,
	Query(query): Query<ReservationWindowQuery>,
) -> Result<impl IntoResponse, Error> {
	state.ensure_workspace(session.id).await?;

	if let Some(from) = query.from {
		state.workspaces.update(session.id, |workspace| {
			workspace.window_start = from;
		});
	}

	state.refresh_reservations(session.id).await?;

	let workspace = state.workspace(session.id)?;
	let palette = Palette::new(state.config.palette_hue);
	let visible = workspace.facets.visible(&workspace.catalog);
	let records =
		visible_reservations(&workspace.reservations, &visible, &palette);

	Ok((StatusCode::OK, Json(records)))
}

/// Create a reservation after checking its window against the loaded list
#[instrument(skip(state))]
pub async fn create_reservation(
	State(state): State<AppState>,
	session: Session,
	Json(request): Json<SaveReservationRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;
	check_window(request.start, request.end)?;

	state.ensure_workspace(session.id).await?;
	let workspace = state.workspace(session.id)?;

	let resource = resource_for(&workspace.catalog, request.resource_id)?;

	let claim = Claim {
		id:          None,
		resource_id: request.resource_id,
		start:       request.start,
		end:         request.end,
	};
	check_no_conflict(&claim, &workspace.reservations)?;

	let palette = Palette::new(state.config.palette_hue);
	let color = palette.color(resource.display_color).unwrap_or_default();

	let new_reservation = NewReservation {
		resource_id:    request.resource_id,
		start:          request.start,
		end:            request.end,
		purpose_of_use: request.purpose_of_use,
		user_id:        session.data.user_id,
	};

	let created = state.record(
		session.id,
		new_reservation.insert(color, state.datastore.as_ref()).await,
	)?;

	state.refresh_reservations(session.id).await?;

	Ok((StatusCode::CREATED, Json(ReservationResponse::from(&created))))
}

/// Move or rewrite a reservation, re-running the conflict check
///
/// Dialog submits and calendar drag/resize edits both land here.
#[instrument(skip(state))]
pub async fn update_reservation(
	State(state): State<AppState>,
	session: Session,
	Path(r_id): Path<i32>,
	Json(request): Json<SaveReservationRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;
	check_window(request.start, request.end)?;

	state.ensure_workspace(session.id).await?;
	let workspace = state.workspace(session.id)?;

	let resource = resource_for(&workspace.catalog, request.resource_id)?;

	let claim = Claim {
		id:          Some(r_id),
		resource_id: request.resource_id,
		start:       request.start,
		end:         request.end,
	};
	check_no_conflict(&claim, &workspace.reservations)?;

	let palette = Palette::new(state.config.palette_hue);
	let color = palette.color(resource.display_color).unwrap_or_default();

	let update = ReservationUpdate {
		resource_id:    request.resource_id,
		start:          request.start,
		end:            request.end,
		purpose_of_use: request.purpose_of_use,
	};

	let updated = state.record(
		session.id,
		update.apply_to(r_id, color, state.datastore.as_ref()).await,
	)?;

	state.refresh_reservations(session.id).await?;

	Ok((StatusCode::OK, Json(ReservationResponse::from(&updated))))
}

/// Delete a reservation
#[instrument(skip(state))]
pub async fn delete_reservation(
	State(state): State<AppState>,
	session: Session,
	Path(r_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	state.ensure_workspace(session.id).await?;

	state.record(
		session.id,
		Reservation::delete_by_id(r_id, state.datastore.as_ref()).await,
	)?;

	state.refresh_reservations(session.id).await?;

	Ok(StatusCode::NO_CONTENT)
}

fn resource_for(catalog: &[Resource], resource_id: i32) -> Result<&Resource, Error> {
	catalog
		.iter()
		.find(|r| r.id == resource_id)
		.ok_or_else(|| ReservationError::UnknownResource(resource_id).into())
}

/// Advisory fast path; the datastore re-checks atomically on commit
fn check_no_conflict(
	claim: &Claim,
	existing: &[Reservation],
) -> Result<(), Error> {
	match find_conflict(claim, existing) {
		Some(other) => {
			Err(ReservationError::Overlap { conflicting_id: other.id }.into())
		},
		None => Ok(()),
	}
}

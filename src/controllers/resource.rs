use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{Error, ResourceError};
use resource::{NewResource, Palette, Resource, ResourceUpdate};
use validator::Validate;

use crate::schemas::resource::{
	FacetToggleRequest,
	FacetsResponse,
	FreeColorsResponse,
	PaletteEntry,
	ResourceResponse,
	SaveResourceRequest,
};
use crate::{AppState, Session};

/// Get the full catalog, most recently created first
#[instrument(skip(state))]
pub async fn get_resources(
	State(state): State<AppState>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	state.ensure_workspace(session.id).await?;
	state.refresh_catalog(session.id).await?;

	let workspace = state.workspace(session.id)?;
	let response: Vec<ResourceResponse> =
		workspace.catalog.iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

/// Get the facet-filtered subset of the catalog
#[instrument(skip(state))]
pub async fn get_visible_resources(
	State(state): State<AppState>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	state.ensure_workspace(session.id).await?;

	let workspace = state.workspace(session.id)?;
	let response: Vec<ResourceResponse> = workspace
		.facets
		.visible(&workspace.catalog)
		.iter()
		.map(Into::into)
		.collect();

	Ok((StatusCode::OK, Json(response)))
}

/// Get the palette colors not yet used by any resource
#[instrument(skip(state))]
pub async fn get_free_colors(
	State(state): State<AppState>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	state.ensure_workspace(session.id).await?;

	let workspace = state.workspace(session.id)?;
	let palette = Palette::new(state.config.palette_hue);

	let colors = palette
		.free_indices(&workspace.catalog, None)
		.into_iter()
		.filter_map(|index| {
			let hex = palette.color(index)?;

			Some(PaletteEntry { index, hex })
		})
		.collect();

	Ok((StatusCode::OK, Json(FreeColorsResponse { colors })))
}

/// Create a resource
#[instrument(skip(state))]
pub async fn create_resource(
	State(state): State<AppState>,
	session: Session,
	Json(request): Json<SaveResourceRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	state.ensure_workspace(session.id).await?;
	let workspace = state.workspace(session.id)?;

	let palette = Palette::new(state.config.palette_hue);
	let display_color = check_display_color(
		&palette,
		&workspace.catalog,
		request.display_color,
		None,
	)?;

	let new_resource = NewResource {
		name: request.name,
		kind: request.kind,
		generation: request.generation,
		display_color,
		note: request.note.unwrap_or_default(),
	};

	let created = state.record(
		session.id,
		new_resource.insert(state.datastore.as_ref()).await,
	)?;

	state.refresh_catalog(session.id).await?;

	Ok((StatusCode::CREATED, Json(ResourceResponse::from(&created))))
}

/// Update a resource
#[instrument(skip(state))]
pub async fn update_resource(
	State(state): State<AppState>,
	session: Session,
	Path(r_id): Path<i32>,
	Json(request): Json<SaveResourceRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	state.ensure_workspace(session.id).await?;
	let workspace = state.workspace(session.id)?;

	let current = workspace
		.catalog
		.iter()
		.find(|r| r.id == r_id)
		.ok_or_else(|| Error::NotFound(format!("no resource with id {r_id}")))?;

	let palette = Palette::new(state.config.palette_hue);
	let display_color = check_display_color(
		&palette,
		&workspace.catalog,
		request.display_color,
		Some(current.display_color),
	)?;

	let update = ResourceUpdate {
		name: request.name,
		kind: request.kind,
		generation: request.generation,
		display_color,
		note: request.note.unwrap_or_default(),
	};

	let updated = state.record(
		session.id,
		update.apply_to(r_id, state.datastore.as_ref()).await,
	)?;

	state.refresh_catalog(session.id).await?;

	Ok((StatusCode::OK, Json(ResourceResponse::from(&updated))))
}

/// Delete a resource, refusing while any loaded reservation references it
#[instrument(skip(state))]
pub async fn delete_resource(
	State(state): State<AppState>,
	session: Session,
	Path(r_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	state.ensure_workspace(session.id).await?;
	let workspace = state.workspace(session.id)?;

	let target = workspace
		.catalog
		.iter()
		.find(|r| r.id == r_id)
		.ok_or_else(|| Error::NotFound(format!("no resource with id {r_id}")))?;

	let references =
		reservation::count_for_resource(&workspace.reservations, r_id);
	if references > 0 {
		return Err(ResourceError::InUse {
			name:         target.name.clone(),
			reservations: references,
		}
		.into());
	}

	state.record(
		session.id,
		Resource::delete_by_id(r_id, state.datastore.as_ref()).await,
	)?;

	state.refresh_catalog(session.id).await?;

	Ok(StatusCode::NO_CONTENT)
}

/// Get the facet selection for the current catalog
#[instrument(skip(state))]
pub async fn get_facets(
	State(state): State<AppState>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	state.ensure_workspace(session.id).await?;

	let workspace = state.workspace(session.id)?;

	Ok((StatusCode::OK, Json(FacetsResponse::from(&workspace.facets))))
}

/// Flip the inclusion flag of a single facet value
#[instrument(skip(state))]
pub async fn toggle_facet(
	State(state): State<AppState>,
	session: Session,
	Json(request): Json<FacetToggleRequest>,
) -> Result<impl IntoResponse, Error> {
	state.ensure_workspace(session.id).await?;

	let toggled = state
		.workspaces
		.update(session.id, |workspace| {
			workspace.facets.toggle(
				request.kind,
				&request.name,
				request.checked,
			)
		})
		.unwrap_or(false);

	if !toggled {
		return Err(Error::NotFound(format!(
			"no {} facet value '{}'",
			request.kind, request.name
		)));
	}

	let workspace = state.workspace(session.id)?;

	Ok((StatusCode::OK, Json(FacetsResponse::from(&workspace.facets))))
}

/// Resolve a requested display color against the palette and the colors
/// already in use
///
/// `own` is the target's current color when editing; it stays available.
/// When no color is requested the first free one is assigned, and creation
/// is refused once the palette is exhausted.
fn check_display_color(
	palette: &Palette,
	catalog: &[Resource],
	requested: Option<i32>,
	own: Option<i32>,
) -> Result<i32, Error> {
	match requested {
		Some(index) => {
			if palette.color(index).is_none() {
				return Err(ResourceError::UnknownColor(index).into());
			}

			if !palette.free_indices(catalog, own).contains(&index) {
				return Err(ResourceError::ColorTaken(index).into());
			}

			Ok(index)
		},
		None => {
			match own {
				Some(own) => Ok(own),
				None => {
					palette.first_free(catalog).ok_or_else(|| {
						Error::from(ResourceError::PaletteExhausted)
					})
				},
			}
		},
	}
}

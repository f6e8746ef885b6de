use std::collections::BTreeMap;

use resource::Resource;
use resource::facet::{FacetKind, FacetSelection};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveResourceRequest {
	#[validate(length(min = 1, message = "name must not be empty"))]
	pub name:          String,
	#[serde(rename = "type")]
	pub kind:          String,
	pub generation:    String,
	pub note:          Option<String>,
	/// Palette index; assigned automatically when omitted
	pub display_color: Option<i32>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceResponse {
	pub id:            i32,
	pub name:          String,
	#[serde(rename = "type")]
	pub kind:          String,
	pub generation:    String,
	pub display_color: i32,
	pub note:          String,
}

impl From<&Resource> for ResourceResponse {
	fn from(resource: &Resource) -> Self {
		Self {
			id:            resource.id,
			name:          resource.name.clone(),
			kind:          resource.kind.clone(),
			generation:    resource.generation.clone(),
			display_color: resource.display_color,
			note:          resource.note.clone(),
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetsResponse {
	pub types:       BTreeMap<String, bool>,
	pub generations: BTreeMap<String, bool>,
}

impl From<&FacetSelection> for FacetsResponse {
	fn from(facets: &FacetSelection) -> Self {
		Self {
			types:       facets.types.clone(),
			generations: facets.generations.clone(),
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetToggleRequest {
	pub kind:    FacetKind,
	pub name:    String,
	pub checked: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteEntry {
	pub index: i32,
	pub hex:   String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeColorsResponse {
	pub colors: Vec<PaletteEntry>,
}

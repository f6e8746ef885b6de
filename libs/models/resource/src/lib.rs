#[macro_use]
extern crate tracing;

use common::Error;
use datastore::{Datastore, NewResourceRow, ResourceChanges, ResourceRow};
use serde::{Deserialize, Serialize};

pub mod facet;
mod palette;

pub use palette::{PALETTE_SIZE, Palette};

/// A reservable piece of equipment in the catalog
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Resource {
	pub id:            i32,
	pub name:          String,
	/// Equipment class facet
	pub kind:          String,
	/// Hardware revision facet
	pub generation:    String,
	/// Index into the display [`Palette`]
	pub display_color: i32,
	pub note:          String,
}

impl From<ResourceRow> for Resource {
	fn from(row: ResourceRow) -> Self {
		Self {
			id:            row.id,
			name:          row.name,
			kind:          row.kind,
			generation:    row.generation,
			display_color: row.display_color,
			note:          row.note,
		}
	}
}

impl Resource {
	/// Get the full catalog, most recently created first
	#[instrument(skip(store))]
	pub async fn get_all(store: &dyn Datastore) -> Result<Vec<Self>, Error> {
		let resources = store
			.list_resources()
			.await?
			.into_iter()
			.map(Self::from)
			.collect();

		Ok(resources)
	}

	/// Delete a [`Resource`] given its id
	///
	/// Callers check their loaded reservation window first; the datastore
	/// restricts the delete for anything outside that window.
	#[instrument(skip(store))]
	pub async fn delete_by_id(
		r_id: i32,
		store: &dyn Datastore,
	) -> Result<(), Error> {
		store.delete_resource(r_id).await?;

		info!("deleted resource with id {r_id}");

		Ok(())
	}
}

/// A [`Resource`] that has not been persisted yet
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewResource {
	pub name:          String,
	pub kind:          String,
	pub generation:    String,
	pub display_color: i32,
	pub note:          String,
}

impl NewResource {
	/// Insert this [`NewResource`]
	#[instrument(skip(store))]
	pub async fn insert(
		self,
		store: &dyn Datastore,
	) -> Result<Resource, Error> {
		let row = NewResourceRow {
			name:          self.name,
			kind:          self.kind,
			generation:    self.generation,
			display_color: self.display_color,
			note:          self.note,
		};

		let resource: Resource = store.insert_resource(row).await?.into();

		info!("created resource {resource:?}");

		Ok(resource)
	}
}

/// Changes to apply to an existing [`Resource`]
///
/// The catalog dialog resubmits every field, so an update carries the full
/// record.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ResourceUpdate {
	pub name:          String,
	pub kind:          String,
	pub generation:    String,
	pub display_color: i32,
	pub note:          String,
}

impl ResourceUpdate {
	/// Apply this update to the [`Resource`] with the given id
	#[instrument(skip(store))]
	pub async fn apply_to(
		self,
		r_id: i32,
		store: &dyn Datastore,
	) -> Result<Resource, Error> {
		let changes = ResourceChanges {
			name:          Some(self.name),
			kind:          Some(self.kind),
			generation:    Some(self.generation),
			display_color: Some(self.display_color),
			note:          Some(self.note),
		};

		let resource: Resource =
			store.update_resource(r_id, changes).await?.into();

		info!("updated resource {resource:?}");

		Ok(resource)
	}
}

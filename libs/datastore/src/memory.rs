//! In-process implementation of the persistence collaborator
//!
//! Used by the test suite and by standalone deployments. It reproduces the
//! constraints a hosted deployment enforces at the database level: display
//! colors are unique across resources, events cannot reference a missing
//! resource, a referenced resource cannot be deleted, and event windows on
//! the same resource must not overlap.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::row::{
	EventChanges,
	EventRow,
	NewEventRow,
	NewResourceRow,
	ResourceChanges,
	ResourceRow,
	SessionRow,
};
use crate::timestamp::str_to_timestamp;
use crate::{Datastore, DatastoreError};

/// Unique constraint on `resources.display_color`
pub const RESOURCE_COLOR_KEY: &str = "resources_display_color_key";
/// Foreign key from `events.resource_id` to `resources.id`
pub const EVENT_RESOURCE_FKEY: &str = "events_resource_id_fkey";
/// Exclusion constraint on `(events.resource_id, window)`
pub const EVENT_WINDOW_EXCL: &str = "events_resource_id_window_excl";

#[derive(Debug, Default)]
struct Tables {
	resources: BTreeMap<i32, ResourceRow>,
	events:    BTreeMap<i32, EventRow>,
	sessions:  HashMap<Uuid, SessionRow>,
	users:     HashMap<String, Uuid>,

	next_resource_id: i32,
	next_event_id:    i32,
}

/// An in-process [`Datastore`]
#[derive(Debug, Default)]
pub struct MemoryDatastore {
	inner: RwLock<Tables>,
}

/// Check that no other resource already uses the given display color
fn check_color_free(
	tables: &Tables,
	own_id: Option<i32>,
	display_color: i32,
) -> Result<(), DatastoreError> {
	let taken = tables.resources.values().any(|resource| {
		Some(resource.id) != own_id && resource.display_color == display_color
	});

	if taken {
		return Err(DatastoreError::UniqueViolation {
			constraint: RESOURCE_COLOR_KEY,
		});
	}

	Ok(())
}

/// Check that the referenced resource row exists
fn check_resource_exists(
	tables: &Tables,
	resource_id: i32,
) -> Result<(), DatastoreError> {
	if !tables.resources.contains_key(&resource_id) {
		return Err(DatastoreError::ForeignKeyViolation {
			constraint: EVENT_RESOURCE_FKEY,
			message:    format!("no resource with id {resource_id}"),
		});
	}

	Ok(())
}

/// Check that an event window does not overlap another event on the same
/// resource
///
/// Windows are half open, so two windows that merely touch are accepted.
fn check_event_exclusion(
	tables: &Tables,
	own_id: Option<i32>,
	resource_id: i32,
	start: &str,
	end: &str,
) -> Result<(), DatastoreError> {
	let start = str_to_timestamp(start)?;
	let end = str_to_timestamp(end)?;

	for (other_id, other) in tables.events.iter().rev() {
		if Some(*other_id) == own_id || other.resource_id != resource_id {
			continue;
		}

		let other_start = str_to_timestamp(&other.start)?;
		let other_end = str_to_timestamp(&other.end)?;

		if start < other_end && other_start < end {
			return Err(DatastoreError::ExclusionViolation {
				constraint:     EVENT_WINDOW_EXCL,
				conflicting_id: *other_id,
			});
		}
	}

	Ok(())
}

#[async_trait]
impl Datastore for MemoryDatastore {
	async fn list_resources(&self) -> Result<Vec<ResourceRow>, DatastoreError> {
		let tables = self.inner.read();

		Ok(tables.resources.values().rev().cloned().collect())
	}

	async fn insert_resource(
		&self,
		new: NewResourceRow,
	) -> Result<ResourceRow, DatastoreError> {
		let mut tables = self.inner.write();

		check_color_free(&tables, None, new.display_color)?;

		tables.next_resource_id += 1;
		let row = ResourceRow {
			id:            tables.next_resource_id,
			name:          new.name,
			kind:          new.kind,
			generation:    new.generation,
			display_color: new.display_color,
			note:          new.note,
		};

		tables.resources.insert(row.id, row.clone());

		Ok(row)
	}

	async fn update_resource(
		&self,
		id: i32,
		changes: ResourceChanges,
	) -> Result<ResourceRow, DatastoreError> {
		let mut tables = self.inner.write();

		let mut updated = tables
			.resources
			.get(&id)
			.cloned()
			.ok_or(DatastoreError::NotFound { table: "resources", id })?;

		if let Some(name) = changes.name {
			updated.name = name;
		}
		if let Some(kind) = changes.kind {
			updated.kind = kind;
		}
		if let Some(generation) = changes.generation {
			updated.generation = generation;
		}
		if let Some(display_color) = changes.display_color {
			updated.display_color = display_color;
		}
		if let Some(note) = changes.note {
			updated.note = note;
		}

		check_color_free(&tables, Some(id), updated.display_color)?;

		tables.resources.insert(id, updated.clone());

		Ok(updated)
	}

	async fn delete_resource(&self, id: i32) -> Result<(), DatastoreError> {
		let mut tables = self.inner.write();

		if tables.events.values().any(|event| event.resource_id == id) {
			return Err(DatastoreError::ForeignKeyViolation {
				constraint: EVENT_RESOURCE_FKEY,
				message:    format!(
					"resource {id} is still referenced by reservations"
				),
			});
		}

		tables
			.resources
			.remove(&id)
			.ok_or(DatastoreError::NotFound { table: "resources", id })?;

		Ok(())
	}

	async fn list_events(
		&self,
		ending_at_or_after: Option<i64>,
	) -> Result<Vec<EventRow>, DatastoreError> {
		let tables = self.inner.read();

		let mut events = Vec::new();

		for event in tables.events.values().rev() {
			if let Some(from) = ending_at_or_after
				&& str_to_timestamp(&event.end)? < from
			{
				continue;
			}

			events.push(event.clone());
		}

		Ok(events)
	}

	async fn insert_event(
		&self,
		new: NewEventRow,
	) -> Result<EventRow, DatastoreError> {
		let mut tables = self.inner.write();

		check_resource_exists(&tables, new.resource_id)?;
		check_event_exclusion(
			&tables,
			None,
			new.resource_id,
			&new.start,
			&new.end,
		)?;

		tables.next_event_id += 1;
		let row = EventRow {
			id:          tables.next_event_id,
			title:       new.title,
			start:       new.start,
			end:         new.end,
			color:       new.color,
			resource_id: new.resource_id,
			user_id:     new.user_id,
		};

		tables.events.insert(row.id, row.clone());

		Ok(row)
	}

	async fn update_event(
		&self,
		id: i32,
		changes: EventChanges,
	) -> Result<EventRow, DatastoreError> {
		let mut tables = self.inner.write();

		let mut updated = tables
			.events
			.get(&id)
			.cloned()
			.ok_or(DatastoreError::NotFound { table: "events", id })?;

		if let Some(title) = changes.title {
			updated.title = title;
		}
		if let Some(start) = changes.start {
			updated.start = start;
		}
		if let Some(end) = changes.end {
			updated.end = end;
		}
		if let Some(color) = changes.color {
			updated.color = color;
		}
		if let Some(resource_id) = changes.resource_id {
			updated.resource_id = resource_id;
		}

		check_resource_exists(&tables, updated.resource_id)?;
		check_event_exclusion(
			&tables,
			Some(id),
			updated.resource_id,
			&updated.start,
			&updated.end,
		)?;

		tables.events.insert(id, updated.clone());

		Ok(updated)
	}

	async fn delete_event(&self, id: i32) -> Result<(), DatastoreError> {
		let mut tables = self.inner.write();

		tables
			.events
			.remove(&id)
			.ok_or(DatastoreError::NotFound { table: "events", id })?;

		Ok(())
	}

	async fn create_session(
		&self,
		username: &str,
		lifetime_seconds: i64,
	) -> Result<SessionRow, DatastoreError> {
		let mut tables = self.inner.write();

		let user_id = *tables
			.users
			.entry(username.to_string())
			.or_insert_with(Uuid::new_v4);

		let row = SessionRow {
			id: Uuid::new_v4(),
			user_id,
			username: username.to_string(),
			expires_at: Utc::now().timestamp_millis() + lifetime_seconds * 1000,
		};

		tables.sessions.insert(row.id, row.clone());

		Ok(row)
	}

	async fn get_session(
		&self,
		id: Uuid,
	) -> Result<Option<SessionRow>, DatastoreError> {
		let mut tables = self.inner.write();

		let Some(session) = tables.sessions.get(&id) else {
			return Ok(None);
		};

		if session.expires_at <= Utc::now().timestamp_millis() {
			tables.sessions.remove(&id);

			return Ok(None);
		}

		Ok(tables.sessions.get(&id).cloned())
	}

	async fn delete_session(&self, id: Uuid) -> Result<(), DatastoreError> {
		let mut tables = self.inner.write();

		tables.sessions.remove(&id);

		Ok(())
	}
}

//! Stored row shapes, as persisted by the collaborator
//!
//! These differ from the in-memory domain types: reservation rows are
//! stored in the `events` table under a `title` column, and their window
//! bounds are timestamp strings rather than millisecond counts.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A row of the `resources` table
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ResourceRow {
	pub id:            i32,
	pub name:          String,
	#[serde(rename = "type")]
	pub kind:          String,
	pub generation:    String,
	pub display_color: i32,
	pub note:          String,
}

/// A `resources` row that has not been assigned an id yet
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewResourceRow {
	pub name:          String,
	#[serde(rename = "type")]
	pub kind:          String,
	pub generation:    String,
	pub display_color: i32,
	pub note:          String,
}

/// A partial update to a `resources` row
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ResourceChanges {
	pub name:          Option<String>,
	#[serde(rename = "type")]
	pub kind:          Option<String>,
	pub generation:    Option<String>,
	pub display_color: Option<i32>,
	pub note:          Option<String>,
}

/// A row of the `events` table
///
/// `title` holds the reservation's purpose of use; `color` is the owning
/// resource's display color as written at save time.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EventRow {
	pub id:          i32,
	pub title:       String,
	pub start:       String,
	pub end:         String,
	pub color:       String,
	pub resource_id: i32,
	pub user_id:     Uuid,
}

/// An `events` row that has not been assigned an id yet
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewEventRow {
	pub title:       String,
	pub start:       String,
	pub end:         String,
	pub color:       String,
	pub resource_id: i32,
	pub user_id:     Uuid,
}

/// A partial update to an `events` row
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventChanges {
	pub title:       Option<String>,
	pub start:       Option<String>,
	pub end:         Option<String>,
	pub color:       Option<String>,
	pub resource_id: Option<i32>,
}

/// A live session held by the collaborator
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SessionRow {
	pub id:         Uuid,
	pub user_id:    Uuid,
	pub username:   String,
	/// Expiry instant, milliseconds since the epoch
	pub expires_at: i64,
}

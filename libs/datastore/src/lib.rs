//! The persistence/auth collaborator boundary
//!
//! Everything the application persists lives behind the [`Datastore`]
//! trait: two tables (`resources` and `events`) with typed CRUD, plus
//! session management. Rows cross this boundary in their persisted shape,
//! with timestamps encoded as strings (see [`timestamp`]).

mod memory;
mod row;
pub mod timestamp;

use async_trait::async_trait;
pub use memory::MemoryDatastore;
pub use row::{
	EventChanges,
	EventRow,
	NewEventRow,
	NewResourceRow,
	ResourceChanges,
	ResourceRow,
	SessionRow,
};
use thiserror::Error;
use uuid::Uuid;

/// Any error reported by the persistence collaborator
#[derive(Debug, Error)]
pub enum DatastoreError {
	/// No row with the requested id
	#[error("no {table} row with id {id}")]
	NotFound { table: &'static str, id: i32 },
	/// The access token does not belong to a live session
	#[error("unknown or expired session")]
	UnknownSession,
	/// A unique constraint rejected the write
	#[error("unique constraint {constraint} violated")]
	UniqueViolation { constraint: &'static str },
	/// A foreign key constraint rejected the write
	#[error("{message}")]
	ForeignKeyViolation {
		constraint: &'static str,
		message:    String,
	},
	/// An exclusion constraint rejected the write
	#[error("exclusion constraint {constraint} violated by row {conflicting_id}")]
	ExclusionViolation {
		constraint:     &'static str,
		conflicting_id: i32,
	},
	/// A stored timestamp string could not be decoded
	#[error("malformed timestamp '{0}'")]
	MalformedTimestamp(String),
	/// A millisecond timestamp could not be encoded
	#[error("timestamp {0} is out of range")]
	TimestampOutOfRange(i64),
	/// The collaborator failed or was unreachable
	#[error("datastore unavailable: {0}")]
	Unavailable(String),
}

/// The tabular CRUD + auth API of the persistence collaborator
///
/// Listing operations return rows most recently created first, matching
/// the order the hosted service serves. Mutating operations are atomic:
/// they either fully apply or leave the stored state untouched.
#[async_trait]
pub trait Datastore: Send + Sync {
	async fn list_resources(&self) -> Result<Vec<ResourceRow>, DatastoreError>;

	async fn insert_resource(
		&self,
		new: NewResourceRow,
	) -> Result<ResourceRow, DatastoreError>;

	async fn update_resource(
		&self,
		id: i32,
		changes: ResourceChanges,
	) -> Result<ResourceRow, DatastoreError>;

	/// Delete a resource row
	///
	/// Restricted while any event row still references the resource.
	async fn delete_resource(&self, id: i32) -> Result<(), DatastoreError>;

	/// List event rows whose window ends at or after the given millisecond
	/// timestamp, or every event row when no bound is given
	async fn list_events(
		&self,
		ending_at_or_after: Option<i64>,
	) -> Result<Vec<EventRow>, DatastoreError>;

	/// Insert an event row
	///
	/// Rejected when its window overlaps another event on the same
	/// resource.
	async fn insert_event(
		&self,
		new: NewEventRow,
	) -> Result<EventRow, DatastoreError>;

	async fn update_event(
		&self,
		id: i32,
		changes: EventChanges,
	) -> Result<EventRow, DatastoreError>;

	async fn delete_event(&self, id: i32) -> Result<(), DatastoreError>;

	/// Open a session for the given username, creating the user on first
	/// sight
	async fn create_session(
		&self,
		username: &str,
		lifetime_seconds: i64,
	) -> Result<SessionRow, DatastoreError>;

	/// Look a session up by its token, `None` when unknown or expired
	async fn get_session(
		&self,
		id: Uuid,
	) -> Result<Option<SessionRow>, DatastoreError>;

	async fn delete_session(&self, id: Uuid) -> Result<(), DatastoreError>;
}

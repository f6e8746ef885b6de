#[macro_use]
extern crate tracing;

use common::{Error, ReservationError};
use datastore::timestamp::{str_to_timestamp, to_date_string};
use datastore::{Datastore, EventChanges, EventRow, NewEventRow};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod conflict;

pub use conflict::{Claim, DisplayReservation, find_conflict, visible_reservations};

/// A time-bounded claim on one resource
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Reservation {
	pub id:             i32,
	pub resource_id:    i32,
	/// Window start, milliseconds since the epoch; the window is half open
	pub start:          i64,
	/// Window end, exclusive
	pub end:            i64,
	pub purpose_of_use: String,
	pub user_id:        Uuid,
}

impl TryFrom<EventRow> for Reservation {
	type Error = Error;

	fn try_from(row: EventRow) -> Result<Self, Error> {
		Ok(Self {
			id:             row.id,
			resource_id:    row.resource_id,
			start:          str_to_timestamp(&row.start)?,
			end:            str_to_timestamp(&row.end)?,
			purpose_of_use: row.title,
			user_id:        row.user_id,
		})
	}
}

impl Reservation {
	/// Get every reservation whose window ends at or after `from`, most
	/// recently created first
	#[instrument(skip(store))]
	pub async fn for_window(
		from: i64,
		store: &dyn Datastore,
	) -> Result<Vec<Self>, Error> {
		let rows = store.list_events(Some(from)).await?;

		rows.into_iter().map(Self::try_from).collect()
	}

	/// Delete a [`Reservation`] given its id
	#[instrument(skip(store))]
	pub async fn delete_by_id(
		r_id: i32,
		store: &dyn Datastore,
	) -> Result<(), Error> {
		store.delete_event(r_id).await?;

		info!("deleted reservation with id {r_id}");

		Ok(())
	}
}

/// Count loaded reservations that claim the given resource
#[must_use]
pub fn count_for_resource(
	reservations: &[Reservation],
	resource_id: i32,
) -> usize {
	reservations
		.iter()
		.filter(|r| r.resource_id == resource_id)
		.count()
}

/// Check that a window is strictly positive
pub fn check_window(start: i64, end: i64) -> Result<(), Error> {
	if start >= end {
		return Err(ReservationError::WindowInverted { start, end }.into());
	}

	Ok(())
}

/// A [`Reservation`] that has not been persisted yet
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewReservation {
	pub resource_id:    i32,
	pub start:          i64,
	pub end:            i64,
	pub purpose_of_use: String,
	pub user_id:        Uuid,
}

impl NewReservation {
	/// Insert this [`NewReservation`]
	///
	/// `display_color` is the owning resource's palette color, written
	/// into the stored row as the collaborator's row shape requires.
	#[instrument(skip(store))]
	pub async fn insert(
		self,
		display_color: String,
		store: &dyn Datastore,
	) -> Result<Reservation, Error> {
		let row = NewEventRow {
			title:       self.purpose_of_use,
			start:       to_date_string(self.start)?,
			end:         to_date_string(self.end)?,
			color:       display_color,
			resource_id: self.resource_id,
			user_id:     self.user_id,
		};

		let reservation = Reservation::try_from(store.insert_event(row).await?)?;

		info!("created reservation {reservation:?}");

		Ok(reservation)
	}
}

/// Changes to apply to an existing [`Reservation`]
///
/// Dialog submits and calendar drag/resize edits both land here.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ReservationUpdate {
	pub resource_id:    i32,
	pub start:          i64,
	pub end:            i64,
	pub purpose_of_use: String,
}

impl ReservationUpdate {
	/// Apply this update to the [`Reservation`] with the given id
	#[instrument(skip(store))]
	pub async fn apply_to(
		self,
		r_id: i32,
		display_color: String,
		store: &dyn Datastore,
	) -> Result<Reservation, Error> {
		let changes = EventChanges {
			title:       Some(self.purpose_of_use),
			start:       Some(to_date_string(self.start)?),
			end:         Some(to_date_string(self.end)?),
			color:       Some(display_color),
			resource_id: Some(self.resource_id),
		};

		let reservation =
			Reservation::try_from(store.update_event(r_id, changes).await?)?;

		info!("updated reservation {reservation:?}");

		Ok(reservation)
	}
}

//! The reservation window model
//!
//! Windows are half open `[start, end)` intervals: two reservations on the
//! same resource conflict iff `s1 < e2 && s2 < e1`. Windows that merely
//! touch at a boundary do not conflict.

use resource::{Palette, Resource};
use serde::{Deserialize, Serialize};

use crate::Reservation;

/// A proposed reservation window, before it is committed
#[derive(Clone, Copy, Debug)]
pub struct Claim {
	/// Set when editing an existing reservation in place
	pub id:          Option<i32>,
	pub resource_id: i32,
	pub start:       i64,
	pub end:         i64,
}

/// Find the first loaded reservation the claim would overlap
///
/// A reservation never conflicts with itself, and reservations on other
/// resources never conflict. Advisory only: the datastore runs the same
/// check atomically on commit.
#[must_use]
pub fn find_conflict<'r>(
	claim: &Claim,
	existing: &'r [Reservation],
) -> Option<&'r Reservation> {
	existing.iter().find(|other| {
		claim.id != Some(other.id)
			&& other.resource_id == claim.resource_id
			&& claim.start < other.end
			&& other.start < claim.end
	})
}

/// A reservation shaped for the calendar
///
/// The title is the owning resource's name; the purpose of use is the
/// subtitle. The color comes from a live catalog lookup, not from the
/// stored row.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayReservation {
	pub id:          i32,
	pub title:       String,
	pub subtitle:    String,
	pub start:       i64,
	pub end:         i64,
	pub color:       String,
	pub resource_id: i32,
}

/// Restrict reservations to the visible resources and attach their display
/// name and palette color
#[must_use]
pub fn visible_reservations(
	all: &[Reservation],
	visible: &[Resource],
	palette: &Palette,
) -> Vec<DisplayReservation> {
	all.iter()
		.filter_map(|reservation| {
			let resource =
				visible.iter().find(|r| r.id == reservation.resource_id)?;

			Some(DisplayReservation {
				id:          reservation.id,
				title:       resource.name.clone(),
				subtitle:    reservation.purpose_of_use.clone(),
				start:       reservation.start,
				end:         reservation.end,
				color:       palette
					.color(resource.display_color)
					.unwrap_or_default(),
				resource_id: reservation.resource_id,
			})
		})
		.collect()
}

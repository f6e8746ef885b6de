use reservation::Reservation;
pub use reservation::DisplayReservation;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveReservationRequest {
	pub resource_id:    i32,
	/// Window start, milliseconds since the epoch
	pub start:          i64,
	/// Window end, exclusive
	pub end:            i64,
	#[validate(length(min = 1, message = "purpose of use must not be empty"))]
	pub purpose_of_use: String,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationWindowQuery {
	/// Only reservations ending at or after this instant are loaded
	pub from: Option<i64>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
	pub id:             i32,
	pub resource_id:    i32,
	pub start:          i64,
	pub end:            i64,
	pub purpose_of_use: String,
}

impl From<&Reservation> for ReservationResponse {
	fn from(reservation: &Reservation) -> Self {
		Self {
			id:             reservation.id,
			resource_id:    reservation.resource_id,
			start:          reservation.start,
			end:            reservation.end,
			purpose_of_use: reservation.purpose_of_use.clone(),
		}
	}
}

//! Library-wide error types and [`From`] impls

use std::collections::HashMap;
use std::sync::LazyLock;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use datastore::DatastoreError;
use thiserror::Error;

/// Top level application error, can be converted into a [`Response`]
#[derive(Debug, Error)]
pub enum Error {
	/// Duplicate value for a unique column
	#[error("{0}")]
	Duplicate(String),
	/// The persistence collaborator failed or was unreachable
	#[error("{0}")]
	Backend(String),
	/// An error that should never happen
	#[error("{0}")]
	Infallible(String),
	/// Opaque internal server error
	#[error("internal server error")]
	InternalServerError,
	/// Resource not found
	#[error("not found - {0}")]
	NotFound(String),
	/// Invalid or missing token
	#[error(transparent)]
	TokenError(#[from] TokenError),
	/// Any error related to creating or moving a reservation
	#[error(transparent)]
	ReservationError(#[from] ReservationError),
	/// Any error related to managing the resource catalog
	#[error(transparent)]
	ResourceError(#[from] ResourceError),
	/// Request data could not be validated
	#[error("{0}")]
	ValidationError(String),
}

impl Error {
	/// Return a unique identifying code for this error
	///
	/// When modifying this function the error code should only ever
	/// increase, an error code should never be reused once its assigned to
	/// avoid unexpectedly breaking the frontend
	fn code(&self) -> i32 {
		match self {
			Self::Duplicate(_) => 1,
			Self::Backend(_) => 2,
			Self::Infallible(_) => 3,
			Self::InternalServerError => 4,
			Self::NotFound(_) => 5,
			Self::TokenError(e) => {
				match e {
					TokenError::MissingAccessToken => 6,
					TokenError::MissingSession => 7,
				}
			},
			Self::ReservationError(e) => {
				match e {
					ReservationError::WindowInverted { .. } => 8,
					ReservationError::Overlap { .. } => 9,
					ReservationError::UnknownResource(_) => 10,
				}
			},
			Self::ResourceError(e) => {
				match e {
					ResourceError::InUse { .. } => 11,
					ResourceError::ColorTaken(_) => 12,
					ResourceError::UnknownColor(_) => 13,
					ResourceError::PaletteExhausted => 14,
				}
			},
			Self::ValidationError(_) => 15,
		}
	}

	/// Return additional information about the error
	fn info(&self) -> Option<String> {
		match self {
			Self::Duplicate(m)
			| Self::Backend(m)
			| Self::NotFound(m)
			| Self::ValidationError(m) => Some(m.to_owned()),
			Self::ReservationError(e) => {
				match e {
					ReservationError::WindowInverted { start, end } => Some(
						serde_json::json!({"start": start, "end": end})
							.to_string(),
					),
					ReservationError::Overlap { conflicting_id } => Some(
						serde_json::json!({"conflictsWith": conflicting_id})
							.to_string(),
					),
					ReservationError::UnknownResource(id) => {
						Some(serde_json::json!({"resourceId": id}).to_string())
					},
				}
			},
			Self::ResourceError(e) => {
				match e {
					ResourceError::InUse { reservations, .. } => Some(
						serde_json::json!({"reservations": reservations})
							.to_string(),
					),
					ResourceError::ColorTaken(color)
					| ResourceError::UnknownColor(color) => {
						Some(serde_json::json!({"color": color}).to_string())
					},
					ResourceError::PaletteExhausted => None,
				}
			},
			_ => None,
		}
	}
}

/// Convert an error into a [`Response`]
impl IntoResponse for Error {
	fn into_response(self) -> Response {
		error!("{self:?}");

		let message = self.to_string();

		let data = serde_json::json!({
			"message": message,
			"code": self.code(),
			"info": self.info(),
		});

		let status = match self {
			Self::Duplicate(_)
			| Self::ReservationError(ReservationError::Overlap { .. })
			| Self::ResourceError(
				ResourceError::InUse { .. }
				| ResourceError::ColorTaken(_)
				| ResourceError::PaletteExhausted,
			) => StatusCode::CONFLICT,
			Self::Backend(_) => StatusCode::BAD_GATEWAY,
			Self::InternalServerError | Self::Infallible(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			},
			Self::TokenError(_) => StatusCode::UNAUTHORIZED,
			Self::ReservationError(
				ReservationError::WindowInverted { .. },
			) => StatusCode::BAD_REQUEST,
			Self::NotFound(_) => StatusCode::NOT_FOUND,
			Self::ReservationError(ReservationError::UnknownResource(_))
			| Self::ResourceError(ResourceError::UnknownColor(_))
			| Self::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
		};

		(status, axum::Json(data)).into_response()
	}
}

/// Any error related to a token
#[derive(Debug, Error)]
pub enum TokenError {
	#[error("missing or invalid access token")]
	MissingAccessToken,
	#[error("missing session")]
	MissingSession,
}

/// Any error related to creating or moving a reservation
#[derive(Debug, Error)]
pub enum ReservationError {
	/// The window ends on or before its own start
	#[error("reservation end must come after its start")]
	WindowInverted { start: i64, end: i64 },
	/// The window overlaps an existing reservation on the same resource
	#[error("the requested window overlaps an existing reservation")]
	Overlap { conflicting_id: i32 },
	/// The reservation points at a resource that does not exist
	#[error("no resource with id {0}")]
	UnknownResource(i32),
}

/// Any error related to managing the resource catalog
#[derive(Debug, Error)]
pub enum ResourceError {
	/// The resource still has reservations pointing at it
	#[error("'{name}' has valid reservations so deletion is prohibited")]
	InUse { name: String, reservations: usize },
	/// The chosen display color is already used by another resource
	#[error("display color {0} is already in use")]
	ColorTaken(i32),
	/// The chosen display color is outside the palette
	#[error("display color {0} is not in the palette")]
	UnknownColor(i32),
	/// Every palette color is already in use
	#[error("every display color is already in use")]
	PaletteExhausted,
}

/// A list of possible internal errors
///
/// API end users should never see these details
#[derive(Debug, Error)]
pub enum InternalServerError {
	/// Error executing some datastore operation
	#[error("datastore error -- {0:?}")]
	DatastoreError(DatastoreError),
}

// Map internal server errors to application errors
impl From<InternalServerError> for Error {
	fn from(value: InternalServerError) -> Self {
		error!("internal server error -- {value}");

		Self::InternalServerError
	}
}

/// Map validation errors to application errors
impl From<validator::ValidationErrors> for Error {
	fn from(err: validator::ValidationErrors) -> Self {
		let errs = err.field_errors();
		let repr = errs
			.values()
			.map(|v| {
				v.iter()
					.map(ToString::to_string)
					.collect::<Vec<String>>()
					.join("\n")
			})
			.collect::<Vec<String>>()
			.join("\n");

		Self::ValidationError(repr)
	}
}

/// Map of constraint names to column names.
static CONSTRAINT_TO_COLUMN: LazyLock<HashMap<&str, &str>> =
	LazyLock::new(|| {
		HashMap::from([("resources_display_color_key", "display_color")])
	});

/// Map datastore errors to application errors.
impl From<DatastoreError> for Error {
	fn from(err: DatastoreError) -> Self {
		match err {
			// No row returned by an operation that expected one
			DatastoreError::NotFound { table, id } => {
				Self::NotFound(format!("no {table} row with id {id}"))
			},
			DatastoreError::UnknownSession => {
				TokenError::MissingSession.into()
			},
			// Unique constraint violation
			DatastoreError::UniqueViolation { constraint } => {
				match CONSTRAINT_TO_COLUMN.get(constraint) {
					Some(column) => {
						Self::Duplicate(format!("{column} is already in use"))
					},
					None => InternalServerError::DatastoreError(
						DatastoreError::UniqueViolation { constraint },
					)
					.into(),
				}
			},
			// Foreign key constraint violation
			DatastoreError::ForeignKeyViolation { message, .. } => {
				Self::ValidationError(message)
			},
			// Exclusion constraint violation
			DatastoreError::ExclusionViolation { conflicting_id, .. } => {
				ReservationError::Overlap { conflicting_id }.into()
			},
			DatastoreError::Unavailable(message) => Self::Backend(message),
			err @ (DatastoreError::MalformedTimestamp(_)
			| DatastoreError::TimestampOutOfRange(_)) => {
				InternalServerError::DatastoreError(err).into()
			},
		}
	}
}

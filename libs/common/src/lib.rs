//! Shared application types
#[macro_use]
extern crate tracing;

mod error;

pub use error::{
	Error,
	InternalServerError,
	ReservationError,
	ResourceError,
	TokenError,
};

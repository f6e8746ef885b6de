#[macro_use]
extern crate tracing;

use std::sync::Arc;

use datastore::Datastore;

mod config;
pub mod controllers;
pub mod middleware;
pub mod routes;
pub mod schemas;
mod session;
mod workspace;

pub use config::Config;
pub use session::{Session, SessionData};
pub use workspace::{Workspace, Workspaces};

/// Shared state for the axum app
#[derive(Clone)]
pub struct AppState {
	pub config:     Config,
	pub datastore:  Arc<dyn Datastore>,
	pub workspaces: Arc<Workspaces>,
}

//! Per-session view state
//!
//! A [`Workspace`] is the session-scoped cache of the catalog, the loaded
//! reservation window, the facet selection derived from the catalog, and
//! the single shared error-text slot. It is created at login, replaced by
//! a full refetch after every successful mutation, and torn down at
//! logout.

use std::collections::HashMap;

use chrono::Utc;
use common::Error;
use parking_lot::RwLock;
use reservation::Reservation;
use resource::Resource;
use resource::facet::FacetSelection;
use uuid::Uuid;

use crate::AppState;

/// The cached state backing one session's view
#[derive(Clone, Debug, Default)]
pub struct Workspace {
	/// Catalog snapshot, most recently created first
	pub catalog:      Vec<Resource>,
	/// Loaded reservation window, most recently created first
	pub reservations: Vec<Reservation>,
	pub facets:       FacetSelection,
	/// Start of the loaded reservation window, milliseconds since the
	/// epoch
	pub window_start: i64,
	/// The single shared error-text slot
	pub annotation:   Option<String>,
}

/// Registry of per-session workspaces
#[derive(Debug, Default)]
pub struct Workspaces {
	inner: RwLock<HashMap<Uuid, Workspace>>,
}

impl Workspaces {
	/// Snapshot the workspace for a session
	pub fn get(&self, session_id: Uuid) -> Option<Workspace> {
		self.inner.read().get(&session_id).cloned()
	}

	/// Run a closure against the mutable workspace for a session
	pub fn update<T>(
		&self,
		session_id: Uuid,
		apply: impl FnOnce(&mut Workspace) -> T,
	) -> Option<T> {
		self.inner.write().get_mut(&session_id).map(apply)
	}

	pub fn insert(&self, session_id: Uuid, workspace: Workspace) {
		self.inner.write().insert(session_id, workspace);
	}

	/// Tear down the workspace for a session
	pub fn remove(&self, session_id: Uuid) {
		self.inner.write().remove(&session_id);
	}
}

impl AppState {
	/// Snapshot the workspace for an authorized session
	pub(crate) fn workspace(&self, session_id: Uuid) -> Result<Workspace, Error> {
		self.workspaces.get(session_id).ok_or_else(|| {
			Error::Infallible(
				"no workspace for an authorized session".to_string(),
			)
		})
	}

	/// Make sure a workspace exists for the session, loading both
	/// collections on first sight
	pub(crate) async fn ensure_workspace(
		&self,
		session_id: Uuid,
	) -> Result<(), Error> {
		if self.workspaces.get(session_id).is_some() {
			return Ok(());
		}

		self.open_workspace(session_id).await
	}

	/// Build a fresh workspace for the session from the collaborator
	pub(crate) async fn open_workspace(
		&self,
		session_id: Uuid,
	) -> Result<(), Error> {
		let window_start =
			(Utc::now() - self.config.reservation_lookback).timestamp_millis();

		self.workspaces.insert(
			session_id,
			Workspace { window_start, ..Workspace::default() },
		);

		self.refresh_catalog(session_id).await?;
		self.refresh_reservations(session_id).await?;

		debug!("opened workspace for session {session_id}");

		Ok(())
	}

	/// Refetch the catalog and reconcile the facet selection against it
	pub(crate) async fn refresh_catalog(
		&self,
		session_id: Uuid,
	) -> Result<(), Error> {
		let result = Resource::get_all(self.datastore.as_ref()).await;

		self.finish_sync(session_id, result, |workspace, catalog| {
			workspace.facets =
				FacetSelection::reconcile(&catalog, &workspace.facets);
			workspace.catalog = catalog;
		})
	}

	/// Refetch the loaded reservation window
	pub(crate) async fn refresh_reservations(
		&self,
		session_id: Uuid,
	) -> Result<(), Error> {
		let window_start = self
			.workspaces
			.get(session_id)
			.map(|workspace| workspace.window_start)
			.unwrap_or_default();

		let result =
			Reservation::for_window(window_start, self.datastore.as_ref())
				.await;

		self.finish_sync(session_id, result, |workspace, reservations| {
			workspace.reservations = reservations;
		})
	}

	/// Record a mutation outcome in the session's error slot
	///
	/// Failures land in the slot; successes leave it for the refetch that
	/// follows to clear.
	pub(crate) fn record<T>(
		&self,
		session_id: Uuid,
		result: Result<T, Error>,
	) -> Result<T, Error> {
		if let Err(error) = &result {
			let text = error.to_string();

			self.workspaces.update(session_id, |workspace| {
				workspace.annotation = Some(text);
			});
		}

		result
	}

	/// Commit a fetch outcome to the workspace
	///
	/// A successful sync replaces the cache and clears the error slot; a
	/// failure records the error text and leaves the last-synced state
	/// untouched.
	fn finish_sync<T>(
		&self,
		session_id: Uuid,
		result: Result<T, Error>,
		commit: impl FnOnce(&mut Workspace, T),
	) -> Result<(), Error> {
		match result {
			Ok(value) => {
				self.workspaces.update(session_id, |workspace| {
					commit(workspace, value);
					workspace.annotation = None;
				});

				Ok(())
			},
			Err(error) => {
				let text = error.to_string();

				self.workspaces.update(session_id, |workspace| {
					workspace.annotation = Some(text);
				});

				Err(error)
			},
		}
	}
}

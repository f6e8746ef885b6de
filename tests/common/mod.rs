use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum_test::TestServer;
use datastore::MemoryDatastore;
use gearbook::schemas::reservation::ReservationResponse;
use gearbook::schemas::resource::ResourceResponse;
use gearbook::{AppState, Config, Workspaces, routes};
use serde_json::json;

#[allow(dead_code)]
pub struct TestEnv {
	pub app: TestServer,
	router:  Router,
}

#[allow(dead_code)]
impl TestEnv {
	/// Get a test environment running against a fresh in-memory datastore
	///
	/// # Panics
	/// Panics if building a test server fails
	pub fn new() -> Self {
		let config = Config::from_env();

		let state = AppState {
			config,
			datastore: Arc::new(MemoryDatastore::default()),
			workspaces: Arc::new(Workspaces::default()),
		};

		let router = routes::get_app_router(state);

		let test_server = TestServer::builder()
			.save_cookies()
			.build(router.clone())
			.unwrap();

		TestEnv { app: test_server, router }
	}

	/// Sign in as the given user
	pub async fn login(self, username: &str) -> Self {
		let response = self
			.app
			.post("/auth/login")
			.json(&json!({ "username": username }))
			.await;

		assert_eq!(response.status_code(), StatusCode::OK);

		self
	}

	/// Open a second signed-in client over the same datastore
	pub async fn second_client(&self, username: &str) -> TestServer {
		let client = TestServer::builder()
			.save_cookies()
			.build(self.router.clone())
			.unwrap();

		let response = client
			.post("/auth/login")
			.json(&json!({ "username": username }))
			.await;

		assert_eq!(response.status_code(), StatusCode::OK);

		client
	}

	/// Create a resource and return it
	pub async fn create_resource(
		&self,
		name: &str,
		kind: &str,
		generation: &str,
	) -> ResourceResponse {
		let response = self
			.app
			.post("/resources")
			.json(&json!({
				"name": name,
				"type": kind,
				"generation": generation,
				"note": "",
			}))
			.await;

		assert_eq!(response.status_code(), StatusCode::CREATED);

		response.json::<ResourceResponse>()
	}

	/// Create a reservation and return it
	pub async fn create_reservation(
		&self,
		resource_id: i32,
		start: i64,
		end: i64,
	) -> ReservationResponse {
		let response = self
			.app
			.post("/reservations")
			.json(&json!({
				"resourceId": resource_id,
				"start": start,
				"end": end,
				"purposeOfUse": "calibration run",
			}))
			.await;

		assert_eq!(response.status_code(), StatusCode::CREATED);

		response.json::<ReservationResponse>()
	}

	/// A reservation window `days` days from now, one hour long
	///
	/// Second-aligned, since the stored timestamp form has second
	/// granularity.
	pub fn window(days: i64) -> (i64, i64) {
		let start =
			(chrono::Utc::now().timestamp() + days * 24 * 60 * 60) * 1000;

		(start, start + 60 * 60 * 1000)
	}
}

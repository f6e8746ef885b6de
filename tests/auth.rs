use axum::http::StatusCode;

mod common;

use common::TestEnv;
use gearbook::schemas::auth::SessionResponse;

#[tokio::test(flavor = "multi_thread")]
async fn login_opens_a_session() {
	let env = TestEnv::new().login("test").await;

	let response = env.app.get("/auth/me").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<SessionResponse>();

	assert_eq!(body.username, "test");
}

#[tokio::test(flavor = "multi_thread")]
async fn login_requires_a_username() {
	let env = TestEnv::new();

	let response = env
		.app
		.post("/auth/login")
		.json(&serde_json::json!({ "username": "" }))
		.await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(flavor = "multi_thread")]
async fn protected_routes_require_an_access_token() {
	let env = TestEnv::new();

	let response = env.app.get("/resources").await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread")]
async fn logout_tears_the_session_down() {
	let env = TestEnv::new().login("test").await;

	let response = env.app.post("/auth/logout").await;

	assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

	let response = env.app.get("/auth/me").await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread")]
async fn the_same_username_keeps_its_user_id() {
	let env = TestEnv::new().login("test").await;

	let first = env.app.get("/auth/me").await.json::<SessionResponse>();

	let second_client = env.second_client("test").await;
	let second =
		second_client.get("/auth/me").await.json::<SessionResponse>();

	assert_eq!(first.user_id, second.user_id);
}

use axum::http::StatusCode;

mod common;

use common::TestEnv;
use gearbook::schemas::resource::{FreeColorsResponse, ResourceResponse};
use serde_json::json;

#[tokio::test(flavor = "multi_thread")]
async fn create_resource() {
	let env = TestEnv::new().login("test").await;

	let created = env.create_resource("spectrometer", "Grid", "5").await;

	assert!(created.id > 0);

	let response = env.app.get("/resources").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<Vec<ResourceResponse>>();

	assert_eq!(body.len(), 1);
	assert_eq!(body[0].name, "spectrometer");
}

#[tokio::test(flavor = "multi_thread")]
async fn create_resource_requires_a_name() {
	let env = TestEnv::new().login("test").await;

	let response = env
		.app
		.post("/resources")
		.json(&json!({
			"name": "",
			"type": "Grid",
			"generation": "5",
		}))
		.await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(flavor = "multi_thread")]
async fn resources_are_listed_most_recent_first() {
	let env = TestEnv::new().login("test").await;

	env.create_resource("older", "Grid", "5").await;
	env.create_resource("newer", "Grid", "5").await;

	let body =
		env.app.get("/resources").await.json::<Vec<ResourceResponse>>();

	assert_eq!(body[0].name, "newer");
	assert_eq!(body[1].name, "older");
}

#[tokio::test(flavor = "multi_thread")]
async fn assigned_colors_are_distinct() {
	let env = TestEnv::new().login("test").await;

	let first = env.create_resource("first", "Grid", "5").await;
	let second = env.create_resource("second", "Grid", "5").await;

	assert_ne!(first.display_color, second.display_color);

	let free = env
		.app
		.get("/resources/colors")
		.await
		.json::<FreeColorsResponse>();

	assert!(
		!free
			.colors
			.iter()
			.any(|color| color.index == first.display_color
				|| color.index == second.display_color)
	);
}

#[tokio::test(flavor = "multi_thread")]
async fn taken_colors_are_refused() {
	let env = TestEnv::new().login("test").await;

	let first = env.create_resource("first", "Grid", "5").await;

	let response = env
		.app
		.post("/resources")
		.json(&json!({
			"name": "second",
			"type": "Grid",
			"generation": "5",
			"displayColor": first.display_color,
		}))
		.await;

	assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test(flavor = "multi_thread")]
async fn colors_outside_the_palette_are_refused() {
	let env = TestEnv::new().login("test").await;

	let response = env
		.app
		.post("/resources")
		.json(&json!({
			"name": "oddball",
			"type": "Grid",
			"generation": "5",
			"displayColor": 512,
		}))
		.await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(flavor = "multi_thread")]
async fn an_edited_resource_keeps_its_own_color() {
	let env = TestEnv::new().login("test").await;

	let created = env.create_resource("scope", "Grid", "5").await;

	let response = env
		.app
		.post(&format!("/resources/{}", created.id))
		.json(&json!({
			"name": "scope mk2",
			"type": "Grid",
			"generation": "6",
			"displayColor": created.display_color,
		}))
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<ResourceResponse>();

	assert_eq!(body.name, "scope mk2");
	assert_eq!(body.generation, "6");
	assert_eq!(body.display_color, created.display_color);
}

#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_reserved_resource_is_refused() {
	let env = TestEnv::new().login("test").await;

	let resource = env.create_resource("analyzer", "Grid", "5").await;
	let (start, end) = TestEnv::window(1);
	env.create_reservation(resource.id, start, end).await;

	let response =
		env.app.delete(&format!("/resources/{}", resource.id)).await;

	assert_eq!(response.status_code(), StatusCode::CONFLICT);

	// Neither collection changed
	let resources =
		env.app.get("/resources").await.json::<Vec<ResourceResponse>>();

	assert_eq!(resources.len(), 1);

	let reservations = env.app.get("/reservations").await;

	assert_eq!(reservations.status_code(), StatusCode::OK);
	assert!(reservations.text().contains("analyzer"));
}

#[tokio::test(flavor = "multi_thread")]
async fn an_unreferenced_resource_can_be_deleted() {
	let env = TestEnv::new().login("test").await;

	let resource = env.create_resource("analyzer", "Grid", "5").await;

	let response =
		env.app.delete(&format!("/resources/{}", resource.id)).await;

	assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

	let resources =
		env.app.get("/resources").await.json::<Vec<ResourceResponse>>();

	assert!(resources.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_resource_frees_its_color() {
	let env = TestEnv::new().login("test").await;

	let resource = env.create_resource("analyzer", "Grid", "5").await;

	env.app.delete(&format!("/resources/{}", resource.id)).await;

	let free = env
		.app
		.get("/resources/colors")
		.await
		.json::<FreeColorsResponse>();

	assert!(
		free.colors
			.iter()
			.any(|color| color.index == resource.display_color)
	);
}

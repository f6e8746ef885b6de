use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::controllers::annotation::{clear_annotation, get_annotation};
use crate::controllers::auth::{get_current_session, login, logout};
use crate::controllers::healthcheck;
use crate::controllers::reservation::{
	create_reservation,
	delete_reservation,
	get_reservations,
	update_reservation,
};
use crate::controllers::resource::{
	create_resource,
	delete_resource,
	get_facets,
	get_free_colors,
	get_resources,
	get_visible_resources,
	toggle_facet,
	update_resource,
};
use crate::middleware::AuthLayer;

/// Get the app router
pub fn get_app_router(state: AppState) -> Router {
	let api_routes = Router::new()
		.route("/healthcheck", get(healthcheck))
		.nest("/auth", auth_routes(&state))
		.nest("/annotation", annotation_routes(&state))
		.nest("/resources", resource_routes(&state))
		.nest("/facets", facet_routes(&state))
		.nest("/reservations", reservation_routes(&state));

	Router::new()
		.merge(api_routes)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(TimeoutLayer::new(Duration::from_secs(10)))
				.layer(CompressionLayer::new()),
		)
		.with_state(state)
}

/// Authentication routes
fn auth_routes(state: &AppState) -> Router<AppState> {
	let protected = Router::new()
		.route("/logout", post(logout))
		.route("/me", get(get_current_session))
		.route_layer(AuthLayer::new(state.clone()));

	Router::new().route("/login", post(login)).merge(protected)
}

/// Error annotation routes
fn annotation_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/", get(get_annotation).delete(clear_annotation))
		.route_layer(AuthLayer::new(state.clone()))
}

/// Resource catalog routes
fn resource_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/", get(get_resources).post(create_resource))
		.route("/visible", get(get_visible_resources))
		.route("/colors", get(get_free_colors))
		.route("/{id}", post(update_resource).delete(delete_resource))
		.route_layer(AuthLayer::new(state.clone()))
}

/// Facet selection routes
fn facet_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/", get(get_facets).post(toggle_facet))
		.route_layer(AuthLayer::new(state.clone()))
}

/// Reservation routes
fn reservation_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/", get(get_reservations).post(create_reservation))
		.route("/{id}", post(update_reservation).delete(delete_reservation))
		.route_layer(AuthLayer::new(state.clone()))
}

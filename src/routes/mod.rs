use axum::{routing::get, Router};

use crate::handlers::location;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Mechanic-facing and client-facing location routes
    let mechanic_routes = Router::new()
        .route("/nearby", get(location::nearby_mechanics))
        .route(
            "/{id}/location",
            get(location::get_mechanic_location).put(location::update_mechanic_location),
        )
        .route("/{id}/nearby-services", get(location::nearby_services))
        .route(
            "/{id}/services/{service_id}/distance",
            get(location::distance_to_service),
        );

    Router::new()
        .nest("/api/mechanics", mechanic_routes)
        .with_state(state)
}

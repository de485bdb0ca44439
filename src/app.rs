use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Full HTTP surface of the service
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(public::home::root))
        .route("/health", get(public::home::health))
        .merge(session_routes())
        // Protected
        .merge(notes_routes(state.clone()))
        .with_state(state);

    // Global middleware
    if config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

fn session_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/signup", post(auth::signup))
        .route("/signin", post(auth::signin))
        .route("/signout", post(auth::signout))
}

fn notes_routes(state: AppState) -> Router<AppState> {
    use protected::notes;

    Router::new()
        .route("/me", get(protected::profile::me))
        // Collection
        .route("/notes", get(notes::notes_list).post(notes::note_create))
        // Individual note
        .route(
            "/notes/:id",
            get(notes::note_get)
                .put(notes::note_update)
                .patch(notes::note_update)
                .delete(notes::note_delete),
        )
        // Only matched routes pass through the gate; unknown paths stay 404
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

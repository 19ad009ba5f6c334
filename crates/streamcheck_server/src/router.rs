use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::context::AppContext;
use crate::routes;

/// Build the application router.
///
/// CORS accepts any origin, method and header. Deployments that need a
/// tighter policy must front the service with a proxy.
pub fn build_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::root))
        .route("/verify", get(routes::verify))
        .layer(cors)
        .with_state(ctx)
}

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, health_handler,
    list_links_handler, metrics_handler, openapi_document_handler, redirect_handler,
    swagger_index_handler, update_link_handler,
};
use crate::openapi::DOCUMENT_PATH;
use crate::state::AppState;

pub struct App {}

impl App {
    /// Every `GET` that matches no other route is resolved as an alias.
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/metrics", get(metrics_handler))
            .route("/swagger", get(swagger_index_handler))
            .route("/swagger/", get(swagger_index_handler))
            .route("/swagger/index.html", get(swagger_index_handler))
            .route(DOCUMENT_PATH, get(openapi_document_handler))
            .nest(
                "/api",
                Router::new()
                    .route("/links", get(list_links_handler).post(create_link_handler))
                    .route(
                        "/links/{id}",
                        get(get_link_handler)
                            .patch(update_link_handler)
                            .delete(delete_link_handler),
                    ),
            )
            .route("/", get(redirect_handler))
            .route("/{*alias}", get(redirect_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}

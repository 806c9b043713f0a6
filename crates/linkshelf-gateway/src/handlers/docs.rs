use axum::response::Html;
use axum::Json;
use serde_json::Value;

use crate::openapi;

pub async fn swagger_index_handler() -> Html<String> {
    Html(openapi::index_page())
}

pub async fn openapi_document_handler() -> Json<Value> {
    Json(openapi::document())
}

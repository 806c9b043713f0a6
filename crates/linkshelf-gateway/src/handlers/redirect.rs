use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use linkshelf_redirector::Resolution;

use crate::state::AppState;

/// Resolves the request path as an alias.
pub async fn redirect_handler(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let accept = headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok());
    let resolution = state.redirector().resolve(uri.path(), accept).await;

    match resolution {
        Resolution::Redirect { location } => {
            (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response()
        }
        other => {
            let status = StatusCode::from_u16(other.status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (
                status,
                [(header::CONTENT_TYPE, other.content_type())],
                other.body(),
            )
                .into_response()
        }
    }
}

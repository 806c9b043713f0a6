use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use linkshelf_core::validation::{validate_link, validate_new_link};
use linkshelf_core::LinkId;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::model::{
    LinkDocument, LinkListDocument, LinkRequest, LinkRequestData, LinkResource, ListMeta, JSON_API_MEDIA_TYPE,
    RESOURCE_TYPE,
};
use crate::pagination::{Page, PaginationLinks};
use crate::state::AppState;

pub const LINKS_PATH: &str = "/api/links";

pub async fn list_links_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response> {
    let page = Page::from_query(&params);
    let listing = state
        .storage()
        .paginated_get_all(page.number, page.size)
        .await?;

    let document = LinkListDocument {
        links: PaginationLinks::new(LINKS_PATH, page, listing.total),
        meta: ListMeta {
            links: listing.total,
        },
        data: listing.links.into_iter().map(LinkResource::from).collect(),
    };
    Ok(json_api(StatusCode::OK, document))
}

pub async fn get_link_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let id = parse_id(&id)?;
    let link = state.storage().get_one(id).await?;

    Ok(json_api(StatusCode::OK, LinkDocument::from(link)))
}

pub async fn create_link_handler(State(state): State<AppState>, body: Bytes) -> Result<Response> {
    let new_link = parse_body(&body)?.attributes;
    validate_new_link(&new_link)?;

    let link = state.storage().insert(new_link).await?;
    debug!(id = %link.id, short_name = %link.short_name, "created link");

    let location = format!("{LINKS_PATH}/{}", link.id);
    let mut response = json_api(StatusCode::CREATED, LinkDocument::from(link));
    if let Ok(location) = location.parse() {
        response.headers_mut().insert(header::LOCATION, location);
    }
    Ok(response)
}

/// Replaces every attribute of a stored link.
pub async fn update_link_handler(
    State(state): State<AppState>,
    Path(path_id): Path<String>,
    body: Bytes,
) -> Result<Response> {
    let id = parse_id(&path_id)?;
    let data = parse_body(&body)?;
    if let Some(body_id) = data.id.filter(|body_id| *body_id != path_id) {
        return Err(AppError::IdMismatch {
            path: path_id,
            body: body_id,
        });
    }

    let link = data.attributes.into_link(id);
    validate_link(&link)?;

    state.storage().update(link.clone()).await?;
    debug!(%id, short_name = %link.short_name, "updated link");

    Ok(json_api(StatusCode::OK, LinkDocument::from(link)))
}

pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    state.storage().delete(id).await?;
    debug!(%id, "deleted link");

    Ok(StatusCode::NO_CONTENT)
}

fn parse_id(raw: &str) -> Result<LinkId> {
    raw.parse().map_err(|_| AppError::InvalidId(raw.to_string()))
}

fn parse_body(body: &[u8]) -> Result<LinkRequestData> {
    let request: LinkRequest =
        serde_json::from_slice(body).map_err(|err| AppError::MalformedBody(err.to_string()))?;

    match request.data.kind.as_deref() {
        None | Some(RESOURCE_TYPE) => Ok(request.data),
        Some(other) => Err(AppError::TypeMismatch(other.to_string())),
    }
}

fn json_api<T: serde::Serialize>(status: StatusCode, document: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, JSON_API_MEDIA_TYPE)],
        Json(document),
    )
        .into_response()
}

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use linkshelf_core::{StorageError, ValidationErrors};
use thiserror::Error;
use tracing::error;

use crate::model::{ErrorDocument, ErrorObject, JSON_API_MEDIA_TYPE};

pub type Result<T> = std::result::Result<T, AppError>;

pub const RESOURCE_NOT_FOUND: &str = "resource not found";
pub const INTERNAL_SERVER_ERROR: &str = "internal server error";

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    /// The path does not name a valid link identifier.
    #[error("invalid link id {0:?}")]
    InvalidId(String),
    #[error("id {body:?} in the request body does not match id {path:?} in the path")]
    IdMismatch { path: String, body: String },
    #[error("resource type {0:?} does not match the endpoint")]
    TypeMismatch(String),
    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Storage(StorageError::NotFound(_)) | AppError::InvalidId(_) => {
                StatusCode::NOT_FOUND
            }
            AppError::Storage(StorageError::ShortNameConflict { .. })
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::IdMismatch { .. } | AppError::TypeMismatch(_) => StatusCode::CONFLICT,
            AppError::MalformedBody(_) => StatusCode::NOT_ACCEPTABLE,
        }
    }

    fn error_objects(&self) -> Vec<ErrorObject> {
        let status = self.status().as_u16();
        match self {
            AppError::Validation(errors) => errors
                .errors
                .iter()
                .map(|field| ErrorObject::new(status, field.to_string()).with_attribute(field.field))
                .collect(),
            AppError::Storage(StorageError::NotFound(_)) | AppError::InvalidId(_) => {
                vec![ErrorObject::new(status, RESOURCE_NOT_FOUND)]
            }
            AppError::Storage(err @ StorageError::ShortNameConflict { existing }) => {
                vec![ErrorObject::new(status, err.to_string())
                    .with_detail(format!("link {} uses this short name", existing.id))
                    .with_attribute("shortName")]
            }
            AppError::Storage(err) if err.is_failure() => {
                vec![ErrorObject::new(status, INTERNAL_SERVER_ERROR)]
            }
            other => vec![ErrorObject::new(status, other.to_string())],
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        let document = ErrorDocument {
            errors: self.error_objects(),
        };
        (
            status,
            [(header::CONTENT_TYPE, JSON_API_MEDIA_TYPE)],
            Json(document),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkshelf_core::{FieldError, LinkId, NewLink};

    #[test]
    fn status_mapping() {
        let cases = [
            (AppError::Storage(StorageError::NotFound("x".into())), 404),
            (AppError::InvalidId("abc".into()), 404),
            (
                AppError::Storage(StorageError::conflict(
                    NewLink::new("a", "https://a.io").into_link(LinkId::new(1)),
                )),
                400,
            ),
            (AppError::Validation(ValidationErrors::default()), 400),
            (AppError::Storage(StorageError::Timeout("slow".into())), 500),
            (
                AppError::IdMismatch {
                    path: "1".into(),
                    body: "2".into(),
                },
                409,
            ),
            (AppError::TypeMismatch("users".into()), 409),
            (AppError::MalformedBody("eof".into()), 406),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status().as_u16(), expected, "{err}");
        }
    }

    #[test]
    fn one_object_per_failed_rule() {
        let err = AppError::Validation(ValidationErrors {
            errors: vec![
                FieldError {
                    field: "shortName",
                    rule: "reserved",
                },
                FieldError {
                    field: "originalUrl",
                    rule: "required",
                },
            ],
        });

        let objects = err.error_objects();
        assert_eq!(objects.len(), 2);
        assert_eq!(
            objects[1].source.as_ref().map(|s| s.pointer.as_str()),
            Some("/data/attributes/originalUrl")
        );
    }

    #[test]
    fn failures_hide_the_cause() {
        let err = AppError::Storage(StorageError::Query("syntax error near SELECT".into()));

        let objects = err.error_objects();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].status, "500");
        assert_eq!(objects[0].title, INTERNAL_SERVER_ERROR);
        assert_eq!(objects[0].detail, None);
    }
}

//! Request extractors whose rejections are [`AppError`]s.
//!
//! Axum's stock `Json`, `Path` and `Query` extractors reject with plain-text
//! bodies. These wrappers delegate to them and convert the rejection so
//! every client error carries the `{ "error", "code" }` JSON body.

use axum::body::Bytes;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Multipart, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;

use crate::error::AppError;

/// Multipart field carrying the batch CSV file.
pub const BATCH_FILE_FIELD: &str = "file";

/// JSON request body.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Typed path parameters.
#[derive(Debug)]
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// Typed query string.
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// The CSV file from a multipart batch upload.
///
/// Reads fields until [`BATCH_FILE_FIELD`] is found; other fields are
/// skipped. A body over the configured limit rejects with 413.
#[derive(Debug)]
pub struct BatchFile {
    pub file_name: String,
    pub data: Bytes,
}

impl<S> FromRequest<S> for BatchFile
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state).await?;

        while let Some(field) = multipart.next_field().await? {
            if field.name() != Some(BATCH_FILE_FIELD) {
                continue;
            }
            let file_name = field.file_name().unwrap_or("unknown").to_string();
            let data = field.bytes().await?;
            return Ok(Self { file_name, data });
        }

        Err(AppError::BadRequest(format!(
            "Missing multipart field '{BATCH_FILE_FIELD}'"
        )))
    }
}

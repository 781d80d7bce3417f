use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::Response,
};
use chrono::{DateTime, NaiveDate, Utc};
use common::format_validation_errors;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use validator::Validate;

use crate::response::fail;

/// JSON body that has been deserialized and passed its `validator` rules.
///
/// Malformed JSON and rule violations are both answered with a `400` envelope.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| fail(StatusCode::BAD_REQUEST, rejection.body_text()))?;

        value
            .validate()
            .map_err(|e| fail(StatusCode::BAD_REQUEST, format_validation_errors(&e)))?;

        Ok(Self(value))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// Paged list payload.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub list: Vec<T>,
    pub total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
}

impl<T: Serialize> ListResponse<T> {
    /// Unpaged list; `total` is the list length.
    pub fn all(list: Vec<T>) -> Self {
        Self {
            total: list.len() as u64,
            list,
            page: None,
            page_size: None,
        }
    }

    pub fn paged(list: Vec<T>, total: u64, page: u64, page_size: u64) -> Self {
        Self {
            list,
            total,
            page: Some(page),
            page_size: Some(page_size),
        }
    }
}

/// Parses an optional `YYYY-MM-DD` field, naming the field in the error.
pub fn parse_date(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>, Response> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => NaiveDate::parse_from_str(v, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| fail(StatusCode::BAD_REQUEST, format!("{field} must be YYYY-MM-DD"))),
    }
}

/// Parses an optional RFC 3339 timestamp field.
pub fn parse_timestamp(field: &str, value: Option<&str>) -> Result<Option<DateTime<Utc>>, Response> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => DateTime::parse_from_rfc3339(v)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| {
                fail(
                    StatusCode::BAD_REQUEST,
                    format!("{field} must be an RFC 3339 timestamp"),
                )
            }),
    }
}

pub fn rfc3339(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

pub fn rfc3339_opt(dt: &Option<DateTime<Utc>>) -> Option<String> {
    dt.as_ref().map(rfc3339)
}

//! List window and delete version extractors.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use payments_persistence::core::ItemStore;
use serde::Deserialize;

use crate::error::RestError;
use crate::state::AppState;

/// Raw `from`/`to` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// First index of the window.
    pub from: Option<String>,
    /// One past the last index of the window.
    pub to: Option<String>,
}

/// The window of payments a list request asks for.
///
/// `to` is kept as requested; `limit` is `to - from` capped at the maximum
/// page size.
///
/// # Example
///
/// ```rust,ignore
/// use payments_rest::extractors::ListWindow;
///
/// async fn list_handler(window: ListWindow) {
///     let (offset, limit) = (window.from(), window.limit());
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListWindow {
    from: usize,
    to: usize,
    limit: usize,
}

fn parse_index(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
}

impl ListWindow {
    /// Creates an uncapped window over `from..to`.
    pub fn new(from: usize, to: usize) -> Self {
        Self {
            from,
            to,
            limit: to.saturating_sub(from),
        }
    }

    /// Resolves raw query parameters into a window.
    ///
    /// Absent or unparsable bounds fall back to `0` and `max_page_size`.
    ///
    /// # Errors
    ///
    /// `RestError::BadRequest` when `to <= from`, or when the following
    /// window would end past `i64::MAX`.
    pub fn resolve(query: &ListQuery, max_page_size: usize) -> Result<Self, RestError> {
        let from = parse_index(query.from.as_deref()).unwrap_or(0);
        let to = parse_index(query.to.as_deref()).unwrap_or(max_page_size);

        if to <= from {
            return Err(RestError::bad_request(format!(
                "Invalid range: from={} to={}",
                from, to
            )));
        }

        let limit = (to - from).min(max_page_size);

        // Every window the response links to must end within the store's range.
        let in_range = to
            .checked_add(limit)
            .is_some_and(|end| i64::try_from(end).is_ok());
        if !in_range {
            return Err(RestError::bad_request(format!(
                "Range out of bounds: from={} to={}",
                from, to
            )));
        }

        Ok(Self { from, to, limit })
    }

    /// Returns the offset of the first payment.
    pub fn from(&self) -> usize {
        self.from
    }

    /// Returns the requested upper bound.
    pub fn to(&self) -> usize {
        self.to
    }

    /// Returns the number of payments to read.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the window actually served.
    pub fn served(&self) -> (usize, usize) {
        (self.from, self.from + self.limit)
    }

    /// Returns the window that follows the requested one.
    pub fn next(&self) -> (usize, usize) {
        (self.to, self.to + self.limit)
    }

    /// Returns the preceding window, if this one does not start at zero.
    pub fn prev(&self) -> Option<(usize, usize)> {
        if self.from > 0 {
            Some((self.from.saturating_sub(self.limit), self.from))
        } else {
            None
        }
    }
}

impl<S> FromRequestParts<AppState<S>> for ListWindow
where
    S: ItemStore + Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<ListQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| RestError::bad_request(format!("Invalid query: {}", e)))?;

        ListWindow::resolve(&query, state.max_page_size())
    }
}

/// Raw `version` query parameter of a delete.
#[derive(Debug, Default, Deserialize)]
struct VersionQuery {
    version: Option<String>,
}

/// The version a delete request expects the payment to be at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedVersion(pub i64);

impl ExpectedVersion {
    /// Parses the raw parameter.
    ///
    /// # Errors
    ///
    /// `RestError::BadRequest` when the version is absent or not an integer.
    pub fn parse(raw: Option<&str>) -> Result<Self, RestError> {
        let raw = raw.ok_or_else(|| RestError::bad_request("Missing version parameter"))?;
        raw.trim()
            .parse::<i64>()
            .map(ExpectedVersion)
            .map_err(|_| RestError::bad_request(format!("Invalid version: {:?}", raw)))
    }
}

impl<S> FromRequestParts<S> for ExpectedVersion
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<VersionQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| RestError::bad_request(format!("Invalid query: {}", e)))?;

        ExpectedVersion::parse(query.version.as_deref())
    }
}

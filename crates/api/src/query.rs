//! Query-string parameters for the job monitor endpoints.
//!
//! Everything arrives as optional text so malformed values surface as JSON
//! errors from [`LogQueryParams::into_params`] rather than as extractor
//! rejections.

use chrono::{DateTime, NaiveDateTime, Utc};
use jobwatch_core::query::{LogFilter, QueryParams, SortDirection, SortField};
use jobwatch_core::types::Timestamp;
use serde::Deserialize;

use crate::error::AppError;

/// Page size used when the request names none.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// `?page=&size=&sort=&direction=&status=&start_date=&end_date=`
#[derive(Debug, Default, Deserialize)]
pub struct LogQueryParams {
    pub page: Option<String>,
    pub size: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl LogQueryParams {
    /// Validate into core [`QueryParams`].
    pub fn into_params(self) -> Result<QueryParams, AppError> {
        let page = parse_number("page", self.page.as_deref(), 0)?;
        let size = parse_number("size", self.size.as_deref(), DEFAULT_PAGE_SIZE)?;

        let filter = LogFilter {
            status: LogFilter::parse_status(self.status.as_deref())?,
            start_date: parse_timestamp("start_date", self.start_date.as_deref())?,
            end_date: parse_timestamp("end_date", self.end_date.as_deref())?,
        };

        Ok(QueryParams::new(page, size)?
            .sorted_by(
                SortField::parse(self.sort.as_deref()),
                SortDirection::parse(self.direction.as_deref()),
            )
            .with_filter(filter))
    }
}

fn parse_number(name: &str, raw: Option<&str>, default: i64) -> Result<i64, AppError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => v
            .parse()
            .map_err(|_| AppError::BadRequest(format!("{name} must be an integer, got '{v}'"))),
        None => Ok(default),
    }
}

/// Accepts RFC 3339, or an ISO date-time without offset taken as UTC.
fn parse_timestamp(name: &str, raw: Option<&str>) -> Result<Option<Timestamp>, AppError> {
    let Some(v) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if let Ok(ts) = DateTime::parse_from_rfc3339(v) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(v, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(|_| AppError::BadRequest(format!("{name} must be an ISO date-time, got '{v}'")))
}

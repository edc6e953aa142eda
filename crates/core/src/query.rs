//! Query parameters: pagination, sorting and filtering of execution records.
//!
//! [`QueryParams`] is validated once at construction so that stores never
//! see an out-of-range page or size. Sort fields are a closed enum whose
//! column names form the only identifiers a SQL backend may interpolate.

use std::cmp::Ordering;

use serde::Serialize;

use crate::error::CoreError;
use crate::record::ExecutionRecord;
use crate::types::Timestamp;

/// Largest accepted page size.
pub const MAX_PAGE_SIZE: i64 = 100;

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Record attribute a query can be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    StartTime,
    EndTime,
    DurationMs,
    JobName,
}

impl SortField {
    /// Parse a client-supplied field name.
    ///
    /// Unknown or empty names fall back to [`SortField::StartTime`].
    pub fn parse(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some("end_time") => SortField::EndTime,
            Some("duration_ms") => SortField::DurationMs,
            Some("job_name") => SortField::JobName,
            _ => SortField::StartTime,
        }
    }

    /// Column identifier in the `job_logs` table.
    pub fn column(self) -> &'static str {
        match self {
            SortField::StartTime => "start_time",
            SortField::EndTime => "end_time",
            SortField::DurationMs => "duration_ms",
            SortField::JobName => "job_name",
        }
    }

    /// Ascending comparison of two records on this field.
    pub fn compare(self, a: &ExecutionRecord, b: &ExecutionRecord) -> Ordering {
        match self {
            SortField::StartTime => a.start_time.cmp(&b.start_time),
            SortField::EndTime => a.end_time.cmp(&b.end_time),
            SortField::DurationMs => a.duration_ms.cmp(&b.duration_ms),
            SortField::JobName => a.job_name.cmp(&b.job_name),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Parse a client-supplied direction. Only `asc` (any case) is ascending.
    pub fn parse(direction: Option<&str>) -> Self {
        match direction {
            Some(d) if d.trim().eq_ignore_ascii_case("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    /// Apply this direction to an ascending ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Optional record filter. Every unset dimension matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    /// Keep only runs with this success flag.
    pub status: Option<bool>,
    /// Keep runs with `start_time >= start_date`.
    pub start_date: Option<Timestamp>,
    /// Keep runs with `end_time <= end_date`.
    pub end_date: Option<Timestamp>,
}

impl LogFilter {
    /// Parse a status filter value, case-insensitively.
    ///
    /// `true`/`success` select successful runs, `false`/`failure`/`failed`
    /// select failed ones. Blank input means no status filter.
    pub fn parse_status(value: Option<&str>) -> Result<Option<bool>, CoreError> {
        let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(None);
        };
        match raw.to_ascii_lowercase().as_str() {
            "true" | "success" => Ok(Some(true)),
            "false" | "failure" | "failed" => Ok(Some(false)),
            _ => Err(CoreError::Validation(format!(
                "Unknown status filter '{raw}', expected true or false"
            ))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.start_date.is_none() && self.end_date.is_none()
    }

    /// Whether `record` passes every active filter dimension.
    pub fn matches(&self, record: &ExecutionRecord) -> bool {
        self.status.map_or(true, |s| record.success == s)
            && self.start_date.map_or(true, |from| record.start_time >= from)
            && self.end_date.map_or(true, |to| record.end_time <= to)
    }
}

// ---------------------------------------------------------------------------
// QueryParams
// ---------------------------------------------------------------------------

/// Validated page request with sort and filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    page: u32,
    size: u32,
    sort_field: SortField,
    direction: SortDirection,
    filter: LogFilter,
}

impl QueryParams {
    /// Build a request for zero-based `page` of `size` records, sorted by
    /// start time descending and unfiltered.
    ///
    /// Fails with [`CoreError::Validation`] if `page < 0` or `size` is
    /// outside `1..=100`. Values are never clamped.
    pub fn new(page: i64, size: i64) -> Result<Self, CoreError> {
        if page < 0 {
            return Err(CoreError::Validation("Page must be >= 0".into()));
        }
        if size <= 0 {
            return Err(CoreError::Validation("Size must be > 0".into()));
        }
        if size > MAX_PAGE_SIZE {
            return Err(CoreError::Validation(format!(
                "Size must be <= {MAX_PAGE_SIZE}"
            )));
        }
        let page = u32::try_from(page)
            .map_err(|_| CoreError::Validation(format!("Page {page} is too large")))?;

        Ok(Self {
            page,
            size: size as u32,
            sort_field: SortField::default(),
            direction: SortDirection::default(),
            filter: LogFilter::default(),
        })
    }

    pub fn sorted_by(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort_field = field;
        self.direction = direction;
        self
    }

    pub fn with_filter(mut self, filter: LogFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn filter(&self) -> &LogFilter {
        &self.filter
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    pub fn limit(&self) -> u32 {
        self.size
    }

    /// Record ordering for this request: the sort field, reversed for
    /// descending requests. Ties compare equal; callers add their own
    /// insertion-order tie-break.
    pub fn sort_comparator(&self) -> impl Fn(&ExecutionRecord, &ExecutionRecord) -> Ordering {
        let field = self.sort_field;
        let direction = self.direction;
        move |a, b| direction.apply(field.compare(a, b))
    }
}

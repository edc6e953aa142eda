/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Boxed error used to carry backend failures without naming the backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

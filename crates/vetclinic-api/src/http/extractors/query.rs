//! Query parameter extractors for list endpoints.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Query parameters for a veterinarian's schedule.
///
/// Both bounds are RFC 3339 timestamps, e.g.
/// `?start_date=2025-03-14T00:00:00Z&end_date=2025-03-15T00:00:00Z`.
#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

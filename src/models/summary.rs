//! Attendance summary models (daily, monthly, yearly rollups)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Persistent daily attendance summary, upserted from closed sessions.
/// Unique on (member_id, attendance_date).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DailyAttendanceSummary {
    pub id: i32,
    pub member_id: i32,
    pub attendance_date: NaiveDate,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub time_spent_minutes: i64,
}

/// Monthly rollup of daily summaries. Unique on (member_id, year, month).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MonthlyAttendanceSummary {
    pub id: i32,
    pub member_id: i32,
    pub year: i32,
    pub month: i32,
    pub total_present_days: i64,
    pub total_minutes_spent: i64,
}

/// Yearly rollup of monthly summaries. Unique on (member_id, year).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct YearlyAttendanceSummary {
    pub id: i32,
    pub member_id: i32,
    pub year: i32,
    pub total_present_days: i64,
    pub total_minutes_spent: i64,
}

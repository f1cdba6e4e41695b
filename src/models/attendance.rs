//! Attendance session model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Attendance session from database
///
/// One row per member per calendar date; `check_out_time` stays null while
/// the session is open.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AttendanceSession {
    pub id: i32,
    pub member_id: i32,
    pub attendance_date: NaiveDate,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub time_spent_minutes: Option<i64>,
}

/// Attendance session with the member name resolved, for display
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AttendanceRecord {
    pub id: i32,
    pub member_id: i32,
    pub member_name: String,
    pub attendance_date: NaiveDate,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub time_spent_minutes: Option<i64>,
}

/// What a recorded attendance event did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceAction {
    CheckedIn,
    CheckedOut,
}

/// Result of recording an attendance event
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AttendanceEvent {
    pub action: AttendanceAction,
    pub record: AttendanceRecord,
}

/// Open session joined with the member fields the end-of-day sweep needs
#[derive(Debug, Clone, FromRow)]
pub struct OpenSession {
    pub id: i32,
    pub member_id: i32,
    pub member_name: String,
    pub check_in_time: DateTime<Utc>,
    pub current_plan_id: Option<i32>,
    pub current_plan_end_date: Option<NaiveDate>,
}

/// Check-in count for one date
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: i64,
}

/// Inclusive date range query
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct DateRangeQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Query parameters for attendance listing
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AttendanceQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

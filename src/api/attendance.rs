//! Attendance tracking and summary endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        attendance::{AttendanceEvent, AttendanceQuery, AttendanceRecord, DailyCount, DateRangeQuery},
        summary::{DailyAttendanceSummary, MonthlyAttendanceSummary, YearlyAttendanceSummary},
    },
};

use super::PaginatedResponse;

/// Record attendance request
#[derive(Deserialize, ToSchema)]
pub struct RecordAttendanceRequest {
    /// Member ID scanned at the front desk
    pub member_id: i32,
}

/// Today's attendance state for a member
#[derive(Serialize, ToSchema)]
pub struct TodayAttendanceResponse {
    /// Whether the member has checked in today
    pub checked_in: bool,
    /// Whether the member has also checked out
    pub checked_out: bool,
    /// Today's session, if any
    pub record: Option<AttendanceRecord>,
}

/// End-of-day sweep result
#[derive(Serialize, ToSchema)]
pub struct CheckOutAllResponse {
    /// Number of sessions closed
    pub closed: i64,
}

/// Aggregation pending-work result
#[derive(Serialize, ToSchema)]
pub struct PendingAggregationResponse {
    /// True if closed sessions are not yet reflected in the summaries
    pub pending: bool,
}

/// Aggregation run result
#[derive(Serialize, ToSchema)]
pub struct AggregationResponse {
    /// Daily summary rows written
    pub daily_rows: u64,
    /// Monthly summary rows written
    pub monthly_rows: u64,
    /// Yearly summary rows written
    pub yearly_rows: u64,
}

/// Record an attendance event (check-in or check-out)
#[utoipa::path(
    post,
    path = "/attendance",
    tag = "attendance",
    request_body = RecordAttendanceRequest,
    responses(
        (status = 200, description = "Event recorded", body = AttendanceEvent),
        (status = 404, description = "Member not found"),
        (status = 422, description = "Membership not active, minimum stay not reached, or day already complete")
    )
)]
pub async fn record_event(
    State(state): State<crate::AppState>,
    Json(request): Json<RecordAttendanceRequest>,
) -> AppResult<Json<AttendanceEvent>> {
    let event = state.services.attendance.record_event(request.member_id).await?;
    Ok(Json(event))
}

/// Today's attendance state for a member
#[utoipa::path(
    get,
    path = "/members/{id}/attendance/today",
    tag = "attendance",
    params(
        ("id" = i32, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Today's state", body = TodayAttendanceResponse),
        (status = 404, description = "Member not found")
    )
)]
pub async fn today_status(
    State(state): State<crate::AppState>,
    Path(member_id): Path<i32>,
) -> AppResult<Json<TodayAttendanceResponse>> {
    let record = state.services.attendance.status_for_today(member_id).await?;

    Ok(Json(TodayAttendanceResponse {
        checked_in: record.is_some(),
        checked_out: record
            .as_ref()
            .map(|r| r.check_out_time.is_some())
            .unwrap_or(false),
        record,
    }))
}

/// Close every eligible open session dated today
#[utoipa::path(
    post,
    path = "/attendance/check-out-all",
    tag = "attendance",
    responses(
        (status = 200, description = "Sweep completed", body = CheckOutAllResponse)
    )
)]
pub async fn check_out_all(
    State(state): State<crate::AppState>,
) -> AppResult<Json<CheckOutAllResponse>> {
    let closed = state.services.attendance.check_out_all().await?;
    Ok(Json(CheckOutAllResponse { closed }))
}

/// Check-in counts per date over an inclusive range
#[utoipa::path(
    get,
    path = "/attendance/daily-counts",
    tag = "attendance",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Counts per date", body = Vec<DailyCount>),
        (status = 400, description = "Invalid date range")
    )
)]
pub async fn daily_counts(
    State(state): State<crate::AppState>,
    Query(query): Query<DateRangeQuery>,
) -> AppResult<Json<Vec<DailyCount>>> {
    let counts = state
        .services
        .attendance
        .daily_counts(query.start_date, query.end_date)
        .await?;
    Ok(Json(counts))
}

/// List attendance records with pagination, newest first
#[utoipa::path(
    get,
    path = "/attendance",
    tag = "attendance",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Attendance records", body = PaginatedResponse<AttendanceRecord>)
    )
)]
pub async fn list_records(
    State(state): State<crate::AppState>,
    Query(query): Query<AttendanceQuery>,
) -> AppResult<Json<PaginatedResponse<AttendanceRecord>>> {
    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(20);
    let (records, total) = state.services.attendance.list_records(page, per_page).await?;

    Ok(Json(PaginatedResponse {
        items: records,
        total,
        page,
        per_page,
    }))
}

/// Delete an attendance record
#[utoipa::path(
    delete,
    path = "/attendance/{id}",
    tag = "attendance",
    params(
        ("id" = i32, Path, description = "Attendance record ID")
    ),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 404, description = "Record not found")
    )
)]
pub async fn delete_record(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.attendance.delete_record(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Check whether the summary pipeline has pending work
#[utoipa::path(
    get,
    path = "/attendance/summaries/pending",
    tag = "summaries",
    responses(
        (status = 200, description = "Pending state", body = PendingAggregationResponse)
    )
)]
pub async fn pending_aggregation(
    State(state): State<crate::AppState>,
) -> AppResult<Json<PendingAggregationResponse>> {
    let pending = state.services.summaries.has_pending_work().await?;
    Ok(Json(PendingAggregationResponse { pending }))
}

/// Run the daily, monthly and yearly summary rollup
#[utoipa::path(
    post,
    path = "/attendance/summaries/aggregate",
    tag = "summaries",
    responses(
        (status = 200, description = "Aggregation completed", body = AggregationResponse)
    )
)]
pub async fn run_aggregation(
    State(state): State<crate::AppState>,
) -> AppResult<Json<AggregationResponse>> {
    let outcome = state.services.summaries.run_aggregation().await?;
    Ok(Json(AggregationResponse {
        daily_rows: outcome.daily_rows,
        monthly_rows: outcome.monthly_rows,
        yearly_rows: outcome.yearly_rows,
    }))
}

/// Daily attendance summaries for one member
#[utoipa::path(
    get,
    path = "/members/{id}/attendance/summaries/daily",
    tag = "summaries",
    params(
        ("id" = i32, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Daily summaries", body = Vec<DailyAttendanceSummary>),
        (status = 404, description = "Member not found")
    )
)]
pub async fn daily_summaries(
    State(state): State<crate::AppState>,
    Path(member_id): Path<i32>,
) -> AppResult<Json<Vec<DailyAttendanceSummary>>> {
    let summaries = state.services.summaries.daily_for_member(member_id).await?;
    Ok(Json(summaries))
}

/// Monthly attendance summaries for one member
#[utoipa::path(
    get,
    path = "/members/{id}/attendance/summaries/monthly",
    tag = "summaries",
    params(
        ("id" = i32, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Monthly summaries", body = Vec<MonthlyAttendanceSummary>),
        (status = 404, description = "Member not found")
    )
)]
pub async fn monthly_summaries(
    State(state): State<crate::AppState>,
    Path(member_id): Path<i32>,
) -> AppResult<Json<Vec<MonthlyAttendanceSummary>>> {
    let summaries = state.services.summaries.monthly_for_member(member_id).await?;
    Ok(Json(summaries))
}

/// Yearly attendance summaries for one member
#[utoipa::path(
    get,
    path = "/members/{id}/attendance/summaries/yearly",
    tag = "summaries",
    params(
        ("id" = i32, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Yearly summaries", body = Vec<YearlyAttendanceSummary>),
        (status = 404, description = "Member not found")
    )
)]
pub async fn yearly_summaries(
    State(state): State<crate::AppState>,
    Path(member_id): Path<i32>,
) -> AppResult<Json<Vec<YearlyAttendanceSummary>>> {
    let summaries = state.services.summaries.yearly_for_member(member_id).await?;
    Ok(Json(summaries))
}

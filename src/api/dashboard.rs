//! Dashboard endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{error::AppResult, models::member::ExpiringMembership};

/// Headline counts for the admin dashboard
#[derive(Serialize, ToSchema)]
pub struct DashboardSummary {
    /// Total registered members
    pub total_members: i64,
    /// Members whose plan window covers today
    pub active_members: i64,
    /// Members whose plan window has lapsed
    pub expired_members: i64,
    /// Members with no plan assigned
    pub inactive_members: i64,
    /// Total trainers on staff
    pub total_trainers: i64,
    /// Plans in the catalog
    pub total_plans: i64,
    /// Members who checked in today
    pub checked_in_today: i64,
    /// Members currently in the gym (checked in, not yet out)
    pub currently_in: i64,
    /// Sum of outstanding dues across the ledger
    #[schema(value_type = f64)]
    pub outstanding_due_total: Decimal,
}

/// Query parameters for expiring memberships
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ExpiringQuery {
    /// Look-ahead window in days; defaults to the configured window
    pub days: Option<i64>,
}

/// Get dashboard summary counts
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardSummary)
    )
)]
pub async fn get_summary(
    State(state): State<crate::AppState>,
) -> AppResult<Json<DashboardSummary>> {
    let summary = state.services.dashboard.summary().await?;
    Ok(Json(summary))
}

/// Memberships expiring within the look-ahead window
#[utoipa::path(
    get,
    path = "/dashboard/expiring",
    tag = "dashboard",
    params(ExpiringQuery),
    responses(
        (status = 200, description = "Expiring memberships", body = Vec<ExpiringMembership>)
    )
)]
pub async fn expiring_memberships(
    State(state): State<crate::AppState>,
    Query(query): Query<ExpiringQuery>,
) -> AppResult<Json<Vec<ExpiringMembership>>> {
    let days = query
        .days
        .unwrap_or(state.config.attendance.expiring_window_days)
        .max(0);
    let expiring = state.services.dashboard.expiring_soon(days).await?;
    Ok(Json(expiring))
}

//! Payment ledger endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::payment::{AnalyticsQuery, CreatePayment, PaymentAnalytics, PaymentDetails, PaymentQuery},
};

use super::PaginatedResponse;

/// List payments with pagination, newest first
#[utoipa::path(
    get,
    path = "/payments",
    tag = "payments",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "List of payments", body = PaginatedResponse<PaymentDetails>)
    )
)]
pub async fn list_payments(
    State(state): State<crate::AppState>,
    Query(query): Query<PaymentQuery>,
) -> AppResult<Json<PaginatedResponse<PaymentDetails>>> {
    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(20);
    let (payments, total) = state.services.payments.list_payments(page, per_page).await?;

    Ok(Json(PaginatedResponse {
        items: payments,
        total,
        page,
        per_page,
    }))
}

/// Get payment by ID
#[utoipa::path(
    get,
    path = "/payments/{id}",
    tag = "payments",
    params(
        ("id" = i32, Path, description = "Payment ID")
    ),
    responses(
        (status = 200, description = "Payment details", body = PaymentDetails),
        (status = 404, description = "Payment not found")
    )
)]
pub async fn get_payment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<PaymentDetails>> {
    let payment = state.services.payments.get_payment(id).await?;
    Ok(Json(payment))
}

/// Record a payment.
///
/// A `plan_id` makes this a plan purchase and assigns or renews the
/// member's plan window atomically with the ledger insert. An
/// `original_payment_id` makes it a due settlement against that payment.
/// With neither, the payment is recorded as-is.
#[utoipa::path(
    post,
    path = "/payments",
    tag = "payments",
    request_body = CreatePayment,
    responses(
        (status = 201, description = "Payment recorded", body = PaymentDetails),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Member, plan or original payment not found")
    )
)]
pub async fn record_payment(
    State(state): State<crate::AppState>,
    Json(payment): Json<CreatePayment>,
) -> AppResult<(StatusCode, Json<PaymentDetails>)> {
    let recorded = state.services.payments.record_payment(payment).await?;
    Ok((StatusCode::CREATED, Json(recorded)))
}

/// Payment history for one member, newest first
#[utoipa::path(
    get,
    path = "/members/{id}/payments",
    tag = "payments",
    params(
        ("id" = i32, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Member's payments", body = Vec<PaymentDetails>),
        (status = 404, description = "Member not found or no payments recorded")
    )
)]
pub async fn member_payments(
    State(state): State<crate::AppState>,
    Path(member_id): Path<i32>,
) -> AppResult<Json<Vec<PaymentDetails>>> {
    let payments = state.services.payments.payments_for_member(member_id).await?;
    Ok(Json(payments))
}

/// Payments that still carry an outstanding due
#[utoipa::path(
    get,
    path = "/payments/dues",
    tag = "payments",
    responses(
        (status = 200, description = "Payments with outstanding dues", body = Vec<PaymentDetails>)
    )
)]
pub async fn outstanding_dues(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<PaymentDetails>>> {
    let dues = state.services.payments.outstanding_dues().await?;
    Ok(Json(dues))
}

/// Payment analytics over an inclusive date range
#[utoipa::path(
    get,
    path = "/payments/analytics",
    tag = "payments",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Payment analytics", body = PaymentAnalytics),
        (status = 400, description = "Invalid date range")
    )
)]
pub async fn payment_analytics(
    State(state): State<crate::AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<PaymentAnalytics>> {
    let analytics = state.services.payments.analytics(&query).await?;
    Ok(Json(analytics))
}

/// Delete a payment
#[utoipa::path(
    delete,
    path = "/payments/{id}",
    tag = "payments",
    params(
        ("id" = i32, Path, description = "Payment ID")
    ),
    responses(
        (status = 204, description = "Payment deleted"),
        (status = 404, description = "Payment not found")
    )
)]
pub async fn delete_payment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.payments.delete_payment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

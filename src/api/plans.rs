//! Membership plan endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::plan::{CreatePlan, Plan, UpdatePlan},
};

/// List all membership plans
#[utoipa::path(
    get,
    path = "/plans",
    tag = "plans",
    responses(
        (status = 200, description = "List of plans", body = Vec<Plan>)
    )
)]
pub async fn list_plans(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Plan>>> {
    let plans = state.services.plans.list_plans().await?;
    Ok(Json(plans))
}

/// Get plan by ID
#[utoipa::path(
    get,
    path = "/plans/{id}",
    tag = "plans",
    params(
        ("id" = i32, Path, description = "Plan ID")
    ),
    responses(
        (status = 200, description = "Plan details", body = Plan),
        (status = 404, description = "Plan not found")
    )
)]
pub async fn get_plan(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Plan>> {
    let plan = state.services.plans.get_plan(id).await?;
    Ok(Json(plan))
}

/// Create a new plan
#[utoipa::path(
    post,
    path = "/plans",
    tag = "plans",
    request_body = CreatePlan,
    responses(
        (status = 201, description = "Plan created", body = Plan),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Plan name already exists")
    )
)]
pub async fn create_plan(
    State(state): State<crate::AppState>,
    Json(plan): Json<CreatePlan>,
) -> AppResult<(StatusCode, Json<Plan>)> {
    let created = state.services.plans.create_plan(plan).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing plan
#[utoipa::path(
    put,
    path = "/plans/{id}",
    tag = "plans",
    params(
        ("id" = i32, Path, description = "Plan ID")
    ),
    request_body = UpdatePlan,
    responses(
        (status = 200, description = "Plan updated", body = Plan),
        (status = 404, description = "Plan not found"),
        (status = 409, description = "Plan name already exists")
    )
)]
pub async fn update_plan(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(plan): Json<UpdatePlan>,
) -> AppResult<Json<Plan>> {
    let updated = state.services.plans.update_plan(id, plan).await?;
    Ok(Json(updated))
}

/// Delete a plan
#[utoipa::path(
    delete,
    path = "/plans/{id}",
    tag = "plans",
    params(
        ("id" = i32, Path, description = "Plan ID")
    ),
    responses(
        (status = 204, description = "Plan deleted"),
        (status = 404, description = "Plan not found")
    )
)]
pub async fn delete_plan(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.plans.delete_plan(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

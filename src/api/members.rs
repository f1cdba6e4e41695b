//! Member management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::member::{CreateMember, MemberDetails, MemberQuery, UpdateMember},
};

use super::PaginatedResponse;

/// List members with search and pagination
#[utoipa::path(
    get,
    path = "/members",
    tag = "members",
    params(
        ("query" = Option<String>, Query, description = "Search by name or contact number"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "List of members", body = PaginatedResponse<MemberDetails>)
    )
)]
pub async fn list_members(
    State(state): State<crate::AppState>,
    Query(query): Query<MemberQuery>,
) -> AppResult<Json<PaginatedResponse<MemberDetails>>> {
    let (members, total) = state.services.members.search_members(&query).await?;

    Ok(Json(PaginatedResponse {
        items: members,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

/// Get member details by ID
#[utoipa::path(
    get,
    path = "/members/{id}",
    tag = "members",
    params(
        ("id" = i32, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Member details", body = MemberDetails),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_member(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MemberDetails>> {
    let member = state.services.members.get_member(id).await?;
    Ok(Json(member))
}

/// Register a new member
#[utoipa::path(
    post,
    path = "/members",
    tag = "members",
    request_body = CreateMember,
    responses(
        (status = 201, description = "Member created", body = MemberDetails),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Initial plan not found"),
        (status = 409, description = "Member ID already taken")
    )
)]
pub async fn create_member(
    State(state): State<crate::AppState>,
    Json(member): Json<CreateMember>,
) -> AppResult<(StatusCode, Json<MemberDetails>)> {
    let created = state.services.members.create_member(member).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing member
#[utoipa::path(
    put,
    path = "/members/{id}",
    tag = "members",
    params(
        ("id" = i32, Path, description = "Member ID")
    ),
    request_body = UpdateMember,
    responses(
        (status = 200, description = "Member updated", body = MemberDetails),
        (status = 404, description = "Member or plan not found"),
        (status = 409, description = "Member already has an active plan")
    )
)]
pub async fn update_member(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(member): Json<UpdateMember>,
) -> AppResult<Json<MemberDetails>> {
    let updated = state.services.members.update_member(id, member).await?;
    Ok(Json(updated))
}

/// Delete a member
#[utoipa::path(
    delete,
    path = "/members/{id}",
    tag = "members",
    params(
        ("id" = i32, Path, description = "Member ID")
    ),
    responses(
        (status = 204, description = "Member deleted"),
        (status = 404, description = "Member not found")
    )
)]
pub async fn delete_member(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.members.delete_member(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

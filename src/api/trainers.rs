//! Trainer management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::trainer::{CreateTrainer, Trainer, UpdateTrainer},
};

/// List all trainers
#[utoipa::path(
    get,
    path = "/trainers",
    tag = "trainers",
    responses(
        (status = 200, description = "List of trainers", body = Vec<Trainer>)
    )
)]
pub async fn list_trainers(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Trainer>>> {
    let trainers = state.services.trainers.list_trainers().await?;
    Ok(Json(trainers))
}

/// Get trainer by ID
#[utoipa::path(
    get,
    path = "/trainers/{id}",
    tag = "trainers",
    params(
        ("id" = i32, Path, description = "Trainer ID")
    ),
    responses(
        (status = 200, description = "Trainer details", body = Trainer),
        (status = 404, description = "Trainer not found")
    )
)]
pub async fn get_trainer(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Trainer>> {
    let trainer = state.services.trainers.get_trainer(id).await?;
    Ok(Json(trainer))
}

/// Create a new trainer
#[utoipa::path(
    post,
    path = "/trainers",
    tag = "trainers",
    request_body = CreateTrainer,
    responses(
        (status = 201, description = "Trainer created", body = Trainer),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_trainer(
    State(state): State<crate::AppState>,
    Json(trainer): Json<CreateTrainer>,
) -> AppResult<(StatusCode, Json<Trainer>)> {
    let created = state.services.trainers.create_trainer(trainer).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing trainer
#[utoipa::path(
    put,
    path = "/trainers/{id}",
    tag = "trainers",
    params(
        ("id" = i32, Path, description = "Trainer ID")
    ),
    request_body = UpdateTrainer,
    responses(
        (status = 200, description = "Trainer updated", body = Trainer),
        (status = 404, description = "Trainer not found")
    )
)]
pub async fn update_trainer(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(trainer): Json<UpdateTrainer>,
) -> AppResult<Json<Trainer>> {
    let updated = state.services.trainers.update_trainer(id, trainer).await?;
    Ok(Json(updated))
}

/// Delete a trainer
#[utoipa::path(
    delete,
    path = "/trainers/{id}",
    tag = "trainers",
    params(
        ("id" = i32, Path, description = "Trainer ID")
    ),
    responses(
        (status = 204, description = "Trainer deleted"),
        (status = 404, description = "Trainer not found")
    )
)]
pub async fn delete_trainer(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.trainers.delete_trainer(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

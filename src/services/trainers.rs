//! Trainer management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::trainer::{CreateTrainer, Trainer, UpdateTrainer},
    repository::Repository,
};

#[derive(Clone)]
pub struct TrainersService {
    repository: Repository,
}

impl TrainersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_trainer(&self, id: i32) -> AppResult<Trainer> {
        self.repository.trainers.get_by_id(id).await
    }

    pub async fn list_trainers(&self) -> AppResult<Vec<Trainer>> {
        self.repository.trainers.list().await
    }

    pub async fn create_trainer(&self, dto: CreateTrainer) -> AppResult<Trainer> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.trainers.create(&dto).await
    }

    pub async fn update_trainer(&self, id: i32, dto: UpdateTrainer) -> AppResult<Trainer> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.trainers.update(id, &dto).await
    }

    pub async fn delete_trainer(&self, id: i32) -> AppResult<()> {
        self.repository.trainers.delete(id).await
    }
}

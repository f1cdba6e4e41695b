//! Trainers repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::trainer::{CreateTrainer, Trainer, UpdateTrainer},
};

#[derive(Clone)]
pub struct TrainersRepository {
    pool: Pool<Postgres>,
}

impl TrainersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get trainer by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Trainer> {
        sqlx::query_as::<_, Trainer>("SELECT * FROM trainers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Trainer with id {} not found", id)))
    }

    /// List all trainers
    pub async fn list(&self) -> AppResult<Vec<Trainer>> {
        let trainers = sqlx::query_as::<_, Trainer>("SELECT * FROM trainers ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(trainers)
    }

    /// Create a new trainer
    pub async fn create(&self, trainer: &CreateTrainer) -> AppResult<Trainer> {
        let row = sqlx::query_as::<_, Trainer>(
            r#"
            INSERT INTO trainers (name, specialization, experience_years, contact_number)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&trainer.name)
        .bind(&trainer.specialization)
        .bind(trainer.experience_years)
        .bind(&trainer.contact_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Update an existing trainer
    pub async fn update(&self, id: i32, trainer: &UpdateTrainer) -> AppResult<Trainer> {
        sqlx::query_as::<_, Trainer>(
            r#"
            UPDATE trainers
            SET name = $2, specialization = $3, experience_years = $4, contact_number = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&trainer.name)
        .bind(&trainer.specialization)
        .bind(trainer.experience_years)
        .bind(&trainer.contact_number)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Trainer with id {} not found", id)))
    }

    /// Delete a trainer
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM trainers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Trainer with id {} not found",
                id
            )));
        }
        Ok(())
    }
}

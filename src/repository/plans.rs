//! Membership plans repository (the plan catalog)

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::plan::{CreatePlan, Plan, UpdatePlan},
};

#[derive(Clone)]
pub struct PlansRepository {
    pool: Pool<Postgres>,
}

impl PlansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get plan by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Plan> {
        sqlx::query_as::<_, Plan>("SELECT * FROM membership_plans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Membership plan with id {} not found", id)))
    }

    /// List all plans
    pub async fn list(&self) -> AppResult<Vec<Plan>> {
        let plans = sqlx::query_as::<_, Plan>("SELECT * FROM membership_plans ORDER BY price")
            .fetch_all(&self.pool)
            .await?;
        Ok(plans)
    }

    /// Check plan name uniqueness
    pub async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM membership_plans WHERE LOWER(name) = LOWER($1) AND id != $2)",
            )
            .bind(name)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM membership_plans WHERE LOWER(name) = LOWER($1))",
            )
            .bind(name)
            .fetch_one(&self.pool)
            .await?
        };
        Ok(exists)
    }

    /// Create a new plan
    pub async fn create(&self, plan: &CreatePlan) -> AppResult<Plan> {
        let row = sqlx::query_as::<_, Plan>(
            r#"
            INSERT INTO membership_plans (name, price, duration_months, features)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&plan.name)
        .bind(plan.price)
        .bind(plan.duration_months)
        .bind(&plan.features)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Update an existing plan
    pub async fn update(&self, id: i32, plan: &UpdatePlan) -> AppResult<Plan> {
        sqlx::query_as::<_, Plan>(
            r#"
            UPDATE membership_plans
            SET name = $2, price = $3, duration_months = $4, features = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&plan.name)
        .bind(plan.price)
        .bind(plan.duration_months)
        .bind(&plan.features)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Membership plan with id {} not found", id)))
    }

    /// Delete a plan
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM membership_plans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Membership plan with id {} not found",
                id
            )));
        }
        Ok(())
    }
}

//! Membership plan catalog service

use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::plan::{CreatePlan, Plan, UpdatePlan},
    repository::Repository,
};

#[derive(Clone)]
pub struct PlansService {
    repository: Repository,
}

impl PlansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    fn validate_price(price: Decimal) -> AppResult<()> {
        if price <= Decimal::ZERO {
            return Err(AppError::Validation(
                "Plan price must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Get plan by ID
    pub async fn get_plan(&self, id: i32) -> AppResult<Plan> {
        self.repository.plans.get_by_id(id).await
    }

    /// List all plans
    pub async fn list_plans(&self) -> AppResult<Vec<Plan>> {
        self.repository.plans.list().await
    }

    /// Create a new plan
    pub async fn create_plan(&self, dto: CreatePlan) -> AppResult<Plan> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        Self::validate_price(dto.price)?;

        if self.repository.plans.name_exists(&dto.name, None).await? {
            return Err(AppError::Conflict(format!(
                "A plan named '{}' already exists",
                dto.name
            )));
        }

        self.repository.plans.create(&dto).await
    }

    /// Update an existing plan.
    ///
    /// Payments that already reference the plan keep their recorded fee and
    /// session label; the edit only changes what future reads display.
    pub async fn update_plan(&self, id: i32, dto: UpdatePlan) -> AppResult<Plan> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        Self::validate_price(dto.price)?;

        if self
            .repository
            .plans
            .name_exists(&dto.name, Some(id))
            .await?
        {
            return Err(AppError::Conflict(format!(
                "A plan named '{}' already exists",
                dto.name
            )));
        }

        self.repository.plans.update(id, &dto).await
    }

    /// Delete a plan
    pub async fn delete_plan(&self, id: i32) -> AppResult<()> {
        self.repository.plans.delete(id).await
    }
}

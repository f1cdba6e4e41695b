//! Trainer model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Trainer from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Trainer {
    pub id: i32,
    pub name: String,
    pub specialization: Option<String>,
    pub experience_years: Option<i32>,
    pub contact_number: Option<String>,
}

/// Create trainer request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTrainer {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub specialization: Option<String>,
    #[validate(range(min = 0, max = 80))]
    pub experience_years: Option<i32>,
    pub contact_number: Option<String>,
}

/// Update trainer request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTrainer {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub specialization: Option<String>,
    #[validate(range(min = 0, max = 80))]
    pub experience_years: Option<i32>,
    pub contact_number: Option<String>,
}

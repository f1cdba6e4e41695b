//! Membership plan model and related types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Membership plan from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Plan {
    pub id: i32,
    /// Unique plan label
    pub name: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub duration_months: i32,
    /// Free-form description of what the plan includes
    pub features: Option<String>,
}

/// Create plan request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePlan {
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
    #[validate(range(min = 1, max = 60))]
    pub duration_months: i32,
    pub features: Option<String>,
}

/// Update plan request
///
/// Edits are label-only for accounting purposes: payments that already
/// reference the plan keep their recorded fee and session label.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePlan {
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
    #[validate(range(min = 1, max = 60))]
    pub duration_months: i32,
    pub features: Option<String>,
}

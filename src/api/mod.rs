//! API handlers for GymTrack REST endpoints

pub mod attendance;
pub mod dashboard;
pub mod health;
pub mod members;
pub mod openapi;
pub mod payments;
pub mod plans;
pub mod trainers;

use serde::Serialize;
use utoipa::ToSchema;

/// Paginated response wrapper
#[derive(Serialize, ToSchema)]
pub struct PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// List of items
    pub items: Vec<T>,
    /// Total number of items
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Items per page
    pub per_page: i64,
}

//! Business logic services

pub mod attendance;
pub mod dashboard;
pub mod members;
pub mod membership;
pub mod payments;
pub mod plans;
pub mod summaries;
pub mod trainers;

use crate::{config::AttendanceConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    repository: Repository,
    pub members: members::MembersService,
    pub plans: plans::PlansService,
    pub payments: payments::PaymentsService,
    pub attendance: attendance::AttendanceService,
    pub summaries: summaries::SummariesService,
    pub trainers: trainers::TrainersService,
    pub dashboard: dashboard::DashboardService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, attendance_config: &AttendanceConfig) -> Self {
        Self {
            members: members::MembersService::new(repository.clone()),
            plans: plans::PlansService::new(repository.clone()),
            payments: payments::PaymentsService::new(repository.clone()),
            attendance: attendance::AttendanceService::new(
                repository.clone(),
                attendance_config.min_stay_minutes,
            ),
            summaries: summaries::SummariesService::new(repository.clone()),
            trainers: trainers::TrainersService::new(repository.clone()),
            dashboard: dashboard::DashboardService::new(repository.clone()),
            repository,
        }
    }

    /// Database connectivity check backing the readiness endpoint
    pub async fn ping_database(&self) -> crate::error::AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.repository.pool).await?;
        Ok(())
    }
}

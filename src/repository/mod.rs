//! Repository layer for database operations

pub mod attendance;
pub mod members;
pub mod payments;
pub mod plans;
pub mod summaries;
pub mod trainers;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub members: members::MembersRepository,
    pub plans: plans::PlansRepository,
    pub payments: payments::PaymentsRepository,
    pub attendance: attendance::AttendanceRepository,
    pub summaries: summaries::SummariesRepository,
    pub trainers: trainers::TrainersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            members: members::MembersRepository::new(pool.clone()),
            plans: plans::PlansRepository::new(pool.clone()),
            payments: payments::PaymentsRepository::new(pool.clone()),
            attendance: attendance::AttendanceRepository::new(pool.clone()),
            summaries: summaries::SummariesRepository::new(pool.clone()),
            trainers: trainers::TrainersRepository::new(pool.clone()),
            pool,
        }
    }
}

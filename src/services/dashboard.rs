//! Dashboard service
//!
//! Read-only aggregates for the admin dashboard. Status counts are derived
//! from the plan window in SQL rather than the stored status column, so a
//! plan that lapsed since the member's last write is still counted as
//! expired here.

use rust_decimal::Decimal;
use sqlx::Row;

use crate::{
    api::dashboard::DashboardSummary,
    error::AppResult,
    models::member::ExpiringMembership,
    repository::Repository,
};

#[derive(Clone)]
pub struct DashboardService {
    repository: Repository,
}

impl DashboardService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Headline counts for the dashboard
    pub async fn summary(&self) -> AppResult<DashboardSummary> {
        let pool = &self.repository.pool;

        let members = sqlx::query(
            r#"
            SELECT COUNT(*) as total,
                   COUNT(*) FILTER (WHERE current_plan_id IS NOT NULL
                                      AND current_plan_end_date > CURRENT_DATE) as active,
                   COUNT(*) FILTER (WHERE current_plan_id IS NOT NULL
                                      AND current_plan_end_date IS NOT NULL
                                      AND current_plan_end_date <= CURRENT_DATE) as expired
            FROM members
            "#,
        )
        .fetch_one(pool)
        .await?;

        let total_members: i64 = members.get("total");
        let active_members: i64 = members.get("active");
        let expired_members: i64 = members.get("expired");

        let total_trainers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM trainers")
            .fetch_one(pool)
            .await?;

        let total_plans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM membership_plans")
            .fetch_one(pool)
            .await?;

        let attendance = sqlx::query(
            r#"
            SELECT COUNT(*) as today,
                   COUNT(*) FILTER (WHERE check_out_time IS NULL) as currently_in
            FROM attendance
            WHERE attendance_date = CURRENT_DATE
            "#,
        )
        .fetch_one(pool)
        .await?;

        let outstanding_due_total: Decimal =
            sqlx::query_scalar("SELECT COALESCE(SUM(due_amount), 0) FROM payments")
                .fetch_one(pool)
                .await?;

        Ok(DashboardSummary {
            total_members,
            active_members,
            expired_members,
            inactive_members: total_members - active_members - expired_members,
            total_trainers,
            total_plans,
            checked_in_today: attendance.get("today"),
            currently_in: attendance.get("currently_in"),
            outstanding_due_total,
        })
    }

    /// Memberships ending within the next `days` days (today included)
    pub async fn expiring_soon(&self, days: i64) -> AppResult<Vec<ExpiringMembership>> {
        let rows = sqlx::query_as::<_, ExpiringMembership>(
            r#"
            SELECT m.id as member_id, m.name, m.contact_number, p.name as plan_name,
                   m.current_plan_end_date as end_date,
                   (m.current_plan_end_date - CURRENT_DATE)::bigint as days_remaining
            FROM members m
            LEFT JOIN membership_plans p ON m.current_plan_id = p.id
            WHERE m.current_plan_id IS NOT NULL
              AND m.current_plan_end_date >= CURRENT_DATE
              AND m.current_plan_end_date <= CURRENT_DATE + $1::int
            ORDER BY m.current_plan_end_date
            "#,
        )
        .bind(days as i32)
        .fetch_all(&self.repository.pool)
        .await?;

        Ok(rows)
    }
}

//! Attendance summaries repository (daily, monthly, yearly rollups)

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::summary::{DailyAttendanceSummary, MonthlyAttendanceSummary, YearlyAttendanceSummary},
};

#[derive(Clone)]
pub struct SummariesRepository {
    pool: Pool<Postgres>,
}

impl SummariesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// True if any closed session is absent from the daily summary or
    /// carries different check-in/check-out/minutes values there.
    pub async fn has_pending(&self) -> AppResult<bool> {
        let pending: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM attendance a
                WHERE a.check_out_time IS NOT NULL AND a.time_spent_minutes IS NOT NULL
                AND NOT EXISTS (
                    SELECT 1
                    FROM daily_attendance da
                    WHERE da.member_id = a.member_id
                      AND da.attendance_date = a.attendance_date
                      AND da.check_in = a.check_in_time
                      AND da.check_out = a.check_out_time
                      AND da.time_spent_minutes = a.time_spent_minutes
                )
            )
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(pending)
    }

    /// Stage 1: copy every closed session into the daily summary, keyed by
    /// (member_id, attendance_date). Re-running overwrites with the same
    /// values, so the stage is idempotent.
    pub async fn upsert_daily_from_sessions(&self) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO daily_attendance (member_id, attendance_date, check_in, check_out, time_spent_minutes)
            SELECT a.member_id, a.attendance_date, a.check_in_time, a.check_out_time, a.time_spent_minutes
            FROM attendance a
            WHERE a.check_out_time IS NOT NULL AND a.time_spent_minutes IS NOT NULL
            ON CONFLICT (member_id, attendance_date) DO UPDATE
            SET check_in = EXCLUDED.check_in,
                check_out = EXCLUDED.check_out,
                time_spent_minutes = EXCLUDED.time_spent_minutes
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Stage 2: recompute the monthly rollup from the daily summary, keyed
    /// by (member_id, year, month).
    pub async fn rollup_monthly(&self) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO monthly_attendance_summary (member_id, year, month, total_present_days, total_minutes_spent)
            SELECT da.member_id,
                   EXTRACT(YEAR FROM da.attendance_date)::int,
                   EXTRACT(MONTH FROM da.attendance_date)::int,
                   COUNT(DISTINCT da.attendance_date),
                   COALESCE(SUM(da.time_spent_minutes), 0)
            FROM daily_attendance da
            GROUP BY da.member_id,
                     EXTRACT(YEAR FROM da.attendance_date),
                     EXTRACT(MONTH FROM da.attendance_date)
            ON CONFLICT (member_id, year, month) DO UPDATE
            SET total_present_days = EXCLUDED.total_present_days,
                total_minutes_spent = EXCLUDED.total_minutes_spent
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Stage 3: recompute the yearly rollup from the monthly summary, keyed
    /// by (member_id, year).
    pub async fn rollup_yearly(&self) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO yearly_attendance_summary (member_id, year, total_present_days, total_minutes_spent)
            SELECT mas.member_id, mas.year,
                   SUM(mas.total_present_days),
                   SUM(mas.total_minutes_spent)
            FROM monthly_attendance_summary mas
            GROUP BY mas.member_id, mas.year
            ON CONFLICT (member_id, year) DO UPDATE
            SET total_present_days = EXCLUDED.total_present_days,
                total_minutes_spent = EXCLUDED.total_minutes_spent
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Daily summaries for one member, newest first
    pub async fn daily_for_member(&self, member_id: i32) -> AppResult<Vec<DailyAttendanceSummary>> {
        let rows = sqlx::query_as::<_, DailyAttendanceSummary>(
            "SELECT * FROM daily_attendance WHERE member_id = $1 ORDER BY attendance_date DESC",
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Monthly summaries for one member, newest first
    pub async fn monthly_for_member(
        &self,
        member_id: i32,
    ) -> AppResult<Vec<MonthlyAttendanceSummary>> {
        let rows = sqlx::query_as::<_, MonthlyAttendanceSummary>(
            r#"
            SELECT * FROM monthly_attendance_summary
            WHERE member_id = $1
            ORDER BY year DESC, month DESC
            "#,
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Yearly summaries for one member, newest first
    pub async fn yearly_for_member(
        &self,
        member_id: i32,
    ) -> AppResult<Vec<YearlyAttendanceSummary>> {
        let rows = sqlx::query_as::<_, YearlyAttendanceSummary>(
            "SELECT * FROM yearly_attendance_summary WHERE member_id = $1 ORDER BY year DESC",
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

//! Attendance sessions repository

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::attendance::{AttendanceRecord, AttendanceSession, DailyCount, OpenSession},
};

const RECORD_SELECT: &str = r#"
    SELECT a.id, a.member_id, m.name as member_name, a.attendance_date,
           a.check_in_time, a.check_out_time, a.time_spent_minutes
    FROM attendance a
    JOIN members m ON a.member_id = m.id
"#;

#[derive(Clone)]
pub struct AttendanceRepository {
    pool: Pool<Postgres>,
}

impl AttendanceRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Today's session for a member, if any
    pub async fn find_by_member_and_date(
        &self,
        member_id: i32,
        date: NaiveDate,
    ) -> AppResult<Option<AttendanceSession>> {
        let session = sqlx::query_as::<_, AttendanceSession>(
            "SELECT * FROM attendance WHERE member_id = $1 AND attendance_date = $2",
        )
        .bind(member_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(session)
    }

    /// Open a session for (member, date).
    ///
    /// The unique key on (member_id, attendance_date) serializes concurrent
    /// check-ins; the loser gets `None` instead of a constraint error.
    pub async fn try_check_in(
        &self,
        member_id: i32,
        date: NaiveDate,
        check_in: DateTime<Utc>,
    ) -> AppResult<Option<AttendanceSession>> {
        let session = sqlx::query_as::<_, AttendanceSession>(
            r#"
            INSERT INTO attendance (member_id, attendance_date, check_in_time)
            VALUES ($1, $2, $3)
            ON CONFLICT (member_id, attendance_date) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(member_id)
        .bind(date)
        .bind(check_in)
        .fetch_optional(&self.pool)
        .await?;
        Ok(session)
    }

    /// Close an open session
    pub async fn close_session(
        &self,
        id: i32,
        check_out: DateTime<Utc>,
        minutes: i64,
    ) -> AppResult<AttendanceSession> {
        sqlx::query_as::<_, AttendanceSession>(
            r#"
            UPDATE attendance
            SET check_out_time = $2, time_spent_minutes = $3
            WHERE id = $1 AND check_out_time IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(check_out)
        .bind(minutes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Open attendance session with id {} not found", id))
        })
    }

    /// All open sessions for a date, joined with the member fields the
    /// end-of-day sweep needs to re-derive eligibility
    pub async fn open_sessions(&self, date: NaiveDate) -> AppResult<Vec<OpenSession>> {
        let sessions = sqlx::query_as::<_, OpenSession>(
            r#"
            SELECT a.id, a.member_id, m.name as member_name, a.check_in_time,
                   m.current_plan_id, m.current_plan_end_date
            FROM attendance a
            JOIN members m ON a.member_id = m.id
            WHERE a.attendance_date = $1 AND a.check_out_time IS NULL
            ORDER BY a.check_in_time
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(sessions)
    }

    /// Check-in counts per date over an inclusive range
    pub async fn daily_counts(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<Vec<DailyCount>> {
        let counts = sqlx::query_as::<_, DailyCount>(
            r#"
            SELECT attendance_date as date, COUNT(*) as count
            FROM attendance
            WHERE attendance_date >= $1 AND attendance_date <= $2
            GROUP BY attendance_date
            ORDER BY attendance_date
            "#,
        )
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;
        Ok(counts)
    }

    /// Session with the member name resolved
    pub async fn get_record(&self, id: i32) -> AppResult<AttendanceRecord> {
        let query = format!("{} WHERE a.id = $1", RECORD_SELECT);
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Attendance record with id {} not found", id))
            })
    }

    /// Today's record for a member, if any
    pub async fn record_for_member_and_date(
        &self,
        member_id: i32,
        date: NaiveDate,
    ) -> AppResult<Option<AttendanceRecord>> {
        let query = format!(
            "{} WHERE a.member_id = $1 AND a.attendance_date = $2",
            RECORD_SELECT
        );
        let record = sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(member_id)
            .bind(date)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    /// List sessions with pagination, newest first
    pub async fn list(&self, page: i64, per_page: i64) -> AppResult<(Vec<AttendanceRecord>, i64)> {
        let offset = (page - 1) * per_page;
        let query = format!(
            "{} ORDER BY a.attendance_date DESC, a.check_in_time DESC LIMIT $1 OFFSET $2",
            RECORD_SELECT
        );

        let records = sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendance")
            .fetch_one(&self.pool)
            .await?;

        Ok((records, total))
    }

    /// Delete a session record
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM attendance WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Attendance record with id {} not found",
                id
            )));
        }
        Ok(())
    }
}

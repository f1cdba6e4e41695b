//! Members repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::member::{Member, MemberDetails, MemberQuery},
};

#[derive(Clone)]
pub struct MembersRepository {
    pool: Pool<Postgres>,
}

impl MembersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get member by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Member> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member with id {} not found", id)))
    }

    /// Get member with the current plan name resolved
    pub async fn get_details(&self, id: i32) -> AppResult<MemberDetails> {
        sqlx::query_as::<_, MemberDetails>(
            r#"
            SELECT m.id, m.name, m.age, m.gender, m.contact_number, m.joining_date,
                   m.membership_status, m.current_plan_id, p.name as current_plan_name,
                   m.current_plan_start_date, m.current_plan_end_date
            FROM members m
            LEFT JOIN membership_plans p ON m.current_plan_id = p.id
            WHERE m.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Member with id {} not found", id)))
    }

    /// Check whether a member id is already taken
    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM members WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Insert a fully prepared member row
    pub async fn create(&self, member: &Member) -> AppResult<Member> {
        let row = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (id, name, age, gender, contact_number, joining_date,
                                 membership_status, current_plan_id,
                                 current_plan_start_date, current_plan_end_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(member.id)
        .bind(&member.name)
        .bind(member.age)
        .bind(&member.gender)
        .bind(&member.contact_number)
        .bind(member.joining_date)
        .bind(member.membership_status)
        .bind(member.current_plan_id)
        .bind(member.current_plan_start_date)
        .bind(member.current_plan_end_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Persist profile fields, plan window and derived status in one statement
    /// so the direct-edit path commits atomically.
    pub async fn update(&self, member: &Member) -> AppResult<Member> {
        sqlx::query_as::<_, Member>(
            r#"
            UPDATE members
            SET name = $2, age = $3, gender = $4, contact_number = $5, joining_date = $6,
                membership_status = $7, current_plan_id = $8,
                current_plan_start_date = $9, current_plan_end_date = $10
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(member.id)
        .bind(&member.name)
        .bind(member.age)
        .bind(&member.gender)
        .bind(&member.contact_number)
        .bind(member.joining_date)
        .bind(member.membership_status)
        .bind(member.current_plan_id)
        .bind(member.current_plan_start_date)
        .bind(member.current_plan_end_date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Member with id {} not found", member.id)))
    }

    /// Search members by name/contact substring with pagination
    pub async fn search(&self, query: &MemberQuery) -> AppResult<(Vec<MemberDetails>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 200);
        let offset = (page - 1) * per_page;

        let pattern = query
            .query
            .as_deref()
            .map(|q| format!("%{}%", q.trim().to_lowercase()));

        let (members, total) = if let Some(ref pattern) = pattern {
            let members = sqlx::query_as::<_, MemberDetails>(
                r#"
                SELECT m.id, m.name, m.age, m.gender, m.contact_number, m.joining_date,
                       m.membership_status, m.current_plan_id, p.name as current_plan_name,
                       m.current_plan_start_date, m.current_plan_end_date
                FROM members m
                LEFT JOIN membership_plans p ON m.current_plan_id = p.id
                WHERE LOWER(m.name) LIKE $1 OR m.contact_number LIKE $1
                ORDER BY m.name
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(pattern)
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

            let total: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM members WHERE LOWER(name) LIKE $1 OR contact_number LIKE $1",
            )
            .bind(pattern)
            .fetch_one(&self.pool)
            .await?;

            (members, total)
        } else {
            let members = sqlx::query_as::<_, MemberDetails>(
                r#"
                SELECT m.id, m.name, m.age, m.gender, m.contact_number, m.joining_date,
                       m.membership_status, m.current_plan_id, p.name as current_plan_name,
                       m.current_plan_start_date, m.current_plan_end_date
                FROM members m
                LEFT JOIN membership_plans p ON m.current_plan_id = p.id
                ORDER BY m.name
                LIMIT $1 OFFSET $2
                "#,
            )
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members")
                .fetch_one(&self.pool)
                .await?;

            (members, total)
        };

        Ok((members, total))
    }

    /// Delete a member
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Member with id {} not found",
                id
            )));
        }
        Ok(())
    }
}

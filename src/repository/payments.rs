//! Payments repository for database operations

use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        member::Member,
        payment::{NewPayment, Payment, PaymentDetails},
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT p.id, p.member_id, m.name as member_name, p.amount, p.due_amount,
           p.total_membership_fee, p.membership_session, p.payment_date,
           p.payment_method, p.payment_method_detail, p.plan_id,
           pl.name as plan_name, p.original_payment_id, p.transaction_id, p.notes
    FROM payments p
    JOIN members m ON p.member_id = m.id
    LEFT JOIN membership_plans pl ON p.plan_id = pl.id
"#;

#[derive(Clone)]
pub struct PaymentsRepository {
    pub pool: Pool<Postgres>,
}

impl PaymentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get payment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Payment> {
        sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Payment with id {} not found", id)))
    }

    /// Get payment with member and plan names resolved
    pub async fn get_details(&self, id: i32) -> AppResult<PaymentDetails> {
        let query = format!("{} WHERE p.id = $1", DETAILS_SELECT);
        sqlx::query_as::<_, PaymentDetails>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Payment with id {} not found", id)))
    }

    /// List payments with pagination, newest first
    pub async fn list(&self, page: i64, per_page: i64) -> AppResult<(Vec<PaymentDetails>, i64)> {
        let offset = (page - 1) * per_page;
        let query = format!(
            "{} ORDER BY p.payment_date DESC, p.id DESC LIMIT $1 OFFSET $2",
            DETAILS_SELECT
        );

        let payments = sqlx::query_as::<_, PaymentDetails>(&query)
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payments")
            .fetch_one(&self.pool)
            .await?;

        Ok((payments, total))
    }

    /// List all payments for one member
    pub async fn list_by_member(&self, member_id: i32) -> AppResult<Vec<PaymentDetails>> {
        let query = format!(
            "{} WHERE p.member_id = $1 ORDER BY p.payment_date DESC, p.id DESC",
            DETAILS_SELECT
        );
        let payments = sqlx::query_as::<_, PaymentDetails>(&query)
            .bind(member_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(payments)
    }

    /// All payments carrying an outstanding due
    pub async fn outstanding_dues(&self) -> AppResult<Vec<PaymentDetails>> {
        let query = format!(
            "{} WHERE p.due_amount > 0 ORDER BY p.payment_date, p.id",
            DETAILS_SELECT
        );
        let payments = sqlx::query_as::<_, PaymentDetails>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(payments)
    }

    /// Insert a plain payment with no side effects (ad-hoc payments).
    pub async fn insert(&self, new: &NewPayment) -> AppResult<Payment> {
        let payment = Self::insert_row(&self.pool, new).await?;
        Ok(payment)
    }

    /// Insert a due-settlement payment and reduce the original's due, both in
    /// one transaction.
    ///
    /// The due is decremented in SQL (floored at zero) rather than written as
    /// an absolute value, so concurrent settlements against the same original
    /// cannot overwrite each other's reduction. Returns the new payment and
    /// the original's remaining due.
    pub async fn record_settlement(
        &self,
        new: &NewPayment,
        original_id: i32,
        amount: Decimal,
    ) -> AppResult<(Payment, Decimal)> {
        let mut tx = self.pool.begin().await?;

        let remaining: Decimal = sqlx::query_scalar(
            r#"
            UPDATE payments SET due_amount = GREATEST(due_amount - $2, 0)
            WHERE id = $1
            RETURNING due_amount
            "#,
        )
        .bind(original_id)
        .bind(amount)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Payment with id {} not found", original_id)))?;

        let payment = Self::insert_row(&mut *tx, new).await?;

        tx.commit().await?;

        Ok((payment, remaining))
    }

    /// Insert a plan-purchase payment and update the member's plan window and
    /// status, both in one transaction.
    ///
    /// The member row is re-read under `FOR UPDATE` inside the transaction
    /// and `apply_window` is applied to that locked state, so concurrent
    /// purchases serialize and each renewal chains off the window the
    /// previous one committed. Returns the payment and the updated member.
    pub async fn record_purchase<F>(
        &self,
        new: &NewPayment,
        member_id: i32,
        apply_window: F,
    ) -> AppResult<(Payment, Member)>
    where
        F: FnOnce(&mut Member),
    {
        let mut tx = self.pool.begin().await?;

        let mut member =
            sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1 FOR UPDATE")
                .bind(member_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Member with id {} not found", member_id))
                })?;

        apply_window(&mut member);

        let payment = Self::insert_row(&mut *tx, new).await?;

        sqlx::query(
            r#"
            UPDATE members
            SET current_plan_id = $2, current_plan_start_date = $3,
                current_plan_end_date = $4, membership_status = $5
            WHERE id = $1
            "#,
        )
        .bind(member.id)
        .bind(member.current_plan_id)
        .bind(member.current_plan_start_date)
        .bind(member.current_plan_end_date)
        .bind(member.membership_status)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((payment, member))
    }

    async fn insert_row<'e, E>(executor: E, new: &NewPayment) -> AppResult<Payment>
    where
        E: sqlx::Executor<'e, Database = Postgres>,
    {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (member_id, amount, due_amount, total_membership_fee,
                                  membership_session, payment_date, payment_method,
                                  payment_method_detail, plan_id, original_payment_id,
                                  transaction_id, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(new.member_id)
        .bind(new.amount)
        .bind(new.due_amount)
        .bind(new.total_membership_fee)
        .bind(&new.membership_session)
        .bind(new.payment_date)
        .bind(&new.payment_method)
        .bind(&new.payment_method_detail)
        .bind(new.plan_id)
        .bind(new.original_payment_id)
        .bind(&new.transaction_id)
        .bind(&new.notes)
        .fetch_one(executor)
        .await?;
        Ok(payment)
    }

    /// Delete a payment.
    ///
    /// Known limitation, kept on purpose: removing a payment does not restore
    /// the due of any payment it settled, and removing a settled original
    /// does not touch the settling rows.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Payment with id {} not found",
                id
            )));
        }
        Ok(())
    }
}

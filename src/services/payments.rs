//! Payment ledger service
//!
//! Records payments, keeps the outstanding-due bookkeeping consistent across
//! original and follow-up payments, and drives the membership lifecycle on
//! plan purchases.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::Row;

use crate::{
    error::{AppError, AppResult},
    models::payment::{
        AnalyticsQuery, CreatePayment, MethodBreakdown, NewPayment, PaymentAnalytics,
        PaymentDetails, PlanBreakdown,
    },
    repository::Repository,
    services::membership,
};

/// Human-readable label of the period a plan purchase covers.
///
/// Single-month plans render as "Jan 2025"; longer plans as
/// "Jan 2025 - Apr 2025" with the end month being the last covered one.
fn membership_session_label(start: NaiveDate, duration_months: i32) -> String {
    let end = start + chrono::Months::new(duration_months.max(0) as u32) - chrono::Duration::days(1);
    if duration_months == 1 {
        start.format("%b %Y").to_string()
    } else {
        format!("{} - {}", start.format("%b %Y"), end.format("%b %Y"))
    }
}

/// Reduce an outstanding due by a settlement amount, floored at zero.
/// Overpayment is absorbed, never credited elsewhere.
fn settle_due(original_due: Decimal, amount: Decimal) -> Decimal {
    (original_due - amount).max(Decimal::ZERO)
}

#[derive(Clone)]
pub struct PaymentsService {
    repository: Repository,
}

impl PaymentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Record a payment.
    ///
    /// Three shapes, decided by the request fields:
    /// - `original_payment_id` set: due-settlement against that payment
    /// - `plan_id` set: plan purchase, assigning or renewing the member's window
    /// - neither: ad-hoc payment with no due and no window mutation
    pub async fn record_payment(&self, dto: CreatePayment) -> AppResult<PaymentDetails> {
        if dto.amount < Decimal::ZERO {
            return Err(AppError::Validation(
                "Payment amount cannot be negative".to_string(),
            ));
        }

        self.repository.members.get_by_id(dto.member_id).await?;
        let today = Utc::now().date_naive();
        let payment_date = dto.payment_date.unwrap_or(today);

        let payment = if let Some(original_id) = dto.original_payment_id {
            // Read only the stable fields the new row inherits; the due
            // reduction itself happens atomically in the repository.
            let original = self.repository.payments.get_by_id(original_id).await?;

            let new = NewPayment {
                member_id: dto.member_id,
                amount: dto.amount,
                due_amount: Decimal::ZERO,
                total_membership_fee: Some(Decimal::ZERO),
                membership_session: original.membership_session.clone(),
                payment_date,
                payment_method: dto.payment_method,
                payment_method_detail: dto.payment_method_detail,
                plan_id: original.plan_id,
                original_payment_id: Some(original_id),
                transaction_id: dto.transaction_id,
                notes: dto.notes,
            };

            let (payment, remaining) = self
                .repository
                .payments
                .record_settlement(&new, original_id, dto.amount)
                .await?;

            tracing::info!(
                "Payment {} settled {} against payment {} (remaining due: {})",
                payment.id,
                dto.amount,
                original_id,
                remaining
            );
            payment
        } else if let Some(plan_id) = dto.plan_id {
            let plan = self.repository.plans.get_by_id(plan_id).await?;

            let new = NewPayment {
                member_id: dto.member_id,
                amount: dto.amount,
                due_amount: settle_due(plan.price, dto.amount),
                total_membership_fee: Some(plan.price),
                membership_session: Some(membership_session_label(
                    payment_date,
                    plan.duration_months,
                )),
                payment_date,
                payment_method: dto.payment_method,
                payment_method_detail: dto.payment_method_detail,
                plan_id: Some(plan.id),
                original_payment_id: None,
                transaction_id: dto.transaction_id,
                notes: dto.notes,
            };

            let (payment, member) = self
                .repository
                .payments
                .record_purchase(&new, dto.member_id, |m| {
                    membership::assign_or_renew(m, &plan, payment_date, today)
                })
                .await?;

            tracing::info!(
                "Payment {} purchased plan '{}' for member {} (window {:?} to {:?})",
                payment.id,
                plan.name,
                member.id,
                member.current_plan_start_date,
                member.current_plan_end_date
            );
            payment
        } else {
            let new = NewPayment {
                member_id: dto.member_id,
                amount: dto.amount,
                due_amount: Decimal::ZERO,
                total_membership_fee: Some(dto.amount),
                membership_session: Some("Ad-hoc Payment".to_string()),
                payment_date,
                payment_method: dto.payment_method,
                payment_method_detail: dto.payment_method_detail,
                plan_id: None,
                original_payment_id: None,
                transaction_id: dto.transaction_id,
                notes: dto.notes,
            };

            self.repository.payments.insert(&new).await?
        };

        self.repository.payments.get_details(payment.id).await
    }

    /// Get payment details by ID
    pub async fn get_payment(&self, id: i32) -> AppResult<PaymentDetails> {
        self.repository.payments.get_details(id).await
    }

    /// List payments with pagination
    pub async fn list_payments(
        &self,
        page: i64,
        per_page: i64,
    ) -> AppResult<(Vec<PaymentDetails>, i64)> {
        self.repository
            .payments
            .list(page.max(1), per_page.clamp(1, 200))
            .await
    }

    /// List payments for one member
    pub async fn payments_for_member(&self, member_id: i32) -> AppResult<Vec<PaymentDetails>> {
        self.repository.members.get_by_id(member_id).await?;
        let payments = self.repository.payments.list_by_member(member_id).await?;
        if payments.is_empty() {
            return Err(AppError::NotFound(format!(
                "No payments found for member {}",
                member_id
            )));
        }
        Ok(payments)
    }

    /// All payments with an outstanding due
    pub async fn outstanding_dues(&self) -> AppResult<Vec<PaymentDetails>> {
        self.repository.payments.outstanding_dues().await
    }

    /// Delete a payment.
    ///
    /// Does not restore the due on any payment this one settled; dues are
    /// reduced only by settlement payments, never re-derived on delete.
    pub async fn delete_payment(&self, id: i32) -> AppResult<()> {
        self.repository.payments.delete(id).await
    }

    /// Payment analytics over an inclusive date range
    pub async fn analytics(&self, query: &AnalyticsQuery) -> AppResult<PaymentAnalytics> {
        if query.start_date > query.end_date {
            return Err(AppError::Validation(
                "start_date must not be after end_date".to_string(),
            ));
        }

        let pool = &self.repository.payments.pool;

        let totals = sqlx::query(
            r#"
            SELECT COALESCE(SUM(amount), 0) as collected,
                   COUNT(*) as cnt,
                   COALESCE(SUM(due_amount), 0) as due,
                   COALESCE(SUM(total_membership_fee), 0) as expected
            FROM payments
            WHERE payment_date >= $1 AND payment_date <= $2
            "#,
        )
        .bind(query.start_date)
        .bind(query.end_date)
        .fetch_one(pool)
        .await?;

        let by_method = sqlx::query_as::<_, MethodBreakdown>(
            r#"
            SELECT payment_method as method,
                   COALESCE(SUM(amount), 0) as amount,
                   COUNT(*) as count
            FROM payments
            WHERE payment_date >= $1 AND payment_date <= $2
            GROUP BY payment_method
            ORDER BY amount DESC
            "#,
        )
        .bind(query.start_date)
        .bind(query.end_date)
        .fetch_all(pool)
        .await?;

        let by_plan = sqlx::query_as::<_, PlanBreakdown>(
            r#"
            SELECT pl.name as plan_name, COALESCE(SUM(p.amount), 0) as amount
            FROM payments p
            JOIN membership_plans pl ON p.plan_id = pl.id
            WHERE p.payment_date >= $1 AND p.payment_date <= $2
            GROUP BY pl.name
            ORDER BY amount DESC
            "#,
        )
        .bind(query.start_date)
        .bind(query.end_date)
        .fetch_all(pool)
        .await?;

        let method_amount = |name: &str| {
            by_method
                .iter()
                .find(|m| m.method.eq_ignore_ascii_case(name))
                .map(|m| m.amount)
                .unwrap_or(Decimal::ZERO)
        };

        Ok(PaymentAnalytics {
            total_amount_collected: totals.get("collected"),
            total_payments_count: totals.get("cnt"),
            total_due_amount: totals.get("due"),
            total_expected_amount: totals.get("expected"),
            cash_collected: method_amount("Cash"),
            card_collected: method_amount("Card"),
            online_collected: method_amount("Online"),
            by_method,
            by_plan,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn single_month_label_is_start_month_only() {
        assert_eq!(membership_session_label(date(2025, 1, 1), 1), "Jan 2025");
        assert_eq!(membership_session_label(date(2025, 12, 15), 1), "Dec 2025");
    }

    #[test]
    fn multi_month_label_ends_on_last_covered_month() {
        // 1 Jan + 4 months - 1 day = 30 Apr
        assert_eq!(
            membership_session_label(date(2025, 1, 1), 4),
            "Jan 2025 - Apr 2025"
        );
        // Crossing a year boundary
        assert_eq!(
            membership_session_label(date(2025, 11, 10), 3),
            "Nov 2025 - Feb 2026"
        );
    }

    #[test]
    fn mid_month_start_can_end_in_start_plus_duration_minus_one() {
        // 15 Jan + 2 months - 1 day = 14 Mar
        assert_eq!(
            membership_session_label(date(2025, 1, 15), 2),
            "Jan 2025 - Mar 2025"
        );
    }

    #[test]
    fn settle_due_floors_at_zero() {
        assert_eq!(
            settle_due(Decimal::from(500), Decimal::from(300)),
            Decimal::from(200)
        );
        assert_eq!(
            settle_due(Decimal::from(500), Decimal::from(500)),
            Decimal::ZERO
        );
        // Overpayment is absorbed, never negative
        assert_eq!(
            settle_due(Decimal::from(500), Decimal::from(700)),
            Decimal::ZERO
        );
    }

    #[test]
    fn plan_purchase_due_is_price_minus_amount() {
        assert_eq!(
            settle_due(Decimal::from(1000), Decimal::from(600)),
            Decimal::from(400)
        );
        assert_eq!(
            settle_due(Decimal::from(1000), Decimal::from(1200)),
            Decimal::ZERO
        );
    }
}

//! Payment ledger model and related types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Payment model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Payment {
    pub id: i32,
    pub member_id: i32,
    /// Amount actually collected in this transaction
    #[schema(value_type = f64)]
    pub amount: Decimal,
    /// Residual obligation attached to this transaction, reduced only by
    /// settlement payments referencing it
    #[schema(value_type = f64)]
    pub due_amount: Decimal,
    /// Full plan price when this payment originates a plan purchase; zero
    /// for due-settlements; the paid amount for ad-hoc payments
    #[schema(value_type = Option<f64>)]
    pub total_membership_fee: Option<Decimal>,
    /// Human-readable label of the covered period, e.g. "Jan 2025 - Apr 2025"
    pub membership_session: Option<String>,
    pub payment_date: NaiveDate,
    pub payment_method: String,
    pub payment_method_detail: Option<String>,
    pub plan_id: Option<i32>,
    /// Links a due-settlement to the payment whose due it reduces
    pub original_payment_id: Option<i32>,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
}

/// Payment with member and plan names resolved, for display
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PaymentDetails {
    pub id: i32,
    pub member_id: i32,
    pub member_name: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    #[schema(value_type = f64)]
    pub due_amount: Decimal,
    #[schema(value_type = Option<f64>)]
    pub total_membership_fee: Option<Decimal>,
    pub membership_session: Option<String>,
    pub payment_date: NaiveDate,
    pub payment_method: String,
    pub payment_method_detail: Option<String>,
    pub plan_id: Option<i32>,
    pub plan_name: Option<String>,
    pub original_payment_id: Option<i32>,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
}

/// Create payment request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePayment {
    pub member_id: i32,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    /// Defaults to today when absent
    pub payment_date: Option<NaiveDate>,
    pub payment_method: String,
    pub payment_method_detail: Option<String>,
    /// Plan being purchased; triggers assignment/renewal of the member's window
    pub plan_id: Option<i32>,
    /// When set, this payment settles the referenced payment's due instead
    pub original_payment_id: Option<i32>,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
}

/// Fully resolved payment row ready for insertion
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub member_id: i32,
    pub amount: Decimal,
    pub due_amount: Decimal,
    pub total_membership_fee: Option<Decimal>,
    pub membership_session: Option<String>,
    pub payment_date: NaiveDate,
    pub payment_method: String,
    pub payment_method_detail: Option<String>,
    pub plan_id: Option<i32>,
    pub original_payment_id: Option<i32>,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
}

/// Query parameters for payment listing
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct PaymentQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Query parameters for payment analytics
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AnalyticsQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Collected amount and count for one payment method
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct MethodBreakdown {
    pub method: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub count: i64,
}

/// Collected amount attributed to one plan
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct PlanBreakdown {
    pub plan_name: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
}

/// Payment analytics over a date range
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaymentAnalytics {
    #[schema(value_type = f64)]
    pub total_amount_collected: Decimal,
    pub total_payments_count: i64,
    #[schema(value_type = f64)]
    pub total_due_amount: Decimal,
    /// Sum of total_membership_fee over rows where it is set; ad-hoc and
    /// due-settlement rows never double-count expected revenue
    #[schema(value_type = f64)]
    pub total_expected_amount: Decimal,
    #[schema(value_type = f64)]
    pub cash_collected: Decimal,
    #[schema(value_type = f64)]
    pub card_collected: Decimal,
    #[schema(value_type = f64)]
    pub online_collected: Decimal,
    pub by_method: Vec<MethodBreakdown>,
    pub by_plan: Vec<PlanBreakdown>,
}

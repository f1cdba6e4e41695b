//! Member model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Membership status, derived from the current plan window.
///
/// Stored denormalized on the member row and refreshed by every write path
/// that touches plan or date fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MembershipStatus {
    Active,
    Expired,
    Inactive,
}

impl MembershipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Active => "Active",
            MembershipStatus::Expired => "Expired",
            MembershipStatus::Inactive => "Inactive",
        }
    }
}

impl std::fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MembershipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(MembershipStatus::Active),
            "expired" => Ok(MembershipStatus::Expired),
            "inactive" => Ok(MembershipStatus::Inactive),
            _ => Err(format!("Invalid membership status: {}", s)),
        }
    }
}

impl From<String> for MembershipStatus {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(MembershipStatus::Inactive)
    }
}

// SQLx conversion for MembershipStatus (stored as TEXT)
impl sqlx::Type<Postgres> for MembershipStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for MembershipStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for MembershipStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Member model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Member {
    /// 6-digit member identifier
    pub id: i32,
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub contact_number: Option<String>,
    pub joining_date: NaiveDate,
    pub membership_status: MembershipStatus,
    pub current_plan_id: Option<i32>,
    pub current_plan_start_date: Option<NaiveDate>,
    pub current_plan_end_date: Option<NaiveDate>,
}

/// Member with the current plan name resolved, for display
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MemberDetails {
    pub id: i32,
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub contact_number: Option<String>,
    pub joining_date: NaiveDate,
    pub membership_status: MembershipStatus,
    pub current_plan_id: Option<i32>,
    pub current_plan_name: Option<String>,
    pub current_plan_start_date: Option<NaiveDate>,
    pub current_plan_end_date: Option<NaiveDate>,
}

/// Create member request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMember {
    /// Explicit member id; a unique 6-digit id is allocated when absent
    pub id: Option<i32>,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(range(min = 1, max = 120))]
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub contact_number: Option<String>,
    /// Defaults to today when absent
    pub joining_date: Option<NaiveDate>,
    /// Initial plan, assigned from the joining date
    pub plan_id: Option<i32>,
}

/// Update member request (direct-edit path)
///
/// `plan_id` drives the conservative plan-replacement policy: same id keeps
/// the paid-for window untouched, a different id while a plan is active is a
/// conflict, and null clears the plan.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMember {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(range(min = 1, max = 120))]
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub contact_number: Option<String>,
    pub joining_date: NaiveDate,
    pub plan_id: Option<i32>,
}

/// Query parameters for member search
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct MemberQuery {
    /// Substring matched against name and contact number
    pub query: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Membership expiring within the dashboard window
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ExpiringMembership {
    pub member_id: i32,
    pub name: String,
    pub contact_number: Option<String>,
    pub plan_name: Option<String>,
    pub end_date: NaiveDate,
    pub days_remaining: i64,
}

//! Membership lifecycle engine
//!
//! Pure policy functions over a [`Member`] value. Two distinct mutation
//! policies exist on purpose: the billing path (`assign_or_renew`) is
//! additive and never destroys paid-for time, while the direct-edit path
//! (`replace_plan`) is conservative and rejects ambiguous mutations.
//! Persistence is the caller's job; every function re-derives the stored
//! status before returning.

use chrono::{Duration, Months, NaiveDate};

use crate::{
    error::{AppError, AppResult},
    models::{member::MembershipStatus, Member, Plan},
};

/// Derive the membership status from the plan window.
///
/// Inactive iff there is no plan id or no end date; otherwise Active while
/// the end date is strictly in the future, Expired from the end date on.
pub fn derive_status(
    plan_id: Option<i32>,
    end_date: Option<NaiveDate>,
    today: NaiveDate,
) -> MembershipStatus {
    match (plan_id, end_date) {
        (Some(_), Some(end)) if end > today => MembershipStatus::Active,
        (Some(_), Some(_)) => MembershipStatus::Expired,
        _ => MembershipStatus::Inactive,
    }
}

/// Refresh the denormalized status column from the member's plan window.
pub fn refresh_status(member: &mut Member, today: NaiveDate) {
    member.membership_status =
        derive_status(member.current_plan_id, member.current_plan_end_date, today);
}

/// Billing-path policy: assign a plan or chain a renewal onto the current
/// window.
///
/// A member holding an unexpired plan gets a renewal: the new window starts
/// the day after the existing end date (not the payment date) and extends
/// the existing end by the plan duration. The plan id is updated, so a
/// renewal may also switch plans. Anyone else gets a fresh window from
/// `effective`.
pub fn assign_or_renew(member: &mut Member, plan: &Plan, effective: NaiveDate, today: NaiveDate) {
    let duration = Months::new(plan.duration_months.max(0) as u32);

    match (member.current_plan_id, member.current_plan_end_date) {
        (Some(_), Some(end)) if end > today => {
            member.current_plan_start_date = Some(end + Duration::days(1));
            member.current_plan_end_date = Some(end + duration);
            member.current_plan_id = Some(plan.id);
        }
        _ => {
            member.current_plan_id = Some(plan.id);
            member.current_plan_start_date = Some(effective);
            member.current_plan_end_date = Some(effective + duration);
        }
    }

    refresh_status(member, today);
}

/// Direct-edit policy: replace, keep, or clear the member's plan.
///
/// Re-submitting the current plan id leaves the window byte-for-byte
/// untouched, so profile edits never perturb billing dates. Assigning a
/// different plan while the current one is still active is a conflict; the
/// caller must clear the plan first. `None` clears the plan and both dates.
pub fn replace_plan(
    member: &mut Member,
    new_plan: Option<&Plan>,
    effective: NaiveDate,
    today: NaiveDate,
    current_plan_name: Option<&str>,
) -> AppResult<()> {
    match new_plan {
        None => {
            member.current_plan_id = None;
            member.current_plan_start_date = None;
            member.current_plan_end_date = None;
        }
        Some(plan) if member.current_plan_id == Some(plan.id) => {
            // Same plan re-submitted: keep the paid-for window.
        }
        Some(plan) => {
            let status =
                derive_status(member.current_plan_id, member.current_plan_end_date, today);
            if status == MembershipStatus::Active {
                return Err(AppError::Conflict(format!(
                    "Member already has an active membership plan ('{}'). Remove the current plan before assigning a new one.",
                    current_plan_name.unwrap_or("Unknown Plan")
                )));
            }
            member.current_plan_id = Some(plan.id);
            member.current_plan_start_date = Some(effective);
            member.current_plan_end_date =
                Some(effective + Months::new(plan.duration_months.max(0) as u32));
        }
    }

    refresh_status(member, today);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn member(plan_id: Option<i32>, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Member {
        Member {
            id: 100001,
            name: "Test Member".to_string(),
            age: Some(30),
            gender: None,
            contact_number: None,
            joining_date: date(2025, 1, 1),
            membership_status: MembershipStatus::Inactive,
            current_plan_id: plan_id,
            current_plan_start_date: start,
            current_plan_end_date: end,
        }
    }

    fn plan(id: i32, months: i32) -> Plan {
        Plan {
            id,
            name: format!("Plan {}", id),
            price: Decimal::from(1000),
            duration_months: months,
            features: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn status_is_inactive_without_plan_or_end_date() {
        let today = date(2025, 6, 1);
        assert_eq!(derive_status(None, None, today), MembershipStatus::Inactive);
        assert_eq!(
            derive_status(Some(1), None, today),
            MembershipStatus::Inactive
        );
        assert_eq!(
            derive_status(None, Some(date(2025, 7, 1)), today),
            MembershipStatus::Inactive
        );
    }

    #[test]
    fn status_depends_only_on_end_date_vs_today() {
        let today = date(2025, 6, 1);
        assert_eq!(
            derive_status(Some(1), Some(date(2025, 6, 2)), today),
            MembershipStatus::Active
        );
        // End date equal to today is already expired
        assert_eq!(
            derive_status(Some(1), Some(today), today),
            MembershipStatus::Expired
        );
        assert_eq!(
            derive_status(Some(1), Some(date(2025, 5, 31)), today),
            MembershipStatus::Expired
        );
    }

    #[test]
    fn renewal_chains_onto_existing_end_date() {
        let today = date(2025, 1, 15);
        let end = date(2025, 2, 1);
        let mut m = member(Some(1), Some(date(2025, 1, 1)), Some(end));
        let p = plan(2, 3);

        // The payment date must not matter for an unexpired plan
        assign_or_renew(&mut m, &p, date(2025, 1, 20), today);

        assert_eq!(m.current_plan_id, Some(2));
        assert_eq!(m.current_plan_start_date, Some(date(2025, 2, 2)));
        assert_eq!(m.current_plan_end_date, Some(date(2025, 5, 1)));
        assert_eq!(m.membership_status, MembershipStatus::Active);
    }

    #[test]
    fn fresh_assignment_starts_at_effective_date() {
        let today = date(2025, 1, 1);
        let mut m = member(None, None, None);
        let p = plan(1, 1);

        assign_or_renew(&mut m, &p, date(2025, 1, 1), today);

        assert_eq!(m.current_plan_id, Some(1));
        assert_eq!(m.current_plan_start_date, Some(date(2025, 1, 1)));
        assert_eq!(m.current_plan_end_date, Some(date(2025, 2, 1)));
        assert_eq!(m.membership_status, MembershipStatus::Active);
    }

    #[test]
    fn expired_plan_gets_fresh_window_not_renewal() {
        let today = date(2025, 6, 1);
        let mut m = member(Some(1), Some(date(2025, 1, 1)), Some(date(2025, 2, 1)));
        let p = plan(1, 2);

        assign_or_renew(&mut m, &p, date(2025, 6, 10), today);

        assert_eq!(m.current_plan_start_date, Some(date(2025, 6, 10)));
        assert_eq!(m.current_plan_end_date, Some(date(2025, 8, 10)));
    }

    #[test]
    fn replace_with_same_plan_keeps_window_untouched() {
        let today = date(2025, 1, 15);
        let start = date(2025, 1, 1);
        let end = date(2025, 4, 1);
        let mut m = member(Some(1), Some(start), Some(end));
        let p = plan(1, 3);

        replace_plan(&mut m, Some(&p), date(2025, 1, 20), today, Some("Basic")).unwrap();

        assert_eq!(m.current_plan_start_date, Some(start));
        assert_eq!(m.current_plan_end_date, Some(end));
        assert_eq!(m.membership_status, MembershipStatus::Active);
    }

    #[test]
    fn replace_active_plan_with_different_plan_is_conflict() {
        let today = date(2025, 1, 15);
        let mut m = member(Some(1), Some(date(2025, 1, 1)), Some(date(2025, 4, 1)));
        let p = plan(2, 1);

        let err = replace_plan(&mut m, Some(&p), today, today, Some("Basic")).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        // Window must be left alone on failure
        assert_eq!(m.current_plan_id, Some(1));
        assert_eq!(m.current_plan_end_date, Some(date(2025, 4, 1)));
    }

    #[test]
    fn replace_expired_plan_assigns_fresh_window() {
        let today = date(2025, 6, 1);
        let mut m = member(Some(1), Some(date(2025, 1, 1)), Some(date(2025, 2, 1)));
        let p = plan(2, 2);

        replace_plan(&mut m, Some(&p), date(2025, 6, 1), today, Some("Basic")).unwrap();

        assert_eq!(m.current_plan_id, Some(2));
        assert_eq!(m.current_plan_start_date, Some(date(2025, 6, 1)));
        assert_eq!(m.current_plan_end_date, Some(date(2025, 8, 1)));
        assert_eq!(m.membership_status, MembershipStatus::Active);
    }

    #[test]
    fn replace_with_none_clears_plan_and_dates() {
        let today = date(2025, 1, 15);
        let mut m = member(Some(1), Some(date(2025, 1, 1)), Some(date(2025, 4, 1)));

        replace_plan(&mut m, None, today, today, Some("Basic")).unwrap();

        assert_eq!(m.current_plan_id, None);
        assert_eq!(m.current_plan_start_date, None);
        assert_eq!(m.current_plan_end_date, None);
        assert_eq!(m.membership_status, MembershipStatus::Inactive);
    }
}

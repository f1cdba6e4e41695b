//! Attendance session tracking service
//!
//! Per member and calendar date the state machine is
//! NoSession -> CheckedIn -> CheckedOut, one cycle per day. A single
//! `record_event` entry point advances it, so the front desk only ever
//! scans a member id.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{
        attendance::{
            AttendanceAction, AttendanceEvent, AttendanceRecord, AttendanceSession, DailyCount,
        },
        member::MembershipStatus,
    },
    repository::Repository,
    services::membership,
};

/// Next step of the per-day state machine for one member.
#[derive(Debug, PartialEq, Eq)]
enum Transition {
    CheckIn,
    CheckOut { session_id: i32, minutes: i64 },
}

/// Decide what today's event does given the member's existing session.
fn next_transition(
    existing: Option<&AttendanceSession>,
    now: DateTime<Utc>,
    min_stay_minutes: i64,
) -> AppResult<Transition> {
    match existing {
        None => Ok(Transition::CheckIn),
        Some(session) if session.check_out_time.is_none() => {
            let minutes = checkout_elapsed(session.check_in_time, now, min_stay_minutes)?;
            Ok(Transition::CheckOut {
                session_id: session.id,
                minutes,
            })
        }
        Some(session) => {
            let at = session
                .check_out_time
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_default();
            Err(AppError::InvalidState(format!(
                "Member has already checked in and checked out today at {}",
                at
            )))
        }
    }
}

/// Validate a check-out attempt and return the elapsed minutes.
fn checkout_elapsed(
    check_in: DateTime<Utc>,
    now: DateTime<Utc>,
    min_stay_minutes: i64,
) -> AppResult<i64> {
    if now < check_in {
        return Err(AppError::InvalidState(
            "Check-out time cannot be before check-in time".to_string(),
        ));
    }

    let elapsed = (now - check_in).num_minutes();
    if elapsed < min_stay_minutes {
        return Err(AppError::InvalidState(format!(
            "Check-out not allowed. Member must stay at least {} minutes (current duration: {} minutes)",
            min_stay_minutes, elapsed
        )));
    }

    Ok(elapsed)
}

/// Reject attendance for members whose membership is not active.
fn require_active(status: MembershipStatus) -> AppResult<()> {
    match status {
        MembershipStatus::Active => Ok(()),
        MembershipStatus::Expired => Err(AppError::InvalidState(
            "Membership has expired. Please renew the plan".to_string(),
        )),
        MembershipStatus::Inactive => Err(AppError::InvalidState(
            "Membership is inactive. Please assign a plan".to_string(),
        )),
    }
}

#[derive(Clone)]
pub struct AttendanceService {
    repository: Repository,
    min_stay_minutes: i64,
}

impl AttendanceService {
    pub fn new(repository: Repository, min_stay_minutes: i64) -> Self {
        Self {
            repository,
            min_stay_minutes,
        }
    }

    /// Record an attendance event for a member.
    ///
    /// No session today means check-in; an open session means a check-out
    /// attempt; a closed session is a terminal state for the day.
    pub async fn record_event(&self, member_id: i32) -> AppResult<AttendanceEvent> {
        let member = self.repository.members.get_by_id(member_id).await?;
        let now = Utc::now();
        let today = now.date_naive();

        let status =
            membership::derive_status(member.current_plan_id, member.current_plan_end_date, today);
        require_active(status)?;

        let existing = self
            .repository
            .attendance
            .find_by_member_and_date(member_id, today)
            .await?;

        match next_transition(existing.as_ref(), now, self.min_stay_minutes)? {
            Transition::CheckIn => {
                // A concurrent check-in may win the insert race; the unique
                // key turns the loser into a plain conflict.
                let session = self
                    .repository
                    .attendance
                    .try_check_in(member_id, today, now)
                    .await?
                    .ok_or_else(|| {
                        AppError::InvalidState(format!(
                            "Member {} has already checked in today",
                            member_id
                        ))
                    })?;

                let record = self.repository.attendance.get_record(session.id).await?;
                Ok(AttendanceEvent {
                    action: AttendanceAction::CheckedIn,
                    record,
                })
            }
            Transition::CheckOut {
                session_id,
                minutes,
            } => {
                let closed = self
                    .repository
                    .attendance
                    .close_session(session_id, now, minutes)
                    .await?;

                let record = self.repository.attendance.get_record(closed.id).await?;
                Ok(AttendanceEvent {
                    action: AttendanceAction::CheckedOut,
                    record,
                })
            }
        }
    }

    /// Today's session for a member, if any
    pub async fn status_for_today(&self, member_id: i32) -> AppResult<Option<AttendanceRecord>> {
        self.repository.members.get_by_id(member_id).await?;
        let today = Utc::now().date_naive();
        self.repository
            .attendance
            .record_for_member_and_date(member_id, today)
            .await
    }

    /// End-of-day sweep: close every eligible open session dated today.
    ///
    /// Skips members whose derived status is no longer Active and sessions
    /// younger than the minimum stay. Already-closed sessions are untouched,
    /// so repeated sweeps are harmless. Returns the number closed.
    pub async fn check_out_all(&self) -> AppResult<i64> {
        let now = Utc::now();
        let today = now.date_naive();

        let open = self.repository.attendance.open_sessions(today).await?;
        let mut closed = 0i64;

        for session in open {
            let status = membership::derive_status(
                session.current_plan_id,
                session.current_plan_end_date,
                today,
            );
            if status != MembershipStatus::Active {
                tracing::info!(
                    "Skipping check-out for non-active member {} ({}): {}",
                    session.member_id,
                    session.member_name,
                    status
                );
                continue;
            }

            let elapsed = match checkout_elapsed(session.check_in_time, now, self.min_stay_minutes)
            {
                Ok(elapsed) => elapsed,
                Err(_) => {
                    tracing::info!(
                        "Skipping check-out for member {} (less than {} minutes stay)",
                        session.member_id,
                        self.min_stay_minutes
                    );
                    continue;
                }
            };

            match self
                .repository
                .attendance
                .close_session(session.id, now, elapsed)
                .await
            {
                Ok(_) => closed += 1,
                // Closed by a concurrent check-out between listing and update
                Err(AppError::NotFound(_)) => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(closed)
    }

    /// Check-in counts per date over an inclusive range
    pub async fn daily_counts(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<Vec<DailyCount>> {
        if start_date > end_date {
            return Err(AppError::Validation(
                "start_date must not be after end_date".to_string(),
            ));
        }
        self.repository
            .attendance
            .daily_counts(start_date, end_date)
            .await
    }

    /// List attendance records with pagination
    pub async fn list_records(
        &self,
        page: i64,
        per_page: i64,
    ) -> AppResult<(Vec<AttendanceRecord>, i64)> {
        self.repository
            .attendance
            .list(page.max(1), per_page.clamp(1, 200))
            .await
    }

    /// Delete an attendance record
    pub async fn delete_record(&self, id: i32) -> AppResult<()> {
        self.repository.attendance.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, h, m, 0).unwrap()
    }

    #[test]
    fn checkout_before_checkin_is_rejected() {
        let err = checkout_elapsed(at(10, 0), at(9, 59), 10).unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[test]
    fn checkout_before_minimum_stay_reports_elapsed_minutes() {
        let err = checkout_elapsed(at(10, 0), at(10, 5), 10).unwrap_err();
        match err {
            AppError::InvalidState(msg) => {
                assert!(msg.contains("at least 10 minutes"));
                assert!(msg.contains("current duration: 5 minutes"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn checkout_at_exactly_minimum_stay_succeeds() {
        assert_eq!(checkout_elapsed(at(10, 0), at(10, 10), 10).unwrap(), 10);
    }

    #[test]
    fn checkout_after_minimum_stay_returns_elapsed() {
        assert_eq!(checkout_elapsed(at(9, 0), at(11, 30), 10).unwrap(), 150);
    }

    fn session(check_in: DateTime<Utc>, check_out: Option<DateTime<Utc>>) -> AttendanceSession {
        AttendanceSession {
            id: 42,
            member_id: 123456,
            attendance_date: check_in.date_naive(),
            check_in_time: check_in,
            check_out_time: check_out,
            time_spent_minutes: check_out.map(|t| (t - check_in).num_minutes()),
        }
    }

    #[test]
    fn no_session_means_check_in() {
        assert_eq!(
            next_transition(None, at(8, 0), 10).unwrap(),
            Transition::CheckIn
        );
    }

    #[test]
    fn open_session_past_minimum_stay_checks_out() {
        let open = session(at(9, 0), None);
        assert_eq!(
            next_transition(Some(&open), at(10, 30), 10).unwrap(),
            Transition::CheckOut {
                session_id: 42,
                minutes: 90
            }
        );
    }

    #[test]
    fn open_session_below_minimum_stay_is_rejected() {
        let open = session(at(9, 0), None);
        let err = next_transition(Some(&open), at(9, 3), 10).unwrap_err();
        assert!(matches!(err, AppError::InvalidState(ref m) if m.contains("at least 10 minutes")));
    }

    #[test]
    fn closed_session_is_terminal_for_the_day() {
        let done = session(at(9, 0), Some(at(10, 30)));
        let err = next_transition(Some(&done), at(15, 0), 10).unwrap_err();
        match err {
            AppError::InvalidState(msg) => {
                assert!(msg.contains("already checked in and checked out today at 10:30"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn inactive_and_expired_members_are_rejected_with_specific_messages() {
        let err = require_active(MembershipStatus::Expired).unwrap_err();
        assert!(matches!(err, AppError::InvalidState(ref m) if m.contains("expired")));

        let err = require_active(MembershipStatus::Inactive).unwrap_err();
        assert!(matches!(err, AppError::InvalidState(ref m) if m.contains("inactive")));

        assert!(require_active(MembershipStatus::Active).is_ok());
    }
}

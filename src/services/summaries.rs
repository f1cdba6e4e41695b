//! Attendance aggregation service
//!
//! Rolls closed attendance sessions up into daily, monthly and yearly
//! summaries. Every stage is an upsert keyed by its natural key, so the
//! whole pipeline can be re-run at any time (the pending check and the run
//! are separate calls and may race) without duplicating rows or drifting
//! values.

use crate::{
    error::AppResult,
    models::summary::{DailyAttendanceSummary, MonthlyAttendanceSummary, YearlyAttendanceSummary},
    repository::Repository,
};

/// Rows touched by each aggregation stage
#[derive(Debug, Clone, Copy)]
pub struct AggregationOutcome {
    pub daily_rows: u64,
    pub monthly_rows: u64,
    pub yearly_rows: u64,
}

#[derive(Clone)]
pub struct SummariesService {
    repository: Repository,
}

impl SummariesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// True if any closed session has not yet been reflected in the daily
    /// summary (absent, or present with different values)
    pub async fn has_pending_work(&self) -> AppResult<bool> {
        self.repository.summaries.has_pending().await
    }

    /// Run the three-stage rollup: sessions -> daily -> monthly -> yearly.
    ///
    /// Each stage is a single atomic statement. A crash between stages
    /// leaves a resumable state; the next run recomputes to the same values.
    pub async fn run_aggregation(&self) -> AppResult<AggregationOutcome> {
        let daily_rows = self.repository.summaries.upsert_daily_from_sessions().await?;
        tracing::info!("Daily attendance summary upserted ({} rows)", daily_rows);

        let monthly_rows = self.repository.summaries.rollup_monthly().await?;
        tracing::info!("Monthly attendance summary recomputed ({} rows)", monthly_rows);

        let yearly_rows = self.repository.summaries.rollup_yearly().await?;
        tracing::info!("Yearly attendance summary recomputed ({} rows)", yearly_rows);

        Ok(AggregationOutcome {
            daily_rows,
            monthly_rows,
            yearly_rows,
        })
    }

    /// Daily summaries for one member
    pub async fn daily_for_member(&self, member_id: i32) -> AppResult<Vec<DailyAttendanceSummary>> {
        self.repository.members.get_by_id(member_id).await?;
        self.repository.summaries.daily_for_member(member_id).await
    }

    /// Monthly summaries for one member
    pub async fn monthly_for_member(
        &self,
        member_id: i32,
    ) -> AppResult<Vec<MonthlyAttendanceSummary>> {
        self.repository.members.get_by_id(member_id).await?;
        self.repository.summaries.monthly_for_member(member_id).await
    }

    /// Yearly summaries for one member
    pub async fn yearly_for_member(
        &self,
        member_id: i32,
    ) -> AppResult<Vec<YearlyAttendanceSummary>> {
        self.repository.members.get_by_id(member_id).await?;
        self.repository.summaries.yearly_for_member(member_id).await
    }
}

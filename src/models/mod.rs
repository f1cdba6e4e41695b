//! Data models for Gymtrack

pub mod attendance;
pub mod member;
pub mod payment;
pub mod plan;
pub mod summary;
pub mod trainer;

// Re-export commonly used types
pub use attendance::{AttendanceRecord, AttendanceSession};
pub use member::{Member, MemberDetails, MembershipStatus};
pub use payment::{Payment, PaymentDetails};
pub use plan::Plan;
pub use summary::{DailyAttendanceSummary, MonthlyAttendanceSummary, YearlyAttendanceSummary};
pub use trainer::Trainer;

//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{attendance, dashboard, health, members, payments, plans, trainers};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "GymTrack API",
        version = "1.0.0",
        description = "Gym Membership Management System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Members
        members::list_members,
        members::get_member,
        members::create_member,
        members::update_member,
        members::delete_member,
        // Plans
        plans::list_plans,
        plans::get_plan,
        plans::create_plan,
        plans::update_plan,
        plans::delete_plan,
        // Trainers
        trainers::list_trainers,
        trainers::get_trainer,
        trainers::create_trainer,
        trainers::update_trainer,
        trainers::delete_trainer,
        // Payments
        payments::list_payments,
        payments::get_payment,
        payments::record_payment,
        payments::member_payments,
        payments::outstanding_dues,
        payments::payment_analytics,
        payments::delete_payment,
        // Attendance
        attendance::record_event,
        attendance::today_status,
        attendance::check_out_all,
        attendance::daily_counts,
        attendance::list_records,
        attendance::delete_record,
        // Summaries
        attendance::pending_aggregation,
        attendance::run_aggregation,
        attendance::daily_summaries,
        attendance::monthly_summaries,
        attendance::yearly_summaries,
        // Dashboard
        dashboard::get_summary,
        dashboard::expiring_memberships,
    ),
    components(
        schemas(
            // Members
            crate::models::member::Member,
            crate::models::member::MemberDetails,
            crate::models::member::MembershipStatus,
            crate::models::member::CreateMember,
            crate::models::member::UpdateMember,
            crate::models::member::ExpiringMembership,
            // Plans
            crate::models::plan::Plan,
            crate::models::plan::CreatePlan,
            crate::models::plan::UpdatePlan,
            // Trainers
            crate::models::trainer::Trainer,
            crate::models::trainer::CreateTrainer,
            crate::models::trainer::UpdateTrainer,
            // Payments
            crate::models::payment::Payment,
            crate::models::payment::PaymentDetails,
            crate::models::payment::CreatePayment,
            crate::models::payment::PaymentAnalytics,
            crate::models::payment::MethodBreakdown,
            crate::models::payment::PlanBreakdown,
            // Attendance
            crate::models::attendance::AttendanceSession,
            crate::models::attendance::AttendanceRecord,
            crate::models::attendance::AttendanceAction,
            crate::models::attendance::AttendanceEvent,
            crate::models::attendance::DailyCount,
            attendance::RecordAttendanceRequest,
            attendance::TodayAttendanceResponse,
            attendance::CheckOutAllResponse,
            attendance::PendingAggregationResponse,
            attendance::AggregationResponse,
            // Summaries
            crate::models::summary::DailyAttendanceSummary,
            crate::models::summary::MonthlyAttendanceSummary,
            crate::models::summary::YearlyAttendanceSummary,
            // Dashboard
            dashboard::DashboardSummary,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "members", description = "Member management"),
        (name = "plans", description = "Membership plan catalog"),
        (name = "trainers", description = "Trainer management"),
        (name = "payments", description = "Payment ledger"),
        (name = "attendance", description = "Attendance tracking"),
        (name = "summaries", description = "Attendance summary rollups"),
        (name = "dashboard", description = "Dashboard aggregates")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

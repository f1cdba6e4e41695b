//! Member management service

use chrono::Utc;
use rand::Rng;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::member::{CreateMember, Member, MemberDetails, MemberQuery, UpdateMember},
    repository::Repository,
    services::membership,
};

/// Attempts before giving up on random id allocation
const MAX_ID_ATTEMPTS: u32 = 100;

#[derive(Clone)]
pub struct MembersService {
    repository: Repository,
}

impl MembersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Allocate a random, unused 6-digit member id with bounded retry.
    async fn allocate_member_id(&self) -> AppResult<i32> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate: i32 = rand::thread_rng().gen_range(100_000..=999_999);
            if !self.repository.members.exists(candidate).await? {
                return Ok(candidate);
            }
        }
        Err(AppError::Internal(format!(
            "Failed to allocate a unique 6-digit member id after {} attempts",
            MAX_ID_ATTEMPTS
        )))
    }

    /// Create a member, optionally with an initial plan assigned from the
    /// joining date.
    pub async fn create_member(&self, dto: CreateMember) -> AppResult<MemberDetails> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let id = match dto.id {
            Some(id) => {
                if !(100_000..=999_999).contains(&id) {
                    return Err(AppError::Validation(
                        "Member id must be a 6-digit number".to_string(),
                    ));
                }
                if self.repository.members.exists(id).await? {
                    return Err(AppError::Conflict(format!(
                        "Member with id {} already exists",
                        id
                    )));
                }
                id
            }
            None => self.allocate_member_id().await?,
        };

        let today = Utc::now().date_naive();
        let joining_date = dto.joining_date.unwrap_or(today);

        let mut member = Member {
            id,
            name: dto.name,
            age: dto.age,
            gender: dto.gender,
            contact_number: dto.contact_number,
            joining_date,
            membership_status: crate::models::member::MembershipStatus::Inactive,
            current_plan_id: None,
            current_plan_start_date: None,
            current_plan_end_date: None,
        };

        if let Some(plan_id) = dto.plan_id {
            let plan = self.repository.plans.get_by_id(plan_id).await?;
            membership::assign_or_renew(&mut member, &plan, joining_date, today);
        } else {
            membership::refresh_status(&mut member, today);
        }

        let created = self.repository.members.create(&member).await?;
        tracing::info!(
            "Member {} created (status: {})",
            created.id,
            created.membership_status
        );
        self.repository.members.get_details(created.id).await
    }

    /// Get member details by ID
    pub async fn get_member(&self, id: i32) -> AppResult<MemberDetails> {
        self.repository.members.get_details(id).await
    }

    /// Update a member (the direct-edit path).
    ///
    /// Profile fields are always applied. The plan field follows the
    /// conservative replacement policy: the same plan id leaves the paid-for
    /// window untouched, a different id while a plan is active is a
    /// conflict, and null clears the plan. Window, status and profile are
    /// persisted in one statement.
    pub async fn update_member(&self, id: i32, dto: UpdateMember) -> AppResult<MemberDetails> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let mut member = self.repository.members.get_by_id(id).await?;
        let today = Utc::now().date_naive();

        member.name = dto.name;
        member.age = dto.age;
        member.gender = dto.gender;
        member.contact_number = dto.contact_number;
        member.joining_date = dto.joining_date;

        let new_plan = match dto.plan_id {
            Some(plan_id) => Some(self.repository.plans.get_by_id(plan_id).await?),
            None => None,
        };

        // Resolved lazily: only needed for the conflict message
        let current_plan_name = match member.current_plan_id {
            Some(plan_id) => self
                .repository
                .plans
                .get_by_id(plan_id)
                .await
                .ok()
                .map(|p| p.name),
            None => None,
        };

        let effective = member.joining_date;
        membership::replace_plan(
            &mut member,
            new_plan.as_ref(),
            effective,
            today,
            current_plan_name.as_deref(),
        )?;

        let updated = self.repository.members.update(&member).await?;
        self.repository.members.get_details(updated.id).await
    }

    /// Search members with pagination
    pub async fn search_members(
        &self,
        query: &MemberQuery,
    ) -> AppResult<(Vec<MemberDetails>, i64)> {
        self.repository.members.search(query).await
    }

    /// Delete a member.
    ///
    /// Attendance and payment history reference the member; the schema
    /// cascades those rows, so deletion is explicit and final.
    pub async fn delete_member(&self, id: i32) -> AppResult<()> {
        self.repository.members.delete(id).await
    }
}

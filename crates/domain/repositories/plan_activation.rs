use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::active_plans::InsertActivePlanEntity;
use crate::domain::entities::users::ActivateUserEntity;

#[async_trait]
#[automock]
pub trait PlanActivationRepository {
    /// Records the purchase and flips the user into the active-plan state in
    /// one transaction. Returns the new active_plans row id.
    async fn activate(
        &self,
        active_plan: InsertActivePlanEntity,
        user_update: ActivateUserEntity,
    ) -> Result<i64>;
}

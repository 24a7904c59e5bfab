use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::plans::{InsertPlanEntity, PlanEntity, UpdatePlanEntity};
use crate::domain::value_objects::plan_schedule::{DayScheduleModel, MealSlot};

/// Access to the plan tree. Multi-entity writes are atomic: either the whole
/// tree lands or nothing does.
#[async_trait]
#[automock]
pub trait PlanRepository {
    /// Inserts the plan, one day per schedule entry (`for_day` starting at 1)
    /// and that day's meals, all in one transaction. Returns the new plan id.
    async fn create_plan_with_schedule(
        &self,
        plan: InsertPlanEntity,
        schedule: Vec<Vec<MealSlot>>,
    ) -> Result<i64>;

    /// Updates the plan's scalar fields and overwrites each existing meal's
    /// recipe, addressed by (day position, category), in one transaction.
    async fn update_plan_with_schedule(
        &self,
        plan_id: i64,
        plan: UpdatePlanEntity,
        schedule: Vec<Vec<MealSlot>>,
    ) -> Result<()>;

    async fn find_by_id(&self, plan_id: i64) -> Result<Option<PlanEntity>>;

    async fn list(&self) -> Result<Vec<PlanEntity>>;

    /// Days in `for_day` order, meals in category order, recipe names resolved.
    async fn load_schedule(&self, plan_id: i64) -> Result<Vec<DayScheduleModel>>;

    /// Deletes the plan and cascades to its days and meals in one transaction.
    /// Returns the number of plan rows removed.
    async fn delete(&self, plan_id: i64) -> Result<usize>;
}

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use crates::domain::{
    entities::plans::{InsertPlanEntity, UpdatePlanEntity},
    repositories::{plans::PlanRepository, recipes::RecipeRepository},
    value_objects::{
        enums::meal_categories::MealCategory,
        plan_schedule::{
            DayMealsModel, DayScheduleModel, FieldErrors, MealSlot, SubmitPlanModel,
            validate_plan_submission,
        },
        plans::{PlanSummaryView, PlanView},
    },
};
use thiserror::Error;
use tracing::{error, info, warn};

const RECIPE_NOT_FOUND: &str = "the recipe that you give is not found first create it";
const UNKNOWN_MEAL_CATEGORY: &str = "please enter the meal schedule correctly";
const SHAPE_MISMATCH: &str = "submitted schedule does not match the plan's day layout";

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("plan not found")]
    PlanNotFound,
    #[error("invalid plan submission")]
    Validation(FieldErrors),
    #[error("{message}")]
    Construction {
        field: &'static str,
        message: &'static str,
    },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PlanError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            PlanError::PlanNotFound => StatusCode::NOT_FOUND,
            PlanError::Validation(_) | PlanError::Construction { .. } => StatusCode::NOT_ACCEPTABLE,
            PlanError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, PlanError>;

pub struct PlanScheduleUseCase<P, R>
where
    P: PlanRepository + Send + Sync + 'static,
    R: RecipeRepository + Send + Sync + 'static,
{
    plan_repository: Arc<P>,
    recipe_repository: Arc<R>,
    public_base_url: String,
}

impl<P, R> PlanScheduleUseCase<P, R>
where
    P: PlanRepository + Send + Sync + 'static,
    R: RecipeRepository + Send + Sync + 'static,
{
    pub fn new(
        plan_repository: Arc<P>,
        recipe_repository: Arc<R>,
        public_base_url: String,
    ) -> Self {
        Self {
            plan_repository,
            recipe_repository,
            public_base_url,
        }
    }

    pub async fn list_plans(&self) -> UseCaseResult<Vec<PlanSummaryView>> {
        info!("plans: listing plans");
        let plans = self.plan_repository.list().await.map_err(|err| {
            error!(db_error = ?err, "plans: failed to list plans");
            PlanError::Internal(err)
        })?;
        info!(plan_count = plans.len(), "plans: plans loaded");

        Ok(plans
            .into_iter()
            .map(|plan| {
                let view_url = self.view_url(plan.id);
                PlanSummaryView::from_entity(plan, view_url)
            })
            .collect())
    }

    pub async fn get_plan(&self, plan_id: i64) -> UseCaseResult<PlanView> {
        let plan = self
            .plan_repository
            .find_by_id(plan_id)
            .await
            .map_err(|err| {
                error!(plan_id, db_error = ?err, "plans: failed to load plan");
                PlanError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = PlanError::PlanNotFound;
                warn!(
                    plan_id,
                    status = err.status_code().as_u16(),
                    "plans: plan not found"
                );
                err
            })?;

        let schedule = self
            .plan_repository
            .load_schedule(plan_id)
            .await
            .map_err(|err| {
                error!(plan_id, db_error = ?err, "plans: failed to load schedule");
                PlanError::Internal(err)
            })?;

        Ok(PlanView::from_parts(plan, &schedule, self.view_url(plan_id)))
    }

    pub async fn create_plan(&self, submission: SubmitPlanModel) -> UseCaseResult<PlanView> {
        info!(plan_name = %submission.name, "plans: create plan requested");

        self.check_submission(&submission)?;
        let schedule = self.build_schedule(&submission.plan_meals).await?;

        let now = Utc::now();
        let insert_plan_entity = InsertPlanEntity {
            name: submission.name,
            description: submission.description,
            plan_duration: submission.plan_duration,
            plan_cost: submission.plan_cost,
            image: submission.image,
            created_at: now,
            updated_at: now,
        };

        let plan_id = self
            .plan_repository
            .create_plan_with_schedule(insert_plan_entity, schedule)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "plans: failed to persist plan tree");
                PlanError::Internal(err)
            })?;

        info!(plan_id, "plans: plan created");
        self.get_plan(plan_id).await
    }

    pub async fn update_plan(
        &self,
        plan_id: i64,
        submission: SubmitPlanModel,
    ) -> UseCaseResult<PlanView> {
        info!(plan_id, "plans: update plan requested");

        self.plan_repository
            .find_by_id(plan_id)
            .await
            .map_err(|err| {
                error!(plan_id, db_error = ?err, "plans: failed to load plan for update");
                PlanError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = PlanError::PlanNotFound;
                warn!(
                    plan_id,
                    status = err.status_code().as_u16(),
                    "plans: plan to update not found"
                );
                err
            })?;

        self.check_submission(&submission)?;
        let schedule = self.build_schedule(&submission.plan_meals).await?;

        let existing = self
            .plan_repository
            .load_schedule(plan_id)
            .await
            .map_err(|err| {
                error!(plan_id, db_error = ?err, "plans: failed to load existing schedule");
                PlanError::Internal(err)
            })?;
        check_shape(plan_id, &existing, &schedule)?;

        let update_plan_entity = UpdatePlanEntity {
            name: Some(submission.name),
            description: Some(submission.description),
            plan_duration: Some(submission.plan_duration),
            plan_cost: Some(submission.plan_cost),
            image: submission.image,
            updated_at: Some(Utc::now()),
        };

        self.plan_repository
            .update_plan_with_schedule(plan_id, update_plan_entity, schedule)
            .await
            .map_err(|err| {
                error!(plan_id, db_error = ?err, "plans: failed to persist plan update");
                PlanError::Internal(err)
            })?;

        info!(plan_id, "plans: plan updated");
        self.get_plan(plan_id).await
    }

    pub async fn delete_plan(&self, plan_id: i64) -> UseCaseResult<()> {
        let deleted = self.plan_repository.delete(plan_id).await.map_err(|err| {
            error!(plan_id, db_error = ?err, "plans: failed to delete plan");
            PlanError::Internal(err)
        })?;

        if deleted == 0 {
            let err = PlanError::PlanNotFound;
            warn!(
                plan_id,
                status = err.status_code().as_u16(),
                "plans: plan to delete not found"
            );
            return Err(err);
        }

        info!(plan_id, "plans: plan deleted");
        Ok(())
    }

    fn view_url(&self, plan_id: i64) -> String {
        format!(
            "{}/api/v1/plans/{}",
            self.public_base_url.trim_end_matches('/'),
            plan_id
        )
    }

    fn check_submission(&self, submission: &SubmitPlanModel) -> UseCaseResult<()> {
        let errors = validate_plan_submission(
            submission.plan_cost,
            submission.plan_duration,
            &submission.plan_meals,
        );
        if !errors.is_empty() {
            warn!(
                error_fields = ?errors.keys().collect::<Vec<_>>(),
                status = axum::http::StatusCode::NOT_ACCEPTABLE.as_u16(),
                "plans: submission rejected by validator"
            );
            return Err(PlanError::Validation(errors));
        }
        Ok(())
    }

    /// Resolves every submitted day map into persistable meal slots. Unknown
    /// category keys and unknown recipe ids abort the whole plan.
    async fn build_schedule(
        &self,
        meals_by_day: &[DayMealsModel],
    ) -> UseCaseResult<Vec<Vec<MealSlot>>> {
        let recipe_ids: HashSet<i64> = self
            .recipe_repository
            .list_ids()
            .await
            .map_err(|err| {
                error!(db_error = ?err, "plans: failed to load recipe catalog");
                PlanError::Internal(err)
            })?
            .into_iter()
            .collect();

        let mut schedule = Vec::with_capacity(meals_by_day.len());
        for (day_index, day) in meals_by_day.iter().enumerate() {
            let mut slots = Vec::with_capacity(day.len());
            for (category_name, recipe_id) in day {
                let category = MealCategory::from_str(category_name).ok_or_else(|| {
                    let err = PlanError::Construction {
                        field: "meal",
                        message: UNKNOWN_MEAL_CATEGORY,
                    };
                    warn!(
                        day = day_index + 1,
                        category = %category_name,
                        status = err.status_code().as_u16(),
                        "plans: unknown meal category in submission"
                    );
                    err
                })?;

                if !recipe_ids.contains(recipe_id) {
                    let err = PlanError::Construction {
                        field: "recipe",
                        message: RECIPE_NOT_FOUND,
                    };
                    warn!(
                        day = day_index + 1,
                        recipe_id,
                        status = err.status_code().as_u16(),
                        "plans: unknown recipe in submission"
                    );
                    return Err(err);
                }

                slots.push(MealSlot {
                    category,
                    recipe_id: *recipe_id,
                });
            }
            slots.sort_by_key(|slot| slot.category.id());
            schedule.push(slots);
        }

        Ok(schedule)
    }
}

/// Update is recipe substitution only: the submitted schedule must cover the
/// same days and the same category set per day as the stored tree.
fn check_shape(
    plan_id: i64,
    existing: &[DayScheduleModel],
    submitted: &[Vec<MealSlot>],
) -> UseCaseResult<()> {
    let mismatch = existing.len() != submitted.len()
        || existing.iter().zip(submitted.iter()).any(|(day, slots)| {
            let stored: HashSet<i32> = day.meals.iter().map(|meal| meal.category.id()).collect();
            let incoming: HashSet<i32> = slots.iter().map(|slot| slot.category.id()).collect();
            stored != incoming
        });

    if mismatch {
        warn!(
            plan_id,
            status = axum::http::StatusCode::NOT_ACCEPTABLE.as_u16(),
            "plans: update schedule shape does not match stored plan"
        );
        let mut errors = FieldErrors::new();
        errors.insert("plan_meals".to_string(), SHAPE_MISMATCH.to_string());
        return Err(PlanError::Validation(errors));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crates::domain::{
        entities::plans::PlanEntity,
        repositories::{plans::MockPlanRepository, recipes::MockRecipeRepository},
        value_objects::plan_schedule::ScheduledMealModel,
    };
    use mockall::predicate::eq;

    const BASE_URL: &str = "http://localhost:8080";

    fn sample_plan(id: i64, duration: i32) -> PlanEntity {
        let now = Utc::now();
        PlanEntity {
            id,
            name: "Keto Week".to_string(),
            description: "Seven days of keto meals".to_string(),
            plan_duration: duration,
            plan_cost: 1500,
            image: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn full_day(recipe_id: i64) -> DayMealsModel {
        MealCategory::ALL
            .iter()
            .map(|category| (category.to_string(), recipe_id))
            .collect()
    }

    fn submission(duration: i32, cost: i32, plan_meals: Vec<DayMealsModel>) -> SubmitPlanModel {
        SubmitPlanModel {
            name: "Keto Week".to_string(),
            description: "Seven days of keto meals".to_string(),
            plan_duration: duration,
            plan_cost: cost,
            image: None,
            plan_meals,
        }
    }

    fn stored_schedule(days: i32, recipe_id: i64) -> Vec<DayScheduleModel> {
        (1..=days)
            .map(|for_day| DayScheduleModel {
                for_day,
                meals: MealCategory::ALL
                    .iter()
                    .map(|category| ScheduledMealModel {
                        category: *category,
                        recipe_id,
                        recipe_name: "Grilled Salmon".to_string(),
                    })
                    .collect(),
            })
            .collect()
    }

    fn usecase(
        plan_repository: MockPlanRepository,
        recipe_repository: MockRecipeRepository,
    ) -> PlanScheduleUseCase<MockPlanRepository, MockRecipeRepository> {
        PlanScheduleUseCase::new(
            Arc::new(plan_repository),
            Arc::new(recipe_repository),
            BASE_URL.to_string(),
        )
    }

    #[tokio::test]
    async fn create_persists_the_full_schedule_and_presents_it() {
        let mut plan_repository = MockPlanRepository::new();
        let mut recipe_repository = MockRecipeRepository::new();

        recipe_repository
            .expect_list_ids()
            .returning(|| Box::pin(async { Ok(vec![7]) }));

        plan_repository
            .expect_create_plan_with_schedule()
            .withf(|_, schedule| {
                schedule.len() == 7
                    && schedule.iter().all(|slots| {
                        slots.len() == 5
                            && slots
                                .iter()
                                .enumerate()
                                .all(|(index, slot)| slot.category.id() == index as i32 + 1)
                    })
            })
            .returning(|_, _| Box::pin(async { Ok(9) }));

        plan_repository
            .expect_find_by_id()
            .with(eq(9))
            .returning(|_| Box::pin(async { Ok(Some(sample_plan(9, 7))) }));

        plan_repository
            .expect_load_schedule()
            .with(eq(9))
            .returning(|_| {
                let schedule = stored_schedule(7, 7);
                Box::pin(async move { Ok(schedule) })
            });

        let view = usecase(plan_repository, recipe_repository)
            .create_plan(submission(7, 1500, vec![full_day(7); 7]))
            .await
            .expect("create should succeed");

        assert_eq!(view.id, 9);
        assert_eq!(view.plan_meal.len(), 7);
        assert_eq!(
            view.plan_meal[0].morning_snacks.as_deref(),
            Some("Grilled Salmon")
        );
        assert_eq!(view.view_url, format!("{BASE_URL}/api/v1/plans/9"));
    }

    #[tokio::test]
    async fn create_rejects_unknown_recipe_without_persisting() {
        let plan_repository = MockPlanRepository::new();
        let mut recipe_repository = MockRecipeRepository::new();

        recipe_repository
            .expect_list_ids()
            .returning(|| Box::pin(async { Ok(vec![7]) }));

        let result = usecase(plan_repository, recipe_repository)
            .create_plan(submission(7, 1500, vec![full_day(42); 7]))
            .await;

        match result {
            Err(PlanError::Construction { field, .. }) => assert_eq!(field, "recipe"),
            other => panic!("expected recipe construction error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_rejects_unknown_meal_category_without_persisting() {
        let plan_repository = MockPlanRepository::new();
        let mut recipe_repository = MockRecipeRepository::new();

        recipe_repository
            .expect_list_ids()
            .returning(|| Box::pin(async { Ok(vec![7]) }));

        let mut plan_meals = vec![full_day(7); 6];
        plan_meals.push(DayMealsModel::from([("brunch".to_string(), 7)]));

        let result = usecase(plan_repository, recipe_repository)
            .create_plan(submission(7, 1500, plan_meals))
            .await;

        match result {
            Err(PlanError::Construction { field, .. }) => assert_eq!(field, "meal"),
            other => panic!("expected meal construction error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_collects_every_validation_error() {
        let plan_repository = MockPlanRepository::new();
        let recipe_repository = MockRecipeRepository::new();

        let result = usecase(plan_repository, recipe_repository)
            .create_plan(submission(10, 500, vec![full_day(7); 3]))
            .await;

        match result {
            Err(PlanError::Validation(errors)) => {
                assert_eq!(errors.len(), 3);
                assert!(errors.contains_key("plan_cost"));
                assert!(errors.contains_key("plan_duration"));
                assert!(errors.contains_key("plan_meals"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_passes_the_substituted_recipe_through() {
        let mut plan_repository = MockPlanRepository::new();
        let mut recipe_repository = MockRecipeRepository::new();

        recipe_repository
            .expect_list_ids()
            .returning(|| Box::pin(async { Ok(vec![7, 99]) }));

        plan_repository
            .expect_find_by_id()
            .with(eq(3))
            .returning(|_| Box::pin(async { Ok(Some(sample_plan(3, 7))) }));

        plan_repository.expect_load_schedule().with(eq(3)).returning(|_| {
            let schedule = stored_schedule(7, 7);
            Box::pin(async move { Ok(schedule) })
        });

        plan_repository
            .expect_update_plan_with_schedule()
            .withf(|plan_id, _, schedule| {
                let substituted = schedule[0]
                    .iter()
                    .any(|slot| slot.category == MealCategory::Lunch && slot.recipe_id == 99);
                let untouched = schedule
                    .iter()
                    .flatten()
                    .filter(|slot| slot.recipe_id == 7)
                    .count();
                *plan_id == 3 && substituted && untouched == 34
            })
            .returning(|_, _, _| Box::pin(async { Ok(()) }));

        let mut plan_meals = vec![full_day(7); 7];
        plan_meals[0].insert(MealCategory::Lunch.to_string(), 99);

        usecase(plan_repository, recipe_repository)
            .update_plan(3, submission(7, 1500, plan_meals))
            .await
            .expect("update should succeed");
    }

    #[tokio::test]
    async fn update_rejects_a_shape_mismatched_schedule() {
        let mut plan_repository = MockPlanRepository::new();
        let mut recipe_repository = MockRecipeRepository::new();

        recipe_repository
            .expect_list_ids()
            .returning(|| Box::pin(async { Ok(vec![7]) }));

        plan_repository
            .expect_find_by_id()
            .with(eq(3))
            .returning(|_| Box::pin(async { Ok(Some(sample_plan(3, 7))) }));

        plan_repository.expect_load_schedule().with(eq(3)).returning(|_| {
            let schedule = stored_schedule(7, 7);
            Box::pin(async move { Ok(schedule) })
        });

        // Day 1 drops the lunch slot; stored days always carry all five.
        let mut plan_meals = vec![full_day(7); 7];
        plan_meals[0].remove(&MealCategory::Lunch.to_string());

        let result = usecase(plan_repository, recipe_repository)
            .update_plan(3, submission(7, 1500, plan_meals))
            .await;

        match result {
            Err(PlanError::Validation(errors)) => {
                assert!(errors.contains_key("plan_meals"));
            }
            other => panic!("expected shape mismatch rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_plan_maps_missing_plan_to_not_found() {
        let mut plan_repository = MockPlanRepository::new();
        let recipe_repository = MockRecipeRepository::new();

        plan_repository
            .expect_find_by_id()
            .with(eq(404))
            .returning(|_| Box::pin(async { Ok(None) }));

        let result = usecase(plan_repository, recipe_repository).get_plan(404).await;
        assert!(matches!(result, Err(PlanError::PlanNotFound)));
    }

    #[tokio::test]
    async fn delete_maps_zero_affected_rows_to_not_found() {
        let mut plan_repository = MockPlanRepository::new();
        let recipe_repository = MockRecipeRepository::new();

        plan_repository
            .expect_delete()
            .with(eq(404))
            .returning(|_| Box::pin(async { Ok(0) }));

        let result = usecase(plan_repository, recipe_repository).delete_plan(404).await;
        assert!(matches!(result, Err(PlanError::PlanNotFound)));
    }
}

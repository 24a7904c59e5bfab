use anyhow::{Result, anyhow};
use async_trait::async_trait;
use diesel::{Connection, OptionalExtension, RunQueryDsl, insert_into, prelude::*};
use std::sync::Arc;

use crate::domain;
use crate::infra::db::postgres::{
    postgres_connection::PgPoolSquad,
    schema::{days, meals, plans, recipes},
};
use domain::{
    entities::{
        days::{DayEntity, InsertDayEntity},
        meals::InsertMealEntity,
        plans::{InsertPlanEntity, PlanEntity, UpdatePlanEntity},
    },
    repositories::plans::PlanRepository,
    value_objects::{
        enums::meal_categories::MealCategory,
        plan_schedule::{DayScheduleModel, MealSlot, ScheduledMealModel},
    },
};

pub struct PlanPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PlanPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PlanRepository for PlanPostgres {
    async fn create_plan_with_schedule(
        &self,
        plan: InsertPlanEntity,
        schedule: Vec<Vec<MealSlot>>,
    ) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let plan_id = conn.transaction::<i64, diesel::result::Error, _>(|tx| {
            let plan_id = insert_into(plans::table)
                .values(&plan)
                .returning(plans::id)
                .get_result::<i64>(tx)?;

            for (index, slots) in schedule.iter().enumerate() {
                let day = InsertDayEntity {
                    plan_id,
                    for_day: index as i32 + 1,
                };
                let day_id = insert_into(days::table)
                    .values(&day)
                    .returning(days::id)
                    .get_result::<i64>(tx)?;

                let meal_rows: Vec<InsertMealEntity> = slots
                    .iter()
                    .map(|slot| InsertMealEntity {
                        day_id,
                        meal_category_id: slot.category.id(),
                        recipe_id: slot.recipe_id,
                    })
                    .collect();

                insert_into(meals::table).values(&meal_rows).execute(tx)?;
            }

            Ok(plan_id)
        })?;

        Ok(plan_id)
    }

    async fn update_plan_with_schedule(
        &self,
        plan_id: i64,
        plan: UpdatePlanEntity,
        schedule: Vec<Vec<MealSlot>>,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        conn.transaction::<(), diesel::result::Error, _>(|tx| {
            diesel::update(plans::table.find(plan_id))
                .set(&plan)
                .execute(tx)?;

            let day_rows = days::table
                .filter(days::plan_id.eq(plan_id))
                .order(days::for_day.asc())
                .load::<DayEntity>(tx)?;

            for (day, slots) in day_rows.iter().zip(schedule.iter()) {
                for slot in slots {
                    diesel::update(
                        meals::table
                            .filter(meals::day_id.eq(day.id))
                            .filter(meals::meal_category_id.eq(slot.category.id())),
                    )
                    .set(meals::recipe_id.eq(slot.recipe_id))
                    .execute(tx)?;
                }
            }

            Ok(())
        })?;

        Ok(())
    }

    async fn find_by_id(&self, plan_id: i64) -> Result<Option<PlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let plan = plans::table
            .find(plan_id)
            .select(PlanEntity::as_select())
            .first::<PlanEntity>(&mut conn)
            .optional()?;

        Ok(plan)
    }

    async fn list(&self) -> Result<Vec<PlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = plans::table
            .order(plans::id.asc())
            .select(PlanEntity::as_select())
            .load::<PlanEntity>(&mut conn)?;

        Ok(rows)
    }

    async fn load_schedule(&self, plan_id: i64) -> Result<Vec<DayScheduleModel>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let day_rows = days::table
            .filter(days::plan_id.eq(plan_id))
            .order(days::for_day.asc())
            .load::<DayEntity>(&mut conn)?;
        let day_ids: Vec<i64> = day_rows.iter().map(|day| day.id).collect();

        let meal_rows = meals::table
            .inner_join(recipes::table.on(recipes::id.eq(meals::recipe_id)))
            .filter(meals::day_id.eq_any(&day_ids))
            .order((meals::day_id.asc(), meals::meal_category_id.asc()))
            .select((meals::day_id, meals::meal_category_id, meals::recipe_id, recipes::name))
            .load::<(i64, i32, i64, String)>(&mut conn)?;

        let mut schedule: Vec<DayScheduleModel> = day_rows
            .iter()
            .map(|day| DayScheduleModel {
                for_day: day.for_day,
                meals: Vec::new(),
            })
            .collect();

        for (day_id, meal_category_id, recipe_id, recipe_name) in meal_rows {
            let position = day_rows
                .iter()
                .position(|day| day.id == day_id)
                .ok_or_else(|| anyhow!("meal row references unknown day {day_id}"))?;
            let category = MealCategory::from_id(meal_category_id)
                .ok_or_else(|| anyhow!("unknown meal category id {meal_category_id}"))?;

            schedule[position].meals.push(ScheduledMealModel {
                category,
                recipe_id,
                recipe_name,
            });
        }

        Ok(schedule)
    }

    async fn delete(&self, plan_id: i64) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = conn.transaction::<usize, diesel::result::Error, _>(|tx| {
            let day_ids = days::table
                .filter(days::plan_id.eq(plan_id))
                .select(days::id)
                .load::<i64>(tx)?;

            diesel::delete(meals::table.filter(meals::day_id.eq_any(&day_ids))).execute(tx)?;
            diesel::delete(days::table.filter(days::plan_id.eq(plan_id))).execute(tx)?;
            diesel::delete(plans::table.find(plan_id)).execute(tx)
        })?;

        Ok(deleted)
    }
}

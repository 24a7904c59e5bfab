use anyhow::Result;
use async_trait::async_trait;
use diesel::{Connection, RunQueryDsl, insert_into, prelude::*};
use std::sync::Arc;

use crate::domain;
use crate::infra::db::postgres::{
    postgres_connection::PgPoolSquad,
    schema::{active_plans, app_users},
};
use domain::{
    entities::{active_plans::InsertActivePlanEntity, users::ActivateUserEntity},
    repositories::plan_activation::PlanActivationRepository,
};

pub struct PlanActivationPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PlanActivationPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PlanActivationRepository for PlanActivationPostgres {
    async fn activate(
        &self,
        active_plan: InsertActivePlanEntity,
        user_update: ActivateUserEntity,
    ) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let user_id = active_plan.user_id;

        let active_plan_id = conn.transaction::<i64, diesel::result::Error, _>(|tx| {
            let active_plan_id = insert_into(active_plans::table)
                .values(&active_plan)
                .returning(active_plans::id)
                .get_result::<i64>(tx)?;

            let updated = diesel::update(app_users::table.find(user_id))
                .set(&user_update)
                .execute(tx)?;
            if updated == 0 {
                return Err(diesel::result::Error::NotFound);
            }

            Ok(active_plan_id)
        })?;

        Ok(active_plan_id)
    }
}

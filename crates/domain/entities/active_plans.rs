use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::active_plans;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = active_plans)]
pub struct ActivePlanEntity {
    pub id: i64,
    pub user_id: Uuid,
    pub plan_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = active_plans)]
pub struct InsertActivePlanEntity {
    pub user_id: Uuid,
    pub plan_id: i64,
    pub created_at: DateTime<Utc>,
}

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::app_users;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = app_users)]
pub struct UserEntity {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub active_plan: bool,
    pub purchased_duration_days: Option<i32>,
    pub plan_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Changeset applied when a plan purchase completes.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = app_users)]
pub struct ActivateUserEntity {
    pub active_plan: bool,
    pub purchased_duration_days: Option<i32>,
    pub plan_expires_at: Option<DateTime<Utc>>,
}

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::infra::db::postgres::schema::recipes;

/// Read-only catalog row; recipe management lives outside this service.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = recipes)]
pub struct RecipeEntity {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*};
use std::sync::Arc;

use crate::domain::repositories::recipes::RecipeRepository;
use crate::infra::db::postgres::{postgres_connection::PgPoolSquad, schema::recipes};

pub struct RecipePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl RecipePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl RecipeRepository for RecipePostgres {
    async fn list_ids(&self) -> Result<Vec<i64>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let ids = recipes::table.select(recipes::id).load::<i64>(&mut conn)?;

        Ok(ids)
    }
}

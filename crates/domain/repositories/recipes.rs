use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

/// Existence lookups against the externally-owned recipe catalog.
#[async_trait]
#[automock]
pub trait RecipeRepository {
    async fn list_ids(&self) -> Result<Vec<i64>>;
}

use diesel::prelude::*;

use crate::infra::db::postgres::schema::meals;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = meals)]
pub struct MealEntity {
    pub id: i64,
    pub day_id: i64,
    pub meal_category_id: i32,
    pub recipe_id: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = meals)]
pub struct InsertMealEntity {
    pub day_id: i64,
    pub meal_category_id: i32,
    pub recipe_id: i64,
}

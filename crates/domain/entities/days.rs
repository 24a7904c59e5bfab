use diesel::prelude::*;

use crate::infra::db::postgres::schema::days;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = days)]
pub struct DayEntity {
    pub id: i64,
    pub plan_id: i64,
    pub for_day: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = days)]
pub struct InsertDayEntity {
    pub plan_id: i64,
    pub for_day: i32,
}

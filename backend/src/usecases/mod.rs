pub mod plan_purchase;
pub mod plan_schedule;
pub mod sessions;

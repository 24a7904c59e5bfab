pub mod enums;
pub mod plan_schedule;
pub mod plans;

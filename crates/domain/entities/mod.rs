pub mod active_plans;
pub mod days;
pub mod meals;
pub mod plans;
pub mod recipes;
pub mod users;

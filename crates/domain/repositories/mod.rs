pub mod plan_activation;
pub mod plans;
pub mod recipes;
pub mod users;

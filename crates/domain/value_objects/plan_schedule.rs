use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::enums::meal_categories::MealCategory;

pub const MIN_PLAN_COST: i32 = 1000;
pub const ALLOWED_PLAN_DURATIONS: [i32; 3] = [7, 14, 21];

/// One submitted day: explicit category key -> recipe id.
pub type DayMealsModel = HashMap<String, i64>;

/// Field-tagged validation errors, collected rather than fail-fast.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmitPlanModel {
    pub name: String,
    pub description: String,
    pub plan_duration: i32,
    pub plan_cost: i32,
    #[serde(default)]
    pub image: Option<String>,
    pub plan_meals: Vec<DayMealsModel>,
}

/// One meal slot ready to be persisted, category resolved from its submitted key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MealSlot {
    pub category: MealCategory,
    pub recipe_id: i64,
}

/// One stored day read back with its recipe names resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayScheduleModel {
    pub for_day: i32,
    pub meals: Vec<ScheduledMealModel>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledMealModel {
    pub category: MealCategory,
    pub recipe_id: i64,
    pub recipe_name: String,
}

/// Checks the submitted shape of a plan. Every rule is evaluated independently
/// so the caller gets all violations at once; an empty map means valid.
/// Category keys and recipe existence are checked later, during construction.
pub fn validate_plan_submission(
    cost: i32,
    duration: i32,
    meals_by_day: &[DayMealsModel],
) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if cost < MIN_PLAN_COST {
        errors.insert(
            "plan_cost".to_string(),
            "cost of the plan must be larger than 1000".to_string(),
        );
    }

    if !ALLOWED_PLAN_DURATIONS.contains(&duration) {
        errors.insert(
            "plan_duration".to_string(),
            "duration must be 7, 14 or 21".to_string(),
        );
    }

    if meals_by_day.len() != duration.max(0) as usize {
        errors.insert(
            "plan_meals".to_string(),
            "please enter all day's schedules".to_string(),
        );
    }

    errors
}

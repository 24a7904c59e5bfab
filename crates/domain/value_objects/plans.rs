use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::plans::PlanEntity;
use crate::domain::value_objects::enums::meal_categories::MealCategory;
use crate::domain::value_objects::plan_schedule::DayScheduleModel;

/// One presented day: category display name -> recipe display name, slots in
/// fixed category order. Unfilled slots are omitted from the JSON body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DayMealsView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub morning_snacks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lunch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub afternoon_snacks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dinner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hydration: Option<String>,
}

impl DayMealsView {
    pub fn set(&mut self, category: MealCategory, recipe_name: String) {
        match category {
            MealCategory::MorningSnacks => self.morning_snacks = Some(recipe_name),
            MealCategory::Lunch => self.lunch = Some(recipe_name),
            MealCategory::AfternoonSnacks => self.afternoon_snacks = Some(recipe_name),
            MealCategory::Dinner => self.dinner = Some(recipe_name),
            MealCategory::Hydration => self.hydration = Some(recipe_name),
        }
    }
}

impl From<&DayScheduleModel> for DayMealsView {
    fn from(day: &DayScheduleModel) -> Self {
        let mut view = DayMealsView::default();
        for meal in &day.meals {
            view.set(meal.category, meal.recipe_name.clone());
        }
        view
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub plan_duration: i32,
    pub plan_cost: i32,
    pub view_url: String,
    pub plan_meal: Vec<DayMealsView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlanView {
    pub fn from_parts(plan: PlanEntity, schedule: &[DayScheduleModel], view_url: String) -> Self {
        Self {
            id: plan.id,
            name: plan.name,
            description: plan.description,
            plan_duration: plan.plan_duration,
            plan_cost: plan.plan_cost,
            view_url,
            plan_meal: schedule.iter().map(DayMealsView::from).collect(),
            created_at: plan.created_at,
            updated_at: plan.updated_at,
        }
    }
}

/// List projection: the plan's scalar fields without the nested schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanSummaryView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub plan_duration: i32,
    pub plan_cost: i32,
    pub view_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlanSummaryView {
    pub fn from_entity(plan: PlanEntity, view_url: String) -> Self {
        Self {
            id: plan.id,
            name: plan.name,
            description: plan.description,
            plan_duration: plan.plan_duration,
            plan_cost: plan.plan_cost,
            view_url,
            created_at: plan.created_at,
            updated_at: plan.updated_at,
        }
    }
}

/// Purchase confirmation returned to the buyer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    pub plan_name: String,
    pub plan_description: String,
    pub plan_cost: i32,
    pub plan_duration: i32,
    pub expiry_date: String,
}

impl Bill {
    pub fn new(plan: &PlanEntity, expires_at: DateTime<Utc>) -> Self {
        Self {
            plan_name: plan.name.clone(),
            plan_description: plan.description.clone(),
            plan_cost: plan.plan_cost,
            plan_duration: plan.plan_duration,
            expiry_date: format_bill_date(expires_at),
        }
    }
}

/// `D/M/YYYY`, no zero padding.
pub fn format_bill_date(date: DateTime<Utc>) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

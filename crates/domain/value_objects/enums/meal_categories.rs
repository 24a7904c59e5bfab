use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The five fixed meal slots of a plan day. Stored as `meals.meal_category_id`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealCategory {
    MorningSnacks,
    Lunch,
    AfternoonSnacks,
    Dinner,
    Hydration,
}

impl MealCategory {
    pub const ALL: [MealCategory; 5] = [
        MealCategory::MorningSnacks,
        MealCategory::Lunch,
        MealCategory::AfternoonSnacks,
        MealCategory::Dinner,
        MealCategory::Hydration,
    ];

    pub fn id(&self) -> i32 {
        match self {
            MealCategory::MorningSnacks => 1,
            MealCategory::Lunch => 2,
            MealCategory::AfternoonSnacks => 3,
            MealCategory::Dinner => 4,
            MealCategory::Hydration => 5,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(MealCategory::MorningSnacks),
            2 => Some(MealCategory::Lunch),
            3 => Some(MealCategory::AfternoonSnacks),
            4 => Some(MealCategory::Dinner),
            5 => Some(MealCategory::Hydration),
            _ => None,
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "morning_snacks" => Some(MealCategory::MorningSnacks),
            "lunch" => Some(MealCategory::Lunch),
            "afternoon_snacks" => Some(MealCategory::AfternoonSnacks),
            "dinner" => Some(MealCategory::Dinner),
            "hydration" => Some(MealCategory::Hydration),
            _ => None,
        }
    }
}

impl Display for MealCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let category = match self {
            MealCategory::MorningSnacks => "morning_snacks",
            MealCategory::Lunch => "lunch",
            MealCategory::AfternoonSnacks => "afternoon_snacks",
            MealCategory::Dinner => "dinner",
            MealCategory::Hydration => "hydration",
        };
        write!(f, "{}", category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_stable_and_round_trip() {
        for (index, category) in MealCategory::ALL.iter().enumerate() {
            assert_eq!(category.id(), index as i32 + 1);
            assert_eq!(MealCategory::from_id(category.id()), Some(*category));
            assert_eq!(MealCategory::from_str(&category.to_string()), Some(*category));
        }
    }

    #[test]
    fn unknown_names_and_ids_are_rejected() {
        assert_eq!(MealCategory::from_str("brunch"), None);
        assert_eq!(MealCategory::from_id(0), None);
        assert_eq!(MealCategory::from_id(6), None);
    }
}

pub mod meal_categories;

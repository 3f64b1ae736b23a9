//! Advice prompt construction.
//!
//! One parameterized builder covers all four advice features. Each kind
//! pairs an inventory serializer (which record fields matter for the
//! question) with a prompt template; recipes draw only on foods that are
//! close to expiring, the rest use the whole inventory.

use chrono::{DateTime, Utc};

use larder_freshness::is_expiring_within;
use larder_models::FoodItem;

/// Window for the "expiring this week" selection recipes draw on.
pub const RECIPE_WINDOW_DAYS: i64 = 7;

/// Kinds of advice the assistant can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdviceKind {
    Recipes,
    Nutrition,
    Storage,
    MealPlan,
}

impl AdviceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recipes => "recipes",
            Self::Nutrition => "nutrition",
            Self::Storage => "storage",
            Self::MealPlan => "meal_plan",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "recipes" => Some(Self::Recipes),
            "nutrition" => Some(Self::Nutrition),
            "storage" => Some(Self::Storage),
            "meal_plan" => Some(Self::MealPlan),
            _ => None,
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Recipes, Self::Nutrition, Self::Storage, Self::MealPlan]
    }

    /// Message shown when the relevant inventory is empty; no relay call is
    /// made in that case.
    pub fn empty_message(&self) -> &'static str {
        match self {
            Self::Recipes => {
                "No expiring foods found! Add some food items to get personalized recipe suggestions."
            }
            Self::Nutrition => "Add some food items to get detailed nutritional information!",
            Self::Storage => "Add some food items to get personalized storage tips!",
            Self::MealPlan => "Add some food items to get a personalized meal plan!",
        }
    }

    /// Message shown when the relay fails.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::Recipes => "Sorry, I couldn't generate recipes right now. Please try again later!",
            Self::Nutrition => {
                "Sorry, I couldn't get nutritional information right now. Please try again later!"
            }
            Self::Storage => {
                "Sorry, I couldn't generate storage tips right now. Please try again later!"
            }
            Self::MealPlan => {
                "Sorry, I couldn't generate a meal plan right now. Please try again later!"
            }
        }
    }
}

impl std::fmt::Display for AdviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Serialize one record the way this advice kind needs it.
fn inventory_line(kind: AdviceKind, food: &FoodItem) -> String {
    match kind {
        AdviceKind::Recipes | AdviceKind::Nutrition => {
            format!("{} ({} {})", food.name, food.quantity, food.unit)
        }
        AdviceKind::Storage => format!(
            "{} (stored in {})",
            food.name,
            food.location.as_deref().unwrap_or("unknown location")
        ),
        AdviceKind::MealPlan => format!(
            "{} (expires: {}, quantity: {} {})",
            food.name, food.expiry_date, food.quantity, food.unit
        ),
    }
}

/// Build the complete, self-contained prompt for an advice kind.
///
/// Returns `None` when the relevant inventory selection is empty.
pub fn prompt_for(kind: AdviceKind, foods: &[FoodItem], now: DateTime<Utc>) -> Option<String> {
    let selected: Vec<&FoodItem> = match kind {
        AdviceKind::Recipes => foods
            .iter()
            .filter(|f| is_expiring_within(f.expiry_date, now, RECIPE_WINDOW_DAYS))
            .collect(),
        _ => foods.iter().collect(),
    };

    if selected.is_empty() {
        return None;
    }

    let food_list = selected
        .iter()
        .map(|f| inventory_line(kind, f))
        .collect::<Vec<_>>()
        .join(", ");

    let prompt = match kind {
        AdviceKind::Recipes => format!(
            "Create 3 delicious and practical recipes using these ingredients that are expiring soon: {food_list}. \
             Make the recipes easy to follow with clear ingredients lists and step-by-step cooking instructions. \
             Include cooking time and serving size for each recipe. Format with clear headings and bullet points."
        ),
        AdviceKind::Nutrition => format!(
            "Provide detailed nutritional analysis and health benefits for these foods: {food_list}. \
             Include information about vitamins, minerals, calories per serving, protein content, and specific health benefits. \
             Also provide tips for maximizing nutritional value and any dietary considerations. \
             Make it informative but easy to understand with clear sections."
        ),
        AdviceKind::Storage => format!(
            "Provide comprehensive storage tips and best practices for these foods: {food_list}. \
             Include optimal storage conditions (temperature, humidity), how to extend shelf life, \
             signs of spoilage to watch for, and specific tips for each storage location (fridge, freezer, pantry). \
             Also include food safety guidelines and tips to prevent waste."
        ),
        AdviceKind::MealPlan => format!(
            "Create a detailed 3-day meal plan using these available foods: {food_list}. \
             Prioritize foods that expire sooner to minimize waste. Include breakfast, lunch, and dinner suggestions \
             with simple preparation methods. Also suggest healthy snacks and provide portion guidance. \
             Format as Day 1, Day 2, Day 3 with clear meal categories."
        ),
    };

    Some(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone};
    use larder_models::FoodCreate;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 4, 0, 0, 0).unwrap()
    }

    fn food(name: &str, expiry: NaiveDate, location: Option<&str>) -> FoodItem {
        FoodItem::new(
            "user-1",
            FoodCreate {
                name: name.to_string(),
                category: "other".to_string(),
                quantity: "2".to_string(),
                unit: "pcs".to_string(),
                expiry_date: expiry,
                location: location.map(String::from),
                notes: None,
            },
        )
    }

    #[test]
    fn test_kind_string_round_trip() {
        for kind in AdviceKind::all() {
            assert_eq!(AdviceKind::from_str(kind.as_str()), Some(*kind));
        }
        assert_eq!(AdviceKind::from_str("horoscope"), None);
    }

    #[test]
    fn test_recipes_draw_only_on_expiring_foods() {
        let now = now();
        let today = now.date_naive();
        let foods = vec![
            food("Spinach", today + Duration::days(2), None),
            food("Canned beans", today + Duration::days(200), None),
        ];

        let prompt = prompt_for(AdviceKind::Recipes, &foods, now).unwrap();
        assert!(prompt.contains("Spinach (2 pcs)"));
        assert!(!prompt.contains("Canned beans"));

        // Nothing expiring: no prompt at all.
        let durable = vec![food("Canned beans", today + Duration::days(200), None)];
        assert!(prompt_for(AdviceKind::Recipes, &durable, now).is_none());
    }

    #[test]
    fn test_other_kinds_use_whole_inventory() {
        let now = now();
        let today = now.date_naive();
        let foods = vec![
            food("Spinach", today + Duration::days(2), Some("fridge")),
            food("Canned beans", today + Duration::days(200), None),
        ];

        for kind in [AdviceKind::Nutrition, AdviceKind::Storage, AdviceKind::MealPlan] {
            let prompt = prompt_for(kind, &foods, now).unwrap();
            assert!(prompt.contains("Spinach"));
            assert!(prompt.contains("Canned beans"));
        }
    }

    #[test]
    fn test_inventory_lines_per_kind() {
        let now = now();
        let expiry = now.date_naive() + Duration::days(2);
        let item = food("Milk", expiry, Some("fridge"));

        assert_eq!(inventory_line(AdviceKind::Nutrition, &item), "Milk (2 pcs)");
        assert_eq!(
            inventory_line(AdviceKind::Storage, &item),
            "Milk (stored in fridge)"
        );
        assert_eq!(
            inventory_line(AdviceKind::MealPlan, &item),
            format!("Milk (expires: {}, quantity: 2 pcs)", expiry)
        );

        let nowhere = food("Milk", expiry, None);
        assert_eq!(
            inventory_line(AdviceKind::Storage, &nowhere),
            "Milk (stored in unknown location)"
        );
    }

    #[test]
    fn test_empty_inventory_yields_no_prompt() {
        for kind in AdviceKind::all() {
            assert!(prompt_for(*kind, &[], now()).is_none());
        }
    }
}

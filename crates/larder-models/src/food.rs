//! Food record model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use larder_freshness::FreshnessStatus;

use crate::{new_id, now};

/// Canonical food categories.
///
/// The `category` field on a record is free text; these are the tags the
/// interface offers, and classification never depends on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
    Fruits,
    Vegetables,
    Dairy,
    Meat,
    Grains,
    Snacks,
    Beverages,
    Other,
}

impl FoodCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fruits => "fruits",
            Self::Vegetables => "vegetables",
            Self::Dairy => "dairy",
            Self::Meat => "meat",
            Self::Grains => "grains",
            Self::Snacks => "snacks",
            Self::Beverages => "beverages",
            Self::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fruits" => Some(Self::Fruits),
            "vegetables" => Some(Self::Vegetables),
            "dairy" => Some(Self::Dairy),
            "meat" => Some(Self::Meat),
            "grains" => Some(Self::Grains),
            "snacks" => Some(Self::Snacks),
            "beverages" => Some(Self::Beverages),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::Fruits,
            Self::Vegetables,
            Self::Dairy,
            Self::Meat,
            Self::Grains,
            Self::Snacks,
            Self::Beverages,
            Self::Other,
        ]
    }
}

impl std::fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tracked food item.
///
/// The `id` is assigned at creation and never reassigned. `updated_at` is
/// refreshed on every mutation, so `updated_at >= created_at` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    /// Free text; canonical values enumerated by [`FoodCategory`].
    pub category: String,
    /// Unvalidated magnitude ("2", "1.5", "a few").
    pub quantity: String,
    pub unit: String,
    /// Calendar date driving freshness classification.
    pub expiry_date: NaiveDate,
    pub location: Option<String>,
    pub notes: Option<String>,
    /// Owner association; stamped at creation, never transferred.
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FoodItem {
    /// Create a record from a draft, assigning id and timestamps.
    pub fn new(owner_id: impl Into<String>, draft: FoodCreate) -> Self {
        let stamp = now();
        Self {
            id: new_id(),
            name: draft.name,
            category: draft.category,
            quantity: draft.quantity,
            unit: draft.unit,
            expiry_date: draft.expiry_date,
            location: draft.location,
            notes: draft.notes,
            owner_id: owner_id.into(),
            created_at: stamp,
            updated_at: stamp,
        }
    }

    /// Merge a patch into this record and refresh `updated_at`.
    ///
    /// `id`, `owner_id` and `created_at` are never touched. Fields set to
    /// `None` in the patch are left as they are.
    pub fn apply_update(&mut self, update: FoodUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(unit) = update.unit {
            self.unit = unit;
        }
        if let Some(expiry_date) = update.expiry_date {
            self.expiry_date = expiry_date;
        }
        if let Some(location) = update.location {
            self.location = Some(location);
        }
        if let Some(notes) = update.notes {
            self.notes = Some(notes);
        }
        self.updated_at = now();
    }

    /// Get the typed category, if the free-text value is a canonical tag.
    pub fn category_enum(&self) -> Option<FoodCategory> {
        FoodCategory::from_str(&self.category)
    }

    /// Freshness status of this record relative to `now`.
    pub fn status(&self, now: DateTime<Utc>) -> FreshnessStatus {
        larder_freshness::classify(self.expiry_date, now)
    }

    /// Whole days until this record expires (negative once past).
    pub fn days_until_expiry(&self, now: DateTime<Utc>) -> i64 {
        larder_freshness::days_until_expiry(self.expiry_date, now)
    }
}

/// Draft for creating a food record. Id, owner and timestamps are assigned
/// by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FoodCreate {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub unit: String,
    pub expiry_date: NaiveDate,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// Partial update for a food record. Every field is optional; absent fields
/// are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FoodUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<String>,
    pub unit: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draft(name: &str) -> FoodCreate {
        FoodCreate {
            name: name.to_string(),
            category: "dairy".to_string(),
            quantity: "1".to_string(),
            unit: "l".to_string(),
            expiry_date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            location: Some("fridge".to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_new_assigns_id_and_timestamps() {
        let item = FoodItem::new("user-1", draft("Milk"));
        assert!(!item.id.is_empty());
        assert_eq!(item.owner_id, "user-1");
        assert_eq!(item.created_at, item.updated_at);

        let other = FoodItem::new("user-1", draft("Milk"));
        assert_ne!(item.id, other.id);
    }

    #[test]
    fn test_apply_update_merges_named_fields_only() {
        let mut item = FoodItem::new("user-1", draft("Milk"));
        let before = item.clone();

        item.apply_update(FoodUpdate {
            name: Some("Oat milk".to_string()),
            ..Default::default()
        });

        assert_eq!(item.name, "Oat milk");
        assert_eq!(item.id, before.id);
        assert_eq!(item.category, before.category);
        assert_eq!(item.quantity, before.quantity);
        assert_eq!(item.expiry_date, before.expiry_date);
        assert_eq!(item.owner_id, before.owner_id);
        assert_eq!(item.created_at, before.created_at);
        assert!(item.updated_at >= before.updated_at);
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!(FoodCategory::from_str("Dairy"), Some(FoodCategory::Dairy));
        assert_eq!(FoodCategory::from_str("leftovers"), None);

        let item = FoodItem::new("user-1", draft("Milk"));
        assert_eq!(item.category_enum(), Some(FoodCategory::Dairy));
    }
}

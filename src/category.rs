//! The category table: a fixed classification scheme for expenses and
//! receipts.
//!
//! The table maps a category key (e.g. `food`) to its display name, badge
//! color classes and icon. It is owned by the application state and passed
//! into the views that need it, rather than living in a module-level global,
//! so a deployment can swap in its own category set.

use serde::{Deserialize, Serialize};

use crate::Error;

/// A single expense category with its display styling.
///
/// Serializable so a deployment can provide its own category set as a JSON
/// file; the styling fields may be omitted there and fall back to neutral
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// The key that records reference, e.g. "food".
    pub key: String,
    /// The human-readable name, e.g. "Food & Dining".
    pub name: String,
    /// Tailwind classes for the category badge.
    #[serde(default = "default_badge_classes")]
    pub badge_classes: String,
    /// An emoji icon shown on the category grid.
    #[serde(default = "default_icon")]
    pub icon: String,
}

fn default_badge_classes() -> String {
    FALLBACK_BADGE_CLASSES.to_owned()
}

fn default_icon() -> String {
    "📦".to_owned()
}

/// The set of categories known to the application.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    categories: Vec<Category>,
}

/// Badge classes used when a record's category key is not in the table.
const FALLBACK_BADGE_CLASSES: &str = "bg-gray-100 text-gray-800";

impl CategoryTable {
    /// Create a table from an explicit list of categories.
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Parse a table from a JSON array of categories.
    ///
    /// # Errors
    /// Returns the underlying serde error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self::new)
    }

    /// The categories in display order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by key.
    pub fn get(&self, key: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.key == key)
    }

    /// Check that `key` names a category in this table.
    ///
    /// Used at the record-creation boundary. Rendering does not call this:
    /// records with unknown keys are still shown, with fallback styling.
    ///
    /// # Errors
    /// Returns [Error::UnknownCategory] if the key is not in the table.
    pub fn validate_key(&self, key: &str) -> Result<(), Error> {
        if self.get(key).is_some() {
            Ok(())
        } else {
            Err(Error::UnknownCategory(key.to_owned()))
        }
    }

    /// The display name for a category key, falling back to the raw key for
    /// unknown categories.
    pub fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).map_or(key, |category| &category.name)
    }

    /// The badge classes for a category key, falling back to a neutral gray
    /// for unknown categories.
    pub fn badge_classes<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key)
            .map_or(FALLBACK_BADGE_CLASSES, |category| &category.badge_classes)
    }
}

impl Default for CategoryTable {
    /// The standard eight-category table.
    fn default() -> Self {
        let category = |key: &str, name: &str, badge_classes: &str, icon: &str| Category {
            key: key.to_owned(),
            name: name.to_owned(),
            badge_classes: badge_classes.to_owned(),
            icon: icon.to_owned(),
        };

        Self::new(vec![
            category("food", "Food & Dining", "bg-emerald-100 text-emerald-800", "🍕"),
            category("transport", "Transportation", "bg-yellow-100 text-yellow-800", "🚗"),
            category("shopping", "Shopping", "bg-blue-100 text-blue-800", "🛍️"),
            category(
                "entertainment",
                "Entertainment",
                "bg-purple-100 text-purple-800",
                "🎬",
            ),
            category("utilities", "Utilities", "bg-orange-100 text-orange-800", "💡"),
            category("health", "Health & Medical", "bg-red-100 text-red-800", "⚕️"),
            category("travel", "Travel", "bg-indigo-100 text-indigo-800", "✈️"),
            category("other", "Other", "bg-gray-100 text-gray-800", "📦"),
        ])
    }
}

#[cfg(test)]
mod category_table_tests {
    use super::{CategoryTable, FALLBACK_BADGE_CLASSES};
    use crate::Error;

    #[test]
    fn default_table_has_eight_categories() {
        let table = CategoryTable::default();

        assert_eq!(table.categories().len(), 8);

        for key in [
            "food",
            "transport",
            "shopping",
            "entertainment",
            "utilities",
            "health",
            "travel",
            "other",
        ] {
            assert!(table.get(key).is_some(), "missing category {key}");
        }
    }

    #[test]
    fn validate_key_accepts_known_and_rejects_unknown() {
        let table = CategoryTable::default();

        assert_eq!(table.validate_key("food"), Ok(()));
        assert_eq!(
            table.validate_key("groceries"),
            Err(Error::UnknownCategory("groceries".to_owned()))
        );
    }

    #[test]
    fn unknown_key_falls_back_to_default_styling() {
        let table = CategoryTable::default();

        assert_eq!(table.display_name("mystery"), "mystery");
        assert_eq!(table.badge_classes("mystery"), FALLBACK_BADGE_CLASSES);
    }

    #[test]
    fn parses_custom_table_from_json() {
        let json = r#"[
            { "key": "rent", "name": "Rent", "icon": "🏠" },
            { "key": "pets", "name": "Pets" }
        ]"#;

        let table = CategoryTable::from_json(json).unwrap();

        assert_eq!(table.categories().len(), 2);
        assert_eq!(table.display_name("rent"), "Rent");
        assert_eq!(table.get("rent").unwrap().icon, "🏠");
        // Omitted styling fields fall back to neutral defaults.
        assert_eq!(table.badge_classes("pets"), FALLBACK_BADGE_CLASSES);
        assert_eq!(table.get("pets").unwrap().icon, "📦");
    }

    #[test]
    fn known_key_uses_table_styling() {
        let table = CategoryTable::default();

        assert_eq!(table.display_name("food"), "Food & Dining");
        assert_eq!(table.badge_classes("food"), "bg-emerald-100 text-emerald-800");
    }
}

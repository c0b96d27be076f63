//! Category and IncomeSource reference data
//!
//! Expense categories and income sources are static catalogs shown in the
//! transaction pickers. They are not persisted on their own; a snapshot is
//! embedded into each transaction at creation time.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::ids::{CategoryId, IncomeSourceId};

/// A tag classifying an expense transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// Display color (hex)
    pub color: String,

    /// Display icon (emoji)
    pub icon: String,
}

impl Category {
    /// Create a new category
    pub fn new(name: impl Into<String>, color: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            color: color.into(),
            icon: icon.into(),
        }
    }

    /// The built-in expense categories shown in the picker
    pub fn defaults() -> Vec<Category> {
        DEFAULT_CATEGORIES
            .iter()
            .map(|(id, name, color, icon)| Category {
                id: CategoryId::from_uuid(Uuid::from_u128(*id)),
                name: (*name).to_string(),
                color: (*color).to_string(),
                icon: (*icon).to_string(),
            })
            .collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon, self.name)
    }
}

/// A tag classifying an income transaction, analogous to [`Category`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeSource {
    /// Unique identifier
    pub id: IncomeSourceId,

    /// Source name
    pub name: String,

    /// Display color (hex)
    pub color: String,

    /// Display icon (emoji)
    pub icon: String,
}

impl IncomeSource {
    /// Create a new income source
    pub fn new(name: impl Into<String>, color: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: IncomeSourceId::new(),
            name: name.into(),
            color: color.into(),
            icon: icon.into(),
        }
    }

    /// The built-in income sources shown in the picker
    pub fn defaults() -> Vec<IncomeSource> {
        DEFAULT_INCOME_SOURCES
            .iter()
            .map(|(id, name, color, icon)| IncomeSource {
                id: IncomeSourceId::from_uuid(Uuid::from_u128(*id)),
                name: (*name).to_string(),
                color: (*color).to_string(),
                icon: (*icon).to_string(),
            })
            .collect()
    }
}

impl fmt::Display for IncomeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon, self.name)
    }
}

// Catalog ids are fixed so snapshots embedded in old transactions keep
// matching the picker entries across app restarts.
const DEFAULT_CATEGORIES: &[(u128, &str, &str, &str)] = &[
    (0xA1, "Продукты", "#F97316", "🛒"),
    (0xA2, "Транспорт", "#3B82F6", "🚌"),
    (0xA3, "Кафе и рестораны", "#EF4444", "🍽️"),
    (0xA4, "Покупки", "#A855F7", "🛍️"),
    (0xA5, "Развлечения", "#EC4899", "🎬"),
    (0xA6, "Здоровье", "#22C55E", "💊"),
    (0xA7, "Жильё", "#EAB308", "🏠"),
    (0xA8, "Другое", "#6B7280", "📦"),
];

const DEFAULT_INCOME_SOURCES: &[(u128, &str, &str, &str)] = &[
    (0xB1, "Зарплата", "#22C55E", "💼"),
    (0xB2, "Фриланс", "#3B82F6", "💻"),
    (0xB3, "Подарки", "#EC4899", "🎁"),
    (0xB4, "Другое", "#6B7280", "💰"),
];

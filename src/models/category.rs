//! Category model
//!
//! Categories label transactions and budgets. Every category is either an
//! income or an expense category, and only transactions of the same kind may
//! be assigned to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, UserId};
use super::transaction::TransactionKind;

/// Color used for categories with no explicit color and for the
/// uncategorized bucket
pub const DEFAULT_CATEGORY_COLOR: &str = "#6b7280";

/// Icon token used when none is given
pub const DEFAULT_CATEGORY_ICON: &str = "circle";

/// Palette offered when creating categories
pub const CATEGORY_PALETTE: &[&str] = &[
    "#ef4444", "#f97316", "#f59e0b", "#10b981", "#3b82f6", "#6366f1", "#8b5cf6", "#ec4899",
    "#6b7280",
];

/// A user-defined income or expense category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Owner of the category
    pub user_id: UserId,

    /// Category name
    pub name: String,

    /// Whether this category classifies income or expenses
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Display color (`#rrggbb`)
    #[serde(default = "default_color")]
    pub color: String,

    /// Display icon token
    #[serde(default = "default_icon")]
    pub icon: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_color() -> String {
    DEFAULT_CATEGORY_COLOR.to_string()
}

fn default_icon() -> String {
    DEFAULT_CATEGORY_ICON.to_string()
}

impl Category {
    /// Create a new category with the default color and icon
    pub fn new(user_id: UserId, name: impl Into<String>, kind: TransactionKind) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            user_id,
            name: name.into(),
            kind,
            color: default_color(),
            icon: default_icon(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the display color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the display icon
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Denormalized copy attached to transactions at read time
    pub fn snapshot(&self) -> CategorySnapshot {
        CategorySnapshot {
            id: self.id,
            name: self.name.clone(),
            kind: self.kind,
            color: self.color.clone(),
            icon: self.icon.clone(),
        }
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        if !is_hex_color(&self.color) {
            return Err(CategoryValidationError::InvalidColor(self.color.clone()));
        }

        if self.icon.trim().is_empty() {
            return Err(CategoryValidationError::EmptyIcon);
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Snapshot of a category as seen when a transaction was read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySnapshot {
    pub id: CategoryId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub color: String,
    pub icon: String,
}

/// `#rrggbb`
pub fn is_hex_color(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Starter categories written on first initialization
pub fn default_categories(user_id: UserId) -> Vec<Category> {
    let income = [("Salary", "#10b981", "briefcase"), ("Freelance", "#3b82f6", "laptop")];
    let expense = [
        ("Housing", "#6366f1", "home"),
        ("Groceries", "#f59e0b", "shopping-cart"),
        ("Transportation", "#f97316", "car"),
        ("Dining Out", "#ec4899", "utensils"),
        ("Health", "#ef4444", "heart"),
        ("Entertainment", "#8b5cf6", "film"),
    ];

    income
        .iter()
        .map(|(name, color, icon)| (name, color, icon, TransactionKind::Income))
        .chain(
            expense
                .iter()
                .map(|(name, color, icon)| (name, color, icon, TransactionKind::Expense)),
        )
        .map(|(name, color, icon, kind)| {
            Category::new(user_id, *name, kind)
                .with_color(*color)
                .with_icon(*icon)
        })
        .collect()
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidColor(String),
    EmptyIcon,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::InvalidColor(color) => {
                write!(f, "Invalid color '{}' (expected #rrggbb)", color)
            }
            Self::EmptyIcon => write!(f, "Category icon cannot be empty"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let user = UserId::new();
        let category = Category::new(user, "Rent", TransactionKind::Expense);

        assert_eq!(category.name, "Rent");
        assert_eq!(category.user_id, user);
        assert_eq!(category.color, DEFAULT_CATEGORY_COLOR);
        assert_eq!(category.icon, DEFAULT_CATEGORY_ICON);
        assert!(category.validate().is_ok());
    }

    #[test]
    fn test_category_validation() {
        let mut category = Category::new(UserId::new(), "Valid", TransactionKind::Income);

        category.name = "  ".to_string();
        assert_eq!(category.validate(), Err(CategoryValidationError::EmptyName));

        category.name = "a".repeat(51);
        assert!(matches!(
            category.validate(),
            Err(CategoryValidationError::NameTooLong(51))
        ));

        category.name = "Valid".to_string();
        category.color = "red".to_string();
        assert!(matches!(
            category.validate(),
            Err(CategoryValidationError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#6B7280"));
        assert!(!is_hex_color("6b7280"));
        assert!(!is_hex_color("#6b728"));
        assert!(!is_hex_color("#gggggg"));
    }

    #[test]
    fn test_snapshot_copies_display_fields() {
        let category = Category::new(UserId::new(), "Food", TransactionKind::Expense)
            .with_color("#f59e0b")
            .with_icon("utensils");
        let snap = category.snapshot();
        assert_eq!(snap.id, category.id);
        assert_eq!(snap.name, "Food");
        assert_eq!(snap.color, "#f59e0b");
        assert_eq!(snap.icon, "utensils");
    }

    #[test]
    fn test_default_categories_cover_both_kinds() {
        let defaults = default_categories(UserId::new());
        assert!(defaults.iter().any(|c| c.kind == TransactionKind::Income));
        assert!(defaults.iter().any(|c| c.kind == TransactionKind::Expense));
        assert!(defaults.iter().all(|c| c.validate().is_ok()));
    }

    #[test]
    fn test_serialization_uses_type_key() {
        let category = Category::new(UserId::new(), "Salary", TransactionKind::Income);
        let json = serde_json::to_string(&category).unwrap();
        assert!(json.contains("\"type\":\"income\""));

        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, category);
    }
}

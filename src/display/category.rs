//! Category display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Category;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Icon")]
    icon: String,
}

/// Format categories as a table
pub fn format_category_table(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'fintrack init' to create default categories."
            .to_string();
    }

    let rows = categories.iter().map(|c| CategoryRow {
        id: c.id.to_string(),
        name: c.name.clone(),
        kind: c.kind.to_string(),
        color: c.color.clone(),
        icon: c.icon.clone(),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format a single category's details
pub fn format_category_details(category: &Category) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:    {}\n", category.id));
    output.push_str(&format!("  Type:  {}\n", category.kind));
    output.push_str(&format!("  Color: {}\n", category.color));
    output.push_str(&format!("  Icon:  {}\n", category.icon));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionKind, UserId};

    #[test]
    fn test_table() {
        let user = UserId::new();
        let categories = vec![
            Category::new(user, "Salary", TransactionKind::Income),
            Category::new(user, "Rent", TransactionKind::Expense).with_color("#ef4444"),
        ];

        let output = format_category_table(&categories);
        assert!(output.contains("Salary"));
        assert!(output.contains("income"));
        assert!(output.contains("#ef4444"));
    }

    #[test]
    fn test_empty() {
        assert!(format_category_table(&[]).contains("fintrack init"));
    }
}

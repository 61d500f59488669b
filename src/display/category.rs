//! Category display formatting
//!
//! Formats categories for terminal output, grouped by kind.

use crate::models::{Category, TransactionKind};

/// Format categories as a tree grouped by kind
pub fn format_category_tree(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'fintrack category defaults' to create the default categories.\n"
            .to_string();
    }

    let mut output = String::new();

    let groups: Vec<(TransactionKind, Vec<&Category>)> = TransactionKind::all()
        .iter()
        .map(|&kind| {
            let list = categories.iter().filter(|c| c.kind == kind).collect::<Vec<_>>();
            (kind, list)
        })
        .filter(|(_, list)| !list.is_empty())
        .collect();

    for (i, (kind, list)) in groups.iter().enumerate() {
        output.push_str(&format!("{}\n", kind));

        for (j, category) in list.iter().enumerate() {
            let prefix = if j == list.len() - 1 { "└── " } else { "├── " };
            let icon = if category.icon.is_empty() {
                String::new()
            } else {
                format!("{} ", category.icon)
            };
            output.push_str(&format!("  {}{}{}\n", prefix, icon, category.name));
        }

        if i < groups.len() - 1 {
            output.push('\n');
        }
    }

    output
}

/// Format a simple table of categories with their IDs
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }

    let name_width = categories
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<width$}  {:<7}  {}\n",
        "Category",
        "Type",
        "ID",
        width = name_width
    ));
    output.push_str(&format!(
        "{:-<width$}  {:-<7}  {:-<12}\n",
        "",
        "",
        "",
        width = name_width
    ));

    for category in categories {
        output.push_str(&format!(
            "{:<width$}  {:<7}  {}\n",
            category.name,
            category.kind,
            category.id,
            width = name_width
        ));
    }

    output
}

/// Format category details
pub fn format_category_details(category: &Category, transaction_count: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:           {}\n", category.id));
    output.push_str(&format!("  Type:         {}\n", category.kind));
    if !category.icon.is_empty() {
        output.push_str(&format!("  Icon:         {}\n", category.icon));
    }
    if !category.color.is_empty() {
        output.push_str(&format!("  Color:        {}\n", category.color));
    }
    output.push_str(&format!("  Transactions: {}\n", transaction_count));

    output
}

//! Settings display formatting

use crate::config::{FarmbookPaths, Settings};

/// Format the expense category catalog as a tree
pub fn format_category_tree(settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str("Income sources\n");
    push_branch(&mut output, &settings.income_sources);

    if settings.expense_categories.is_empty() {
        output.push_str("\nNo expense categories configured.\n");
        return output;
    }

    for category in &settings.expense_categories {
        output.push('\n');
        output.push_str(&format!("{}\n", category.name));
        if category.subcategories.is_empty() {
            output.push_str("  (no subcategories)\n");
        } else {
            push_branch(&mut output, &category.subcategories);
        }
    }

    output
}

fn push_branch(output: &mut String, items: &[String]) {
    for (i, item) in items.iter().enumerate() {
        let prefix = if i == items.len() - 1 {
            "└── "
        } else {
            "├── "
        };
        output.push_str(&format!("  {}{}\n", prefix, item));
    }
}

/// Format paths and settings for the `config` command
pub fn format_config(paths: &FarmbookPaths, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str("Farmbook Configuration\n");
    output.push_str(&"=".repeat(22));
    output.push('\n');
    output.push_str(&format!("Base directory:   {}\n", paths.base_dir().display()));
    output.push_str(&format!("Data directory:   {}\n", paths.data_dir().display()));
    output.push_str(&format!("Settings file:    {}\n", paths.settings_file().display()));
    output.push_str(&format!(
        "Credentials file: {}\n",
        paths.credentials_file().display()
    ));
    output.push('\n');
    output.push_str("Settings:\n");
    output.push_str(&format!(
        "  Balance tolerance: {}\n",
        settings.balance_tolerance
    ));
    output.push_str(&format!(
        "  Expense categories: {}\n",
        settings.expense_categories.len()
    ));

    output
}

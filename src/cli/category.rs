//! Category CLI commands
//!
//! Implements CLI commands for category management.

use clap::Subcommand;

use crate::display::category::{
    format_category_details, format_category_list, format_category_tree,
};
use crate::error::TrackerResult;
use crate::services::{CategoryService, CreateCategoryInput, UpdateCategoryInput};
use crate::storage::Storage;

use super::transaction::parse_kind;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories (grouped by type)
    List {
        /// Only list income or expense categories
        #[arg(short, long)]
        kind: Option<String>,
        /// Show a table with IDs instead of the tree
        #[arg(long)]
        ids: bool,
    },

    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// Category type (income or expense)
        #[arg(short, long, default_value = "expense")]
        kind: String,
        /// Icon shown next to the name
        #[arg(long)]
        icon: Option<String>,
        /// Color (e.g., "#4CAF50")
        #[arg(long)]
        color: Option<String>,
    },

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },

    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New type
        #[arg(short, long)]
        kind: Option<String>,
        /// New icon
        #[arg(long)]
        icon: Option<String>,
        /// New color
        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a category
    Delete {
        /// Category name or ID
        category: String,
    },

    /// Create the default income and expense categories
    Defaults,
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    user_id: &str,
    cmd: CategoryCommands,
) -> TrackerResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List { kind, ids } => {
            let categories = match kind {
                Some(kind) => service.list_by_kind(user_id, parse_kind(&kind)?)?,
                None => service.list(user_id)?,
            };

            if ids {
                println!("{}", format_category_list(&categories));
            } else {
                print!("{}", format_category_tree(&categories));
            }
        }

        CategoryCommands::Add {
            name,
            kind,
            icon,
            color,
        } => {
            let category = service.create(CreateCategoryInput {
                user_id: user_id.to_string(),
                name,
                kind: parse_kind(&kind)?,
                icon,
                color,
            })?;

            println!("Created category: {} ({})", category.name, category.kind);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::Show { category } => {
            let category = service.require(user_id, &category)?;
            let used = storage
                .transactions
                .get_by_user_and_category(user_id, category.id)?
                .len();

            print!("{}", format_category_details(&category, used));
        }

        CategoryCommands::Edit {
            category,
            name,
            kind,
            icon,
            color,
        } => {
            let category = service.require(user_id, &category)?;

            let input = UpdateCategoryInput {
                name,
                kind: kind.as_deref().map(parse_kind).transpose()?,
                icon,
                color,
            };
            let updated = service.update(category.id, input)?;

            println!("Updated category: {} ({})", updated.name, updated.kind);
        }

        CategoryCommands::Delete { category } => {
            let category = service.require(user_id, &category)?;
            let deleted = service.delete(category.id)?;
            println!("Deleted category: {}", deleted.name);
        }

        CategoryCommands::Defaults => {
            let created = service.create_defaults(user_id)?;
            if created.is_empty() {
                println!("Default categories already exist.");
            } else {
                println!("Created {} default categories:", created.len());
                for category in &created {
                    println!("  {} ({})", category.name, category.kind);
                }
            }
        }
    }

    Ok(())
}

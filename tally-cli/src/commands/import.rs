//! Import command - import records from CSV

use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;
use tally_core::config::{ColumnMappings, ImportOptions};

use super::get_context;
use crate::output::{create_table, info, warning};

/// Arguments of the import command
pub struct ImportArgs {
    pub file: Option<PathBuf>,
    pub preview: bool,
    pub profile: Option<String>,
    pub save_profile: Option<String>,
    pub list_profiles: bool,
    pub json: bool,
    pub type_column: Option<String>,
    pub amount_column: Option<String>,
    pub category_column: Option<String>,
    pub date_column: Option<String>,
    pub description_column: Option<String>,
    pub default_type: Option<String>,
    pub default_category: Option<String>,
}

impl ImportArgs {
    fn has_column_args(&self) -> bool {
        self.type_column.is_some()
            || self.amount_column.is_some()
            || self.category_column.is_some()
            || self.date_column.is_some()
            || self.description_column.is_some()
    }
}

pub fn run(args: ImportArgs) -> Result<()> {
    let ctx = get_context()?;
    let json = args.json;

    // List profiles
    if args.list_profiles {
        let profiles = ctx.import_service.list_profiles()?;

        if json {
            println!("{}", serde_json::to_string_pretty(&profiles)?);
        } else if profiles.is_empty() {
            println!("No saved profiles.");
        } else {
            println!("Saved import profiles:");
            for (name, profile) in &profiles {
                println!();
                println!("  {}", name.green());
                print_mappings("    ", &profile.column_mappings);
                if let Some(ref t) = profile.options.default_type {
                    println!("    Default type: {}", t);
                }
                if let Some(ref c) = profile.options.default_category {
                    println!("    Default category: {}", c);
                }
            }
        }
        return Ok(());
    }

    let has_column_args = args.has_column_args();
    let file_path = args
        .file
        .ok_or_else(|| anyhow::anyhow!("File path required for import"))?;

    // Build column mappings from a profile, auto-detection or CLI args
    let (mut mappings, profile_options) = if let Some(profile_name) = &args.profile {
        let profile = ctx
            .import_service
            .get_profile(profile_name)?
            .ok_or_else(|| anyhow::anyhow!("Profile not found: {}", profile_name))?;
        if !json {
            info(&format!("Using profile '{}'", profile_name));
        }
        (profile.column_mappings, Some(profile.options))
    } else if !has_column_args {
        let detected = ctx.import_service.detect_columns(&file_path)?;
        let m = detected
            .into_mappings()
            .ok_or_else(|| anyhow::anyhow!("Could not detect an amount column; use --amount-column"))?;

        if !json {
            println!("{}", "Auto-detected columns:".cyan());
            print_mappings("  ", &m);
            println!();
        }
        (m, None)
    } else {
        (ColumnMappings::default(), None)
    };

    // Override with CLI-provided column mappings
    if let Some(col) = args.type_column {
        mappings.kind = Some(col);
    }
    if let Some(col) = args.amount_column {
        mappings.amount = col;
    }
    if let Some(col) = args.category_column {
        mappings.category = Some(col);
    }
    if let Some(col) = args.date_column {
        mappings.date = Some(col);
    }
    if let Some(col) = args.description_column {
        mappings.description = Some(col);
    }

    // CLI flags override profile options
    let base = profile_options.unwrap_or_default();
    let options = ImportOptions {
        default_type: args.default_type.or(base.default_type),
        default_category: args.default_category.or(base.default_category),
    };

    let result = ctx.import_service.import(&file_path, &mappings, &options, args.preview)?;

    if let Some(profile_name) = args.save_profile {
        ctx.import_service.save_profile(&profile_name, &mappings, &options)?;
        if !json {
            println!("Profile '{}' saved", profile_name);
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.preview {
        println!("{}", "PREVIEW MODE - No changes applied".yellow());
        println!();

        if let Some(rows) = &result.rows {
            let mut table = create_table();
            table.set_header(vec!["Date", "Type", "Amount", "Category", "Description"]);
            for row in rows.iter().take(10) {
                table.add_row(vec![
                    row.date.as_deref().unwrap_or("-"),
                    row.kind.as_str(),
                    row.amount.as_str(),
                    row.category.as_str(),
                    row.description.as_deref().unwrap_or("-"),
                ]);
            }
            println!("{}", table);
            if rows.len() > 10 {
                println!("... and {} more", rows.len() - 10);
            }
        }
        println!();
        println!("{} row(s) would be imported", result.imported);
    } else {
        println!("{} Imported {} record(s)", "✓".green(), result.imported);
    }

    if result.skipped > 0 {
        warning(&format!(
            "{} of {} row(s) skipped: unrecognized type, non-positive amount or unreadable date",
            result.skipped, result.discovered
        ));
    }

    Ok(())
}

fn print_mappings(indent: &str, m: &ColumnMappings) {
    let show = |label: &str, col: Option<&str>| {
        if let Some(col) = col {
            println!("{}{}: {}", indent, label, col);
        }
    };
    show("Type", m.kind.as_deref());
    show("Amount", Some(m.amount.as_str()));
    show("Category", m.category.as_deref());
    show("Date", m.date.as_deref());
    show("Description", m.description.as_deref());
}

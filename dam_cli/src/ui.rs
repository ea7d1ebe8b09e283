//! Terminal output helpers.
//!
//! Status messages go to stderr so stdout stays clean for command output.

use std::fmt;

use clap::ValueEnum;
use console::style;
use serde::Serialize;

use dam_core::eval::Asset;
use dam_core::folder::{FolderOption, FolderTree};
use dam_core::form::{FieldValueItem, FormError, FormSchema, Widget};
use dam_core::{Catalog, FilterQuery, ValueEditor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Pretty => write!(f, "pretty"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

pub fn header(msg: &str) {
    eprintln!("{}", style(msg).bold().cyan());
}

pub fn success(msg: &str) {
    eprintln!("{} {}", style("✓").green().bold(), msg);
}

pub fn info(msg: &str) {
    eprintln!("{} {}", style("i").blue().bold(), msg);
}

pub fn warning(msg: &str) {
    eprintln!("{} {}", style("!").yellow().bold(), style(msg).yellow());
}

pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), style(msg).red());
}

pub fn error_with_details(msg: &str, details: &str) {
    eprintln!("{} {}: {}", style("✗").red().bold(), style(msg).red(), details);
}

pub fn debug(msg: &str) {
    log::debug!("{}", msg);
}

pub fn json_output<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => error_with_details("Failed to serialize output", &e.to_string()),
    }
}

fn editor_name(editor: ValueEditor) -> &'static str {
    match editor {
        ValueEditor::Text => "text",
        ValueEditor::Date => "date",
        ValueEditor::Choice => "choice",
    }
}

pub fn pretty_output_fields(catalog: &Catalog) {
    for field in catalog.iter() {
        let mut line = format!(
            "{:>4}  {}  {}",
            style(field.id).dim(),
            style(&field.display_label).bold(),
            style(format!("({}, {} editor)", field.name, editor_name(field.data_type.value_editor()))).dim()
        );
        if let Some(parent) = field.depends_on {
            line.push_str(&format!("  depends on {}", parent));
        }
        println!("{}", line);

        for option in field.data_type.options() {
            match &option.group_key {
                Some(group) => println!("        {} = {} [{}]", option.value, option.label, group),
                None => println!("        {} = {}", option.value, option.label),
            }
        }
    }
}

pub fn pretty_output_query(query: &FilterQuery, catalog: &Catalog) {
    for predicate in &query.filters {
        let label = catalog
            .get(predicate.field_id)
            .map(|f| f.display_label.as_str())
            .unwrap_or("?");
        let connective = if predicate.position == 0 {
            "    ".to_string()
        } else {
            format!("{:<4}", predicate.connective)
        };
        println!(
            "{} {} {} '{}'",
            style(connective).magenta(),
            style(label).bold(),
            predicate.operator,
            predicate.value
        );
    }
}

pub fn pretty_output_assets(assets: &[&Asset], catalog: &Catalog) {
    for asset in assets {
        println!("{}", style(format!("Asset {}", asset.id)).bold());
        for field in catalog.iter() {
            if let Some(value) = asset.value(field.id) {
                println!("  {}: {}", style(&field.display_label).dim(), value);
            }
        }
    }
}

pub fn pretty_output_form(schema: &FormSchema) {
    for field in schema.fields() {
        let widget = match &field.widget {
            Widget::TextInput => "text input".to_string(),
            Widget::TextArea => "text area".to_string(),
            Widget::DatePicker => "date picker".to_string(),
            Widget::Select { options } => format!("select, {} options", options.len()),
        };
        let marker = if field.required { "*" } else { " " };
        println!(
            "{}{}  {}  {}",
            style(marker).red().bold(),
            style(&field.label).bold(),
            style(format!("[{}]", field.key)).dim(),
            style(format!("{} - {}", widget, field.placeholder)).dim()
        );
    }
}

pub fn pretty_output_form_errors(errors: &[FormError]) {
    for e in errors {
        error(&format!("  - {}", e));
    }
}

pub fn pretty_output_payload(items: &[FieldValueItem]) {
    for item in items {
        println!("{:>4}  {}: {}", style(item.id).dim(), style(&item.field_name).bold(), item.value);
    }
}

pub fn pretty_output_folders(tree: &FolderTree, options: &[FolderOption]) {
    for option in options {
        let smart = option
            .value
            .parse::<i64>()
            .ok()
            .and_then(|id| tree.find(id))
            .filter(|folder| folder.is_smart())
            .map(|folder| format!(" (smart, {} filters)", folder.filters.len()))
            .unwrap_or_default();
        println!(
            "{}{} {}{}",
            "  ".repeat(option.depth),
            style(&option.value).dim(),
            option.label,
            style(smart).magenta()
        );
    }
}

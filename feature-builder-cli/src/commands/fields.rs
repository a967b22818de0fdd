//! Field listing command

use anyhow::Result;
use clap::Args;
use console::style;
use feature_builder::model::{EntityField, EntityRelation};
use feature_builder::types;
use std::path::PathBuf;

use crate::load_definition;

/// List the fields of a definition with their mapped types
#[derive(Debug, Args)]
pub struct FieldsCommand {
    /// Feature definition file
    pub definition: PathBuf,
}

impl FieldsCommand {
    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the definition cannot be loaded.
    pub fn execute(&self) -> Result<()> {
        let definition = load_definition(&self.definition)?;

        println!(
            "{} {}",
            style(&definition.config.name).cyan().bold(),
            style(format!("({} fields)", definition.fields.len())).dim()
        );
        for field in &definition.fields {
            println!("  {}", describe_field(field));
        }

        if !definition.relations.is_empty() {
            println!();
            println!("{}", style("Relations").bold());
            for relation in &definition.relations {
                println!("  {}", describe_relation(relation));
            }
        }

        Ok(())
    }
}

/// `name: type -> ts type [icon] (flags)`
#[must_use]
pub fn describe_field(field: &EntityField) -> String {
    let field_type = field.field_type();
    let mut line = format!(
        "{}: {} -> {} [{}]",
        field.name,
        field_type,
        types::ts_type(field_type),
        types::icon(field_type)
    );

    let flags = field_flags(field);
    if !flags.is_empty() {
        line.push_str(&format!(" ({})", flags.join(", ")));
    }
    if let Some(options) = field.kind.options() {
        line.push_str(&format!(" {} options", options.len()));
    }
    line
}

fn field_flags(field: &EntityField) -> Vec<&'static str> {
    [
        (field.is_primary, "primary"),
        (field.required, "required"),
        (field.is_read_only, "read-only"),
        (!field.is_visible, "not searchable"),
        (!field.show_in_table, "no column"),
        (!field.show_in_form, "not in forms"),
    ]
    .into_iter()
    .filter_map(|(set, flag)| set.then_some(flag))
    .collect()
}

/// `fieldName: relationType -> Target`
#[must_use]
pub fn describe_relation(relation: &EntityRelation) -> String {
    let target = if relation.target_entity.is_empty() {
        "?"
    } else {
        relation.target_entity.as_str()
    };
    let mut line = format!(
        "{}: {} -> {target}",
        relation.effective_field_name(),
        relation.relation_type.as_str()
    );
    if relation.is_required {
        line.push_str(" (required)");
    }
    line
}

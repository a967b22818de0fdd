//! Entity type declarations (`{lower}.d.ts`)

use super::writer::CodeWriter;
use crate::model::{EntityField, EntityRelation, FeatureConfig, FieldType};
use crate::naming::NamingContext;
use crate::types;

/// Reserved query parameters that filters never shadow
const RESERVED_PARAMS: [&str; 4] = ["status", "search", "page", "pageSize"];

/// Generate the entity type declaration file
///
/// # Examples
///
/// ```
/// # use feature_builder::model::{EntityField, FeatureConfig};
/// # use feature_builder::generators::generate_entity_types;
/// let fields = vec![EntityField::primary_id(), EntityField::new("f1", "title").required()];
/// let out = generate_entity_types(&FeatureConfig::new("Product"), &fields, &[]);
/// assert!(out.contains("export interface Product {"));
/// assert!(out.contains("  title: string;"));
/// ```
#[must_use]
pub fn generate_entity_types(
    config: &FeatureConfig,
    fields: &[EntityField],
    relations: &[EntityRelation],
) -> String {
    render(&NamingContext::new(config, relations), config, fields)
}

/// Related types that need a stub declaration, in first-seen order
pub(crate) fn stub_types(ctx: &NamingContext) -> Vec<&str> {
    ctx.relation_targets()
        .into_iter()
        .map(|r| r.target_type.as_str())
        .filter(|name| *name != ctx.entity)
        .collect()
}

pub(crate) fn render(ctx: &NamingContext, config: &FeatureConfig, fields: &[EntityField]) -> String {
    let entity = &ctx.entity;
    let mut w = CodeWriter::new();

    w.line(format!("// {entity} entity types"));
    w.blank();

    if !config.description.trim().is_empty() {
        w.line(format!("/** {} */", config.description.trim().replace("*/", "* /")));
    }
    w.open(format!("export interface {entity} {{"));
    for field in fields {
        let optional = if field.required { "" } else { "?" };
        w.line(format!(
            "{}{optional}: {};",
            field.name,
            types::ts_type(field.field_type())
        ));
    }
    for relation in &ctx.relations {
        let optional = if relation.is_required { "" } else { "?" };
        let array = if relation.is_many() { "[]" } else { "" };
        w.line(format!(
            "{}{optional}: {}{array};",
            relation.field_name, relation.target_type
        ));
    }
    w.close("}");

    for stub in stub_types(ctx) {
        w.blank();
        w.open(format!("export interface {stub} {{"));
        w.line("id: string;");
        w.line("[key: string]: unknown;");
        w.close("}");
    }

    w.blank();
    let omitted: Vec<String> = fields
        .iter()
        .filter(|f| f.is_primary || f.is_read_only)
        .map(|f| format!("'{}'", f.name))
        .collect();
    if omitted.is_empty() {
        w.line(format!("export type {} = {entity};", ctx.input_type));
    } else {
        w.line(format!(
            "export type {} = Omit<{entity}, {}>;",
            ctx.input_type,
            omitted.join(" | ")
        ));
    }

    w.blank();
    w.open(format!(
        "export interface {} extends PaginationParams {{",
        ctx.query_params_type
    ));
    w.line("status?: string;");
    w.line("search?: string;");
    let mut seen: Vec<&str> = Vec::new();
    for field in fields {
        let filterable = field.is_primary || field.field_type() == FieldType::Select;
        let name = field.name.as_str();
        if !filterable || RESERVED_PARAMS.contains(&name) || seen.contains(&name) {
            continue;
        }
        seen.push(name);
        w.line(format!("{name}?: {};", types::ts_type(field.field_type())));
    }
    w.close("}");

    w.blank();
    w.lines(
        "export interface PaginationParams {
  page?: number;
  pageSize?: number;
}

export interface PaginatedResult<T> {
  items: T[];
  total: number;
  page: number;
  pageSize: number;
}",
    );

    w.finish()
}

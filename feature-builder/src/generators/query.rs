//! Search and filter bar fields (`config/query.tsx`)

use super::writer::{quote, CodeWriter};
use crate::model::{EntityField, FeatureConfig, FieldType};
use crate::naming::NamingContext;

/// Whether a field is offered in the search/filter bar
#[must_use]
pub fn is_query_field(field: &EntityField) -> bool {
    field.is_visible
        && (field.is_primary
            || matches!(
                field.field_type(),
                FieldType::Text | FieldType::Select | FieldType::Date
            ))
}

/// Generate the query field builder, `None` when no field qualifies
///
/// # Examples
///
/// ```
/// # use feature_builder::model::{EntityField, FeatureConfig};
/// # use feature_builder::generators::generate_query_fields;
/// let hidden = EntityField { is_visible: false, ..EntityField::new("f1", "title") };
/// assert!(generate_query_fields(&FeatureConfig::new("Product"), &[hidden]).is_none());
/// ```
#[must_use]
pub fn generate_query_fields(config: &FeatureConfig, fields: &[EntityField]) -> Option<String> {
    render(&NamingContext::new(config, &[]), fields)
}

pub(crate) fn render(ctx: &NamingContext, fields: &[EntityField]) -> Option<String> {
    let query_fields: Vec<&EntityField> = fields.iter().filter(|f| is_query_field(f)).collect();
    if query_fields.is_empty() {
        return None;
    }

    let mut w = CodeWriter::new();
    w.import_type(&["QueryFieldConfig"], "@/components/query-bar");
    w.blank();
    w.open(format!(
        "export function {}(): QueryFieldConfig[] {{",
        ctx.components.query_fields
    ));
    w.open("return [");
    for field in query_fields {
        let field_type = match field.field_type() {
            t @ (FieldType::Select | FieldType::Date) => t,
            _ => FieldType::Text,
        };
        let head = format!(
            "name: {}, label: {}, type: '{field_type}'",
            quote(&field.name),
            quote(&field.label)
        );
        match field.kind.options() {
            Some(options) if field_type == FieldType::Select => {
                w.open("{");
                w.line(format!("{head},"));
                w.open("options: [");
                for option in options {
                    w.line(format!(
                        "{{ label: {}, value: {} }},",
                        quote(&option.label),
                        quote(&option.value)
                    ));
                }
                w.close("],");
                w.close("},");
            }
            _ => {
                w.line(format!("{{ {head} }},"));
            }
        }
    }
    w.close("];");
    w.close("}");

    Some(w.finish())
}

//! Table column definitions (`config/table.tsx`)

use super::writer::{quote, CodeWriter};
use super::primary_key;
use crate::model::{EntityField, EntityRelation, FeatureConfig, FieldType};
use crate::naming::{NameHelpers, NamingContext};

/// Generate the table column builder
///
/// Covers every field with `showInTable`, one link column per one-to-one
/// relation and a trailing actions column.
#[must_use]
pub fn generate_table_columns(
    config: &FeatureConfig,
    fields: &[EntityField],
    relations: &[EntityRelation],
) -> String {
    render(&NamingContext::new(config, relations), fields)
}

fn is_status(field: &EntityField) -> bool {
    field.name == "status" && field.field_type() == FieldType::Select
}

pub(crate) fn render(ctx: &NamingContext, fields: &[EntityField]) -> String {
    let entity = &ctx.entity;
    let key = primary_key(fields);
    let columns: Vec<&EntityField> = fields.iter().filter(|f| f.show_in_table).collect();
    let status = columns.iter().copied().find(|f| is_status(f));

    let mut helpers = Vec::new();
    if columns.iter().any(|f| f.field_type() == FieldType::Date) {
        helpers.push("formatDate");
    }
    if status.is_some() {
        helpers.push("parseStatus");
    }

    let mut w = CodeWriter::new();
    w.import(&["Link"], "react-router-dom");
    w.import_type(&["ColumnDef"], "@tanstack/react-table");
    w.import(&helpers, "@/utils/format");
    w.import_type(&[entity.as_str()], &format!("../{}", ctx.type_module));
    w.blank();

    if let Some(field) = status {
        w.open("const STATUS_OPTIONS = [");
        for option in field.kind.options().unwrap_or_default() {
            w.line(format!(
                "{{ label: {}, value: {} }},",
                quote(&option.label),
                quote(&option.value)
            ));
        }
        w.close("];");
        w.blank();
    }

    w.open(format!("export interface {entity}ColumnActions {{"));
    w.line(format!("onView: (record: {entity}) => void;"));
    w.line(format!("onEdit: (record: {entity}) => void;"));
    w.line(format!("onDelete: (record: {entity}) => void;"));
    w.close("}");
    w.blank();

    w.open(format!(
        "export function {}(actions: {entity}ColumnActions): ColumnDef<{entity}>[] {{",
        ctx.components.table_columns
    ));
    w.open("return [");

    for field in &columns {
        let name = &field.name;
        let value = format!("row.original.{name}");
        w.open("{");
        w.line(format!("accessorKey: {},", quote(name)));
        w.line(format!("header: {},", quote(&field.label)));
        if field.is_primary {
            w.open("cell: ({ row }) => (");
            w.line(format!(
                "<Link to={{`{}/view/${{row.original.{key}}}`}}>{{{value}}}</Link>",
                ctx.route_base
            ));
            w.close("),");
        } else if is_status(field) {
            w.line(format!("cell: ({{ row }}) => parseStatus({value}, STATUS_OPTIONS),"));
        } else if field.field_type() == FieldType::Date {
            w.line(format!("cell: ({{ row }}) => formatDate({value}),"));
        }
        w.close("},");
    }

    for relation in ctx.one_to_one() {
        let value = format!("row.original.{}", relation.field_name);
        w.open("{");
        w.line(format!("id: {},", quote(&relation.field_name)));
        w.line(format!(
            "header: {},",
            quote(&NameHelpers::to_title(&relation.field_name))
        ));
        w.open("cell: ({ row }) =>");
        w.open(format!("{value} ? ("));
        w.line(format!(
            "<Link to={{`{}/view/${{{value}.id}}`}}>{{{value}.id}}</Link>",
            relation.target_route
        ));
        w.close(") : null,");
        w.dedent();
        w.close("},");
    }

    w.lines(
        "{
  id: 'actions',
  header: 'Actions',
  cell: ({ row }) => (
    <div className=\"flex gap-2\">
      <button type=\"button\" onClick={() => actions.onView(row.original)}>View</button>
      <button type=\"button\" onClick={() => actions.onEdit(row.original)}>Edit</button>
      <button type=\"button\" onClick={() => actions.onDelete(row.original)}>Delete</button>
    </div>
  ),
},",
    );
    w.close("];");
    w.close("}");

    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldKind, FieldOption, RelationType};

    fn fields() -> Vec<EntityField> {
        vec![
            EntityField::primary_id(),
            EntityField::new("f_title", "title").required(),
            EntityField::new("f_status", "status").with_kind(FieldKind::Select {
                options: vec![FieldOption::new("Active", "active")],
            }),
            EntityField::new("f_due", "dueDate").with_kind(FieldKind::Date),
            EntityField::new("f_notes", "notes").shown(false, true),
        ]
    }

    #[test]
    fn test_columns_follow_show_in_table() {
        let out = generate_table_columns(&FeatureConfig::new("Product"), &fields(), &[]);
        assert!(out.contains("accessorKey: 'title',"));
        assert!(!out.contains("accessorKey: 'notes',"));
        assert!(out.contains("export function getProductColumns(actions: ProductColumnActions)"));
    }

    #[test]
    fn test_special_cells() {
        let out = generate_table_columns(&FeatureConfig::new("Product"), &fields(), &[]);
        assert!(out.contains("<Link to={`/products/view/${row.original.id}`}>{row.original.id}</Link>"));
        assert!(out.contains("cell: ({ row }) => formatDate(row.original.dueDate),"));
        assert!(out.contains("cell: ({ row }) => parseStatus(row.original.status, STATUS_OPTIONS),"));
        assert!(out.contains("import { formatDate, parseStatus } from '@/utils/format';"));
    }

    #[test]
    fn test_actions_column_always_last() {
        let out = generate_table_columns(&FeatureConfig::new("Note"), &[], &[]);
        assert!(out.contains("id: 'actions',"));
        assert!(!out.contains("@/utils/format"));
        assert!(out.trim_end().ends_with("];\n}"));
    }

    #[test]
    fn test_status_requires_select_type() {
        let fields = vec![EntityField::new("f1", "status")];
        let out = generate_table_columns(&FeatureConfig::new("Product"), &fields, &[]);
        assert!(!out.contains("parseStatus"));
    }

    #[test]
    fn test_one_to_one_link_column() {
        let relations = vec![
            EntityRelation::new("r1")
                .with_type(RelationType::OneToOne)
                .with_target("Profile"),
            EntityRelation::new("r2").with_target("Order"),
        ];
        let out = generate_table_columns(&FeatureConfig::new("Product"), &fields(), &relations);
        assert!(out.contains("id: 'profile',"));
        assert!(out.contains("<Link to={`/profiles/view/${row.original.profile.id}`}>"));
        assert!(!out.contains("id: 'orders',"));
    }
}

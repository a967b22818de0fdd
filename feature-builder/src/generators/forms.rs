//! Create and edit form configs (`forms/create.tsx`, `forms/edit.tsx`)
//!
//! The create form lists fields with `showInForm && !isReadOnly`; the edit
//! form lists every `showInForm` field and disables the read-only ones.
//! One-to-one relations become async selects keyed by `{fieldName}Id`.

use super::writer::{number, quote, CodeWriter};
use crate::model::{DefaultValue, EntityField, EntityRelation, FeatureConfig};
use crate::naming::{NameHelpers, NamingContext, RelationNames};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormMode {
    Create,
    Edit,
}

/// Generate the create-form field builder
#[must_use]
pub fn generate_create_form(
    config: &FeatureConfig,
    fields: &[EntityField],
    relations: &[EntityRelation],
) -> String {
    render_create(&NamingContext::new(config, relations), fields)
}

/// Generate the edit-form field builder and value population hook
#[must_use]
pub fn generate_edit_form(
    config: &FeatureConfig,
    fields: &[EntityField],
    relations: &[EntityRelation],
) -> String {
    render_edit(&NamingContext::new(config, relations), fields)
}

pub(crate) fn render_create(ctx: &NamingContext, fields: &[EntityField]) -> String {
    let mut w = CodeWriter::new();
    render_imports(&mut w, ctx, FormMode::Create);
    w.blank();
    render_builder(
        &mut w,
        ctx,
        &ctx.components.create_form_fields,
        fields.iter().filter(|f| f.show_in_form && !f.is_read_only),
        FormMode::Create,
    );
    w.finish()
}

pub(crate) fn render_edit(ctx: &NamingContext, fields: &[EntityField]) -> String {
    let form_fields: Vec<&EntityField> = fields.iter().filter(|f| f.show_in_form).collect();
    let mut w = CodeWriter::new();
    render_imports(&mut w, ctx, FormMode::Edit);
    w.blank();
    render_builder(
        &mut w,
        ctx,
        &ctx.components.edit_form_fields,
        form_fields.iter().copied(),
        FormMode::Edit,
    );

    w.blank();
    w.open(format!("export function {}(", ctx.components.edit_form_values));
    w.line("form: UseFormReturn<Record<string, unknown>>,");
    w.line(format!("record?: {},", ctx.entity));
    w.close(") {");
    w.indent();
    w.open("useEffect(() => {");
    w.open("if (!record) {");
    w.line("return;");
    w.close("}");
    w.open("form.reset({");
    for field in &form_fields {
        w.line(format!("{0}: record.{0},", field.name));
    }
    for relation in ctx.one_to_one() {
        w.line(format!(
            "{}: record.{}?.id,",
            relation.form_field, relation.field_name
        ));
    }
    w.close("});");
    w.close("}, [form, record]);");
    w.dedent();
    w.line("}");

    w.finish()
}

fn render_imports(w: &mut CodeWriter, ctx: &NamingContext, mode: FormMode) {
    if mode == FormMode::Edit {
        w.import(&["useEffect"], "react");
        w.import_type(&["UseFormReturn"], "react-hook-form");
    }
    w.import_type(&["FormFieldConfig"], "@/components/form");
    if mode == FormMode::Edit {
        w.import_type(&[ctx.entity.as_str()], &format!("../{}", ctx.type_module));
    }

    let mut loaders: Vec<&str> = Vec::new();
    for relation in ctx.one_to_one() {
        if !loaders.contains(&relation.loader.as_str()) {
            loaders.push(&relation.loader);
        }
    }
    w.import(&loaders, "../relations");
}

fn render_builder<'a>(
    w: &mut CodeWriter,
    ctx: &NamingContext,
    name: &str,
    fields: impl Iterator<Item = &'a EntityField>,
    mode: FormMode,
) {
    let mut fields = fields.peekable();
    let has_relations = ctx.one_to_one().next().is_some();

    w.open(format!("export function {name}(): FormFieldConfig[] {{"));
    if fields.peek().is_none() && !has_relations {
        w.line("return [];");
        w.close("}");
        return;
    }

    w.open("return [");
    for field in fields {
        render_field(w, field, mode);
    }
    for relation in ctx.one_to_one() {
        render_relation_select(w, relation);
    }
    w.close("];");
    w.close("}");
}

fn render_field(w: &mut CodeWriter, field: &EntityField, mode: FormMode) {
    let field_type = field.field_type();

    w.open("{");
    w.line(format!("name: {},", quote(&field.name)));
    w.line(format!("label: {},", quote(&field.label)));
    w.line(format!("type: '{field_type}',"));

    render_rules(w, field);

    if let Some(options) = field.kind.options() {
        if options.is_empty() {
            w.line("options: [],");
        } else {
            w.open("options: [");
            for option in options {
                w.line(format!(
                    "{{ label: {}, value: {} }},",
                    quote(&option.label),
                    quote(&option.value)
                ));
            }
            w.close("],");
        }
    }

    if field_type.is_full_width() {
        w.line("fullWidth: true,");
    }
    if mode == FormMode::Edit && field.is_read_only {
        w.line("disabled: true,");
    }
    if mode == FormMode::Create {
        if let Some(value) = &field.default_value {
            w.line(format!("defaultValue: {},", default_literal(value)));
        }
    }
    w.close("},");
}

fn render_rules(w: &mut CodeWriter, field: &EntityField) {
    let label = &field.label;
    let mut rules = Vec::new();

    if field.required {
        rules.push(format!(
            "{{ required: true, message: {} }}",
            quote(&format!("{label} is required"))
        ));
    }

    if let Some(validation) = field.validation.as_ref().filter(|v| !v.is_empty()) {
        let message = |fallback: String| quote(validation.message.as_deref().unwrap_or(&fallback));
        if let Some(n) = validation.min_length {
            rules.push(format!(
                "{{ minLength: {n}, message: {} }}",
                message(format!("{label} must be at least {n} characters"))
            ));
        }
        if let Some(n) = validation.max_length {
            rules.push(format!(
                "{{ maxLength: {n}, message: {} }}",
                message(format!("{label} must be at most {n} characters"))
            ));
        }
        if let Some(n) = validation.min {
            rules.push(format!(
                "{{ min: {}, message: {} }}",
                number(n),
                message(format!("{label} must be at least {}", number(n)))
            ));
        }
        if let Some(n) = validation.max {
            rules.push(format!(
                "{{ max: {}, message: {} }}",
                number(n),
                message(format!("{label} must be at most {}", number(n)))
            ));
        }
        if let Some(pattern) = &validation.pattern {
            rules.push(format!(
                "{{ pattern: {}, message: {} }}",
                quote(pattern),
                message(format!("{label} is invalid"))
            ));
        }
    }

    if rules.is_empty() {
        return;
    }
    w.open("rules: [");
    for rule in rules {
        w.line(format!("{rule},"));
    }
    w.close("],");
}

fn render_relation_select(w: &mut CodeWriter, relation: &RelationNames) {
    let label = NameHelpers::to_title(&relation.field_name);
    w.open("{");
    w.line(format!("name: {},", quote(&relation.form_field)));
    w.line(format!("label: {},", quote(&label)));
    w.line("type: 'async-select',");
    w.line(format!("loadOptions: {},", relation.loader));
    if relation.is_required {
        w.open("rules: [");
        w.line(format!(
            "{{ required: true, message: {} }},",
            quote(&format!("{label} is required"))
        ));
        w.close("],");
    }
    w.close("},");
}

fn default_literal(value: &DefaultValue) -> String {
    match value {
        DefaultValue::Bool(flag) => flag.to_string(),
        DefaultValue::Number(n) => number(*n),
        DefaultValue::Text(text) => quote(text),
        DefaultValue::List(items) => {
            let items: Vec<String> = items.iter().map(|item| quote(item)).collect();
            format!("[{}]", items.join(", "))
        }
    }
}

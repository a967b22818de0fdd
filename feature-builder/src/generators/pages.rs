//! Page components (`pages/create.tsx`, `pages/edit.tsx`, `pages/view.tsx`,
//! `pages/list.tsx`)
//!
//! The list page owns the `:mode/:slug` routes and renders the create, edit
//! or view page for them. View and list pages carry one tab component per
//! declared relation.

use super::primary_key;
use super::writer::{quote, CodeWriter};
use crate::model::{EntityField, EntityRelation, FeatureConfig, FieldType, ViewMode};
use crate::naming::{NameHelpers, NamingContext, RelationNames};

/// The four generated page files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pages {
    /// `pages/create.tsx`
    pub create: String,
    /// `pages/edit.tsx`
    pub edit: String,
    /// `pages/view.tsx`
    pub view: String,
    /// `pages/list.tsx`
    pub list: String,
}

/// Generate the page set
#[must_use]
pub fn generate_pages(
    config: &FeatureConfig,
    fields: &[EntityField],
    relations: &[EntityRelation],
) -> Pages {
    let has_query = fields.iter().any(super::query::is_query_field);
    render(&NamingContext::new(config, relations), config, fields, has_query)
}

pub(crate) fn render(
    ctx: &NamingContext,
    config: &FeatureConfig,
    fields: &[EntityField],
    has_query: bool,
) -> Pages {
    Pages {
        create: render_create(ctx),
        edit: render_edit(ctx),
        view: render_view(ctx, fields),
        list: render_list(ctx, config, fields, has_query),
    }
}

fn render_create(ctx: &NamingContext) -> String {
    let mut w = CodeWriter::new();
    w.import(&["useNavigate"], "react-router-dom");
    w.import(&["EntityForm"], "@/components/form");
    w.import(&[ctx.components.create_form_fields.as_str()], "../forms/create");
    w.import(&[ctx.hooks.create.as_str()], "../service");
    w.import_type(&[ctx.input_type.as_str()], &format!("../{}", ctx.type_module));
    w.blank();

    w.open(format!("export function {}() {{", ctx.components.create_page));
    w.line("const navigate = useNavigate();");
    w.line(format!("const createMutation = {}();", ctx.hooks.create));
    w.blank();
    w.open(format!(
        "const handleSubmit = async (values: {}) => {{",
        ctx.input_type
    ));
    w.line("await createMutation.mutateAsync(values);");
    w.line(format!("navigate('{}');", ctx.route_base));
    w.close("};");
    w.blank();
    w.open("return (");
    w.open("<EntityForm");
    w.line(format!(
        "title={{{}}}",
        quote(&format!("Create {}", ctx.display_name))
    ));
    w.line(format!("fields={{{}()}}", ctx.components.create_form_fields));
    w.line("submitting={createMutation.isPending}");
    w.line("onSubmit={handleSubmit}");
    w.line(format!("onCancel={{() => navigate('{}')}}", ctx.route_base));
    w.close("/>");
    w.close(");");
    w.close("}");
    w.finish()
}

fn render_edit(ctx: &NamingContext) -> String {
    let c = &ctx.components;
    let mut w = CodeWriter::new();
    w.import(&["useNavigate"], "react-router-dom");
    w.import(&["useForm"], "react-hook-form");
    w.import(&["EntityForm"], "@/components/form");
    w.import(
        &[c.edit_form_fields.as_str(), c.edit_form_values.as_str()],
        "../forms/edit",
    );
    w.import(
        &[ctx.hooks.get.as_str(), ctx.hooks.update.as_str()],
        "../service",
    );
    w.import_type(&[ctx.input_type.as_str()], &format!("../{}", ctx.type_module));
    w.blank();

    w.open(format!("export interface {}Props {{", c.edit_page));
    w.line("id: string;");
    w.close("}");
    w.blank();

    w.open(format!(
        "export function {0}({{ id }}: {0}Props) {{",
        c.edit_page
    ));
    w.line("const navigate = useNavigate();");
    w.line("const form = useForm<Record<string, unknown>>();");
    w.line(format!("const {{ data: record, isLoading }} = {}(id);", ctx.hooks.get));
    w.line(format!("const updateMutation = {}();", ctx.hooks.update));
    w.line(format!("{}(form, record);", c.edit_form_values));
    w.blank();
    w.open(format!(
        "const handleSubmit = async (values: {}) => {{",
        ctx.input_type
    ));
    w.line("await updateMutation.mutateAsync({ id, data: values });");
    w.line(format!("navigate('{}');", ctx.route_base));
    w.close("};");
    w.blank();
    w.open("return (");
    w.open("<EntityForm");
    w.line("form={form}");
    w.line(format!(
        "title={{{}}}",
        quote(&format!("Edit {}", ctx.display_name))
    ));
    w.line(format!("fields={{{}()}}", c.edit_form_fields));
    w.line("loading={isLoading}");
    w.line("submitting={updateMutation.isPending}");
    w.line("onSubmit={handleSubmit}");
    w.line(format!("onCancel={{() => navigate('{}')}}", ctx.route_base));
    w.close("/>");
    w.close(");");
    w.close("}");
    w.finish()
}

/// Relation tab components; `fetch` uses the relation hooks, otherwise the
/// tab reads the related data from the loaded record
fn render_tabs(w: &mut CodeWriter, ctx: &NamingContext, fetch: bool, export: bool) {
    let export = if export { "export " } else { "" };
    w.blank();
    w.open(format!("interface {}TabProps {{", ctx.entity));
    w.line("id: string;");
    w.line(format!("record: {};", ctx.entity));
    w.close("}");

    for relation in &ctx.relations {
        w.blank();
        let items = tab_items(relation, fetch);
        let props = if fetch { "{ id }" } else { "{ record }" };
        w.open(format!(
            "{export}function {}({props}: {}TabProps) {{",
            relation.tab_component, ctx.entity
        ));
        if fetch {
            if relation.is_many() {
                w.line(format!("const {{ data = [] }} = {}(id);", relation.use_get));
            } else {
                w.line(format!("const {{ data }} = {}(id);", relation.use_get));
            }
        }
        w.line(format!(
            "return <RelationList items={{{items}}} basePath=\"{}\" />;",
            relation.target_route
        ));
        w.close("}");
    }
}

fn tab_items(relation: &RelationNames, fetch: bool) -> String {
    match (fetch, relation.is_many()) {
        (true, true) => "data".to_string(),
        (true, false) => "data ? [data] : []".to_string(),
        (false, true) => format!("record.{} ?? []", relation.field_name),
        (false, false) => format!(
            "record.{0} ? [record.{0}] : []",
            relation.field_name
        ),
    }
}

fn render_tab_list(w: &mut CodeWriter, ctx: &NamingContext, id: &str, record: &str) {
    w.open("<Tabs");
    w.open("items={[");
    for relation in &ctx.relations {
        w.line(format!(
            "{{ key: {}, label: {}, content: <{} id={{{id}}} record={{{record}}} /> }},",
            quote(&relation.field_name),
            quote(&NameHelpers::to_title(&relation.field_name)),
            relation.tab_component,
        ));
    }
    w.close("]}");
    w.close("/>");
}

fn render_view(ctx: &NamingContext, fields: &[EntityField]) -> String {
    let fetch = ctx.relation_endpoints();
    let has_relations = !ctx.relations.is_empty();

    let mut components = vec!["DetailView"];
    if has_relations {
        components.extend(["RelationList", "Tabs"]);
    }
    let mut hooks = vec![ctx.hooks.get.as_str()];
    if fetch {
        hooks.extend(ctx.relations.iter().map(|r| r.use_get.as_str()));
    }

    let mut w = CodeWriter::new();
    w.import(&["useNavigate"], "react-router-dom");
    w.import(&components, "@/components/detail");
    w.import(&hooks, "../service");
    if has_relations {
        w.import_type(&[ctx.entity.as_str()], &format!("../{}", ctx.type_module));
    }
    if has_relations {
        render_tabs(&mut w, ctx, fetch, true);
    }
    w.blank();

    w.open(format!("export interface {}Props {{", ctx.components.view_page));
    w.line("id: string;");
    w.close("}");
    w.blank();

    w.open(format!(
        "export function {0}({{ id }}: {0}Props) {{",
        ctx.components.view_page
    ));
    w.line("const navigate = useNavigate();");
    w.line(format!("const {{ data: record, isLoading }} = {}(id);", ctx.hooks.get));
    w.blank();
    w.open("if (isLoading || !record) {");
    w.line("return <DetailView loading />;");
    w.close("}");
    w.blank();
    w.open("return (");
    w.open("<DetailView");
    w.line(format!("title={{{}}}", quote(&ctx.display_name)));
    w.line("record={record}");
    w.open("fields={[");
    for field in fields.iter().filter(|f| f.field_type() != FieldType::Hidden) {
        w.line(format!(
            "{{ name: {}, label: {} }},",
            quote(&field.name),
            quote(&field.label)
        ));
    }
    w.close("]}");
    w.line(format!(
        "onEdit={{() => navigate(`{}/edit/${{id}}`)}}",
        ctx.route_base
    ));
    w.line(format!("onBack={{() => navigate('{}')}}", ctx.route_base));
    if has_relations {
        w.close(">");
        w.indent();
        render_tab_list(&mut w, ctx, "id", "record");
        w.close("</DetailView>");
    } else {
        w.close("/>");
    }
    w.close(");");
    w.close("}");
    w.finish()
}

fn view_modes(config: &FeatureConfig) -> (Vec<ViewMode>, ViewMode) {
    let mut modes: Vec<ViewMode> = Vec::new();
    for mode in &config.view_modes {
        if !modes.contains(mode) {
            modes.push(*mode);
        }
    }
    if modes.is_empty() {
        modes.push(config.default_view_mode);
    }
    let initial = if modes.contains(&config.default_view_mode) {
        config.default_view_mode
    } else {
        modes[0]
    };
    (modes, initial)
}

fn render_list(
    ctx: &NamingContext,
    config: &FeatureConfig,
    fields: &[EntityField],
    has_query: bool,
) -> String {
    let c = &ctx.components;
    let key = primary_key(fields);
    let has_relations = !ctx.relations.is_empty();
    let show_filters = has_query && config.has_filters;
    let (modes, initial) = view_modes(config);
    let mode_type = modes
        .iter()
        .map(|m| format!("'{m}'"))
        .collect::<Vec<_>>()
        .join(" | ");
    let mode_list = modes
        .iter()
        .map(|m| format!("'{m}'"))
        .collect::<Vec<_>>()
        .join(", ");

    let mut components = vec!["DataTable"];
    if config.has_search {
        components.push("SearchInput");
    }
    if show_filters {
        components.push("QueryBar");
    }
    if has_relations {
        components.extend(["RelationList", "Tabs"]);
    }

    let mut w = CodeWriter::new();
    w.import(&["useState"], "react");
    w.import(&["useNavigate", "useParams"], "react-router-dom");
    w.import(&components, "@/components/list");
    w.import(&[c.table_columns.as_str()], "../config/table");
    if show_filters {
        w.import(&[c.query_fields.as_str()], "../config/query");
    }
    w.import(&[c.topbar.as_str()], "../topbar");
    w.import(
        &[ctx.hooks.delete.as_str(), ctx.hooks.list.as_str()],
        "../service",
    );
    w.import(&[c.create_page.as_str()], "./create");
    w.import(&[c.edit_page.as_str()], "./edit");
    w.import(&[c.view_page.as_str()], "./view");
    w.import_type(
        &[ctx.entity.as_str(), ctx.query_params_type.as_str()],
        &format!("../{}", ctx.type_module),
    );
    if has_relations {
        render_tabs(&mut w, ctx, false, false);
    }
    w.blank();

    w.open(format!("export function {}() {{", c.list_page));
    w.line("const { mode, slug } = useParams<{ mode?: string; slug?: string }>();");
    w.line("const navigate = useNavigate();");
    let initial_params = if config.has_pagination {
        "{ page: 1, pageSize: 20 }"
    } else {
        "{}"
    };
    w.line(format!(
        "const [params, setParams] = useState<{}>({initial_params});",
        ctx.query_params_type
    ));
    w.line(format!(
        "const [viewMode, setViewMode] = useState<{mode_type}>('{initial}');"
    ));
    if has_relations {
        w.line(format!(
            "const [expanded, setExpanded] = useState<{} | null>(null);",
            ctx.entity
        ));
    }
    w.line(format!("const {{ data, isLoading }} = {}(params);", ctx.hooks.list));
    w.line(format!("const deleteMutation = {}();", ctx.hooks.delete));
    w.blank();

    w.open("if (mode === 'create') {");
    w.line(format!("return <{} />;", c.create_page));
    w.close("}");
    w.open("if (mode === 'edit' && slug) {");
    w.line(format!("return <{} id={{slug}} />;", c.edit_page));
    w.close("}");
    w.open("if (mode === 'view' && slug) {");
    w.line(format!("return <{} id={{slug}} />;", c.view_page));
    w.close("}");
    w.blank();

    let route = &ctx.route_base;
    w.open(format!("const columns = {}({{", c.table_columns));
    w.line(format!(
        "onView: (record) => navigate(`{route}/view/${{record.{key}}}`),"
    ));
    w.line(format!(
        "onEdit: (record) => navigate(`{route}/edit/${{record.{key}}}`),"
    ));
    w.line(format!(
        "onDelete: (record) => deleteMutation.mutate(record.{key}),"
    ));
    w.close("});");
    w.blank();

    w.open("return (");
    w.open("<div className=\"space-y-4\">");
    w.line(format!("<{} />", c.topbar));
    if config.has_search {
        w.open("<SearchInput");
        w.line("value={params.search ?? ''}");
        w.line("onChange={(search) => setParams({ ...params, search, page: 1 })}");
        w.close("/>");
    }
    if show_filters {
        w.open("<QueryBar");
        w.line(format!("fields={{{}()}}", c.query_fields));
        w.line("onSearch={(values) => setParams({ ...params, ...values, page: 1 })}");
        w.close("/>");
    }
    w.open("<DataTable");
    w.line("columns={columns}");
    w.line("data={data?.items ?? []}");
    w.line("loading={isLoading}");
    w.line(format!("viewModes={{[{mode_list}]}}"));
    w.line("viewMode={viewMode}");
    w.line("onViewModeChange={setViewMode}");
    if config.has_pagination {
        w.open("pagination={{");
        w.line("page: params.page ?? 1,");
        w.line("pageSize: params.pageSize ?? 20,");
        w.line("total: data?.total ?? 0,");
        w.line("onChange: (page, pageSize) => setParams({ ...params, page, pageSize }),");
        w.close("}}");
    }
    if has_relations {
        w.line("onRowExpand={setExpanded}");
    }
    w.close("/>");
    if has_relations {
        w.open("{expanded && (");
        render_tab_list(&mut w, ctx, &format!("expanded.{key}"), "expanded");
        w.close(")}");
    }
    w.close("</div>");
    w.close(");");
    w.close("}");
    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RelationType;

    fn fields() -> Vec<EntityField> {
        vec![
            EntityField::primary_id(),
            EntityField::new("f_title", "title").required(),
        ]
    }

    fn relations() -> Vec<EntityRelation> {
        vec![
            EntityRelation::new("r1").with_target("Order"),
            EntityRelation::new("r2")
                .with_type(RelationType::OneToOne)
                .with_target("Profile"),
        ]
    }

    #[test]
    fn test_create_and_edit_pages_use_shared_names() {
        let pages = generate_pages(&FeatureConfig::new("Product"), &fields(), &[]);
        assert!(pages.create.contains("import { getProductCreateFormFields } from '../forms/create';"));
        assert!(pages.create.contains("import { useCreateProduct } from '../service';"));
        assert!(pages.create.contains("export function ProductCreatePage() {"));
        assert!(pages.edit.contains("  getProductEditFormFields,\n  useProductEditFormValues,\n"));
        assert!(pages.edit.contains("} from '../forms/edit';"));
        assert!(pages.edit.contains("useProductEditFormValues(form, record);"));
        assert!(pages.edit.contains("navigate('/products');"));
    }

    #[test]
    fn test_list_page_switches_on_mode() {
        let pages = generate_pages(&FeatureConfig::new("Product"), &fields(), &[]);
        assert!(pages.list.contains("if (mode === 'create') {"));
        assert!(pages.list.contains("return <ProductEditPage id={slug} />;"));
        assert!(pages.list.contains("return <ProductViewPage id={slug} />;"));
        assert!(pages.list.contains("onView: (record) => navigate(`/products/view/${record.id}`),"));
        assert!(pages.list.contains("pagination={{"));
        assert!(pages.list.contains("<SearchInput"));
        assert!(!pages.list.contains("TabProps"));
    }

    #[test]
    fn test_relation_tabs_without_endpoints_read_record() {
        let pages = generate_pages(&FeatureConfig::new("Product"), &fields(), &relations());
        assert!(pages.view.contains("export function ProductOrdersTab({ record }: ProductTabProps) {"));
        assert!(pages.view.contains("items={record.orders ?? []}"));
        assert!(pages.view.contains("items={record.profile ? [record.profile] : []}"));
        assert!(!pages.view.contains("useProductOrders"));
        assert!(pages.list.contains("function ProductProfileTab({ record }: ProductTabProps) {"));
        assert!(pages.list.contains("{expanded && ("));
    }

    #[test]
    fn test_relation_tabs_with_endpoints_fetch() {
        let config = FeatureConfig::new("Product").with_custom_api(false);
        let pages = generate_pages(&config, &fields(), &relations());
        assert!(pages.view.contains("import { useProduct, useProductOrders, useProductProfile } from '../service';"));
        assert!(pages.view.contains("const { data = [] } = useProductOrders(id);"));
        assert!(pages.view.contains("items={data ? [data] : []}"));
    }

    #[test]
    fn test_view_modes_and_filters() {
        let mut config = FeatureConfig::new("Product");
        config.view_modes = vec![ViewMode::Table, ViewMode::Grid, ViewMode::Table];
        config.default_view_mode = ViewMode::Grid;
        config.has_filters = true;
        config.has_search = false;
        config.has_pagination = false;

        let pages = generate_pages(&config, &fields(), &[]);
        assert!(pages.list.contains("useState<'table' | 'grid'>('grid');"));
        assert!(pages.list.contains("viewModes={['table', 'grid']}"));
        assert!(pages.list.contains("import { getProductQueryFields } from '../config/query';"));
        assert!(!pages.list.contains("SearchInput"));
        assert!(!pages.list.contains("pagination"));
    }
}

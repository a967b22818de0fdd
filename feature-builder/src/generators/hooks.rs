//! Data-access hooks (`service.ts`)
//!
//! Query keys follow `[{lower}Service, kind, ...params]`. Mutations invalidate
//! the list key and, where an id is known, the item key.

use super::writer::CodeWriter;
use crate::model::{EntityRelation, FeatureConfig};
use crate::naming::{NamingContext, RelationNames};

/// Generate the data-access hooks
#[must_use]
pub fn generate_data_hooks(config: &FeatureConfig, relations: &[EntityRelation]) -> String {
    render(&NamingContext::new(config, relations))
}

/// API bindings the hooks import, in import order
pub(crate) fn imported_bindings(ctx: &NamingContext) -> Vec<&str> {
    let e = &ctx.endpoints;
    let mut names = vec![
        e.create.as_str(),
        e.get.as_str(),
        e.update.as_str(),
        e.delete.as_str(),
        e.list.as_str(),
    ];
    if ctx.relation_endpoints() {
        for relation in &ctx.relations {
            names.extend([
                relation.get.as_str(),
                relation.attach.as_str(),
                relation.detach.as_str(),
            ]);
        }
    }
    names
}

pub(crate) fn render(ctx: &NamingContext) -> String {
    let keys = &ctx.hooks.keys;
    let e = &ctx.endpoints;
    let h = &ctx.hooks;
    let input = &ctx.input_type;
    let params = &ctx.query_params_type;
    let mut w = CodeWriter::new();

    w.import(
        &["useMutation", "useQuery", "useQueryClient"],
        "@tanstack/react-query",
    );
    w.import(&imported_bindings(ctx), "./apis");
    w.import_type(&[input.as_str(), params.as_str()], &format!("./{}", ctx.type_module));
    w.blank();

    w.open(format!("export const {keys} = {{"));
    w.line(format!("all: ['{}'] as const,", ctx.cache_root()));
    w.line(format!("lists: () => [...{keys}.all, 'list'] as const,"));
    w.line(format!(
        "list: (params?: {params}) => [...{keys}.lists(), params ?? {{}}] as const,"
    ));
    w.line(format!("details: () => [...{keys}.all, 'get'] as const,"));
    w.line(format!(
        "detail: (id: string) => [...{keys}.details(), id] as const,"
    ));
    if ctx.relation_endpoints() && !ctx.relations.is_empty() {
        w.line(format!(
            "relation: (relation: string, id: string) => [...{keys}.all, relation, id] as const,"
        ));
    }
    w.close("};");

    w.blank();
    w.open(format!("export function {}(id?: string) {{", h.get));
    w.open("return useQuery({");
    w.line(format!("queryKey: {keys}.detail(id ?? ''),"));
    w.line(format!("queryFn: () => {}(id as string),", e.get));
    w.line("enabled: Boolean(id),");
    w.close("});");
    w.close("}");

    w.blank();
    w.open(format!("export function {}(params?: {params}) {{", h.list));
    w.open("return useQuery({");
    w.line(format!("queryKey: {keys}.list(params),"));
    w.line(format!("queryFn: () => {}(params),", e.list));
    w.close("});");
    w.close("}");

    w.blank();
    open_mutation(&mut w, &h.create);
    w.line(format!("mutationFn: (data: {input}) => {}(data),", e.create));
    w.open("onSuccess: () => {");
    w.line(format!("queryClient.invalidateQueries({{ queryKey: {keys}.lists() }});"));
    w.close("},");
    close_mutation(&mut w);

    w.blank();
    open_mutation(&mut w, &h.update);
    w.line(format!(
        "mutationFn: ({{ id, data }}: {{ id: string; data: Partial<{input}> }}) =>"
    ));
    w.line(format!("  {}(id, data),", e.update));
    w.open("onSuccess: (_result, { id }) => {");
    w.line(format!("queryClient.invalidateQueries({{ queryKey: {keys}.lists() }});"));
    w.line(format!("queryClient.invalidateQueries({{ queryKey: {keys}.detail(id) }});"));
    w.close("},");
    close_mutation(&mut w);

    w.blank();
    open_mutation(&mut w, &h.delete);
    w.line(format!("mutationFn: (id: string) => {}(id),", e.delete));
    w.open("onSuccess: (_result, id) => {");
    w.line(format!("queryClient.invalidateQueries({{ queryKey: {keys}.lists() }});"));
    w.line(format!("queryClient.removeQueries({{ queryKey: {keys}.detail(id) }});"));
    w.close("},");
    close_mutation(&mut w);

    if ctx.relation_endpoints() {
        for relation in &ctx.relations {
            render_relation_hooks(&mut w, keys, relation);
        }
    }

    w.finish()
}

fn open_mutation(w: &mut CodeWriter, name: &str) {
    w.open(format!("export function {name}() {{"));
    w.line("const queryClient = useQueryClient();");
    w.open("return useMutation({");
}

fn close_mutation(w: &mut CodeWriter) {
    w.close("});");
    w.close("}");
}

fn render_relation_hooks(w: &mut CodeWriter, keys: &str, relation: &RelationNames) {
    let key = format!("{keys}.relation('{}', id)", relation.field_name);

    w.blank();
    w.open(format!("export function {}(id?: string) {{", relation.use_get));
    w.open("return useQuery({");
    w.line(format!(
        "queryKey: {keys}.relation('{}', id ?? ''),",
        relation.field_name
    ));
    w.line(format!("queryFn: () => {}(id as string),", relation.get));
    w.line("enabled: Boolean(id),");
    w.close("});");
    w.close("}");

    let invalidate = |w: &mut CodeWriter| {
        w.line(format!("queryClient.invalidateQueries({{ queryKey: {keys}.detail(id) }});"));
        w.line(format!("queryClient.invalidateQueries({{ queryKey: {key} }});"));
    };

    w.blank();
    open_mutation(w, &relation.use_attach);
    if relation.is_many() {
        w.line("mutationFn: ({ id, relatedIds }: { id: string; relatedIds: string[] }) =>");
        w.line(format!("  {}(id, relatedIds),", relation.attach));
    } else {
        w.line("mutationFn: ({ id, relatedId }: { id: string; relatedId: string }) =>");
        w.line(format!("  {}(id, relatedId),", relation.attach));
    }
    w.open("onSuccess: (_result, { id }) => {");
    invalidate(w);
    w.close("},");
    close_mutation(w);

    w.blank();
    open_mutation(w, &relation.use_detach);
    if relation.is_many() {
        w.line("mutationFn: ({ id, relatedIds }: { id: string; relatedIds: string[] }) =>");
        w.line(format!("  {}(id, relatedIds),", relation.detach));
    } else {
        w.line(format!(
            "mutationFn: ({{ id }}: {{ id: string }}) => {}(id),",
            relation.detach
        ));
    }
    w.open("onSuccess: (_result, { id }) => {");
    invalidate(w);
    w.close("},");
    close_mutation(w);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::api;
    use crate::model::RelationType;

    fn relations() -> Vec<EntityRelation> {
        vec![
            EntityRelation::new("r1").with_target("Order"),
            EntityRelation::new("r2")
                .with_type(RelationType::OneToOne)
                .with_target("Profile"),
        ]
    }

    #[test]
    fn test_imports_are_api_exports() {
        for config in [
            FeatureConfig::new("Product"),
            FeatureConfig::new("Product").with_custom_api(true),
        ] {
            let ctx = NamingContext::new(&config, &relations());
            let apis = api::render(&ctx);
            for name in imported_bindings(&ctx) {
                assert!(
                    apis.contains(&format!("export const {name} = ")),
                    "{name} is not exported"
                );
            }
        }
    }

    #[test]
    fn test_cache_keys() {
        let out = generate_data_hooks(&FeatureConfig::new("Product"), &[]);
        assert!(out.contains("all: ['productService'] as const,"));
        assert!(out.contains("details: () => [...productKeys.all, 'get'] as const,"));
        assert!(out.contains("queryClient.invalidateQueries({ queryKey: productKeys.lists() });"));
        assert!(out.contains("queryClient.invalidateQueries({ queryKey: productKeys.detail(id) });"));
        assert!(!out.contains("relation:"));
    }

    #[test]
    fn test_standard_hooks() {
        let out = generate_data_hooks(&FeatureConfig::new("Product"), &relations());
        for hook in [
            "useProduct(id?: string)",
            "useProductList(params?: ProductQueryParams)",
            "useCreateProduct()",
            "useUpdateProduct()",
            "useDeleteProduct()",
        ] {
            assert!(out.contains(&format!("export function {hook}")), "{hook}");
        }
        assert!(!out.contains("useProductOrders"));
    }

    #[test]
    fn test_relation_hooks() {
        let config = FeatureConfig::new("Product").with_custom_api(false);
        let out = generate_data_hooks(&config, &relations());
        assert!(out.contains("export function useProductOrders(id?: string)"));
        assert!(out.contains("export function useAddProductOrders()"));
        assert!(out.contains("export function useSetProductProfile()"));
        assert!(out.contains("export function useRemoveProductProfile()"));
        assert!(out.contains("queryKey: productKeys.relation('orders', id) });"));
        assert!(out.contains("mutationFn: ({ id }: { id: string }) => removeProductProfile(id),"));
    }
}

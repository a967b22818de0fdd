//! REST API client (`apis.ts`)
//!
//! Emits one service object bound to the entity's base URL plus a standalone
//! binding per endpoint. The binding names are the contract with the data
//! hooks and must match [`NamingContext::api_bindings`].

use super::entity::stub_types;
use super::writer::{quote, CodeWriter};
use crate::model::{EntityRelation, FeatureConfig};
use crate::naming::{NamingContext, RelationNames};

/// Generate the API client
///
/// # Examples
///
/// ```
/// # use feature_builder::model::FeatureConfig;
/// # use feature_builder::generators::generate_api_client;
/// let out = generate_api_client(&FeatureConfig::new("Product"), &[]);
/// assert!(out.contains("const BASE_URL = '/api/Products';"));
/// assert!(out.contains("export const getProductList = productService.list;"));
/// ```
#[must_use]
pub fn generate_api_client(config: &FeatureConfig, relations: &[EntityRelation]) -> String {
    render(&NamingContext::new(config, relations))
}

/// `(binding name, service method)` pairs in output order
fn bindings(ctx: &NamingContext) -> Vec<(&str, String)> {
    let e = &ctx.endpoints;
    let mut pairs = vec![
        (e.create.as_str(), "create".to_string()),
        (e.get.as_str(), "get".to_string()),
        (e.update.as_str(), "update".to_string()),
        (e.delete.as_str(), "delete".to_string()),
        (e.list.as_str(), "list".to_string()),
    ];

    if ctx.custom_api {
        pairs.push((e.search.as_str(), "search".to_string()));
        pairs.push((e.toggle_status.as_str(), "toggleStatus".to_string()));
        if ctx.file_upload {
            pairs.push((e.upload_file.as_str(), "uploadFile".to_string()));
        }
        for relation in &ctx.relations {
            let [get, attach, detach] = relation_methods(relation);
            pairs.push((relation.get.as_str(), get));
            pairs.push((relation.attach.as_str(), attach));
            pairs.push((relation.detach.as_str(), detach));
        }
    }

    pairs
}

fn relation_methods(relation: &RelationNames) -> [String; 3] {
    let suffix = &relation.suffix;
    let attach = if relation.is_many() { "add" } else { "set" };
    [
        format!("get{suffix}"),
        format!("{attach}{suffix}"),
        format!("remove{suffix}"),
    ]
}

pub(crate) fn render(ctx: &NamingContext) -> String {
    let entity = &ctx.entity;
    let input = &ctx.input_type;
    let params = &ctx.query_params_type;
    let mut w = CodeWriter::new();

    w.import(&["request"], "@/utils/request");
    let mut type_names = vec![
        entity.as_str(),
        input.as_str(),
        params.as_str(),
        "PaginatedResult",
    ];
    if ctx.custom_api {
        type_names.extend(stub_types(ctx));
    }
    w.import_type(&type_names, &format!("./{}", ctx.type_module));
    w.blank();
    w.line(format!("const BASE_URL = {};", quote(&ctx.base_url)));
    w.blank();

    w.open(format!("export const {} = {{", ctx.service));
    w.line(format!("create: (data: {input}) =>"));
    w.line(format!("  request.post<{entity}>(BASE_URL, data),"));
    w.line("get: (id: string) =>");
    w.line(format!("  request.get<{entity}>(`${{BASE_URL}}/${{id}}`),"));
    w.line(format!("update: (id: string, data: Partial<{input}>) =>"));
    w.line(format!("  request.put<{entity}>(`${{BASE_URL}}/${{id}}`, data),"));
    w.line("delete: (id: string) =>");
    w.line("  request.delete<void>(`${BASE_URL}/${id}`),");
    w.line(format!("list: (params?: {params}) =>"));
    w.line(format!(
        "  request.get<PaginatedResult<{entity}>>(BASE_URL, {{ params }}),"
    ));

    if ctx.custom_api {
        w.line(format!("search: (query: string, params?: {params}) =>"));
        w.open(format!(
            "  request.get<PaginatedResult<{entity}>>(`${{BASE_URL}}/search`, {{"
        ));
        w.line("  params: { ...params, search: query },");
        w.close("  }),");
        w.line("toggleStatus: (id: string, status: string) =>");
        w.line(format!(
            "  request.patch<{entity}>(`${{BASE_URL}}/${{id}}/status`, {{ status }}),"
        ));
        if ctx.file_upload {
            w.open("uploadFile: (id: string, file: File) => {");
            w.line("const form = new FormData();");
            w.line("form.append('file', file);");
            w.line("return request.post<string[]>(`${BASE_URL}/${id}/files`, form);");
            w.close("},");
        }
        for relation in &ctx.relations {
            render_relation_methods(&mut w, relation);
        }
    }
    w.close("};");

    w.blank();
    for (binding, method) in bindings(ctx) {
        w.line(format!("export const {binding} = {}.{method};", ctx.service));
    }

    w.finish()
}

fn render_relation_methods(w: &mut CodeWriter, relation: &RelationNames) {
    let [get, attach, detach] = relation_methods(relation);
    let target = &relation.target_type;
    let path = format!("`${{BASE_URL}}/${{id}}/{}`", relation.field_name);

    if relation.is_many() {
        w.line(format!("{get}: (id: string) =>"));
        w.line(format!("  request.get<{target}[]>({path}),"));
        w.line(format!("{attach}: (id: string, relatedIds: string[]) =>"));
        w.line(format!("  request.post<void>({path}, {{ ids: relatedIds }}),"));
        w.line(format!("{detach}: (id: string, relatedIds: string[]) =>"));
        w.line(format!(
            "  request.delete<void>({path}, {{ data: {{ ids: relatedIds }} }}),"
        ));
    } else {
        w.line(format!("{get}: (id: string) =>"));
        w.line(format!("  request.get<{target}>({path}),"));
        w.line(format!("{attach}: (id: string, relatedId: string) =>"));
        w.line(format!("  request.put<void>({path}, {{ id: relatedId }}),"));
        w.line(format!("{detach}: (id: string) =>"));
        w.line(format!("  request.delete<void>({path}),"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn test_binding_names_match_context() {
        for config in [
            FeatureConfig::new("Product"),
            FeatureConfig::new("Product").with_custom_api(false),
            FeatureConfig::new("Product").with_custom_api(true),
        ] {
            let ctx = NamingContext::new(&config, &relations());
            let names: Vec<&str> = bindings(&ctx).into_iter().map(|(name, _)| name).collect();
            assert_eq!(names, ctx.api_bindings());
        }
    }

    #[test]
    fn test_standard_endpoints_only() {
        let out = generate_api_client(&FeatureConfig::new("Product"), &relations());
        assert!(out.contains("export const createProduct = productService.create;"));
        assert!(out.contains("export const deleteProduct = productService.delete;"));
        assert!(!out.contains("search"));
        assert!(!out.contains("getProductOrders"));
        assert!(!out.contains("uploadFile"));
    }

    #[test]
    fn test_custom_endpoints() {
        let config = FeatureConfig::new("Product").with_custom_api(false);
        let out = generate_api_client(&config, &relations());
        assert!(out.contains("export const searchProductList = productService.search;"));
        assert!(out.contains("export const toggleProductStatus = productService.toggleStatus;"));
        assert!(out.contains("export const addProductOrders = productService.addOrders;"));
        assert!(out.contains("export const setProductProfile = productService.setProfile;"));
        assert!(out.contains("removeProfile: (id: string) =>"));
        assert!(out.contains("`${BASE_URL}/${id}/orders`"));
        assert!(!out.contains("uploadProductFile"));
    }

    #[test]
    fn test_file_upload_endpoint() {
        let config = FeatureConfig::new("Product").with_custom_api(true);
        let out = generate_api_client(&config, &[]);
        assert!(out.contains("export const uploadProductFile = productService.uploadFile;"));
        assert!(out.contains("form.append('file', file);"));
    }

    #[test]
    fn test_base_url_uses_prefix_and_plural() {
        let config = FeatureConfig::new("Person")
            .with_plural_name("People")
            .with_api_prefix("/api/v2/");
        let out = generate_api_client(&config, &[]);
        assert!(out.contains("const BASE_URL = '/api/v2/People';"));
    }
}

//! Fixed-shape scaffolding: action bar (`topbar.tsx`) and routes
//! (`routes.tsx`)

use super::writer::{quote, CodeWriter};
use crate::model::FeatureConfig;
use crate::naming::NamingContext;

/// Generate the action bar with a create button
#[must_use]
pub fn generate_topbar(config: &FeatureConfig) -> String {
    render_topbar(&NamingContext::new(config, &[]))
}

/// Generate the three list routes
///
/// # Examples
///
/// ```
/// # use feature_builder::model::FeatureConfig;
/// # use feature_builder::generators::generate_routes;
/// let out = generate_routes(&FeatureConfig::new("Product"));
/// assert!(out.contains("{ path: '/products/:mode/:slug', element: <ProductListPage /> },"));
/// ```
#[must_use]
pub fn generate_routes(config: &FeatureConfig) -> String {
    render_routes(&NamingContext::new(config, &[]))
}

pub(crate) fn render_topbar(ctx: &NamingContext) -> String {
    let mut w = CodeWriter::new();
    w.import(&["useNavigate"], "react-router-dom");
    w.import(&["Button"], "@/components/ui/button");
    w.blank();
    w.open(format!("export function {}() {{", ctx.components.topbar));
    w.line("const navigate = useNavigate();");
    w.blank();
    w.open("return (");
    w.open("<div className=\"flex items-center justify-between\">");
    w.line(format!(
        "<h1 className=\"text-xl font-semibold\">{{{}}}</h1>",
        quote(&ctx.display_plural)
    ));
    w.open(format!(
        "<Button onClick={{() => navigate('{}/create')}}>",
        ctx.route_base
    ));
    w.line(format!("{{{}}}", quote(&format!("Create {}", ctx.display_name))));
    w.close("</Button>");
    w.close("</div>");
    w.close(");");
    w.close("}");
    w.finish()
}

pub(crate) fn render_routes(ctx: &NamingContext) -> String {
    let base = &ctx.route_base;
    let page = &ctx.components.list_page;
    let mut w = CodeWriter::new();
    w.import_type(&["RouteObject"], "react-router-dom");
    w.import(&[page.as_str()], "./pages/list");
    w.blank();
    w.open(format!(
        "export const {}: RouteObject[] = [",
        ctx.components.routes
    ));
    for path in [base.clone(), format!("{base}/:mode"), format!("{base}/:mode/:slug")] {
        w.line(format!("{{ path: '{path}', element: <{page} /> }},"));
    }
    w.close("];");
    w.finish()
}

//! Artifact set assembly
//!
//! [`generate_all_code_files`] derives the naming context once and invokes
//! every generator in a fixed order. The result is an ordered list of
//! `(path, content)` pairs; identical input always yields identical output.

use crate::generators::{api, entity, forms, hooks, pages, query, relations, scaffold, table};
use crate::model::{EntityField, EntityRelation, FeatureConfig};
use crate::naming::NamingContext;

/// One generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the feature folder, `/`-separated
    pub path: String,
    /// File content
    pub content: String,
    /// File description for user feedback
    pub description: String,
}

/// Ordered mapping from relative path to generated content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactSet {
    /// Lower-cased entity name; the archive root folder
    pub folder: String,
    files: Vec<GeneratedFile>,
}

impl ArtifactSet {
    fn push(&mut self, path: impl Into<String>, content: String, description: &str) {
        let path = path.into();
        tracing::debug!(path = %path, bytes = content.len(), "Generated artifact");
        self.files.push(GeneratedFile {
            path,
            content,
            description: description.to_string(),
        });
    }

    /// Content of the file at `path`
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|f| f.path == path)
            .map(|f| f.content.as_str())
    }

    /// Whether a file exists at `path`
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Paths in generation order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.path.as_str())
    }

    /// Files in generation order
    #[must_use]
    pub fn files(&self) -> &[GeneratedFile] {
        &self.files
    }

    /// Number of files
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl<'a> IntoIterator for &'a ArtifactSet {
    type Item = &'a GeneratedFile;
    type IntoIter = std::slice::Iter<'a, GeneratedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

/// Generate every artifact of a feature
///
/// Order: entity types, API client, data hooks, relations helper (only
/// with relations), create and edit forms, query fields (only when a field
/// qualifies), table columns, topbar, the four pages, routes.
///
/// # Examples
///
/// ```
/// # use feature_builder::model::{EntityField, FeatureConfig};
/// # use feature_builder::orchestrator::generate_all_code_files;
/// let fields = vec![EntityField::primary_id()];
/// let set = generate_all_code_files(&FeatureConfig::new("Product"), &fields, &[]);
/// assert!(set.contains("product.d.ts"));
/// assert!(!set.contains("relations.ts"));
/// ```
#[must_use]
pub fn generate_all_code_files(
    config: &FeatureConfig,
    fields: &[EntityField],
    relations: &[EntityRelation],
) -> ArtifactSet {
    let ctx = NamingContext::new(config, relations);

    for field in fields {
        if field.kind.options().is_some_and(<[_]>::is_empty) {
            tracing::warn!(
                field = %field.name,
                field_type = %field.field_type(),
                "Choice field has no options; generated inputs will be empty"
            );
        }
    }

    let mut set = ArtifactSet {
        folder: ctx.lower.clone(),
        files: Vec::new(),
    };

    set.push(
        format!("{}.d.ts", ctx.lower),
        entity::render(&ctx, config, fields),
        "Entity type declarations",
    );
    set.push("apis.ts", api::render(&ctx), "REST API client");
    set.push("service.ts", hooks::render(&ctx), "Data-access hooks");
    if let Some(content) = relations::render(&ctx) {
        set.push("relations.ts", content, "Relation option loaders");
    }
    set.push(
        "forms/create.tsx",
        forms::render_create(&ctx, fields),
        "Create form fields",
    );
    set.push(
        "forms/edit.tsx",
        forms::render_edit(&ctx, fields),
        "Edit form fields",
    );
    let query = query::render(&ctx, fields);
    let has_query = query.is_some();
    if let Some(content) = query {
        set.push("config/query.tsx", content, "Search and filter fields");
    }
    set.push(
        "config/table.tsx",
        table::render(&ctx, fields),
        "Table columns",
    );
    set.push("topbar.tsx", scaffold::render_topbar(&ctx), "Action bar");

    let pages = pages::render(&ctx, config, fields, has_query);
    set.push("pages/create.tsx", pages.create, "Create page");
    set.push("pages/edit.tsx", pages.edit, "Edit page");
    set.push("pages/view.tsx", pages.view, "Detail page");
    set.push("pages/list.tsx", pages.list, "List page");

    set.push("routes.tsx", scaffold::render_routes(&ctx), "Route definitions");

    tracing::debug!(feature = %config.name, files = set.len(), "Generated feature");
    set
}

//! Feature-level configuration of the entity being scaffolded

use serde::{Deserialize, Serialize};
use std::fmt;

/// Layouts the generated list page can switch between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Tabular layout (default)
    #[default]
    Table,
    /// Card grid layout
    Grid,
    /// Compact list layout
    List,
}

impl ViewMode {
    /// Identifier used in generated code
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Grid => "grid",
            Self::List => "list",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The entity/module being scaffolded
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureConfig {
    /// Entity identifier (e.g. "Product")
    pub name: String,
    /// Human-readable name
    pub display_name: String,
    /// Identifier used for list-oriented names; `name + "s"` when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plural_name: Option<String>,
    /// Free-form description
    pub description: String,
    /// URL path prefix of the generated API client
    pub api_prefix: String,
    /// Emit search, status, upload and relation endpoints
    pub has_custom_api: bool,
    /// Emit the file-upload endpoint (with `has_custom_api`)
    pub has_files: bool,
    /// Paginate the list page
    pub has_pagination: bool,
    /// Show the search bar on the list page
    pub has_search: bool,
    /// Show filter fields on the list page
    pub has_filters: bool,
    /// Supported list layouts
    pub view_modes: Vec<ViewMode>,
    /// Layout shown first
    pub default_view_mode: ViewMode,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            name: "NewFeature".to_string(),
            display_name: "New Feature".to_string(),
            plural_name: None,
            description: String::new(),
            api_prefix: "/api".to_string(),
            has_custom_api: false,
            has_files: false,
            has_pagination: true,
            has_search: true,
            has_filters: false,
            view_modes: vec![ViewMode::Table],
            default_view_mode: ViewMode::Table,
        }
    }
}

impl FeatureConfig {
    /// Create a config for `name` with default settings
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: crate::naming::NameHelpers::to_title(&name),
            name,
            ..Self::default()
        }
    }

    /// Set the plural name
    #[must_use]
    pub fn with_plural_name(mut self, plural: impl Into<String>) -> Self {
        self.plural_name = Some(plural.into());
        self
    }

    /// Set the API prefix
    #[must_use]
    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    /// Enable custom endpoints (search, status, relations)
    #[must_use]
    pub const fn with_custom_api(mut self, has_files: bool) -> Self {
        self.has_custom_api = true;
        self.has_files = has_files;
        self
    }

    /// Plural name with the `name + "s"` fallback applied
    #[must_use]
    pub fn effective_plural_name(&self) -> String {
        match self.plural_name.as_deref() {
            Some(plural) if !plural.is_empty() => plural.to_string(),
            _ => format!("{}s", self.name),
        }
    }

    /// API prefix with the `/api` fallback applied and no trailing slash
    #[must_use]
    pub fn effective_api_prefix(&self) -> String {
        let prefix = self.api_prefix.trim_end_matches('/');
        if prefix.is_empty() && self.api_prefix.is_empty() {
            "/api".to_string()
        } else {
            prefix.to_string()
        }
    }
}

/// Partial update for a [`FeatureConfig`]
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPatch {
    /// New entity name
    pub name: Option<String>,
    /// New display name
    pub display_name: Option<String>,
    /// New plural name; an empty string clears it
    pub plural_name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New API prefix
    pub api_prefix: Option<String>,
    /// Custom endpoints flag
    pub has_custom_api: Option<bool>,
    /// File upload flag
    pub has_files: Option<bool>,
    /// Pagination flag
    pub has_pagination: Option<bool>,
    /// Search flag
    pub has_search: Option<bool>,
    /// Filters flag
    pub has_filters: Option<bool>,
    /// Supported layouts
    pub view_modes: Option<Vec<ViewMode>>,
    /// Initial layout
    pub default_view_mode: Option<ViewMode>,
}

impl ConfigPatch {
    /// Apply every present attribute to `config`
    pub fn apply(self, config: &mut FeatureConfig) {
        if let Some(name) = self.name {
            config.name = name;
        }
        if let Some(display_name) = self.display_name {
            config.display_name = display_name;
        }
        if let Some(plural) = self.plural_name {
            config.plural_name = if plural.is_empty() { None } else { Some(plural) };
        }
        if let Some(description) = self.description {
            config.description = description;
        }
        if let Some(prefix) = self.api_prefix {
            config.api_prefix = prefix;
        }
        if let Some(flag) = self.has_custom_api {
            config.has_custom_api = flag;
        }
        if let Some(flag) = self.has_files {
            config.has_files = flag;
        }
        if let Some(flag) = self.has_pagination {
            config.has_pagination = flag;
        }
        if let Some(flag) = self.has_search {
            config.has_search = flag;
        }
        if let Some(flag) = self.has_filters {
            config.has_filters = flag;
        }
        if let Some(modes) = self.view_modes {
            config.view_modes = modes;
        }
        if let Some(mode) = self.default_view_mode {
            config.default_view_mode = mode;
        }
    }
}

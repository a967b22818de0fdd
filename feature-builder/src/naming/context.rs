//! Shared naming context
//!
//! Every identifier that more than one generated file refers to is derived
//! here, exactly once, from the feature config and relation list. Generators
//! read names from the context and never re-derive them.

use super::helpers::NameHelpers;
use crate::model::{EntityRelation, FeatureConfig, RelationType};

/// Standalone API bindings exported by `apis.ts`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointNames {
    /// `create{Entity}`
    pub create: String,
    /// `get{Entity}`
    pub get: String,
    /// `update{Entity}`
    pub update: String,
    /// `delete{Entity}`
    pub delete: String,
    /// `get{Entity}List`
    pub list: String,
    /// `search{Entity}List`
    pub search: String,
    /// `toggle{Entity}Status`
    pub toggle_status: String,
    /// `upload{Entity}File`
    pub upload_file: String,
}

impl EndpointNames {
    fn new(entity: &str) -> Self {
        Self {
            create: format!("create{entity}"),
            get: format!("get{entity}"),
            update: format!("update{entity}"),
            delete: format!("delete{entity}"),
            list: format!("get{entity}List"),
            search: format!("search{entity}List"),
            toggle_status: format!("toggle{entity}Status"),
            upload_file: format!("upload{entity}File"),
        }
    }
}

/// Data-access hooks exported by `service.ts`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookNames {
    /// `use{Entity}`
    pub get: String,
    /// `use{Entity}List`
    pub list: String,
    /// `useCreate{Entity}`
    pub create: String,
    /// `useUpdate{Entity}`
    pub update: String,
    /// `useDelete{Entity}`
    pub delete: String,
    /// `use{Entity}Keys` cache-key factory object
    pub keys: String,
}

impl HookNames {
    fn new(entity: &str, camel: &str) -> Self {
        Self {
            get: format!("use{entity}"),
            list: format!("use{entity}List"),
            create: format!("useCreate{entity}"),
            update: format!("useUpdate{entity}"),
            delete: format!("useDelete{entity}"),
            keys: format!("{camel}Keys"),
        }
    }
}

/// Builders and components exported by forms, config, pages and routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentNames {
    /// Create-form field builder
    pub create_form_fields: String,
    /// Edit-form field builder
    pub edit_form_fields: String,
    /// Edit-form value population hook
    pub edit_form_values: String,
    /// Search/filter field builder
    pub query_fields: String,
    /// Table column builder
    pub table_columns: String,
    /// Action bar component
    pub topbar: String,
    /// Create page component
    pub create_page: String,
    /// Edit page component
    pub edit_page: String,
    /// View page component
    pub view_page: String,
    /// List page component
    pub list_page: String,
    /// Route array
    pub routes: String,
}

impl ComponentNames {
    fn new(entity: &str, camel: &str) -> Self {
        Self {
            create_form_fields: format!("get{entity}CreateFormFields"),
            edit_form_fields: format!("get{entity}EditFormFields"),
            edit_form_values: format!("use{entity}EditFormValues"),
            query_fields: format!("get{entity}QueryFields"),
            table_columns: format!("get{entity}Columns"),
            topbar: format!("{entity}Topbar"),
            create_page: format!("{entity}CreatePage"),
            edit_page: format!("{entity}EditPage"),
            view_page: format!("{entity}ViewPage"),
            list_page: format!("{entity}ListPage"),
            routes: format!("{camel}Routes"),
        }
    }
}

/// Names derived from one declared relation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationNames {
    /// Cardinality
    pub relation_type: RelationType,
    /// Property on the entity (`orders`)
    pub field_name: String,
    /// Property in `PascalCase`, used as binding suffix (`Orders`)
    pub suffix: String,
    /// Type name of the related entity (`Order`)
    pub target_type: String,
    /// REST collection of the related entity (`/api/Orders`)
    pub target_url: String,
    /// Front-end route of the related entity (`/orders`)
    pub target_route: String,
    /// Option loader in `relations.ts` (`loadOrderOptions`)
    pub loader: String,
    /// Fetch binding (`getProductOrders`)
    pub get: String,
    /// Add (many) or set (one) binding
    pub attach: String,
    /// Remove binding
    pub detach: String,
    /// Fetch hook
    pub use_get: String,
    /// Add/set hook
    pub use_attach: String,
    /// Remove hook
    pub use_detach: String,
    /// Tab component on view and list pages
    pub tab_component: String,
    /// Form key holding the related id (`profileId`)
    pub form_field: String,
    /// Relation must be set
    pub is_required: bool,
}

impl RelationNames {
    fn new(entity: &str, api_prefix: &str, relation: &EntityRelation) -> Self {
        let field_name = relation.effective_field_name();
        let suffix = NameHelpers::to_pascal_case(&field_name);
        let target_type = NameHelpers::to_pascal_case(&relation.target_entity);
        let target_plural = NameHelpers::pluralize(&target_type);
        let attach_verb = if relation.relation_type.is_many() {
            "add"
        } else {
            "set"
        };
        let attach_hook_verb = if relation.relation_type.is_many() {
            "Add"
        } else {
            "Set"
        };

        Self {
            relation_type: relation.relation_type,
            target_url: format!("{api_prefix}/{target_plural}"),
            target_route: format!("/{}", NameHelpers::to_kebab_case(&target_plural)),
            loader: format!("load{target_type}Options"),
            get: format!("get{entity}{suffix}"),
            attach: format!("{attach_verb}{entity}{suffix}"),
            detach: format!("remove{entity}{suffix}"),
            use_get: format!("use{entity}{suffix}"),
            use_attach: format!("use{attach_hook_verb}{entity}{suffix}"),
            use_detach: format!("useRemove{entity}{suffix}"),
            tab_component: format!("{entity}{suffix}Tab"),
            form_field: format!("{field_name}Id"),
            is_required: relation.is_required,
            field_name,
            suffix,
            target_type,
        }
    }

    /// Whether the relation holds a collection
    #[must_use]
    pub const fn is_many(&self) -> bool {
        self.relation_type.is_many()
    }
}

/// Every shared identifier of one feature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingContext {
    /// Entity type name (`Product`)
    pub entity: String,
    /// Human-readable singular name
    pub display_name: String,
    /// Human-readable plural name
    pub display_plural: String,
    /// Lower-cased entity name (`product`), used for file paths
    pub lower: String,
    /// Plural name (`Products`)
    pub plural: String,
    /// API service object and cache-key root (`productService`)
    pub service: String,
    /// REST collection path (`/api/Products`)
    pub base_url: String,
    /// Front-end route base (`/products`)
    pub route_base: String,
    /// Name of the entity type declaration file without extension
    pub type_module: String,
    /// List query parameter type (`ProductQueryParams`)
    pub query_params_type: String,
    /// Create/update payload type (`ProductInput`)
    pub input_type: String,
    /// Custom endpoints are generated
    pub custom_api: bool,
    /// File upload endpoint is generated
    pub file_upload: bool,
    /// API bindings
    pub endpoints: EndpointNames,
    /// Data hooks
    pub hooks: HookNames,
    /// Builders and components
    pub components: ComponentNames,
    /// One entry per relation with a target entity, in declaration order
    pub relations: Vec<RelationNames>,
}

impl NamingContext {
    /// Derive the naming context for a feature
    ///
    /// # Examples
    ///
    /// ```
    /// # use feature_builder::model::FeatureConfig;
    /// # use feature_builder::naming::NamingContext;
    /// let ctx = NamingContext::new(&FeatureConfig::new("Product"), &[]);
    /// assert_eq!(ctx.base_url, "/api/Products");
    /// assert_eq!(ctx.endpoints.list, "getProductList");
    /// assert_eq!(ctx.service, "productService");
    /// ```
    #[must_use]
    pub fn new(config: &FeatureConfig, relations: &[EntityRelation]) -> Self {
        let entity = type_name(&config.name);
        let lower = config.name.to_lowercase();
        let camel = NameHelpers::to_camel_case(&config.name);
        let plural = config.effective_plural_name();
        let api_prefix = config.effective_api_prefix();

        let display_name = if config.display_name.trim().is_empty() {
            NameHelpers::to_title(&config.name)
        } else {
            config.display_name.clone()
        };

        Self {
            display_plural: NameHelpers::to_title(&plural),
            service: format!("{lower}Service"),
            base_url: format!("{api_prefix}/{plural}"),
            route_base: format!("/{}", NameHelpers::to_kebab_case(&plural)),
            type_module: lower.clone(),
            query_params_type: format!("{entity}QueryParams"),
            input_type: format!("{entity}Input"),
            custom_api: config.has_custom_api,
            file_upload: config.has_custom_api && config.has_files,
            endpoints: EndpointNames::new(&entity),
            hooks: HookNames::new(&entity, &camel),
            components: ComponentNames::new(&entity, &camel),
            relations: relations
                .iter()
                .filter(|relation| !relation.target_entity.trim().is_empty())
                .map(|relation| RelationNames::new(&entity, &api_prefix, relation))
                .filter(|names| !names.target_type.is_empty())
                .collect(),
            display_name,
            entity,
            lower,
            plural,
        }
    }

    /// Cache-key root shared by every query of this entity
    #[must_use]
    pub fn cache_root(&self) -> &str {
        &self.service
    }

    /// Names of every standalone binding `apis.ts` exports, in output order
    #[must_use]
    pub fn api_bindings(&self) -> Vec<&str> {
        let endpoints = &self.endpoints;
        let mut bindings = vec![
            endpoints.create.as_str(),
            endpoints.get.as_str(),
            endpoints.update.as_str(),
            endpoints.delete.as_str(),
            endpoints.list.as_str(),
        ];

        if self.custom_api {
            bindings.push(&endpoints.search);
            bindings.push(&endpoints.toggle_status);
            if self.file_upload {
                bindings.push(&endpoints.upload_file);
            }
            for relation in &self.relations {
                bindings.push(&relation.get);
                bindings.push(&relation.attach);
                bindings.push(&relation.detach);
            }
        }

        bindings
    }

    /// Whether relation endpoints and hooks exist
    #[must_use]
    pub const fn relation_endpoints(&self) -> bool {
        self.custom_api
    }

    /// Relations rendered as async selects in forms and link columns in tables
    pub fn one_to_one(&self) -> impl Iterator<Item = &RelationNames> {
        self.relations.iter().filter(|r| !r.is_many())
    }

    /// Distinct related entity types, in order of first appearance
    #[must_use]
    pub fn relation_targets(&self) -> Vec<&RelationNames> {
        let mut seen: Vec<&RelationNames> = Vec::new();
        for relation in &self.relations {
            if !seen.iter().any(|r| r.target_type == relation.target_type) {
                seen.push(relation);
            }
        }
        seen
    }
}

/// Entity name as a type: the validated identifier with its first letter
/// upper-cased, so acronyms like `HTTPRequest` survive
fn type_name(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

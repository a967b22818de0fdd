//! Per-artifact code generators
//!
//! Each generator turns the feature model into the text of one generated
//! file. Generators are total: they never fail and never mutate their input.
//! A generator whose artifact does not apply returns `None`.
//!
//! The public `generate_*` functions derive a [`NamingContext`] from the
//! config. The orchestrator derives it once and calls the `render`
//! functions of each module directly, so every file sees the same names.
//!
//! [`NamingContext`]: crate::naming::NamingContext

pub mod api;
pub mod entity;
pub mod forms;
pub mod hooks;
pub mod pages;
pub mod query;
pub mod relations;
pub mod scaffold;
pub mod table;
pub mod writer;

pub use api::generate_api_client;
pub use entity::generate_entity_types;
pub use forms::{generate_create_form, generate_edit_form};
pub use hooks::generate_data_hooks;
pub use pages::{generate_pages, Pages};
pub use query::generate_query_fields;
pub use relations::generate_relations_helper;
pub use scaffold::{generate_routes, generate_topbar};
pub use table::generate_table_columns;

use crate::model::EntityField;

/// Name of the primary key property, `id` when no field is primary
pub(crate) fn primary_key(fields: &[EntityField]) -> &str {
    fields
        .iter()
        .find(|f| f.is_primary)
        .map_or("id", |f| f.name.as_str())
}

//! Entity model of a feature under construction
//!
//! A feature is a [`FeatureConfig`], an ordered list of [`EntityField`]s and a
//! list of [`EntityRelation`]s. [`FeatureDefinition`] bundles the three for
//! storage as TOML or JSON.

pub mod config;
pub mod field;
pub mod relation;

pub use config::{ConfigPatch, FeatureConfig, ViewMode};
pub use field::{
    DefaultValue, EntityField, FieldKind, FieldOption, FieldPatch, FieldType, ValidationRules,
};
pub use relation::{EntityRelation, RelationPatch, RelationType};

use crate::error::{FeatureBuilderError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serializable snapshot of a whole feature
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureDefinition {
    /// Feature configuration
    #[serde(default)]
    pub config: FeatureConfig,
    /// Ordered fields
    #[serde(default)]
    pub fields: Vec<EntityField>,
    /// Declared relations
    #[serde(default)]
    pub relations: Vec<EntityRelation>,
}

impl FeatureDefinition {
    /// Parse a TOML definition
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Parse a JSON definition
    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| FeatureBuilderError::Definition(e.to_string()))
    }

    /// Render as pretty JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a definition file; `.json` files are JSON, everything else TOML
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        if is_json(path) {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Write a definition file in the format implied by its extension
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            self.to_json_string()?
        } else {
            self.to_toml_string()?
        };
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

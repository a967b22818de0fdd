//! Relationships from the entity to other named entities

use crate::naming::NameHelpers;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Relation cardinality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationType {
    /// One related record
    OneToOne,
    /// Many related records owned by this entity (default)
    #[default]
    OneToMany,
    /// Many related records shared between entities
    ManyToMany,
}

impl RelationType {
    /// Whether the relation holds a collection
    #[must_use]
    pub const fn is_many(&self) -> bool {
        matches!(self, Self::OneToMany | Self::ManyToMany)
    }

    /// Identifier used in definitions
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OneToOne => "oneToOne",
            Self::OneToMany => "oneToMany",
            Self::ManyToMany => "manyToMany",
        }
    }

    /// Property name derived from a target entity
    ///
    /// # Examples
    ///
    /// ```
    /// # use feature_builder::model::RelationType;
    /// assert_eq!(RelationType::OneToMany.derive_field_name("Order"), "orders");
    /// assert_eq!(RelationType::OneToOne.derive_field_name("Profile"), "profile");
    /// ```
    #[must_use]
    pub fn derive_field_name(&self, target_entity: &str) -> String {
        let lower = target_entity.trim().to_lowercase();
        if self.is_many() {
            NameHelpers::pluralize(&lower)
        } else {
            lower
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared relationship to another entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRelation {
    /// Stable identity
    #[serde(default)]
    pub id: String,
    /// Descriptive name
    #[serde(default)]
    pub name: String,
    /// Cardinality
    #[serde(rename = "type", default)]
    pub relation_type: RelationType,
    /// Name of the related entity
    #[serde(default)]
    pub target_entity: String,
    /// Property name on the entity; derived once from the target when empty
    #[serde(default)]
    pub field_name: String,
    /// Relation must be set
    #[serde(default)]
    pub is_required: bool,
    /// Delete related records with the entity
    #[serde(default)]
    pub cascade_delete: bool,
}

impl EntityRelation {
    /// Create an empty one-to-many relation
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            relation_type: RelationType::OneToMany,
            target_entity: String::new(),
            field_name: String::new(),
            is_required: false,
            cascade_delete: false,
        }
    }

    /// Set cardinality
    #[must_use]
    pub const fn with_type(mut self, relation_type: RelationType) -> Self {
        self.relation_type = relation_type;
        self
    }

    /// Set the target entity, deriving the field name when still empty
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target_entity = target.into();
        self.derive_field_name_once();
        self
    }

    /// Set the field name explicitly
    #[must_use]
    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = field_name.into();
        self
    }

    /// Fill `field_name` from the target entity if it is still empty
    ///
    /// Returns `true` when a name was derived. A populated field name is never
    /// overwritten.
    pub fn derive_field_name_once(&mut self) -> bool {
        if self.field_name.is_empty() && !self.target_entity.trim().is_empty() {
            self.field_name = self.relation_type.derive_field_name(&self.target_entity);
            return true;
        }
        false
    }

    /// Field name, falling back to the derived name when empty
    #[must_use]
    pub fn effective_field_name(&self) -> String {
        if self.field_name.is_empty() {
            self.relation_type.derive_field_name(&self.target_entity)
        } else {
            self.field_name.clone()
        }
    }
}

/// Partial update for an [`EntityRelation`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationPatch {
    /// New name
    pub name: Option<String>,
    /// New cardinality
    pub relation_type: Option<RelationType>,
    /// New target entity
    pub target_entity: Option<String>,
    /// New field name
    pub field_name: Option<String>,
    /// Required flag
    pub is_required: Option<bool>,
    /// Cascade flag
    pub cascade_delete: Option<bool>,
}

impl RelationPatch {
    /// Patch that only changes the target entity
    pub fn target(target: impl Into<String>) -> Self {
        Self {
            target_entity: Some(target.into()),
            ..Self::default()
        }
    }

    /// Patch that only changes the field name
    pub fn field_name(field_name: impl Into<String>) -> Self {
        Self {
            field_name: Some(field_name.into()),
            ..Self::default()
        }
    }

    /// Apply every present attribute, then derive the field name if needed
    pub fn apply(self, relation: &mut EntityRelation) {
        if let Some(name) = self.name {
            relation.name = name;
        }
        if let Some(relation_type) = self.relation_type {
            relation.relation_type = relation_type;
        }
        if let Some(target) = self.target_entity {
            relation.target_entity = target;
        }
        if let Some(field_name) = self.field_name {
            relation.field_name = field_name;
        }
        if let Some(flag) = self.is_required {
            relation.is_required = flag;
        }
        if let Some(flag) = self.cascade_delete {
            relation.cascade_delete = flag;
        }
        relation.derive_field_name_once();
    }
}

//! Builder session
//!
//! [`BuilderSession`] owns the feature under construction (config, ordered
//! fields, relations) together with the editor's selection state, and
//! exposes the mutation operations an editing surface needs. Every mutation
//! is synchronous and immediately visible to the next [`generate`] call.
//!
//! Names are validated here rather than in the generators: an entity name
//! that is not a valid identifier is rejected, field names are sanitized.
//!
//! [`generate`]: BuilderSession::generate

use crate::config::BuilderSettings;
use crate::error::{FeatureBuilderError, Result};
use crate::model::{
    ConfigPatch, EntityField, EntityRelation, FeatureConfig, FeatureDefinition, FieldPatch,
    FieldType, RelationPatch,
};
use crate::naming::NameHelpers;
use crate::orchestrator::{generate_all_code_files, ArtifactSet};

/// Timestamp-derived id source
///
/// Ids look like `field_1718000000000_3`; the sequence number keeps ids
/// unique when several are created within the same millisecond.
#[derive(Debug, Clone, Default)]
struct IdGenerator {
    seq: u64,
}

impl IdGenerator {
    fn next(&mut self, prefix: &str) -> String {
        self.seq += 1;
        let millis = chrono::Utc::now().timestamp_millis();
        format!("{prefix}_{millis}_{}", self.seq)
    }
}

/// In-memory editing session for one feature
#[derive(Debug, Clone)]
pub struct BuilderSession {
    settings: BuilderSettings,
    config: FeatureConfig,
    fields: Vec<EntityField>,
    relations: Vec<EntityRelation>,
    selected_field: Option<String>,
    selected_relation: Option<String>,
    ids: IdGenerator,
}

impl Default for BuilderSession {
    fn default() -> Self {
        Self::new(BuilderSettings::default())
    }
}

impl BuilderSession {
    /// Start a session with the default feature template
    ///
    /// The template holds a primary `id` field and a required `name` field.
    #[must_use]
    pub fn new(settings: BuilderSettings) -> Self {
        let mut session = Self {
            config: FeatureConfig::default(),
            fields: Vec::new(),
            relations: Vec::new(),
            selected_field: None,
            selected_relation: None,
            ids: IdGenerator::default(),
            settings,
        };
        session.load_template();
        session
    }

    /// Resume a session from a stored definition
    ///
    /// # Errors
    ///
    /// Returns [`FeatureBuilderError::InvalidName`] when the stored entity
    /// name is not a valid identifier.
    pub fn from_definition(
        settings: BuilderSettings,
        definition: FeatureDefinition,
    ) -> Result<Self> {
        if !NameHelpers::is_valid_variable_name(&definition.config.name) {
            return Err(FeatureBuilderError::InvalidName(definition.config.name));
        }
        let selected_field = definition.fields.first().map(|f| f.id.clone());
        let selected_relation = definition.relations.first().map(|r| r.id.clone());
        Ok(Self {
            config: definition.config,
            fields: definition.fields,
            relations: definition.relations,
            selected_field,
            selected_relation,
            ids: IdGenerator::default(),
            settings,
        })
    }

    /// Snapshot of the feature for storage
    #[must_use]
    pub fn to_definition(&self) -> FeatureDefinition {
        FeatureDefinition {
            config: self.config.clone(),
            fields: self.fields.clone(),
            relations: self.relations.clone(),
        }
    }

    /// Discard every change and return to the default template
    pub fn reset(&mut self) {
        self.load_template();
        tracing::info!(feature = %self.config.name, "Builder session reset");
    }

    fn load_template(&mut self) {
        self.config = FeatureConfig {
            api_prefix: self.settings.api_prefix.clone(),
            ..FeatureConfig::default()
        };
        self.fields = vec![
            EntityField::primary_id(),
            EntityField::new("field_name", "name").required(),
        ];
        self.relations.clear();
        self.selected_field = self.fields.first().map(|f| f.id.clone());
        self.selected_relation = None;
    }

    /// Settings the session was started with
    #[must_use]
    pub const fn settings(&self) -> &BuilderSettings {
        &self.settings
    }

    /// Current feature configuration
    #[must_use]
    pub const fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Fields in display order
    #[must_use]
    pub fn fields(&self) -> &[EntityField] {
        &self.fields
    }

    /// Declared relations
    #[must_use]
    pub fn relations(&self) -> &[EntityRelation] {
        &self.relations
    }

    /// Look up a field by id
    #[must_use]
    pub fn field(&self, id: &str) -> Option<&EntityField> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Look up a relation by id
    #[must_use]
    pub fn relation(&self, id: &str) -> Option<&EntityRelation> {
        self.relations.iter().find(|r| r.id == id)
    }

    /// Field currently selected in the editor
    #[must_use]
    pub fn selected_field(&self) -> Option<&EntityField> {
        self.selected_field.as_deref().and_then(|id| self.field(id))
    }

    /// Relation currently selected in the editor
    #[must_use]
    pub fn selected_relation(&self) -> Option<&EntityRelation> {
        self.selected_relation
            .as_deref()
            .and_then(|id| self.relation(id))
    }

    /// Patch the feature configuration
    ///
    /// # Errors
    ///
    /// Returns [`FeatureBuilderError::InvalidName`] when the new entity name
    /// is not a valid identifier; the config is left untouched.
    pub fn update_config(&mut self, patch: ConfigPatch) -> Result<()> {
        if let Some(name) = patch.name.as_deref() {
            if !NameHelpers::is_valid_variable_name(name) {
                return Err(FeatureBuilderError::InvalidName(name.to_string()));
            }
        }
        patch.apply(&mut self.config);
        tracing::trace!(feature = %self.config.name, "Config updated");
        Ok(())
    }

    /// Append a text field with synthetic defaults and select it
    ///
    /// Returns the id of the new field.
    pub fn add_field(&mut self) -> String {
        let id = self.ids.next("field");
        let name = self.unique_field_name();
        self.fields.push(EntityField::new(id.clone(), name));
        self.selected_field = Some(id.clone());
        tracing::trace!(field = %id, "Field added");
        id
    }

    fn unique_field_name(&self) -> String {
        let mut n = self.fields.len() + 1;
        loop {
            let candidate = format!("field{n}");
            if !self.fields.iter().any(|f| f.name == candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Patch one field
    ///
    /// A new name is sanitized into a valid identifier. When the patch turns
    /// the field into a choice type that has no options, default options are
    /// created. Options the caller empties explicitly stay empty.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureBuilderError::FieldNotFound`] for an unknown id.
    pub fn update_field(&mut self, id: &str, mut patch: FieldPatch) -> Result<()> {
        let option_count = self.settings.default_option_count;
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| FeatureBuilderError::FieldNotFound(id.to_string()))?;

        if let Some(name) = patch.name.take() {
            patch.name = Some(NameHelpers::sanitize_variable_name(&name));
        }
        let type_changed = patch
            .field_type
            .is_some_and(|field_type| field_type != field.field_type());
        let fill_options = type_changed && patch.options.is_none();
        patch.apply(field);

        if fill_options {
            if let Some(options) = field.kind.options_mut() {
                if options.is_empty() {
                    *options = NameHelpers::create_default_options(&field.name, option_count);
                }
            }
        }

        tracing::trace!(field = %id, "Field updated");
        Ok(())
    }

    /// Change a field's type, keeping options when both types are choices
    ///
    /// # Errors
    ///
    /// Returns [`FeatureBuilderError::FieldNotFound`] for an unknown id.
    pub fn set_field_type(&mut self, id: &str, field_type: FieldType) -> Result<()> {
        self.update_field(id, FieldPatch::field_type(field_type))
    }

    /// Remove a field, moving the selection to the first remaining field
    ///
    /// # Errors
    ///
    /// Returns [`FeatureBuilderError::FieldNotFound`] for an unknown id.
    pub fn remove_field(&mut self, id: &str) -> Result<EntityField> {
        let index = self
            .fields
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| FeatureBuilderError::FieldNotFound(id.to_string()))?;
        let removed = self.fields.remove(index);

        if self.selected_field.as_deref() == Some(id) {
            self.selected_field = self.fields.first().map(|f| f.id.clone());
        }

        tracing::trace!(field = %id, "Field removed");
        Ok(removed)
    }

    /// Move the field at `from` to `to`
    ///
    /// Fields between the two positions shift by one.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureBuilderError::IndexOutOfRange`] when either index is
    /// outside the field list.
    pub fn reorder_fields(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.fields.len();
        for index in [from, to] {
            if index >= len {
                return Err(FeatureBuilderError::IndexOutOfRange { index, len });
            }
        }

        let field = self.fields.remove(from);
        self.fields.insert(to, field);
        tracing::trace!(from, to, "Fields reordered");
        Ok(())
    }

    /// Select a field in the editor
    ///
    /// # Errors
    ///
    /// Returns [`FeatureBuilderError::FieldNotFound`] for an unknown id.
    pub fn select_field(&mut self, id: &str) -> Result<()> {
        if self.field(id).is_none() {
            return Err(FeatureBuilderError::FieldNotFound(id.to_string()));
        }
        self.selected_field = Some(id.to_string());
        Ok(())
    }

    /// Append a one-to-many relation with no target and select it
    ///
    /// Returns the id of the new relation.
    pub fn add_relation(&mut self) -> String {
        let id = self.ids.next("relation");
        self.relations.push(EntityRelation::new(id.clone()));
        self.selected_relation = Some(id.clone());
        tracing::trace!(relation = %id, "Relation added");
        id
    }

    /// Patch one relation
    ///
    /// The field name is derived from the target entity the first time a
    /// target is set while the field name is still empty.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureBuilderError::RelationNotFound`] for an unknown id.
    pub fn update_relation(&mut self, id: &str, patch: RelationPatch) -> Result<()> {
        let relation = self
            .relations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| FeatureBuilderError::RelationNotFound(id.to_string()))?;
        patch.apply(relation);
        tracing::trace!(relation = %id, field_name = %relation.field_name, "Relation updated");
        Ok(())
    }

    /// Remove a relation, moving the selection to the first remaining one
    ///
    /// # Errors
    ///
    /// Returns [`FeatureBuilderError::RelationNotFound`] for an unknown id.
    pub fn remove_relation(&mut self, id: &str) -> Result<EntityRelation> {
        let index = self
            .relations
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| FeatureBuilderError::RelationNotFound(id.to_string()))?;
        let removed = self.relations.remove(index);

        if self.selected_relation.as_deref() == Some(id) {
            self.selected_relation = self.relations.first().map(|r| r.id.clone());
        }

        tracing::trace!(relation = %id, "Relation removed");
        Ok(removed)
    }

    /// Select a relation in the editor
    ///
    /// # Errors
    ///
    /// Returns [`FeatureBuilderError::RelationNotFound`] for an unknown id.
    pub fn select_relation(&mut self, id: &str) -> Result<()> {
        if self.relation(id).is_none() {
            return Err(FeatureBuilderError::RelationNotFound(id.to_string()));
        }
        self.selected_relation = Some(id.to_string());
        Ok(())
    }

    /// Generate the artifact set for the current state
    #[must_use]
    pub fn generate(&self) -> ArtifactSet {
        generate_all_code_files(&self.config, &self.fields, &self.relations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RelationType;

    fn session_with_four_fields() -> (BuilderSession, Vec<String>) {
        let mut session = BuilderSession::default();
        let ids: Vec<String> = (0..4).map(|_| session.add_field()).collect();
        // drop the template fields so indexes match the ids
        session.remove_field("field_id").unwrap();
        session.remove_field("field_name").unwrap();
        (session, ids)
    }

    fn ids_of(session: &BuilderSession) -> Vec<String> {
        session.fields().iter().map(|f| f.id.clone()).collect()
    }

    #[test]
    fn test_default_template() {
        let session = BuilderSession::default();
        assert_eq!(session.config().name, "NewFeature");
        assert_eq!(session.fields().len(), 2);
        assert!(session.fields()[0].is_primary);
        assert_eq!(session.selected_field().unwrap().name, "id");
        assert!(session.relations().is_empty());
    }

    #[test]
    fn test_template_uses_settings_prefix() {
        let settings = BuilderSettings {
            api_prefix: "/v2".to_string(),
            ..BuilderSettings::default()
        };
        let session = BuilderSession::new(settings);
        assert_eq!(session.config().api_prefix, "/v2");
    }

    #[test]
    fn test_ids_are_unique_and_prefixed() {
        let mut session = BuilderSession::default();
        let a = session.add_field();
        let b = session.add_field();
        assert_ne!(a, b);
        assert!(a.starts_with("field_"));
        assert!(session.add_relation().starts_with("relation_"));
    }

    #[test]
    fn test_added_field_names_are_unique() {
        let mut session = BuilderSession::default();
        let a = session.add_field();
        let b = session.add_field();
        assert_ne!(session.field(&a).unwrap().name, session.field(&b).unwrap().name);
        assert_eq!(session.selected_field().unwrap().id, b);
    }

    #[test]
    fn test_update_field_isolated() {
        let (mut session, ids) = session_with_four_fields();
        let before = session.fields().to_vec();

        session
            .update_field(&ids[1], FieldPatch::label("Renamed"))
            .unwrap();

        for (i, field) in session.fields().iter().enumerate() {
            if i == 1 {
                assert_eq!(field.label, "Renamed");
                assert_eq!(field.name, before[1].name);
            } else {
                assert_eq!(field, &before[i]);
            }
        }
        assert_eq!(ids_of(&session), ids);
    }

    #[test]
    fn test_reorder_moves_and_shifts() {
        let (mut session, ids) = session_with_four_fields();
        session.reorder_fields(2, 0).unwrap();
        assert_eq!(
            ids_of(&session),
            vec![ids[2].clone(), ids[0].clone(), ids[1].clone(), ids[3].clone()]
        );

        session.reorder_fields(0, 3).unwrap();
        assert_eq!(
            ids_of(&session),
            vec![ids[0].clone(), ids[1].clone(), ids[3].clone(), ids[2].clone()]
        );
    }

    #[test]
    fn test_reorder_out_of_range() {
        let (mut session, _) = session_with_four_fields();
        let err = session.reorder_fields(1, 4).unwrap_err();
        assert!(matches!(
            err,
            FeatureBuilderError::IndexOutOfRange { index: 4, len: 4 }
        ));
    }

    #[test]
    fn test_remove_selected_field_reselects_first() {
        let (mut session, ids) = session_with_four_fields();
        session.select_field(&ids[2]).unwrap();
        session.remove_field(&ids[2]).unwrap();
        assert_eq!(session.selected_field().unwrap().id, ids[0]);

        session.select_field(&ids[3]).unwrap();
        session.remove_field(&ids[0]).unwrap();
        assert_eq!(session.selected_field().unwrap().id, ids[3]);
    }

    #[test]
    fn test_unknown_ids() {
        let mut session = BuilderSession::default();
        assert!(matches!(
            session.update_field("nope", FieldPatch::default()),
            Err(FeatureBuilderError::FieldNotFound(_))
        ));
        assert!(matches!(
            session.remove_relation("nope"),
            Err(FeatureBuilderError::RelationNotFound(_))
        ));
        assert!(session.select_field("nope").is_err());
    }

    #[test]
    fn test_invalid_entity_name_rejected() {
        let mut session = BuilderSession::default();
        let err = session
            .update_config(ConfigPatch {
                name: Some("my product".to_string()),
                ..ConfigPatch::default()
            })
            .unwrap_err();
        assert!(matches!(err, FeatureBuilderError::InvalidName(_)));
        assert_eq!(session.config().name, "NewFeature");

        session
            .update_config(ConfigPatch {
                name: Some("Product".to_string()),
                ..ConfigPatch::default()
            })
            .unwrap();
        assert_eq!(session.config().name, "Product");
    }

    #[test]
    fn test_field_name_sanitized() {
        let mut session = BuilderSession::default();
        let id = session.add_field();
        session
            .update_field(
                &id,
                FieldPatch {
                    name: Some("unit price".to_string()),
                    ..FieldPatch::default()
                },
            )
            .unwrap();
        assert_eq!(session.field(&id).unwrap().name, "unit_price");
    }

    #[test]
    fn test_choice_type_gets_default_options() {
        let mut session = BuilderSession::default();
        let id = session.add_field();
        session.set_field_type(&id, FieldType::Select).unwrap();

        let field = session.field(&id).unwrap();
        let options = field.kind.options().unwrap();
        assert_eq!(options.len(), 3);
        assert_eq!(
            options[0].value,
            format!("{}Option1", NameHelpers::to_camel_case(&field.name))
        );
    }

    #[test]
    fn test_emptied_options_are_kept() {
        let mut session = BuilderSession::default();
        let id = session.add_field();
        session.set_field_type(&id, FieldType::Select).unwrap();

        session
            .update_field(
                &id,
                FieldPatch {
                    options: Some(Vec::new()),
                    ..FieldPatch::default()
                },
            )
            .unwrap();
        assert!(session.field(&id).unwrap().kind.options().unwrap().is_empty());

        session.update_field(&id, FieldPatch::label("Status")).unwrap();
        assert!(session.field(&id).unwrap().kind.options().unwrap().is_empty());

        session.set_field_type(&id, FieldType::Radio).unwrap();
        assert_eq!(session.field(&id).unwrap().kind.options().unwrap().len(), 3);
    }

    #[test]
    fn test_relation_field_name_derived_once() {
        let mut session = BuilderSession::default();
        let id = session.add_relation();
        assert_eq!(session.relation(&id).unwrap().relation_type, RelationType::OneToMany);

        session.update_relation(&id, RelationPatch::target("Order")).unwrap();
        assert_eq!(session.relation(&id).unwrap().field_name, "orders");

        session
            .update_relation(&id, RelationPatch::field_name("myOrders"))
            .unwrap();
        session
            .update_relation(&id, RelationPatch::target("Invoice"))
            .unwrap();
        assert_eq!(session.relation(&id).unwrap().field_name, "myOrders");
    }

    #[test]
    fn test_reset_restores_template() {
        let mut session = BuilderSession::default();
        session.add_field();
        session.add_relation();
        session.reset();
        assert_eq!(session.fields().len(), 2);
        assert!(session.relations().is_empty());
        assert!(session.selected_relation().is_none());
    }

    #[test]
    fn test_definition_round_trip() {
        let mut session = BuilderSession::default();
        let id = session.add_relation();
        session.update_relation(&id, RelationPatch::target("Tag")).unwrap();

        let definition = session.to_definition();
        let restored =
            BuilderSession::from_definition(BuilderSettings::default(), definition.clone()).unwrap();
        assert_eq!(restored.to_definition(), definition);
        assert_eq!(restored.selected_relation().unwrap().id, id);
    }

    #[test]
    fn test_stored_definition_with_invalid_name_rejected() {
        let mut definition = BuilderSession::default().to_definition();
        definition.config.name = "my feature".to_string();

        let err =
            BuilderSession::from_definition(BuilderSettings::default(), definition).unwrap_err();
        assert!(matches!(err, FeatureBuilderError::InvalidName(name) if name == "my feature"));
    }

    #[test]
    fn test_untargeted_relation_does_not_break_generation() {
        let mut session = BuilderSession::default();
        session.add_relation();

        let artifacts = session.generate();
        assert!(!artifacts.contains("relations.ts"));
        let types = artifacts.get("newfeature.d.ts").unwrap();
        assert!(!types.contains(": any"));
        assert!(!artifacts.get("pages/view.tsx").unwrap().contains("NewFeatureTab"));

        let id = session.add_relation();
        session.update_relation(&id, RelationPatch::target("Tag")).unwrap();
        let helper = session.generate().get("relations.ts").unwrap().to_string();
        assert_eq!(helper.matches("function fetchRelationOptions(").count(), 1);
        assert!(helper.contains("export function loadTagOptions()"));
        assert!(!helper.contains("function loadOptions("));
    }

    #[test]
    fn test_generate_reflects_latest_state() {
        let mut session = BuilderSession::default();
        session
            .update_config(ConfigPatch {
                name: Some("Invoice".to_string()),
                ..ConfigPatch::default()
            })
            .unwrap();
        let artifacts = session.generate();
        assert!(artifacts.contains("invoice.d.ts"));
        assert!(artifacts.get("apis.ts").unwrap().contains("/api/Invoices"));
    }
}

//! Entity fields and their type system
//!
//! The fourteen UI-facing field types are modelled as a tagged union,
//! [`FieldKind`], in which only the choice types carry options. The plain
//! discriminant, [`FieldType`], keys the type-mapping tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Field type discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    /// Single-line text
    Text,
    /// Numeric input
    Number,
    /// Email address
    Email,
    /// Masked password
    Password,
    /// Multi-line text
    Textarea,
    /// Single choice dropdown
    Select,
    /// Multiple choice dropdown
    MultiSelect,
    /// Checkbox group
    Checkbox,
    /// Radio group
    Radio,
    /// Boolean toggle
    Switch,
    /// Date picker
    Date,
    /// Date range picker
    DateRange,
    /// File uploader
    Uploader,
    /// Hidden value
    Hidden,
}

impl FieldType {
    /// Every field type in declaration order
    pub const ALL: [Self; 14] = [
        Self::Text,
        Self::Number,
        Self::Email,
        Self::Password,
        Self::Textarea,
        Self::Select,
        Self::MultiSelect,
        Self::Checkbox,
        Self::Radio,
        Self::Switch,
        Self::Date,
        Self::DateRange,
        Self::Uploader,
        Self::Hidden,
    ];

    /// Identifier used in definitions and generated configs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Email => "email",
            Self::Password => "password",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::MultiSelect => "multi-select",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Switch => "switch",
            Self::Date => "date",
            Self::DateRange => "date-range",
            Self::Uploader => "uploader",
            Self::Hidden => "hidden",
        }
    }

    /// Whether fields of this type choose from a list of options
    #[must_use]
    pub const fn is_choice(&self) -> bool {
        matches!(
            self,
            Self::Select | Self::MultiSelect | Self::Checkbox | Self::Radio
        )
    }

    /// Whether generated forms lay this type out at full width
    #[must_use]
    pub const fn is_full_width(&self) -> bool {
        matches!(self, Self::Textarea | Self::Uploader)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| {
                let supported: Vec<_> = Self::ALL.iter().map(Self::as_str).collect();
                format!(
                    "Unknown field type: '{s}'. Supported types: {}",
                    supported.join(", ")
                )
            })
    }
}

/// One `{label, value}` choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Display text
    pub label: String,
    /// Stored value
    pub value: String,
}

impl FieldOption {
    /// Create a new option
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Field type together with the attributes only that type needs
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FieldKind {
    /// Single-line text
    #[default]
    Text,
    /// Numeric input
    Number,
    /// Email address
    Email,
    /// Masked password
    Password,
    /// Multi-line text
    Textarea,
    /// Single choice dropdown
    Select {
        /// Available choices
        #[serde(default)]
        options: Vec<FieldOption>,
    },
    /// Multiple choice dropdown
    MultiSelect {
        /// Available choices
        #[serde(default)]
        options: Vec<FieldOption>,
    },
    /// Checkbox group
    Checkbox {
        /// Available choices
        #[serde(default)]
        options: Vec<FieldOption>,
    },
    /// Radio group
    Radio {
        /// Available choices
        #[serde(default)]
        options: Vec<FieldOption>,
    },
    /// Boolean toggle
    Switch,
    /// Date picker
    Date,
    /// Date range picker
    DateRange,
    /// File uploader
    Uploader,
    /// Hidden value
    Hidden,
}

impl FieldKind {
    /// Build the kind for `field_type`, attaching `options` to choice types
    #[must_use]
    pub fn with_options(field_type: FieldType, options: Vec<FieldOption>) -> Self {
        match field_type {
            FieldType::Text => Self::Text,
            FieldType::Number => Self::Number,
            FieldType::Email => Self::Email,
            FieldType::Password => Self::Password,
            FieldType::Textarea => Self::Textarea,
            FieldType::Select => Self::Select { options },
            FieldType::MultiSelect => Self::MultiSelect { options },
            FieldType::Checkbox => Self::Checkbox { options },
            FieldType::Radio => Self::Radio { options },
            FieldType::Switch => Self::Switch,
            FieldType::Date => Self::Date,
            FieldType::DateRange => Self::DateRange,
            FieldType::Uploader => Self::Uploader,
            FieldType::Hidden => Self::Hidden,
        }
    }

    /// The plain type discriminant
    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        match self {
            Self::Text => FieldType::Text,
            Self::Number => FieldType::Number,
            Self::Email => FieldType::Email,
            Self::Password => FieldType::Password,
            Self::Textarea => FieldType::Textarea,
            Self::Select { .. } => FieldType::Select,
            Self::MultiSelect { .. } => FieldType::MultiSelect,
            Self::Checkbox { .. } => FieldType::Checkbox,
            Self::Radio { .. } => FieldType::Radio,
            Self::Switch => FieldType::Switch,
            Self::Date => FieldType::Date,
            Self::DateRange => FieldType::DateRange,
            Self::Uploader => FieldType::Uploader,
            Self::Hidden => FieldType::Hidden,
        }
    }

    /// Options of a choice type, `None` for every other type
    #[must_use]
    pub fn options(&self) -> Option<&[FieldOption]> {
        match self {
            Self::Select { options }
            | Self::MultiSelect { options }
            | Self::Checkbox { options }
            | Self::Radio { options } => Some(options),
            _ => None,
        }
    }

    /// Mutable options of a choice type
    pub fn options_mut(&mut self) -> Option<&mut Vec<FieldOption>> {
        match self {
            Self::Select { options }
            | Self::MultiSelect { options }
            | Self::Checkbox { options }
            | Self::Radio { options } => Some(options),
            _ => None,
        }
    }
}

/// Validation rules attached to a field
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationRules {
    /// Minimum text length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Maximum text length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Minimum numeric value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Maximum numeric value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Regular expression the value must match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Message shown when a rule fails
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationRules {
    /// Whether no rule is set
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.min_length.is_none()
            && self.max_length.is_none()
            && self.min.is_none()
            && self.max.is_none()
            && self.pattern.is_none()
    }
}

/// Initial value of a field in the create form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    /// Boolean value
    Bool(bool),
    /// Numeric value
    Number(f64),
    /// Text value
    Text(String),
    /// List of values
    List(Vec<String>),
}

const fn default_true() -> bool {
    true
}

/// One form/table/storage field of the entity
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityField {
    /// Stable identity across reorderings
    #[serde(default)]
    pub id: String,
    /// Identifier used in generated code
    pub name: String,
    /// Human-readable label
    #[serde(default)]
    pub label: String,
    /// Type and type-specific attributes
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Value must be provided
    #[serde(default)]
    pub required: bool,
    /// Primary key of the entity
    #[serde(default)]
    pub is_primary: bool,
    /// Not editable after creation
    #[serde(default)]
    pub is_read_only: bool,
    /// Offered as a search/filter field
    #[serde(default = "default_true")]
    pub is_visible: bool,
    /// Rendered as a table column
    #[serde(default = "default_true")]
    pub show_in_table: bool,
    /// Rendered in the forms
    #[serde(default = "default_true")]
    pub show_in_form: bool,
    /// Optional validation rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRules>,
    /// Optional initial value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
}

impl EntityField {
    /// Create a visible text field shown in both table and forms
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            label: crate::naming::NameHelpers::to_title(&name),
            name,
            kind: FieldKind::Text,
            required: false,
            is_primary: false,
            is_read_only: false,
            is_visible: true,
            show_in_table: true,
            show_in_form: true,
            validation: None,
            default_value: None,
        }
    }

    /// The conventional read-only primary `id` field
    #[must_use]
    pub fn primary_id() -> Self {
        Self {
            label: "ID".to_string(),
            required: true,
            is_primary: true,
            is_read_only: true,
            ..Self::new("field_id", "id")
        }
    }

    /// Set the field kind
    #[must_use]
    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Mark the field required
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the field as primary key
    #[must_use]
    pub const fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    /// Mark the field read-only
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.is_read_only = true;
        self
    }

    /// Set table/form visibility
    #[must_use]
    pub const fn shown(mut self, in_table: bool, in_form: bool) -> Self {
        self.show_in_table = in_table;
        self.show_in_form = in_form;
        self
    }

    /// Set validation rules
    #[must_use]
    pub fn with_validation(mut self, rules: ValidationRules) -> Self {
        self.validation = Some(rules);
        self
    }

    /// Set the default value
    #[must_use]
    pub fn with_default(mut self, value: DefaultValue) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Type discriminant of this field
    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }
}

/// Partial update for an [`EntityField`]
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPatch {
    /// New identifier
    pub name: Option<String>,
    /// New label
    pub label: Option<String>,
    /// New type; options of the previous choice type are carried over
    pub field_type: Option<FieldType>,
    /// Replacement options (choice types only)
    pub options: Option<Vec<FieldOption>>,
    /// Required flag
    pub required: Option<bool>,
    /// Primary flag
    pub is_primary: Option<bool>,
    /// Read-only flag
    pub is_read_only: Option<bool>,
    /// Search visibility
    pub is_visible: Option<bool>,
    /// Table visibility
    pub show_in_table: Option<bool>,
    /// Form visibility
    pub show_in_form: Option<bool>,
    /// Validation rules; `Some(None)` clears them
    pub validation: Option<Option<ValidationRules>>,
    /// Default value; `Some(None)` clears it
    pub default_value: Option<Option<DefaultValue>>,
}

impl FieldPatch {
    /// Patch that only changes the label
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    /// Patch that only changes the type
    #[must_use]
    pub fn field_type(field_type: FieldType) -> Self {
        Self {
            field_type: Some(field_type),
            ..Self::default()
        }
    }

    /// Apply every present attribute to `field`
    pub fn apply(self, field: &mut EntityField) {
        if let Some(name) = self.name {
            field.name = name;
        }
        if let Some(label) = self.label {
            field.label = label;
        }
        if let Some(field_type) = self.field_type {
            if field_type != field.field_type() {
                let carried = field.kind.options().map(<[FieldOption]>::to_vec).unwrap_or_default();
                field.kind = FieldKind::with_options(field_type, carried);
            }
        }
        if let Some(options) = self.options {
            if let Some(current) = field.kind.options_mut() {
                *current = options;
            }
        }
        if let Some(flag) = self.required {
            field.required = flag;
        }
        if let Some(flag) = self.is_primary {
            field.is_primary = flag;
        }
        if let Some(flag) = self.is_read_only {
            field.is_read_only = flag;
        }
        if let Some(flag) = self.is_visible {
            field.is_visible = flag;
        }
        if let Some(flag) = self.show_in_table {
            field.show_in_table = flag;
        }
        if let Some(flag) = self.show_in_form {
            field.show_in_form = flag;
        }
        if let Some(validation) = self.validation {
            field.validation = validation;
        }
        if let Some(value) = self.default_value {
            field.default_value = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_round_trip_names() {
        for field_type in FieldType::ALL {
            assert_eq!(field_type.as_str().parse::<FieldType>().unwrap(), field_type);
        }
        assert!("rich-text".parse::<FieldType>().is_err());
    }

    #[test]
    fn test_only_choice_kinds_carry_options() {
        for field_type in FieldType::ALL {
            let kind = FieldKind::with_options(field_type, vec![FieldOption::new("A", "a")]);
            assert_eq!(kind.field_type(), field_type);
            assert_eq!(kind.options().is_some(), field_type.is_choice());
        }
    }

    #[test]
    fn test_deserialize_flattened_kind() {
        let field: EntityField = serde_json::from_str(
            r#"{
                "name": "status",
                "label": "Status",
                "type": "select",
                "options": [{"label": "Active", "value": "active"}],
                "required": true
            }"#,
        )
        .unwrap();

        assert_eq!(field.field_type(), FieldType::Select);
        assert_eq!(field.kind.options().unwrap()[0].value, "active");
        assert!(field.required);
        assert!(field.show_in_table);
        assert!(field.is_visible);
        assert!(!field.is_primary);
    }

    #[test]
    fn test_deserialize_multi_word_type() {
        let field: EntityField =
            serde_json::from_str(r#"{"name": "period", "type": "date-range"}"#).unwrap();
        assert_eq!(field.kind, FieldKind::DateRange);
    }

    #[test]
    fn test_patch_type_change_carries_options() {
        let mut field = EntityField::new("f1", "size").with_kind(FieldKind::Select {
            options: vec![FieldOption::new("Small", "s")],
        });

        FieldPatch::field_type(FieldType::Radio).apply(&mut field);
        assert_eq!(field.kind.options().unwrap().len(), 1);

        FieldPatch::field_type(FieldType::Number).apply(&mut field);
        assert_eq!(field.kind, FieldKind::Number);
        assert!(field.kind.options().is_none());
    }

    #[test]
    fn test_patch_clears_validation() {
        let mut field = EntityField::new("f1", "title").with_validation(ValidationRules {
            max_length: Some(80),
            ..ValidationRules::default()
        });

        FieldPatch {
            validation: Some(None),
            ..FieldPatch::default()
        }
        .apply(&mut field);
        assert!(field.validation.is_none());
    }

    #[test]
    fn test_default_value_untagged() {
        let value: DefaultValue = serde_json::from_str("true").unwrap();
        assert_eq!(value, DefaultValue::Bool(true));
        let value: DefaultValue = serde_json::from_str("3").unwrap();
        assert_eq!(value, DefaultValue::Number(3.0));
        let value: DefaultValue = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert_eq!(value, DefaultValue::List(vec!["a".to_string(), "b".to_string()]));
    }
}

//! Static type-mapping tables
//!
//! Maps each field type to the TypeScript type used in generated code and to
//! the icon identifier shown next to it in editors. Both tables are total
//! over [`FieldType`]; lookups by name fall back to [`UNKNOWN_TS_TYPE`] and
//! [`UNKNOWN_ICON`].

use crate::model::FieldType;

/// Type used for field types the table does not know
pub const UNKNOWN_TS_TYPE: &str = "any";

/// Icon used for field types the table does not know
pub const UNKNOWN_ICON: &str = "HelpCircle";

const TS_TYPES: [(FieldType, &str); 14] = [
    (FieldType::Text, "string"),
    (FieldType::Number, "number"),
    (FieldType::Email, "string"),
    (FieldType::Password, "string"),
    (FieldType::Textarea, "string"),
    (FieldType::Select, "string"),
    (FieldType::MultiSelect, "string[]"),
    (FieldType::Checkbox, "string[]"),
    (FieldType::Radio, "string"),
    (FieldType::Switch, "boolean"),
    (FieldType::Date, "string"),
    (FieldType::DateRange, "{ from: string; to: string }"),
    (FieldType::Uploader, "string[]"),
    (FieldType::Hidden, "string"),
];

const ICONS: [(FieldType, &str); 14] = [
    (FieldType::Text, "Type"),
    (FieldType::Number, "Hash"),
    (FieldType::Email, "Mail"),
    (FieldType::Password, "Lock"),
    (FieldType::Textarea, "AlignLeft"),
    (FieldType::Select, "ChevronDown"),
    (FieldType::MultiSelect, "ListChecks"),
    (FieldType::Checkbox, "CheckSquare"),
    (FieldType::Radio, "CircleDot"),
    (FieldType::Switch, "ToggleLeft"),
    (FieldType::Date, "Calendar"),
    (FieldType::DateRange, "CalendarRange"),
    (FieldType::Uploader, "Upload"),
    (FieldType::Hidden, "EyeOff"),
];

fn lookup(
    table: &[(FieldType, &'static str)],
    field_type: FieldType,
    fallback: &'static str,
) -> &'static str {
    table
        .iter()
        .find(|(t, _)| *t == field_type)
        .map_or(fallback, |(_, value)| *value)
}

/// TypeScript type for a field type
///
/// # Examples
///
/// ```
/// # use feature_builder::{model::FieldType, types};
/// assert_eq!(types::ts_type(FieldType::MultiSelect), "string[]");
/// assert_eq!(types::ts_type(FieldType::Switch), "boolean");
/// ```
#[must_use]
pub fn ts_type(field_type: FieldType) -> &'static str {
    lookup(&TS_TYPES, field_type, UNKNOWN_TS_TYPE)
}

/// Icon identifier for a field type
#[must_use]
pub fn icon(field_type: FieldType) -> &'static str {
    lookup(&ICONS, field_type, UNKNOWN_ICON)
}

/// TypeScript type for a field type given by name, `any` when unknown
#[must_use]
pub fn ts_type_for_name(type_name: &str) -> &'static str {
    type_name
        .parse::<FieldType>()
        .map_or(UNKNOWN_TS_TYPE, ts_type)
}

/// Icon identifier for a field type given by name
#[must_use]
pub fn icon_for_name(type_name: &str) -> &'static str {
    type_name.parse::<FieldType>().map_or(UNKNOWN_ICON, icon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_cover_every_type() {
        for field_type in FieldType::ALL {
            assert_ne!(ts_type(field_type), UNKNOWN_TS_TYPE, "{field_type}");
            assert_ne!(icon(field_type), UNKNOWN_ICON, "{field_type}");
        }
    }

    #[test]
    fn test_known_mappings() {
        assert_eq!(ts_type(FieldType::Text), "string");
        assert_eq!(ts_type(FieldType::Number), "number");
        assert_eq!(ts_type(FieldType::DateRange), "{ from: string; to: string }");
        assert_eq!(icon(FieldType::Date), "Calendar");
    }

    #[test]
    fn test_unknown_names_fall_back() {
        assert_eq!(ts_type_for_name("rich-text"), "any");
        assert_eq!(icon_for_name("rich-text"), "HelpCircle");
        assert_eq!(ts_type_for_name("switch"), "boolean");
        assert_eq!(icon_for_name("uploader"), "Upload");
    }
}

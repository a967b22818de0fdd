//! Naming helper functions for code generation
//!
//! Case conversion, English pluralization and identifier sanitization used by
//! every generator. All functions are pure.

use crate::model::FieldOption;
use inflector::Inflector;
use once_cell::sync::Lazy;
use regex::Regex;

static VARIABLE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z_$][a-zA-Z0-9_$]*$").expect("variable name pattern is valid")
});

/// Irregular nouns, singular to plural, all lowercase
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("ox", "oxen"),
    ("datum", "data"),
    ("medium", "media"),
    ("criterion", "criteria"),
    ("phenomenon", "phenomena"),
    ("analysis", "analyses"),
    ("thesis", "theses"),
    ("crisis", "crises"),
];

/// Naming helpers shared by all generators
pub struct NameHelpers;

impl NameHelpers {
    /// Convert string to camelCase
    ///
    /// # Examples
    ///
    /// ```
    /// # use feature_builder::naming::NameHelpers;
    /// assert_eq!(NameHelpers::to_camel_case("user profile"), "userProfile");
    /// assert_eq!(NameHelpers::to_camel_case("UserProfile"), "userProfile");
    /// ```
    #[must_use]
    pub fn to_camel_case(input: &str) -> String {
        input.to_camel_case()
    }

    /// Convert string to `PascalCase`
    ///
    /// # Examples
    ///
    /// ```
    /// # use feature_builder::naming::NameHelpers;
    /// assert_eq!(NameHelpers::to_pascal_case("user profile"), "UserProfile");
    /// assert_eq!(NameHelpers::to_pascal_case("myOrders"), "MyOrders");
    /// ```
    #[must_use]
    pub fn to_pascal_case(input: &str) -> String {
        input.to_pascal_case()
    }

    /// Convert string to `snake_case`
    ///
    /// # Examples
    ///
    /// ```
    /// # use feature_builder::naming::NameHelpers;
    /// assert_eq!(NameHelpers::to_snake_case("UserProfile"), "user_profile");
    /// ```
    #[must_use]
    pub fn to_snake_case(input: &str) -> String {
        input.to_snake_case()
    }

    /// Convert string to kebab-case
    ///
    /// # Examples
    ///
    /// ```
    /// # use feature_builder::naming::NameHelpers;
    /// assert_eq!(NameHelpers::to_kebab_case("UserProfile"), "user-profile");
    /// ```
    #[must_use]
    pub fn to_kebab_case(input: &str) -> String {
        input.to_kebab_case()
    }

    /// Human-readable title ("UserProfile" becomes "User Profile")
    #[must_use]
    pub fn to_title(input: &str) -> String {
        input.to_title_case()
    }

    /// Pluralize an English noun
    ///
    /// Irregular nouns are matched case-insensitively and keep the input's
    /// capitalization. Otherwise consonant + `y` becomes `ies`, words ending
    /// in `s`, `x`, `z`, `ch` or `sh` take `es`, and everything else takes `s`.
    ///
    /// Already-plural input is pluralized again.
    ///
    /// # Examples
    ///
    /// ```
    /// # use feature_builder::naming::NameHelpers;
    /// assert_eq!(NameHelpers::pluralize("Person"), "People");
    /// assert_eq!(NameHelpers::pluralize("category"), "categories");
    /// assert_eq!(NameHelpers::pluralize("day"), "days");
    /// assert_eq!(NameHelpers::pluralize("box"), "boxes");
    /// ```
    #[must_use]
    pub fn pluralize(input: &str) -> String {
        let lower = input.to_lowercase();

        if let Some((_, plural)) = IRREGULAR_PLURALS
            .iter()
            .find(|(singular, _)| *singular == lower)
        {
            return Self::match_capitalization(input, plural);
        }

        if let Some(stem) = lower.strip_suffix('y') {
            let consonant_before = stem
                .chars()
                .last()
                .is_some_and(|c| c.is_alphabetic() && !"aeiou".contains(c));
            if consonant_before {
                let keep = input.len() - 1;
                return format!("{}ies", &input[..keep]);
            }
        }

        if ["s", "x", "z", "ch", "sh"]
            .iter()
            .any(|suffix| lower.ends_with(suffix))
        {
            return format!("{input}es");
        }

        format!("{input}s")
    }

    /// Apply the capitalization style of `original` to `replacement`
    fn match_capitalization(original: &str, replacement: &str) -> String {
        let has_letters = original.chars().any(char::is_alphabetic);
        if has_letters && original.chars().filter(|c| c.is_alphabetic()).all(char::is_uppercase)
            && original.chars().count() > 1
        {
            return replacement.to_uppercase();
        }

        let mut chars = replacement.chars();
        match (original.chars().next(), chars.next()) {
            (Some(first), Some(head)) if first.is_uppercase() => {
                head.to_uppercase().chain(chars).collect()
            }
            _ => replacement.to_string(),
        }
    }

    /// Check whether `name` is a valid variable name in generated code
    ///
    /// # Examples
    ///
    /// ```
    /// # use feature_builder::naming::NameHelpers;
    /// assert!(NameHelpers::is_valid_variable_name("$scope"));
    /// assert!(!NameHelpers::is_valid_variable_name("2fast"));
    /// ```
    #[must_use]
    pub fn is_valid_variable_name(name: &str) -> bool {
        VARIABLE_NAME.is_match(name)
    }

    /// Turn arbitrary text into a valid variable name
    ///
    /// Every character outside `[a-zA-Z0-9_$]` becomes `_`, and a leading `_`
    /// is added when the result would not start with a letter, `_` or `$`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use feature_builder::naming::NameHelpers;
    /// assert_eq!(NameHelpers::sanitize_variable_name("first name"), "first_name");
    /// assert_eq!(NameHelpers::sanitize_variable_name("1st"), "_1st");
    /// ```
    #[must_use]
    pub fn sanitize_variable_name(name: &str) -> String {
        let replaced: String = name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        let valid_start = replaced
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');

        if valid_start {
            replaced
        } else {
            format!("_{replaced}")
        }
    }

    /// Synthetic options for a freshly created choice field
    ///
    /// # Examples
    ///
    /// ```
    /// # use feature_builder::naming::NameHelpers;
    /// let options = NameHelpers::create_default_options("order status", 2);
    /// assert_eq!(options[0].label, "Option 1");
    /// assert_eq!(options[1].value, "orderStatusOption2");
    /// ```
    #[must_use]
    pub fn create_default_options(name: &str, count: usize) -> Vec<FieldOption> {
        let base = Self::to_camel_case(name);
        (1..=count)
            .map(|n| FieldOption::new(format!("Option {n}"), format!("{base}Option{n}")))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_conversions() {
        assert_eq!(NameHelpers::to_camel_case("user_profile"), "userProfile");
        assert_eq!(NameHelpers::to_pascal_case("user_profile"), "UserProfile");
        assert_eq!(NameHelpers::to_snake_case("HTTPRequest"), "http_request");
        assert_eq!(NameHelpers::to_kebab_case("simple"), "simple");
        assert_eq!(NameHelpers::to_title("UserProfile"), "User Profile");
    }

    #[test]
    fn test_pluralize_irregular_preserves_capitalization() {
        assert_eq!(NameHelpers::pluralize("person"), "people");
        assert_eq!(NameHelpers::pluralize("Person"), "People");
        assert_eq!(NameHelpers::pluralize("PERSON"), "PEOPLE");
        assert_eq!(NameHelpers::pluralize("Child"), "Children");
        assert_eq!(NameHelpers::pluralize("datum"), "data");
        assert_eq!(NameHelpers::pluralize("Analysis"), "Analyses");
    }

    #[test]
    fn test_pluralize_regular_rules() {
        assert_eq!(NameHelpers::pluralize("box"), "boxes");
        assert_eq!(NameHelpers::pluralize("category"), "categories");
        assert_eq!(NameHelpers::pluralize("Category"), "Categories");
        assert_eq!(NameHelpers::pluralize("day"), "days");
        assert_eq!(NameHelpers::pluralize("church"), "churches");
        assert_eq!(NameHelpers::pluralize("dish"), "dishes");
        assert_eq!(NameHelpers::pluralize("buzz"), "buzzes");
        assert_eq!(NameHelpers::pluralize("Product"), "Products");
    }

    #[test]
    fn test_pluralize_is_not_idempotent() {
        assert_eq!(NameHelpers::pluralize("orders"), "orderses");
    }

    #[test]
    fn test_variable_name_validation() {
        assert!(NameHelpers::is_valid_variable_name("title"));
        assert!(NameHelpers::is_valid_variable_name("_private"));
        assert!(NameHelpers::is_valid_variable_name("$el"));
        assert!(NameHelpers::is_valid_variable_name("field2"));
        assert!(!NameHelpers::is_valid_variable_name(""));
        assert!(!NameHelpers::is_valid_variable_name("9lives"));
        assert!(!NameHelpers::is_valid_variable_name("first-name"));
        assert!(!NameHelpers::is_valid_variable_name("naïve"));
    }

    #[test]
    fn test_sanitize_variable_name() {
        assert_eq!(NameHelpers::sanitize_variable_name("title"), "title");
        assert_eq!(NameHelpers::sanitize_variable_name("first-name"), "first_name");
        assert_eq!(NameHelpers::sanitize_variable_name("9lives"), "_9lives");
        assert_eq!(NameHelpers::sanitize_variable_name(""), "_");
        assert_eq!(NameHelpers::sanitize_variable_name("naïve"), "na_ve");
    }

    #[test]
    fn test_create_default_options() {
        let options = NameHelpers::create_default_options("status", 3);
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].label, "Option 1");
        assert_eq!(options[0].value, "statusOption1");
        assert_eq!(options[2].value, "statusOption3");
        assert!(NameHelpers::create_default_options("status", 0).is_empty());
    }
}

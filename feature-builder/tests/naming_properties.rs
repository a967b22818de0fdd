//! Property tests for the naming utilities

use feature_builder::naming::NameHelpers;
use proptest::prelude::*;

proptest! {
    #[test]
    fn sanitize_is_idempotent(input in ".*") {
        let once = NameHelpers::sanitize_variable_name(&input);
        prop_assert_eq!(NameHelpers::sanitize_variable_name(&once), once);
    }

    #[test]
    fn sanitize_yields_valid_identifier(input in ".*") {
        let name = NameHelpers::sanitize_variable_name(&input);
        prop_assert!(NameHelpers::is_valid_variable_name(&name), "{:?} -> {:?}", input, name);
    }

    #[test]
    fn valid_names_survive_sanitizing(name in "[a-zA-Z_$][a-zA-Z0-9_$]{0,20}") {
        prop_assert_eq!(NameHelpers::sanitize_variable_name(&name), name);
    }

    #[test]
    fn default_options_have_requested_count(name in "[a-z]{1,12}", count in 0usize..8) {
        let options = NameHelpers::create_default_options(&name, count);
        prop_assert_eq!(options.len(), count);
    }
}

#[test]
fn test_pluralize_irregulars_keep_case() {
    assert_eq!(NameHelpers::pluralize("Person"), "People");
    assert_eq!(NameHelpers::pluralize("person"), "people");
    assert_eq!(NameHelpers::pluralize("box"), "boxes");
    assert_eq!(NameHelpers::pluralize("category"), "categories");
    assert_eq!(NameHelpers::pluralize("day"), "days");
}

#[test]
fn test_pluralize_is_not_idempotent() {
    assert_eq!(NameHelpers::pluralize("Products"), "Productses");
}
